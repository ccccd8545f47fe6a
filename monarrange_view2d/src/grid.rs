// Copyright 2025 the Monarrange Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Background grid lines for a canvas.

use alloc::vec::Vec;

use kurbo::Size;

use crate::config::GridSpacing;
use crate::transform::CanvasTransform;
use crate::util::{floor_i64, trunc_i32};

/// Orientation of a grid line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridAxis {
    /// A vertical line at a fixed model `x`.
    Vertical,
    /// A horizontal line at a fixed model `y`.
    Horizontal,
}

/// One background grid line.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLine {
    /// Which way the line runs.
    pub axis: GridAxis,
    /// Model coordinate of the line (an `x` for vertical lines, a `y` otherwise).
    pub model: i64,
    /// View coordinate of the line, unquantized.
    pub view: f64,
    /// Whether the line falls on a major step and should be emphasized and labelled.
    pub major: bool,
}

impl CanvasTransform {
    /// Computes the grid lines crossing a view of `view_size` pixels.
    ///
    /// Lines are emitted in paint order: major vertical, major horizontal,
    /// minor vertical, then minor horizontal. Each run starts at the multiple of
    /// its step at or below the visible edge and continues one step past the
    /// far edge. Minor lines that coincide with a major line are skipped.
    ///
    /// Returns nothing when either step is zero.
    #[must_use]
    pub fn grid_lines(&self, view_size: Size, spacing: GridSpacing) -> Vec<GridLine> {
        let mut lines = Vec::new();
        if spacing.minor == 0 || spacing.major == 0 {
            return lines;
        }
        let visible = self.visible_model_rect(view_size);
        let major = i64::from(spacing.major);
        let minor = i64::from(spacing.minor);

        for (axis, start, end) in [
            (GridAxis::Vertical, visible.x0, visible.x1),
            (GridAxis::Horizontal, visible.y0, visible.y1),
        ] {
            for model in steps(start, end, major) {
                lines.push(self.grid_line(axis, model, true));
            }
        }
        for (axis, start, end) in [
            (GridAxis::Vertical, visible.x0, visible.x1),
            (GridAxis::Horizontal, visible.y0, visible.y1),
        ] {
            for model in steps(start, end, minor).filter(|m| m % major != 0) {
                lines.push(self.grid_line(axis, model, false));
            }
        }
        lines
    }

    #[allow(
        clippy::cast_precision_loss,
        reason = "grid coordinates are far inside the exact f64 integer range"
    )]
    fn grid_line(&self, axis: GridAxis, model: i64, major: bool) -> GridLine {
        let origin = match axis {
            GridAxis::Vertical => self.offset().x,
            GridAxis::Horizontal => self.offset().y,
        };
        GridLine {
            axis,
            model,
            view: model as f64 * self.scale() + f64::from(origin),
            major,
        }
    }
}

/// Multiples of `step` from the one at or below `start` up to, but excluding,
/// `trunc(end) + step`.
fn steps(start: f64, end: f64, step: i64) -> impl Iterator<Item = i64> {
    let first = floor_i64(start / step as f64).saturating_mul(step);
    let last = i64::from(trunc_i32(end)).saturating_add(step);
    let count = if last > first {
        (last - first + step - 1) / step
    } else {
        0
    };
    (0..count).map(move |i| first + i * step)
}
