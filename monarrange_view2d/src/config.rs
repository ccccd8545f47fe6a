// Copyright 2025 the Monarrange Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::point::ViewPoint;

/// Tunables for a [`crate::CanvasTransform`].
///
/// The defaults reproduce the stock canvas: a tenth-scale view with the model
/// origin drawn at view `(100, 100)`, zoomable between `0.01` and `1.0` in
/// steps of `1.1` per wheel tick.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct ViewConfig {
    /// Scale restored by [`crate::CanvasTransform::reset`].
    pub default_scale: f64,
    /// Offset restored by [`crate::CanvasTransform::reset`].
    pub default_offset: ViewPoint,
    /// Smallest allowed scale.
    pub min_scale: f64,
    /// Largest allowed scale.
    pub max_scale: f64,
    /// Zoom factor applied per wheel tick; zooming out divides by it.
    pub zoom_step: f64,
    /// View pixels scrolled per unmodified wheel tick.
    pub scroll_step: i32,
}

impl ViewConfig {
    /// Default scale.
    pub const DEFAULT_SCALE: f64 = 0.1;
    /// Default offset.
    pub const DEFAULT_OFFSET: ViewPoint = ViewPoint::new(100, 100);
    /// Default minimum scale.
    pub const MIN_SCALE: f64 = 0.01;
    /// Default maximum scale.
    pub const MAX_SCALE: f64 = 1.0;
    /// Default zoom step.
    pub const ZOOM_STEP: f64 = 1.1;
    /// Default scroll step.
    pub const SCROLL_STEP: i32 = 50;

    /// Returns a copy with `min_scale <= max_scale` and the default scale
    /// clamped into that range.
    ///
    /// Non-finite or non-positive limits fall back to the stock limits.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if !(self.min_scale.is_finite() && self.min_scale > 0.0) {
            self.min_scale = Self::MIN_SCALE;
        }
        if !(self.max_scale.is_finite() && self.max_scale > 0.0) {
            self.max_scale = Self::MAX_SCALE;
        }
        if self.min_scale > self.max_scale {
            core::mem::swap(&mut self.min_scale, &mut self.max_scale);
        }
        if !self.default_scale.is_finite() {
            self.default_scale = Self::DEFAULT_SCALE;
        }
        self.default_scale = self.default_scale.clamp(self.min_scale, self.max_scale);
        if !(self.zoom_step.is_finite() && self.zoom_step > 1.0) {
            self.zoom_step = Self::ZOOM_STEP;
        }
        self
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            default_scale: Self::DEFAULT_SCALE,
            default_offset: Self::DEFAULT_OFFSET,
            min_scale: Self::MIN_SCALE,
            max_scale: Self::MAX_SCALE,
            zoom_step: Self::ZOOM_STEP,
            scroll_step: Self::SCROLL_STEP,
        }
    }
}

/// Spacing of background grid lines, in model pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct GridSpacing {
    /// Distance between minor lines.
    pub minor: u32,
    /// Distance between major (labelled) lines.
    pub major: u32,
}

impl Default for GridSpacing {
    fn default() -> Self {
        Self {
            minor: 100,
            major: 500,
        }
    }
}
