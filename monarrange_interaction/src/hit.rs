// Copyright 2025 the Monarrange Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Display rectangles in view space and point hit testing against them.

use kurbo::Rect;
use monarrange_topology::MergedDisplayView;
use monarrange_view2d::{CanvasTransform, ModelPoint, ViewPoint};

/// Returns the rectangle a display occupies on the canvas, in view pixels.
///
/// The origin is the display position mapped with [`CanvasTransform::to_view`];
/// width and height are the footprint scaled and truncated, so a pending
/// quarter turn draws the display rotated.
#[must_use]
pub fn display_view_rect(view: &MergedDisplayView, transform: &CanvasTransform) -> Rect {
    let origin = transform.to_view(ModelPoint::new(view.position.x, view.position.y));
    let footprint = view.footprint();
    let width = transform.extent_to_view(footprint.width);
    let height = transform.extent_to_view(footprint.height);
    Rect::new(
        f64::from(origin.x),
        f64::from(origin.y),
        f64::from(origin.x) + f64::from(width),
        f64::from(origin.y) + f64::from(height),
    )
}

/// Returns the topmost display under `point`.
///
/// Displays are drawn in slice order, so when rectangles overlap the later one
/// wins. Edges count as inside.
#[must_use]
pub fn hit_test<'a>(
    views: &'a [MergedDisplayView],
    transform: &CanvasTransform,
    point: ViewPoint,
) -> Option<&'a MergedDisplayView> {
    let (x, y) = (f64::from(point.x), f64::from(point.y));
    views.iter().rev().find(|view| {
        let rect = display_view_rect(view, transform);
        rect.x0 <= x && x <= rect.x1 && rect.y0 <= y && y <= rect.y1
    })
}
