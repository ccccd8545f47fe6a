// Copyright 2025 the Monarrange Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size};

use crate::config::ViewConfig;
use crate::point::{ModelPoint, ViewPoint};
use crate::util::{round_i32, trunc_i32};

/// Pan/zoom state of one canvas over model space.
///
/// `CanvasTransform` maps a model point `m` to the view point
/// `m * scale + offset`, per axis. It can be used to:
/// - Convert points between model and view coordinates, either quantized to
///   integer pixels ([`CanvasTransform::to_view`], [`CanvasTransform::to_model`])
///   or exactly ([`CanvasTransform::model_to_view_point`] and friends).
/// - Pan by a view-space delta and zoom by a factor.
/// - Compute the model rectangle currently visible through a view of a given size.
///
/// Every canvas owns its own transform; several transforms may observe the
/// same display topology independently.
#[derive(Clone, Debug)]
pub struct CanvasTransform {
    config: ViewConfig,
    scale: f64,
    offset: ViewPoint,
}

impl CanvasTransform {
    /// Creates a transform with the stock [`ViewConfig`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ViewConfig::default())
    }

    /// Creates a transform in the default state described by `config`.
    ///
    /// The configuration is [normalized](ViewConfig::normalized) first.
    #[must_use]
    pub fn with_config(config: ViewConfig) -> Self {
        let config = config.normalized();
        Self {
            config,
            scale: config.default_scale,
            offset: config.default_offset,
        }
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Returns the current scale, always within `[min_scale, max_scale]`.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the current offset: the view position of the model origin.
    #[must_use]
    pub fn offset(&self) -> ViewPoint {
        self.offset
    }

    /// Sets the scale, clamping it into the configured range.
    ///
    /// Non-finite values are ignored.
    pub fn set_scale(&mut self, scale: f64) {
        if !scale.is_finite() {
            return;
        }
        let clamped = scale.clamp(self.config.min_scale, self.config.max_scale);
        self.scale = clamped;
    }

    /// Sets the offset directly.
    pub fn set_offset(&mut self, offset: ViewPoint) {
        self.offset = offset;
    }

    /// Converts a model point to view space, truncating toward zero.
    #[must_use]
    pub fn to_view(&self, model: ModelPoint) -> ViewPoint {
        ViewPoint::new(
            trunc_i32(f64::from(model.x) * self.scale + f64::from(self.offset.x)),
            trunc_i32(f64::from(model.y) * self.scale + f64::from(self.offset.y)),
        )
    }

    /// Converts a view point to model space, truncating toward zero.
    #[must_use]
    pub fn to_model(&self, view: ViewPoint) -> ModelPoint {
        ModelPoint::new(
            trunc_i32((f64::from(view.x) - f64::from(self.offset.x)) / self.scale),
            trunc_i32((f64::from(view.y) - f64::from(self.offset.y)) / self.scale),
        )
    }

    /// Scales a model-space length into view pixels, truncating toward zero.
    #[must_use]
    pub fn extent_to_view(&self, length: u32) -> i32 {
        trunc_i32(f64::from(length) * self.scale)
    }

    /// Pans by a delta in view space. The delta is not scaled.
    pub fn pan(&mut self, dx: i32, dy: i32) {
        if dx == 0 && dy == 0 {
            return;
        }
        self.offset = ViewPoint::new(
            self.offset.x.saturating_add(dx),
            self.offset.y.saturating_add(dy),
        );
    }

    /// Multiplies the scale by `factor`, then clamps it into the configured range.
    ///
    /// Non-positive and non-finite factors are ignored.
    pub fn zoom(&mut self, factor: f64) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        self.set_scale(self.scale * factor);
    }

    /// Zooms by `factor` while keeping the model point under `anchor` fixed.
    ///
    /// The anchor stays put up to the rounding of the integer offset.
    pub fn zoom_about(&mut self, anchor: ViewPoint, factor: f64) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let old_scale = self.scale;
        let new_scale = (old_scale * factor).clamp(self.config.min_scale, self.config.max_scale);
        if new_scale == old_scale {
            return;
        }
        let anchor_model = self.view_to_model_point(anchor.to_kurbo());
        self.scale = new_scale;
        self.offset = ViewPoint::new(
            round_i32(f64::from(anchor.x) - anchor_model.x * new_scale),
            round_i32(f64::from(anchor.y) - anchor_model.y * new_scale),
        );
    }

    /// Zooms in by one configured step.
    pub fn zoom_in(&mut self) {
        self.zoom(self.config.zoom_step);
    }

    /// Zooms out by one configured step.
    pub fn zoom_out(&mut self) {
        self.zoom(1.0 / self.config.zoom_step);
    }

    /// Restores the configured default scale and offset.
    pub fn reset(&mut self) {
        self.scale = self.config.default_scale;
        self.offset = self.config.default_offset;
    }

    /// Converts a model-space point into view coordinates without quantizing.
    #[must_use]
    pub fn model_to_view_point(&self, pt: Point) -> Point {
        Point::new(
            pt.x * self.scale + f64::from(self.offset.x),
            pt.y * self.scale + f64::from(self.offset.y),
        )
    }

    /// Converts a view-space point into model coordinates without quantizing.
    #[must_use]
    pub fn view_to_model_point(&self, pt: Point) -> Point {
        Point::new(
            (pt.x - f64::from(self.offset.x)) / self.scale,
            (pt.y - f64::from(self.offset.y)) / self.scale,
        )
    }

    /// Converts a model-space rectangle into view coordinates without quantizing.
    #[must_use]
    pub fn model_to_view_rect(&self, rect: Rect) -> Rect {
        self.model_to_view_affine().transform_rect_bbox(rect)
    }

    /// Converts a view-space rectangle into model coordinates without quantizing.
    #[must_use]
    pub fn view_to_model_rect(&self, rect: Rect) -> Rect {
        Rect::from_points(
            self.view_to_model_point(rect.origin()),
            self.view_to_model_point(Point::new(rect.x1, rect.y1)),
        )
    }

    /// Returns the model rectangle visible through a view of `view_size` pixels
    /// whose top-left corner is the view origin.
    #[must_use]
    pub fn visible_model_rect(&self, view_size: Size) -> Rect {
        self.view_to_model_rect(Rect::from_origin_size(Point::ORIGIN, view_size))
    }

    /// Returns the affine map from model to view space, for renderers that
    /// draw in model coordinates.
    #[must_use]
    pub fn model_to_view_affine(&self) -> Affine {
        Affine::translate(self.offset.to_kurbo().to_vec2()) * Affine::scale(self.scale)
    }

    /// Snapshot of the current state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> CanvasTransformDebugInfo {
        CanvasTransformDebugInfo {
            scale: self.scale,
            offset: self.offset,
            min_scale: self.config.min_scale,
            max_scale: self.config.max_scale,
            model_units_per_pixel: 1.0 / self.scale,
        }
    }
}

impl Default for CanvasTransform {
    fn default() -> Self {
        Self::new()
    }
}

/// Debug snapshot of a [`CanvasTransform`] state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CanvasTransformDebugInfo {
    /// Current scale.
    pub scale: f64,
    /// Current offset.
    pub offset: ViewPoint,
    /// Smallest allowed scale.
    pub min_scale: f64,
    /// Largest allowed scale.
    pub max_scale: f64,
    /// Model pixels covered by one view pixel.
    pub model_units_per_pixel: f64,
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size};

    use super::CanvasTransform;
    use crate::config::ViewConfig;
    use crate::point::{ModelPoint, ViewPoint};

    #[test]
    fn origin_maps_to_offset() {
        let mut t = CanvasTransform::new();
        t.pan(-37, 12);
        t.zoom(1.1);
        let offset = t.offset();
        assert_eq!(t.to_view(ModelPoint::ORIGIN), offset);
        assert_eq!(t.to_model(offset), ModelPoint::ORIGIN);
    }

    #[test]
    fn drag_target_maps_into_model_space() {
        let t = CanvasTransform::new();
        assert_eq!(t.to_model(ViewPoint::new(150, 150)), ModelPoint::new(500, 500));
        assert_eq!(t.to_view(ModelPoint::new(1920, 0)), ViewPoint::new(292, 100));
    }

    #[test]
    fn conversion_truncates_toward_zero() {
        let t = CanvasTransform::new();
        // (95 - 100) / 0.1 = -50; (99 - 100) / 0.1 = -10.
        assert_eq!(t.to_model(ViewPoint::new(95, 99)), ModelPoint::new(-50, -10));
        // -15 * 0.1 + 100 = 98.5 → 98.
        assert_eq!(t.to_view(ModelPoint::new(-15, -15)), ViewPoint::new(98, 98));
    }

    #[test]
    fn pan_adds_unscaled_delta() {
        let mut t = CanvasTransform::new();
        t.pan(25, -40);
        assert_eq!(t.offset(), ViewPoint::new(125, 60));
        assert_eq!(t.scale(), 0.1);
    }

    #[test]
    fn zoom_clamps_to_limits() {
        let mut t = CanvasTransform::new();
        for _ in 0..100 {
            t.zoom(1.0 / 1.1);
        }
        assert_eq!(t.scale(), 0.01);
        for _ in 0..100 {
            t.zoom(1.1);
        }
        assert_eq!(t.scale(), 1.0);
        t.zoom_in();
        assert_eq!(t.scale(), 1.0);
    }

    #[test]
    fn zoom_ignores_degenerate_factors() {
        let mut t = CanvasTransform::new();
        t.zoom(0.0);
        t.zoom(-2.0);
        t.zoom(f64::NAN);
        t.zoom(f64::INFINITY);
        assert_eq!(t.scale(), 0.1);
    }

    #[test]
    fn reset_restores_defaults() {
        let mut t = CanvasTransform::new();
        t.pan(500, 500);
        t.zoom(3.0);
        t.reset();
        assert_eq!(t.scale(), 0.1);
        assert_eq!(t.offset(), ViewPoint::new(100, 100));
        t.reset();
        assert_eq!(t.scale(), 0.1);
        assert_eq!(t.offset(), ViewPoint::new(100, 100));
    }

    #[test]
    fn zoom_about_keeps_anchor_fixed() {
        let mut t = CanvasTransform::new();
        let anchor = ViewPoint::new(300, 200);
        let before = t.view_to_model_point(anchor.to_kurbo());
        t.zoom_about(anchor, 2.0);
        assert_eq!(t.scale(), 0.2);
        let after = t.view_to_model_point(anchor.to_kurbo());
        // Offset rounding moves the anchor by at most half a view pixel.
        let slack = 0.5 / t.scale() + 1e-9;
        assert!((after.x - before.x) <= slack && (before.x - after.x) <= slack);
        assert!((after.y - before.y) <= slack && (before.y - after.y) <= slack);
    }

    #[test]
    fn unquantized_roundtrip() {
        let mut t = CanvasTransform::new();
        t.pan(13, -7);
        t.zoom(1.1);
        let p = Point::new(1234.0, -567.0);
        let back = t.view_to_model_point(t.model_to_view_point(p));
        assert!((back.x - p.x) < 1e-9 && (p.x - back.x) < 1e-9);
        assert!((back.y - p.y) < 1e-9 && (p.y - back.y) < 1e-9);
    }

    #[test]
    fn affine_agrees_with_point_mapping() {
        let mut t = CanvasTransform::new();
        t.pan(-40, 25);
        t.zoom(1.1);
        let p = Point::new(3840.0, -1080.0);
        let mapped = t.model_to_view_affine() * p;
        let direct = t.model_to_view_point(p);
        let (dx, dy) = (mapped.x - direct.x, mapped.y - direct.y);
        assert!(dx * dx + dy * dy < 1e-18, "{mapped:?} != {direct:?}");

        let rect = t.model_to_view_rect(Rect::new(0.0, 0.0, 1920.0, 1080.0));
        let origin = t.model_to_view_point(Point::ORIGIN);
        let dw = rect.width() - 1920.0 * t.scale();
        assert!(dw * dw < 1e-18, "width {}", rect.width());
        let (ox, oy) = (rect.x0 - origin.x, rect.y0 - origin.y);
        assert!(ox * ox + oy * oy < 1e-18, "origin {:?}", rect.origin());
    }

    #[test]
    fn visible_model_rect_matches_view_edges() {
        let t = CanvasTransform::new();
        let visible = t.visible_model_rect(Size::new(600.0, 400.0));
        let expected = Rect::new(-1000.0, -1000.0, 5000.0, 3000.0);
        assert!((visible.x0 - expected.x0) < 1e-6 && (expected.x0 - visible.x0) < 1e-6);
        assert!((visible.y0 - expected.y0) < 1e-6 && (expected.y0 - visible.y0) < 1e-6);
        assert!((visible.x1 - expected.x1) < 1e-6 && (expected.x1 - visible.x1) < 1e-6);
        assert!((visible.y1 - expected.y1) < 1e-6 && (expected.y1 - visible.y1) < 1e-6);
    }

    #[test]
    fn custom_config_drives_reset_and_limits() {
        let config = ViewConfig {
            default_scale: 0.25,
            default_offset: ViewPoint::new(0, 0),
            min_scale: 0.05,
            max_scale: 0.5,
            ..ViewConfig::default()
        };
        let mut t = CanvasTransform::with_config(config);
        assert_eq!(t.scale(), 0.25);
        t.set_scale(10.0);
        assert_eq!(t.scale(), 0.5);
        t.reset();
        assert_eq!(t.scale(), 0.25);
        assert_eq!(t.offset(), ViewPoint::new(0, 0));
        let info = t.debug_info();
        assert_eq!(info.min_scale, 0.05);
        assert_eq!(info.model_units_per_pixel, 4.0);
    }
}
