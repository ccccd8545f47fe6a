// Copyright 2025 the Monarrange Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

/// An integer point in model space (virtual-desktop pixels).
///
/// Coordinates are unbounded and may be negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelPoint {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl ModelPoint {
    /// The model-space origin.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Creates a model point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Converts to a Kurbo point.
    #[must_use]
    pub fn to_kurbo(self) -> Point {
        Point::new(f64::from(self.x), f64::from(self.y))
    }
}

/// An integer point in view space (canvas pixels).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewPoint {
    /// Horizontal coordinate.
    pub x: i32,
    /// Vertical coordinate.
    pub y: i32,
}

impl ViewPoint {
    /// Creates a view point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Converts to a Kurbo point.
    #[must_use]
    pub fn to_kurbo(self) -> Point {
        Point::new(f64::from(self.x), f64::from(self.y))
    }

    /// Returns the view-space delta `self - other`, saturating at the `i32` range.
    #[must_use]
    pub fn delta_from(self, other: Self) -> (i32, i32) {
        (self.x.saturating_sub(other.x), self.y.saturating_sub(other.y))
    }
}

impl From<(i32, i32)> for ViewPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<(i32, i32)> for ModelPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}
