// Copyright 2025 the Monarrange Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monarrange View 2D: the pan/zoom transform of a display-arrangement canvas.
//!
//! A canvas shows the virtual desktop (model space, in real display pixels)
//! scaled down and translated into its own pixel grid (view space). This crate
//! is the headless model of that mapping. It provides:
//! - [`CanvasTransform`]: the `scale` + `offset` pair, with pan, zoom, and reset.
//! - Integer conversion between [`ModelPoint`] and [`ViewPoint`], truncating
//!   toward zero, as used for pointer input and display placement.
//! - Unquantized conversion of Kurbo points and rectangles, for rendering.
//! - The visible model-space rectangle and the grid lines crossing it.
//!
//! It does **not** own any displays or any rendering backend. Callers keep the
//! display topology elsewhere and use a [`CanvasTransform`] per canvas to place
//! it on screen and to map pointer gestures back into model space.
//!
//! ## Minimal example
//!
//! ```rust
//! use monarrange_view2d::{CanvasTransform, ModelPoint, ViewPoint};
//!
//! // Default view: scale 0.1, model origin drawn at view (100, 100).
//! let mut transform = CanvasTransform::new();
//! assert_eq!(transform.to_view(ModelPoint::new(0, 0)), ViewPoint::new(100, 100));
//!
//! // A pointer at view (150, 150) sits over model (500, 500).
//! assert_eq!(transform.to_model(ViewPoint::new(150, 150)), ModelPoint::new(500, 500));
//!
//! // Pan by a view-space delta; zoom by a factor, clamped to the scale limits.
//! transform.pan(10, -20);
//! transform.zoom(1.1);
//! transform.reset();
//! assert_eq!(transform.scale(), 0.1);
//! ```
//!
//! ## Design notes
//!
//! - Zoom is uniform and always within `[min_scale, max_scale]`, never zero.
//! - Panning operates in view space and is not scaled.
//! - Integer conversions are exact inverses up to one view pixel: a model point
//!   survives `to_view` then `to_model` within `ceil(1 / scale)` model pixels,
//!   and a view point survives `to_model` then `to_view` within one pixel.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod config;
mod grid;
mod point;
mod transform;
mod util;

pub use config::{GridSpacing, ViewConfig};
pub use grid::{GridAxis, GridLine};
pub use point::{ModelPoint, ViewPoint};
pub use transform::{CanvasTransform, CanvasTransformDebugInfo};
