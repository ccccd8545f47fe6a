// Copyright 2025 the Monarrange Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monarrange Interaction: pointer and wheel gestures on a display canvas.
//!
//! This crate sits between a presentation layer and the two headless models:
//! - `monarrange_view2d`, whose [`CanvasTransform`](monarrange_view2d::CanvasTransform)
//!   is changed by panning, scrolling and zooming.
//! - `monarrange_topology`, whose [`TopologyModel`](monarrange_topology::TopologyModel)
//!   receives a pending position edit for every move of a dragged display.
//!
//! The core type is [`InteractionController`]. The presentation layer forwards
//! pointer presses, moves and releases to [`InteractionController::begin_gesture`],
//! [`InteractionController::update_gesture`] and [`InteractionController::end_gesture`],
//! and wheel events to [`InteractionController::wheel`]. Each call returns a
//! [`GestureOutcome`] telling the caller what to redraw.
//!
//! ## Minimal example
//!
//! ```rust
//! use monarrange_interaction::{GestureOutcome, InteractionController, PointerEvent};
//! use monarrange_topology::{DisplayGeometry, MemoryBackend, Position, Size, TopologyModel};
//! use monarrange_view2d::CanvasTransform;
//!
//! let mut model = TopologyModel::new(MemoryBackend::from_displays([(
//!     "DISPLAY1",
//!     DisplayGeometry::new(Position::new(0, 0), Size::new(1920, 1080)),
//! )]))
//! .unwrap();
//! let mut transform = CanvasTransform::new();
//! let mut controller = InteractionController::new();
//!
//! // Press on the display (drawn at view (100, 100)), move, release.
//! controller.begin_gesture(&PointerEvent::at(100, 100), &model, &transform);
//! controller.update_gesture(&PointerEvent::at(150, 150), &mut model, &mut transform);
//! assert_eq!(controller.end_gesture(&PointerEvent::at(150, 150)), GestureOutcome::Ended);
//!
//! let view = model.get_merged_view("DISPLAY1").unwrap();
//! assert_eq!(view.position, Position::new(500, 500));
//! ```
//!
//! Hit testing is a plain point-in-rectangle scan over the merged views in
//! view space; see [`hit_test`] and [`display_view_rect`].

mod config;
mod controller;
mod hit;

pub mod drag;
pub mod input;

pub use config::{DragAnchor, InteractionConfig};
pub use controller::{GestureOutcome, InteractionController, Mode};
pub use hit::{display_view_rect, hit_test};
pub use input::{ModifierKey, Modifiers, PointerButton, PointerEvent, WheelEvent};
