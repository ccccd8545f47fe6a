// Copyright 2025 the Monarrange Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monarrange: rearrange a multi-monitor layout on a pannable, zoomable canvas.
//!
//! This crate is the application root. An [`Editor`] owns exactly one
//! [`TopologyModel`](monarrange_topology::TopologyModel) and any number of
//! canvases, each with its own
//! [`CanvasTransform`](monarrange_view2d::CanvasTransform) and
//! [`InteractionController`](monarrange_interaction::InteractionController).
//! A presentation layer draws from [`Editor::display_rects`] and
//! [`Editor::grid_lines`], forwards input to [`Editor::pointer_down`] and
//! friends, and calls [`Editor::commit`] or [`Editor::discard`].
//!
//! [`EditorConfig`] gathers the settings of all layers and loads from TOML.
//! The [`fields`] module parses the numeric form fields shown beside the canvas.
//!
//! ```rust
//! use monarrange::{Editor, EditorConfig};
//! use monarrange::interaction::PointerEvent;
//! use monarrange::topology::{DisplayGeometry, MemoryBackend, Position, Size};
//!
//! let backend = MemoryBackend::from_displays([(
//!     "DISPLAY1",
//!     DisplayGeometry::new(Position::new(0, 0), Size::new(1920, 1080)),
//! )]);
//! let mut editor = Editor::new(backend, EditorConfig::default()).unwrap();
//! let canvas = editor.add_canvas();
//!
//! editor.pointer_down(canvas, &PointerEvent::at(100, 100));
//! editor.pointer_move(canvas, &PointerEvent::at(150, 150));
//! editor.pointer_up(canvas, &PointerEvent::at(150, 150));
//! assert!(editor.set_rotation_field("DISPLAY1", "90").unwrap());
//!
//! assert!(editor.commit().unwrap().is_success());
//! let view = editor.model().get_merged_view("DISPLAY1").unwrap();
//! assert_eq!(view.position, Position::new(500, 500));
//! assert_eq!(view.size, Size::new(1080, 1920));
//! ```

mod config;
mod editor;
pub mod fields;

pub use config::{CommitConfig, ConfigError, EditorConfig};
pub use editor::{Canvas, CanvasId, Editor};

pub use monarrange_interaction as interaction;
pub use monarrange_topology as topology;
pub use monarrange_view2d as view2d;
