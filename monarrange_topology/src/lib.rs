// Copyright 2025 the Monarrange Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Monarrange Topology: a staged editor for a multi-display layout.
//!
//! This crate keeps the _bookkeeping_ of a display arrangement: the geometry the
//! operating system currently has applied (committed state), a per-display
//! overlay of edits that have not been applied yet (pending edits), and the
//! merged view a presentation layer draws from. It does **not** know how the
//! displays are drawn or how pointer input maps onto them; see
//! `monarrange_view2d` and `monarrange_interaction` for that.
//!
//! The core type is [`TopologyModel`], which owns one [`DisplayBackend`] and
//! tracks:
//! - The committed [`DisplayGeometry`] of every attached display, in the order
//!   the backend enumerated them.
//! - At most one [`PendingEdit`] per display, overriding its position and/or
//!   orientation.
//!
//! Reads go through [`TopologyModel::get_merged_view`], which overlays the
//! pending edit on the committed geometry every time it is called. Nothing is
//! pushed to observers; callers re-pull views after every mutating call.
//!
//! ## Minimal example
//!
//! ```rust
//! use monarrange_topology::{
//!     DisplayGeometry, MemoryBackend, Orientation, Position, Size, TopologyModel,
//! };
//!
//! let backend = MemoryBackend::from_displays([
//!     ("DISPLAY1", DisplayGeometry::new(Position::new(0, 0), Size::new(1920, 1080))),
//!     ("DISPLAY2", DisplayGeometry::new(Position::new(1920, 0), Size::new(1920, 1080))),
//! ]);
//! let mut model = TopologyModel::new(backend).unwrap();
//!
//! // Stage edits; nothing reaches the backend yet.
//! assert!(model.queue_position("DISPLAY2", 0, 1080));
//! assert!(model.queue_orientation("DISPLAY2", 5));
//! assert!(!model.queue_position("NO_SUCH_DISPLAY", 5, 5));
//!
//! let view = model.get_merged_view("DISPLAY2").unwrap();
//! assert_eq!(view.position, Position::new(0, 1080));
//! assert_eq!(view.orientation, Orientation::Portrait);
//!
//! // Apply everything, then reload the committed state from the backend.
//! let report = model.commit().unwrap();
//! assert!(report.is_success());
//! assert!(!model.has_pending_changes());
//! assert_eq!(model.get_merged_view("DISPLAY2").unwrap().position, Position::new(0, 1080));
//! ```
//!
//! ## Commit semantics
//!
//! [`TopologyModel::commit`] sends one [`DisplayBackend::apply`] call per display
//! with a pending edit, in enumeration order, then exactly one
//! [`DisplayBackend::finalize_batch`]. A display counts as applied when the
//! backend answers [`ApplyCode::SUCCESS`] (zero); any other code marks it failed
//! and processing continues with the next display. Commit is not atomic across
//! displays and nothing is rolled back.
//!
//! Afterwards the pending edits are cleared according to the [`CommitPolicy`]
//! and the committed state is reloaded from the backend. With the default
//! [`CommitPolicy::ClearAll`] a failed display loses its edit and shows whatever
//! the backend reports after the reload.
//!
//! ## Errors
//!
//! Expected conditions are not errors: unknown display ids make edits return
//! `false` and lookups return `None`, and per-display apply failures are folded
//! into the [`CommitReport`]. Only a [`BackendError`] (the backend itself is
//! broken) is returned as `Err`.

mod backend;
mod edit;
mod geometry;
mod id;
mod memory;
mod model;
mod view;

pub use backend::{ApplyCode, ApplyRequest, BackendError, DisplayBackend};
pub use edit::PendingEdit;
pub use geometry::{DisplayGeometry, Orientation, Position, Size};
pub use id::DisplayId;
pub use memory::MemoryBackend;
pub use model::{CommitPolicy, CommitReport, TopologyModel};
pub use view::MergedDisplayView;
