// Copyright 2025 the Monarrange Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::geometry::{DisplayGeometry, Orientation, Position};

/// Staged, not yet applied change to one display.
///
/// Either override may be absent: a display can have only a position edit,
/// only an orientation edit, or both. Size, refresh rate and the primary flag
/// are never editable.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PendingEdit {
    /// Replacement position, if any.
    pub position: Option<Position>,
    /// Replacement orientation, if any. Always normalized.
    pub orientation: Option<Orientation>,
}

impl PendingEdit {
    /// Returns `true` if neither field is overridden.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.position.is_none() && self.orientation.is_none()
    }

    /// Overlays this edit on committed geometry.
    #[must_use]
    pub fn apply_to(&self, committed: &DisplayGeometry) -> DisplayGeometry {
        DisplayGeometry {
            position: self.position.unwrap_or(committed.position),
            orientation: self.orientation.unwrap_or(committed.orientation),
            ..*committed
        }
    }
}
