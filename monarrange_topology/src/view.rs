// Copyright 2025 the Monarrange Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;

use crate::edit::PendingEdit;
use crate::geometry::{DisplayGeometry, Orientation, Position, Size};
use crate::id::DisplayId;

/// Read-only view of one display: pending overrides laid over committed state.
///
/// Produced on demand by [`crate::TopologyModel::get_merged_view`] and never
/// stored by the model; a view goes stale after the next mutating call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergedDisplayView {
    /// The display this view describes.
    pub id: DisplayId,
    /// Pending position if any, otherwise the committed one.
    pub position: Position,
    /// Committed resolution.
    pub size: Size,
    /// Pending orientation if any, otherwise the committed one.
    pub orientation: Orientation,
    /// Committed refresh rate in hertz.
    pub refresh_rate: u32,
    /// Committed primary flag.
    pub is_primary: bool,
    /// Whether a pending edit is overlaid.
    pub has_pending: bool,
    committed_orientation: Orientation,
}

impl MergedDisplayView {
    pub(crate) fn merge(
        id: &DisplayId,
        committed: &DisplayGeometry,
        pending: Option<&PendingEdit>,
    ) -> Self {
        let merged = pending.map_or(*committed, |edit| edit.apply_to(committed));
        Self {
            id: id.clone(),
            position: merged.position,
            size: merged.size,
            orientation: merged.orientation,
            refresh_rate: merged.refresh_rate,
            is_primary: merged.is_primary,
            has_pending: pending.is_some_and(|edit| !edit.is_empty()),
            committed_orientation: committed.orientation,
        }
    }

    /// Returns the orientation the backend currently has applied.
    #[must_use]
    pub fn committed_orientation(&self) -> Orientation {
        self.committed_orientation
    }

    /// Returns the area the display covers once pending edits are applied.
    ///
    /// The committed size already reflects the committed rotation, so width and
    /// height are exchanged only when the pending orientation is a quarter turn
    /// away from it.
    #[must_use]
    pub fn footprint(&self) -> Size {
        if self.orientation.swaps_axes_from(self.committed_orientation) {
            self.size.transposed()
        } else {
            self.size
        }
    }

    /// Returns the merged geometry as a plain value.
    #[must_use]
    pub fn geometry(&self) -> DisplayGeometry {
        DisplayGeometry {
            position: self.position,
            size: self.size,
            orientation: self.orientation,
            refresh_rate: self.refresh_rate,
            is_primary: self.is_primary,
        }
    }
}

/// Multi-line summary for an information panel.
impl fmt::Display for MergedDisplayView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Resolution: {}x{}", self.size.width, self.size.height)?;
        writeln!(f, "Refresh Rate: {}Hz", self.refresh_rate)?;
        writeln!(f, "Primary: {}", if self.is_primary { "Yes" } else { "No" })?;
        writeln!(f, "Rotation: {}°", self.orientation.degrees())?;
        write!(f, "Current Position: ({}, {})", self.position.x, self.position.y)
    }
}
