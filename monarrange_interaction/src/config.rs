// Copyright 2025 the Monarrange Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::input::ModifierKey;

/// Which point of a dragged display follows the pointer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum DragAnchor {
    /// The display's top-left corner jumps to the pointer.
    #[default]
    Pointer,
    /// The display keeps the offset between its corner and the press location.
    GrabOffset,
}

/// Tunables for an [`crate::InteractionController`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct InteractionConfig {
    /// Held on press to pan instead of dragging a display.
    pub pan_modifier: ModifierKey,
    /// Held on wheel to zoom instead of scrolling.
    pub zoom_modifier: ModifierKey,
    /// Drag placement rule.
    pub drag_anchor: DragAnchor,
    /// Ignore zoom while a display is being dragged.
    pub suppress_zoom_while_dragging: bool,
    /// Keep the model point under the pointer fixed while zooming.
    pub zoom_about_pointer: bool,
}
