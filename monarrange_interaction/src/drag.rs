// Copyright 2025 the Monarrange Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer tracking for one press-move-release sequence, in view pixels.

use monarrange_view2d::ViewPoint;

/// Tracks the start and last pointer position of an active gesture.
#[derive(Debug, Clone, Default, Copy)]
pub struct DragState {
    /// Where the gesture started.
    pub start_pos: Option<ViewPoint>,
    /// Last recorded pointer position.
    pub last_pos: Option<ViewPoint>,
}

impl DragState {
    /// Starts tracking from `pos`.
    pub fn start(&mut self, pos: ViewPoint) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
    }

    /// Records `pos` and returns the delta since the previous position.
    ///
    /// Returns `None` when no gesture is active.
    pub fn update(&mut self, pos: ViewPoint) -> Option<(i32, i32)> {
        self.start_pos?;
        let last = self.last_pos.replace(pos)?;
        Some(pos.delta_from(last))
    }

    /// Stops tracking.
    pub fn end(&mut self) {
        self.start_pos = None;
        self.last_pos = None;
    }
}
