// Copyright 2025 the Monarrange Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Rect, Size};
use monarrange_interaction::{
    GestureOutcome, InteractionController, PointerEvent, WheelEvent, display_view_rect,
};
use monarrange_topology::{
    BackendError, CommitReport, DisplayBackend, MergedDisplayView, TopologyModel,
};
use monarrange_view2d::{CanvasTransform, GridLine};
use tracing::debug;

use crate::config::EditorConfig;
use crate::fields::{FieldError, parse_position_field, parse_rotation_degrees};

/// Handle to one canvas of an [`Editor`].
///
/// Ids are never reused within one editor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanvasId(u32);

/// A view onto the shared topology: its own pan/zoom and gesture state.
#[derive(Clone, Debug)]
pub struct Canvas {
    id: CanvasId,
    transform: CanvasTransform,
    controller: InteractionController,
}

impl Canvas {
    /// Returns this canvas's id.
    #[must_use]
    pub fn id(&self) -> CanvasId {
        self.id
    }

    /// Returns the pan/zoom state.
    #[must_use]
    pub fn transform(&self) -> &CanvasTransform {
        &self.transform
    }

    /// Returns the gesture state.
    #[must_use]
    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }
}

/// Application root: one topology model shared by any number of canvases.
///
/// Every canvas reads the same model; an edit made through one canvas is seen
/// by all others on their next read. Nothing is pushed, callers re-read views
/// after each mutating call.
#[derive(Debug)]
pub struct Editor<B> {
    model: TopologyModel<B>,
    canvases: Vec<Canvas>,
    next_canvas: u32,
    config: EditorConfig,
}

impl<B: DisplayBackend> Editor<B> {
    /// Creates an editor over `backend` with no canvases.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the initial enumeration faults.
    pub fn new(backend: B, config: EditorConfig) -> Result<Self, BackendError> {
        let model = TopologyModel::new(backend)?.with_policy(config.commit.policy);
        Ok(Self {
            model,
            canvases: Vec::new(),
            next_canvas: 0,
            config,
        })
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Returns the shared model.
    #[must_use]
    pub fn model(&self) -> &TopologyModel<B> {
        &self.model
    }

    /// Returns the shared model mutably.
    pub fn model_mut(&mut self) -> &mut TopologyModel<B> {
        &mut self.model
    }

    /// Opens a canvas in its default view state.
    pub fn add_canvas(&mut self) -> CanvasId {
        let id = CanvasId(self.next_canvas);
        self.next_canvas += 1;
        self.canvases.push(Canvas {
            id,
            transform: CanvasTransform::with_config(self.config.view),
            controller: InteractionController::with_config(self.config.interaction),
        });
        debug!(canvas = id.0, "added canvas");
        id
    }

    /// Closes a canvas. Returns `false` if `id` is not open.
    pub fn remove_canvas(&mut self, id: CanvasId) -> bool {
        let before = self.canvases.len();
        self.canvases.retain(|canvas| canvas.id != id);
        before != self.canvases.len()
    }

    /// Returns an open canvas.
    #[must_use]
    pub fn canvas(&self, id: CanvasId) -> Option<&Canvas> {
        self.canvases.iter().find(|canvas| canvas.id == id)
    }

    /// Ids of all open canvases, oldest first.
    pub fn canvas_ids(&self) -> impl Iterator<Item = CanvasId> + '_ {
        self.canvases.iter().map(Canvas::id)
    }

    /// Forwards a pointer press to a canvas.
    pub fn pointer_down(&mut self, id: CanvasId, event: &PointerEvent) -> GestureOutcome {
        let Some(canvas) = find_mut(&mut self.canvases, id) else {
            return GestureOutcome::Ignored;
        };
        canvas
            .controller
            .begin_gesture(event, &self.model, &canvas.transform)
    }

    /// Forwards a pointer move to a canvas.
    pub fn pointer_move(&mut self, id: CanvasId, event: &PointerEvent) -> GestureOutcome {
        let Some(canvas) = find_mut(&mut self.canvases, id) else {
            return GestureOutcome::Ignored;
        };
        canvas
            .controller
            .update_gesture(event, &mut self.model, &mut canvas.transform)
    }

    /// Forwards a pointer release to a canvas.
    pub fn pointer_up(&mut self, id: CanvasId, event: &PointerEvent) -> GestureOutcome {
        let Some(canvas) = find_mut(&mut self.canvases, id) else {
            return GestureOutcome::Ignored;
        };
        canvas.controller.end_gesture(event)
    }

    /// Forwards wheel rotation to a canvas.
    pub fn wheel(&mut self, id: CanvasId, event: &WheelEvent) -> GestureOutcome {
        let Some(canvas) = find_mut(&mut self.canvases, id) else {
            return GestureOutcome::Ignored;
        };
        canvas.controller.wheel(event, &mut canvas.transform)
    }

    /// Restores a canvas's default scale and offset.
    pub fn reset_view(&mut self, id: CanvasId) -> bool {
        let Some(canvas) = find_mut(&mut self.canvases, id) else {
            return false;
        };
        canvas.transform.reset();
        true
    }

    /// Selects a display on a canvas. Returns `false` for unknown displays or
    /// canvases.
    pub fn select(&mut self, id: CanvasId, display: &str) -> bool {
        let Some(canvas) = find_mut(&mut self.canvases, id) else {
            return false;
        };
        canvas.controller.select(display, &self.model)
    }

    /// Merged view of the display selected on a canvas.
    #[must_use]
    pub fn selected_view(&self, id: CanvasId) -> Option<MergedDisplayView> {
        let selected = self.canvas(id)?.controller.selected()?;
        self.model.get_merged_view(selected)
    }

    /// Every display with its rectangle on a canvas, in drawing order.
    #[must_use]
    pub fn display_rects(&self, id: CanvasId) -> Vec<(MergedDisplayView, Rect)> {
        let Some(canvas) = self.canvas(id) else {
            return Vec::new();
        };
        self.model
            .merged_views()
            .map(|view| {
                let rect = display_view_rect(&view, &canvas.transform);
                (view, rect)
            })
            .collect()
    }

    /// Background grid lines for a canvas of `view_size` pixels.
    #[must_use]
    pub fn grid_lines(&self, id: CanvasId, view_size: Size) -> Vec<GridLine> {
        self.canvas(id)
            .map(|canvas| canvas.transform.grid_lines(view_size, self.config.grid))
            .unwrap_or_default()
    }

    /// Queues a position typed into the form fields.
    ///
    /// Returns `Ok(false)` if the display is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::Position`] if either field is not an integer; nothing
    /// is queued in that case.
    pub fn set_position_fields(
        &mut self,
        display: &str,
        x: &str,
        y: &str,
    ) -> Result<bool, FieldError> {
        let x = parse_position_field(x)?;
        let y = parse_position_field(y)?;
        Ok(self.model.queue_position(display, x, y))
    }

    /// Queues a rotation typed or picked in degrees.
    ///
    /// Returns `Ok(false)` if the display is unknown.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::Rotation`] if the text is not an integer.
    pub fn set_rotation_field(
        &mut self,
        display: &str,
        degrees: &str,
    ) -> Result<bool, FieldError> {
        let orientation = parse_rotation_degrees(degrees)?;
        Ok(self
            .model
            .queue_orientation(display, i32::from(orientation.turns())))
    }

    /// Commits all pending edits, then drops selections of displays that are gone.
    ///
    /// # Errors
    ///
    /// Returns the backend's error; see [`TopologyModel::commit`].
    pub fn commit(&mut self) -> Result<CommitReport, BackendError> {
        let report = self.model.commit()?;
        self.prune_selections();
        Ok(report)
    }

    /// Drops all pending edits.
    pub fn discard(&mut self) {
        self.model.discard();
    }

    /// Reloads the committed state, e.g. after a monitor was plugged in.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if enumeration faults.
    pub fn refresh(&mut self) -> Result<usize, BackendError> {
        let count = self.model.load()?;
        self.prune_selections();
        Ok(count)
    }

    fn prune_selections(&mut self) {
        for canvas in &mut self.canvases {
            let stale = canvas
                .controller
                .selected()
                .is_some_and(|id| !self.model.contains(id));
            if stale {
                canvas.controller.clear_selection();
            }
        }
    }
}

fn find_mut(canvases: &mut [Canvas], id: CanvasId) -> Option<&mut Canvas> {
    canvases.iter_mut().find(|canvas| canvas.id == id)
}
