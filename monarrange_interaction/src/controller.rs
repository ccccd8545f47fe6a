// Copyright 2025 the Monarrange Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use monarrange_topology::{DisplayBackend, DisplayId, TopologyModel};
use monarrange_view2d::{CanvasTransform, ModelPoint, ViewPoint};
use tracing::trace;

use crate::config::{DragAnchor, InteractionConfig};
use crate::drag::DragState;
use crate::hit::{display_view_rect, hit_test};
use crate::input::{PointerButton, PointerEvent, WheelEvent};

/// What the controller is doing with the current pointer sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Pointer moves pan the canvas.
    Panning,
    /// Pointer moves reposition this display.
    DraggingDisplay(DisplayId),
}

/// Effect of one input event, for the presentation layer to react to.
#[derive(Clone, Debug, PartialEq)]
pub enum GestureOutcome {
    /// The event changed nothing.
    Ignored,
    /// A pan gesture started.
    PanStarted,
    /// A drag started on this display, which is now selected.
    DragStarted(DisplayId),
    /// The canvas offset moved by this view-space delta.
    Panned {
        /// Horizontal delta.
        dx: i32,
        /// Vertical delta.
        dy: i32,
    },
    /// A new position was queued for a dragged display.
    Moved {
        /// Dragged display.
        display: DisplayId,
        /// Queued model position.
        position: ModelPoint,
    },
    /// The canvas scrolled vertically by this many view pixels.
    Scrolled {
        /// Offset change.
        dy: i32,
    },
    /// The canvas zoomed; carries the resulting scale.
    Zoomed {
        /// Scale after the event.
        scale: f64,
    },
    /// The active gesture ended.
    Ended,
}

/// Turns pointer and wheel input on one canvas into transform changes and
/// pending topology edits.
///
/// Exactly one of [`Mode::Idle`], [`Mode::Panning`] and
/// [`Mode::DraggingDisplay`] is active at a time. A press with the pan modifier
/// pans; a press on a display drags it and selects it; a press elsewhere does
/// nothing. Wheel input is handled in any mode.
///
/// The controller holds no reference to the model or transform; both are
/// passed into each call, so one model can be shared by several canvases.
#[derive(Clone, Debug, Default)]
pub struct InteractionController {
    config: InteractionConfig,
    mode: Mode,
    drag: DragState,
    grab: (i32, i32),
    selected: Option<DisplayId>,
}

impl InteractionController {
    /// Creates an idle controller with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an idle controller with `config`.
    #[must_use]
    pub fn with_config(config: InteractionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// Returns the current mode.
    #[must_use]
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Returns `true` if no gesture is in progress.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.mode == Mode::Idle
    }

    /// Returns the selected display, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&DisplayId> {
        self.selected.as_ref()
    }

    /// Selects `id` if the model knows it, replacing any previous selection.
    ///
    /// Returns `false` and keeps the current selection for unknown ids.
    pub fn select<B: DisplayBackend>(&mut self, id: &str, model: &TopologyModel<B>) -> bool {
        let Some(known) = model.list_known_displays().find(|known| known.as_str() == id) else {
            return false;
        };
        self.selected = Some(known.clone());
        true
    }

    /// Clears the selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Handles a pointer press.
    ///
    /// Only the primary button starts gestures. A press while another gesture is
    /// active ends that gesture first.
    pub fn begin_gesture<B: DisplayBackend>(
        &mut self,
        event: &PointerEvent,
        model: &TopologyModel<B>,
        transform: &CanvasTransform,
    ) -> GestureOutcome {
        if event.button != PointerButton::Primary {
            return GestureOutcome::Ignored;
        }
        if !self.is_idle() {
            trace!(mode = ?self.mode, "press during active gesture; ending it");
            self.reset_gesture();
        }

        if event.modifiers.contains(self.config.pan_modifier.flag()) {
            self.mode = Mode::Panning;
            self.drag.start(event.position);
            trace!(x = event.position.x, y = event.position.y, "pan started");
            return GestureOutcome::PanStarted;
        }

        let views: Vec<_> = model.merged_views().collect();
        let Some(hit) = hit_test(&views, transform, event.position) else {
            return GestureOutcome::Ignored;
        };
        let rect = display_view_rect(hit, transform);
        self.grab = match self.config.drag_anchor {
            DragAnchor::Pointer => (0, 0),
            DragAnchor::GrabOffset => {
                // Rect corners are integral, see `display_view_rect`.
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "view rect origins come from i32 coordinates"
                )]
                let origin = ViewPoint::new(rect.x0 as i32, rect.y0 as i32);
                event.position.delta_from(origin)
            }
        };
        let id = hit.id.clone();
        trace!(display = %id, x = event.position.x, y = event.position.y, "drag started");
        self.selected = Some(id.clone());
        self.mode = Mode::DraggingDisplay(id.clone());
        self.drag.start(event.position);
        GestureOutcome::DragStarted(id)
    }

    /// Handles a pointer move.
    ///
    /// While panning, the view-space delta since the last event is added to the
    /// transform offset. While dragging, the pointer (less the grab offset, if
    /// configured) is mapped to model space and queued as the display's new
    /// position.
    pub fn update_gesture<B: DisplayBackend>(
        &mut self,
        event: &PointerEvent,
        model: &mut TopologyModel<B>,
        transform: &mut CanvasTransform,
    ) -> GestureOutcome {
        let Some((dx, dy)) = self.drag.update(event.position) else {
            return GestureOutcome::Ignored;
        };
        match &self.mode {
            Mode::Idle => GestureOutcome::Ignored,
            Mode::Panning => {
                transform.pan(dx, dy);
                GestureOutcome::Panned { dx, dy }
            }
            Mode::DraggingDisplay(id) => {
                let id = id.clone();
                let (gx, gy) = self.grab;
                let target = ViewPoint::new(
                    event.position.x.saturating_sub(gx),
                    event.position.y.saturating_sub(gy),
                );
                let position = transform.to_model(target);
                if !model.queue_position(&id, position.x, position.y) {
                    trace!(display = %id, "dragged display vanished; ending drag");
                    self.reset_gesture();
                    return GestureOutcome::Ignored;
                }
                GestureOutcome::Moved {
                    display: id,
                    position,
                }
            }
        }
    }

    /// Handles a pointer release, returning to [`Mode::Idle`].
    pub fn end_gesture(&mut self, event: &PointerEvent) -> GestureOutcome {
        if self.is_idle() {
            return GestureOutcome::Ignored;
        }
        trace!(mode = ?self.mode, x = event.position.x, y = event.position.y, "gesture ended");
        self.reset_gesture();
        GestureOutcome::Ended
    }

    /// Handles wheel rotation.
    ///
    /// Without modifiers the canvas scrolls vertically by the configured step per
    /// tick. With the zoom modifier each tick zooms one step in or out. Any other
    /// modifier combination, and zero ticks, do nothing.
    pub fn wheel(&mut self, event: &WheelEvent, transform: &mut CanvasTransform) -> GestureOutcome {
        if event.ticks == 0 {
            return GestureOutcome::Ignored;
        }
        if event.modifiers.is_empty() {
            let dy = event
                .ticks
                .saturating_mul(transform.config().scroll_step)
                .saturating_neg();
            transform.pan(0, dy);
            return GestureOutcome::Scrolled { dy };
        }
        if !event.modifiers.contains(self.config.zoom_modifier.flag()) {
            return GestureOutcome::Ignored;
        }
        if self.config.suppress_zoom_while_dragging
            && matches!(self.mode, Mode::DraggingDisplay(_))
        {
            return GestureOutcome::Ignored;
        }

        let step = transform.config().zoom_step;
        let factor = if event.ticks > 0 { step } else { 1.0 / step };
        for _ in 0..event.ticks.unsigned_abs() {
            let before = transform.scale();
            if self.config.zoom_about_pointer {
                transform.zoom_about(event.position, factor);
            } else {
                transform.zoom(factor);
            }
            if transform.scale() == before {
                break;
            }
        }
        trace!(ticks = event.ticks, scale = transform.scale(), "zoomed");
        GestureOutcome::Zoomed {
            scale: transform.scale(),
        }
    }

    fn reset_gesture(&mut self) {
        self.mode = Mode::Idle;
        self.drag.end();
        self.grab = (0, 0);
    }
}
