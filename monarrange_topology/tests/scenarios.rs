// Copyright 2025 the Monarrange Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end behavior of the topology model against the in-memory backend.

use monarrange_topology::{
    ApplyCode, ApplyRequest, BackendError, CommitPolicy, DisplayBackend, DisplayGeometry,
    DisplayId, MemoryBackend, Orientation, Position, Size, TopologyModel,
};

fn horizontal_pair() -> MemoryBackend {
    MemoryBackend::from_displays([
        (
            "DISPLAY1",
            DisplayGeometry::new(Position::new(0, 0), Size::new(1920, 1080))
                .with_refresh_rate(60)
                .primary(),
        ),
        (
            "DISPLAY2",
            DisplayGeometry::new(Position::new(1920, 0), Size::new(1920, 1080))
                .with_refresh_rate(60),
        ),
    ])
}

#[test]
fn merge_overlay_and_discard() {
    let mut model = TopologyModel::new(horizontal_pair()).unwrap();
    assert!(model.queue_position("DISPLAY1", 100, 200));

    let view = model.get_merged_view("DISPLAY1").unwrap();
    assert_eq!(view.position, Position::new(100, 200));
    assert_eq!(view.size, Size::new(1920, 1080));
    assert!(view.is_primary);
    assert!(view.has_pending);

    model.discard();
    let view = model.get_merged_view("DISPLAY1").unwrap();
    assert_eq!(view.position, Position::new(0, 0));
    assert!(!view.has_pending);
    assert_eq!(model.backend().apply_calls(), 0);
    assert_eq!(model.backend().finalize_calls(), 0);
}

#[test]
fn unknown_display_is_a_no_op() {
    let mut model = TopologyModel::new(horizontal_pair()).unwrap();
    assert!(!model.queue_position("NO_SUCH_DISPLAY", 5, 5));
    assert!(!model.queue_orientation("NO_SUCH_DISPLAY", 1));
    assert!(!model.has_pending_changes());
    assert!(model.get_merged_view("NO_SUCH_DISPLAY").is_none());
}

#[test]
fn orientation_is_stored_modulo_four() {
    let mut model = TopologyModel::new(horizontal_pair()).unwrap();
    model.queue_orientation("DISPLAY1", 5);
    assert_eq!(
        model.pending("DISPLAY1").unwrap().orientation,
        Some(Orientation::Portrait)
    );
    model.queue_orientation("DISPLAY1", -1);
    assert_eq!(
        model.pending("DISPLAY1").unwrap().orientation,
        Some(Orientation::PortraitFlipped)
    );
    assert_eq!(model.pending("DISPLAY1").unwrap().position, None);
}

#[test]
fn no_op_edits_leave_merged_view_equal_to_committed() {
    let mut model = TopologyModel::new(horizontal_pair()).unwrap();
    model.queue_position("DISPLAY1", 0, 0);
    model.queue_position("DISPLAY2", 1920, 0);

    for id in ["DISPLAY1", "DISPLAY2"] {
        let view = model.get_merged_view(id).unwrap();
        assert_eq!(view.geometry(), *model.committed(id).unwrap());
    }
}

#[test]
fn commit_applies_then_reloads() {
    let mut model = TopologyModel::new(horizontal_pair()).unwrap();
    model.queue_position("DISPLAY2", 0, 1080);
    model.queue_orientation("DISPLAY1", 1);

    let report = model.commit().unwrap();
    assert!(report.is_success());
    assert_eq!(report.results().len(), 2);
    assert!(!model.has_pending_changes());
    assert_eq!(model.backend().finalize_calls(), 1);

    let second = model.get_merged_view("DISPLAY2").unwrap();
    assert_eq!(second.position, Position::new(0, 1080));
    let first = model.get_merged_view("DISPLAY1").unwrap();
    assert_eq!(first.orientation, Orientation::Portrait);
    assert_eq!(first.size, Size::new(1080, 1920));
    assert_eq!(first.footprint(), Size::new(1080, 1920));
}

#[test]
fn failed_apply_clears_pending_and_reverts() {
    let mut model = TopologyModel::new(horizontal_pair()).unwrap();
    model.backend_mut().fail_with("DISPLAY2", ApplyCode(-1));
    model.queue_position("DISPLAY1", -1920, 0);
    model.queue_position("DISPLAY2", 0, 1080);

    let report = model.commit().unwrap();
    assert!(!report.is_success());
    assert_eq!(report.retained(), 0);
    assert!(!model.has_pending_changes());
    assert_eq!(model.backend().apply_calls(), 2);
    assert_eq!(model.backend().finalize_calls(), 1);

    assert_eq!(
        model.get_merged_view("DISPLAY1").unwrap().position,
        Position::new(-1920, 0)
    );
    assert_eq!(
        model.get_merged_view("DISPLAY2").unwrap().position,
        Position::new(1920, 0)
    );
}

#[test]
fn retain_failed_keeps_only_rejected_edits() {
    let mut model = TopologyModel::new(horizontal_pair())
        .unwrap()
        .with_policy(CommitPolicy::RetainFailed);
    model.backend_mut().fail_with("DISPLAY2", ApplyCode(-2));
    model.queue_position("DISPLAY1", -1920, 0);
    model.queue_position("DISPLAY2", 0, 1080);

    let report = model.commit().unwrap();
    assert_eq!(report.retained(), 1);
    assert!(model.pending("DISPLAY1").is_none());
    assert!(model.get_merged_view("DISPLAY2").unwrap().has_pending);

    model.backend_mut().clear_failures();
    assert!(model.commit().unwrap().is_success());
    assert!(!model.has_pending_changes());
    assert_eq!(
        model.get_merged_view("DISPLAY2").unwrap().position,
        Position::new(0, 1080)
    );
}

/// Unplugs one display while the batch is being finalized.
struct UnplugOnFinalize {
    inner: MemoryBackend,
    victim: &'static str,
}

impl DisplayBackend for UnplugOnFinalize {
    fn enumerate(&self) -> Result<Vec<(DisplayId, DisplayGeometry)>, BackendError> {
        self.inner.enumerate()
    }

    fn apply(&mut self, request: ApplyRequest) -> Result<ApplyCode, BackendError> {
        self.inner.apply(request)
    }

    fn finalize_batch(&mut self) -> Result<(), BackendError> {
        self.inner.finalize_batch()?;
        self.inner.detach(self.victim);
        Ok(())
    }
}

#[test]
fn retained_count_excludes_displays_gone_after_reload() {
    let mut inner = horizontal_pair();
    inner.fail_with("DISPLAY2", ApplyCode(-2));
    let backend = UnplugOnFinalize {
        inner,
        victim: "DISPLAY2",
    };
    let mut model = TopologyModel::new(backend)
        .unwrap()
        .with_policy(CommitPolicy::RetainFailed);
    model.queue_position("DISPLAY2", 0, 1080);

    let report = model.commit().unwrap();
    assert!(!report.is_success(), "the apply was rejected");
    assert_eq!(report.retained(), 0, "the rejected display is gone");
    assert_eq!(report.retained(), model.pending_count());
    assert!(!model.contains("DISPLAY2"));
}

#[test]
fn faulting_apply_keeps_everything_pending() {
    let mut model = TopologyModel::new(horizontal_pair()).unwrap();
    model.backend_mut().fault_on_apply("DISPLAY1", "device removed");
    model.queue_position("DISPLAY1", 10, 10);
    model.queue_position("DISPLAY2", 20, 20);

    assert!(model.commit().is_err());
    assert_eq!(model.pending_count(), 2);
    assert_eq!(model.backend().apply_calls(), 1);
    assert_eq!(model.backend().finalize_calls(), 1);
    assert_eq!(
        model.committed("DISPLAY1").unwrap().position,
        Position::new(0, 0)
    );
}

#[test]
fn faulting_finalize_keeps_everything_pending() {
    let mut model = TopologyModel::new(horizontal_pair()).unwrap();
    model.backend_mut().fault_on_finalize("validation failed");
    model.queue_position("DISPLAY2", 0, 1080);

    assert!(model.commit().is_err());
    assert_eq!(model.pending_count(), 1);
}

#[test]
fn empty_backend_is_a_valid_state() {
    let model = TopologyModel::new(MemoryBackend::new()).unwrap();
    assert_eq!(model.list_known_displays().len(), 0);
    assert_eq!(model.merged_views().count(), 0);
}

#[test]
fn merged_views_follow_enumeration_order() {
    let model = TopologyModel::new(horizontal_pair()).unwrap();
    let ids: Vec<_> = model.merged_views().map(|view| view.id).collect();
    assert_eq!(ids.len(), 2);
    assert_eq!(ids[0].as_str(), "DISPLAY1");
    assert_eq!(ids[1].as_str(), "DISPLAY2");
}
