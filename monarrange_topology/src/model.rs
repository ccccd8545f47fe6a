// Copyright 2025 the Monarrange Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hashbrown::{HashMap, HashSet};
use tracing::{debug, trace, warn};

use crate::backend::{ApplyCode, ApplyRequest, BackendError, DisplayBackend};
use crate::edit::PendingEdit;
use crate::geometry::{DisplayGeometry, Orientation, Position};
use crate::id::DisplayId;
use crate::view::MergedDisplayView;

/// What happens to pending edits once a commit has run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum CommitPolicy {
    /// Every pending edit is dropped, whether or not its apply succeeded.
    #[default]
    ClearAll,
    /// Edits whose apply returned a failure code stay pending for a retry.
    RetainFailed,
}

/// Outcome of [`TopologyModel::commit`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommitReport {
    results: Vec<(DisplayId, ApplyCode)>,
    retained: usize,
}

impl CommitReport {
    /// Returns `true` if every apply returned [`ApplyCode::SUCCESS`].
    ///
    /// A commit with nothing pending is a success.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.results.iter().all(|(_, code)| code.is_success())
    }

    /// Raw result code per display, in the order the applies were issued.
    #[must_use]
    pub fn results(&self) -> &[(DisplayId, ApplyCode)] {
        &self.results
    }

    /// Displays whose apply returned a failure code.
    pub fn failed(&self) -> impl Iterator<Item = (&DisplayId, ApplyCode)> + '_ {
        self.results
            .iter()
            .filter(|(_, code)| !code.is_success())
            .map(|(id, code)| (id, *code))
    }

    /// Number of displays whose apply succeeded.
    #[must_use]
    pub fn applied_count(&self) -> usize {
        self.results.iter().filter(|(_, code)| code.is_success()).count()
    }

    /// Number of edits left pending by [`CommitPolicy::RetainFailed`].
    #[must_use]
    pub fn retained(&self) -> usize {
        self.retained
    }
}

/// Staged editor for the display arrangement reported by a [`DisplayBackend`].
///
/// See the [crate-level documentation](crate) for the commit semantics.
#[derive(Debug)]
pub struct TopologyModel<B> {
    backend: B,
    committed: Vec<(DisplayId, DisplayGeometry)>,
    pending: HashMap<DisplayId, PendingEdit>,
    policy: CommitPolicy,
}

impl<B: DisplayBackend> TopologyModel<B> {
    /// Creates a model and loads the committed state from `backend`.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if enumeration faults. No attached displays
    /// is not an error.
    pub fn new(backend: B) -> Result<Self, BackendError> {
        let mut model = Self {
            backend,
            committed: Vec::new(),
            pending: HashMap::new(),
            policy: CommitPolicy::default(),
        };
        model.load()?;
        Ok(model)
    }

    /// Sets the commit policy.
    #[must_use]
    pub fn with_policy(mut self, policy: CommitPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the commit policy.
    #[must_use]
    pub fn policy(&self) -> CommitPolicy {
        self.policy
    }

    /// Replaces the commit policy.
    pub fn set_policy(&mut self, policy: CommitPolicy) {
        self.policy = policy;
    }

    /// Re-queries the backend and replaces the committed state wholesale.
    ///
    /// Pending edits are kept for displays that are still attached and dropped
    /// for displays that vanished. If the backend lists an id twice, the first
    /// entry wins. Returns the number of displays now known.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if enumeration faults; the committed state is
    /// left as it was.
    pub fn load(&mut self) -> Result<usize, BackendError> {
        let enumerated = self.backend.enumerate().inspect_err(|err| {
            warn!(error = %err, "display enumeration failed");
        })?;

        let mut seen = HashSet::with_capacity(enumerated.len());
        let mut committed = Vec::with_capacity(enumerated.len());
        for (id, geometry) in enumerated {
            if seen.insert(id.clone()) {
                committed.push((id, geometry));
            } else {
                warn!(display = %id, "backend reported duplicate display; ignoring");
            }
        }

        let before = self.pending.len();
        self.pending.retain(|id, _| seen.contains(id));
        let dropped = before - self.pending.len();
        if dropped > 0 {
            debug!(dropped, "dropped pending edits for detached displays");
        }

        self.committed = committed;
        debug!(displays = self.committed.len(), "loaded display topology");
        Ok(self.committed.len())
    }

    /// Returns the merged view of one display, or `None` if `id` is unknown.
    #[must_use]
    pub fn get_merged_view(&self, id: &str) -> Option<MergedDisplayView> {
        let (id, geometry) = self.entry(id)?;
        Some(MergedDisplayView::merge(id, geometry, self.pending.get(id)))
    }

    /// Merged views of all displays, in enumeration order.
    pub fn merged_views(&self) -> impl Iterator<Item = MergedDisplayView> + '_ {
        self.committed
            .iter()
            .map(|(id, geometry)| MergedDisplayView::merge(id, geometry, self.pending.get(id)))
    }

    /// Every display in committed state, in enumeration order.
    pub fn list_known_displays(&self) -> impl ExactSizeIterator<Item = &DisplayId> + '_ {
        self.committed.iter().map(|(id, _)| id)
    }

    /// Returns `true` if `id` is in committed state.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entry(id).is_some()
    }

    /// Returns the committed geometry of one display.
    #[must_use]
    pub fn committed(&self, id: &str) -> Option<&DisplayGeometry> {
        self.entry(id).map(|(_, geometry)| geometry)
    }

    /// Stages a new position for `id`.
    ///
    /// Any coordinates are accepted. Returns `false` and changes nothing if `id`
    /// is unknown.
    pub fn queue_position(&mut self, id: &str, x: i32, y: i32) -> bool {
        let Some(id) = self.known_id(id) else {
            trace!(display = id, "ignoring position edit for unknown display");
            return false;
        };
        trace!(display = %id, x, y, "queued position");
        self.pending.entry(id).or_default().position = Some(Position::new(x, y));
        true
    }

    /// Stages a new orientation for `id`, normalizing `turns` modulo 4.
    ///
    /// Negative turn counts wrap around: `-1` stores
    /// [`Orientation::PortraitFlipped`]. Returns `false` and changes nothing if
    /// `id` is unknown.
    pub fn queue_orientation(&mut self, id: &str, turns: i32) -> bool {
        let Some(id) = self.known_id(id) else {
            trace!(display = id, "ignoring orientation edit for unknown display");
            return false;
        };
        let orientation = Orientation::from_turns(turns);
        trace!(display = %id, turns = orientation.turns(), "queued orientation");
        self.pending.entry(id).or_default().orientation = Some(orientation);
        true
    }

    /// Returns the pending edit for `id`, if any.
    #[must_use]
    pub fn pending(&self, id: &str) -> Option<&PendingEdit> {
        self.pending.get(id)
    }

    /// Returns `true` if any display has a pending edit.
    #[must_use]
    pub fn has_pending_changes(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Number of displays with a pending edit.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Pushes every pending edit to the backend and reloads committed state.
    ///
    /// Each display with a pending edit gets one apply call carrying its merged
    /// position and orientation, in enumeration order. A non-zero code marks that
    /// display failed and the remaining displays are still applied. After the
    /// applies, the batch is finalized exactly once. Pending edits are then
    /// cleared per the [`CommitPolicy`] and the committed state is reloaded.
    ///
    /// # Errors
    ///
    /// If an apply faults, the remaining applies are skipped, the batch is still
    /// finalized once, pending edits are left untouched, nothing is reloaded, and
    /// the fault is returned. A faulting finalize is handled the same way. A
    /// fault while reloading is returned after the pending edits were cleared.
    pub fn commit(&mut self) -> Result<CommitReport, BackendError> {
        let mut results = Vec::with_capacity(self.pending.len());
        let mut fault = None;

        for (id, geometry) in &self.committed {
            let Some(edit) = self.pending.get(id) else {
                continue;
            };
            let merged = edit.apply_to(geometry);
            let request = ApplyRequest {
                id: id.clone(),
                position: merged.position,
                orientation: merged.orientation,
            };
            match self.backend.apply(request) {
                Ok(code) => {
                    if !code.is_success() {
                        warn!(display = %id, code = code.0, "display rejected new settings");
                    }
                    results.push((id.clone(), code));
                }
                Err(err) => {
                    warn!(display = %id, error = %err, "applying display settings faulted");
                    fault = Some(err);
                    break;
                }
            }
        }

        let finalized = self.backend.finalize_batch();
        if let Some(err) = fault {
            if let Err(finalize_err) = &finalized {
                warn!(error = %finalize_err, "finalizing after a faulted apply also failed");
            }
            return Err(err);
        }
        finalized.inspect_err(|err| warn!(error = %err, "finalizing display changes failed"))?;

        match self.policy {
            CommitPolicy::ClearAll => self.pending.clear(),
            CommitPolicy::RetainFailed => {
                let failed: HashSet<&DisplayId> = results
                    .iter()
                    .filter(|(_, code)| !code.is_success())
                    .map(|(id, _)| id)
                    .collect();
                self.pending.retain(|id, _| failed.contains(id));
            }
        }
        self.load()?;

        // Counted after the reload, which drops edits of vanished displays.
        let report = CommitReport {
            results,
            retained: self.pending.len(),
        };
        debug!(
            applied = report.applied_count(),
            failed = report.results.len() - report.applied_count(),
            retained = report.retained,
            "committed display changes"
        );
        Ok(report)
    }

    /// Drops every pending edit without touching the backend.
    pub fn discard(&mut self) {
        if !self.pending.is_empty() {
            debug!(count = self.pending.len(), "discarded pending edits");
        }
        self.pending.clear();
    }

    /// Returns the backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Returns the backend mutably, e.g. to script a test double.
    ///
    /// Changes made through it are not visible until the next [`load`](Self::load).
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    fn entry(&self, id: &str) -> Option<&(DisplayId, DisplayGeometry)> {
        self.committed.iter().find(|(known, _)| known.as_str() == id)
    }

    fn known_id(&self, id: &str) -> Option<DisplayId> {
        self.entry(id).map(|(known, _)| known.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::{CommitPolicy, TopologyModel};
    use crate::backend::ApplyCode;
    use crate::geometry::{DisplayGeometry, Orientation, Position, Size};
    use crate::memory::MemoryBackend;

    fn two_displays() -> MemoryBackend {
        MemoryBackend::from_displays([
            (
                "DISPLAY1",
                DisplayGeometry::new(Position::new(0, 0), Size::new(1920, 1080)).primary(),
            ),
            (
                "DISPLAY2",
                DisplayGeometry::new(Position::new(1920, 0), Size::new(1920, 1080)),
            ),
        ])
    }

    #[test]
    fn edits_accumulate_per_display() {
        let mut model = TopologyModel::new(two_displays()).unwrap();
        assert!(model.queue_position("DISPLAY1", 10, 10));
        assert!(model.queue_position("DISPLAY1", 100, 200));
        assert!(model.queue_orientation("DISPLAY1", 2));
        assert_eq!(model.pending_count(), 1);
        let edit = model.pending("DISPLAY1").unwrap();
        assert_eq!(edit.position, Some(Position::new(100, 200)));
        assert_eq!(edit.orientation, Some(Orientation::LandscapeFlipped));
        assert!(model.pending("DISPLAY2").is_none());
    }

    #[test]
    fn load_keeps_edits_of_attached_displays_only() {
        let mut model = TopologyModel::new(two_displays()).unwrap();
        model.queue_position("DISPLAY1", 5, 5);
        model.queue_position("DISPLAY2", 6, 6);
        model.backend_mut().detach("DISPLAY2");

        assert_eq!(model.load().unwrap(), 1);
        assert!(model.pending("DISPLAY1").is_some());
        assert!(model.pending("DISPLAY2").is_none());
        assert!(model.get_merged_view("DISPLAY2").is_none());
    }

    #[test]
    fn duplicate_ids_keep_first_entry() {
        let backend = MemoryBackend::from_displays([
            ("DISPLAY1", DisplayGeometry::new(Position::new(0, 0), Size::new(800, 600))),
            ("DISPLAY1", DisplayGeometry::new(Position::new(9, 9), Size::new(640, 480))),
        ]);
        let model = TopologyModel::new(backend).unwrap();
        assert_eq!(model.list_known_displays().len(), 1);
        assert_eq!(model.committed("DISPLAY1").unwrap().size, Size::new(800, 600));
    }

    #[test]
    fn failed_load_keeps_previous_state() {
        let mut model = TopologyModel::new(two_displays()).unwrap();
        model.backend_mut().fault_on_enumerate("adapter reset");
        assert!(model.load().is_err());
        assert_eq!(model.list_known_displays().len(), 2);
    }

    #[test]
    fn empty_commit_still_finalizes_once() {
        let mut model = TopologyModel::new(two_displays()).unwrap();
        let report = model.commit().unwrap();
        assert!(report.is_success());
        assert!(report.results().is_empty());
        assert_eq!(model.backend().apply_calls(), 0);
        assert_eq!(model.backend().finalize_calls(), 1);
    }

    #[test]
    fn report_counts_failures() {
        let mut model = TopologyModel::new(two_displays())
            .unwrap()
            .with_policy(CommitPolicy::RetainFailed);
        model.backend_mut().fail_with("DISPLAY2", ApplyCode(-1));
        model.queue_position("DISPLAY1", 0, 1080);
        model.queue_position("DISPLAY2", 0, -1080);

        let report = model.commit().unwrap();
        assert!(!report.is_success());
        assert_eq!(report.applied_count(), 1);
        let failed: Vec<_> = report.failed().map(|(id, code)| (id.as_str(), code)).collect();
        assert_eq!(failed, [("DISPLAY2", ApplyCode(-1))]);
        assert_eq!(report.retained(), 1);
        assert_eq!(
            model.pending("DISPLAY2").unwrap().position,
            Some(Position::new(0, -1080))
        );
    }
}
