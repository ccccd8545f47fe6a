// Copyright 2025 the Monarrange Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hashbrown::HashMap;
use tracing::{debug, trace};

use crate::backend::{ApplyCode, ApplyRequest, BackendError, DisplayBackend};
use crate::geometry::DisplayGeometry;
use crate::id::DisplayId;

/// In-memory [`DisplayBackend`] for tests, demos and headless use.
///
/// Applies are staged and only become visible to [`enumerate`](DisplayBackend::enumerate)
/// after [`finalize_batch`](DisplayBackend::finalize_batch), like a two-phase OS
/// facility. Finalizing a quarter-turn rotation swaps the stored size, so the
/// reported size always matches the reported orientation.
///
/// Failure codes and faults can be scripted per display to exercise commit
/// error paths.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    displays: Vec<(DisplayId, DisplayGeometry)>,
    staged: Vec<ApplyRequest>,
    failures: HashMap<DisplayId, ApplyCode>,
    apply_faults: HashMap<DisplayId, String>,
    enumerate_fault: Option<String>,
    finalize_fault: Option<String>,
    apply_calls: usize,
    finalize_calls: usize,
}

impl MemoryBackend {
    /// Code returned when an apply names a display that is not attached.
    pub const UNKNOWN_DISPLAY: ApplyCode = ApplyCode(-5);

    /// Creates a backend with no attached displays.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend with the given displays attached, in order.
    pub fn from_displays<I, K>(displays: I) -> Self
    where
        I: IntoIterator<Item = (K, DisplayGeometry)>,
        K: Into<DisplayId>,
    {
        Self {
            displays: displays
                .into_iter()
                .map(|(id, geometry)| (id.into(), geometry))
                .collect(),
            ..Self::default()
        }
    }

    /// Attaches a display, or replaces the geometry of an attached one.
    pub fn attach(&mut self, id: impl Into<DisplayId>, geometry: DisplayGeometry) {
        let id = id.into();
        match self.displays.iter_mut().find(|(known, _)| *known == id) {
            Some((_, slot)) => *slot = geometry,
            None => self.displays.push((id, geometry)),
        }
    }

    /// Detaches a display, returning its last geometry.
    pub fn detach(&mut self, id: &str) -> Option<DisplayGeometry> {
        let index = self.displays.iter().position(|(known, _)| known.as_str() == id)?;
        Some(self.displays.remove(index).1)
    }

    /// Returns the live geometry of an attached display.
    #[must_use]
    pub fn geometry(&self, id: &str) -> Option<&DisplayGeometry> {
        self.displays
            .iter()
            .find(|(known, _)| known.as_str() == id)
            .map(|(_, geometry)| geometry)
    }

    /// Makes every future apply for `id` answer `code` without staging anything.
    pub fn fail_with(&mut self, id: impl Into<DisplayId>, code: ApplyCode) {
        self.failures.insert(id.into(), code);
    }

    /// Makes every future apply for `id` fault with [`BackendError::Apply`].
    pub fn fault_on_apply(&mut self, id: impl Into<DisplayId>, reason: impl Into<String>) {
        self.apply_faults.insert(id.into(), reason.into());
    }

    /// Makes enumeration fault with [`BackendError::Enumeration`].
    pub fn fault_on_enumerate(&mut self, reason: impl Into<String>) {
        self.enumerate_fault = Some(reason.into());
    }

    /// Makes finalizing fault with [`BackendError::Finalize`].
    pub fn fault_on_finalize(&mut self, reason: impl Into<String>) {
        self.finalize_fault = Some(reason.into());
    }

    /// Removes every scripted failure code and fault.
    pub fn clear_failures(&mut self) {
        self.failures.clear();
        self.apply_faults.clear();
        self.enumerate_fault = None;
        self.finalize_fault = None;
    }

    /// Number of apply calls received so far.
    #[must_use]
    pub fn apply_calls(&self) -> usize {
        self.apply_calls
    }

    /// Number of finalize calls received so far.
    #[must_use]
    pub fn finalize_calls(&self) -> usize {
        self.finalize_calls
    }

    /// Requests staged since the last finalize.
    #[must_use]
    pub fn staged(&self) -> &[ApplyRequest] {
        &self.staged
    }
}

impl DisplayBackend for MemoryBackend {
    fn enumerate(&self) -> Result<Vec<(DisplayId, DisplayGeometry)>, BackendError> {
        if let Some(reason) = &self.enumerate_fault {
            return Err(BackendError::Enumeration(reason.clone()));
        }
        Ok(self.displays.clone())
    }

    fn apply(&mut self, request: ApplyRequest) -> Result<ApplyCode, BackendError> {
        self.apply_calls += 1;
        if let Some(reason) = self.apply_faults.get(&request.id) {
            return Err(BackendError::Apply {
                display: request.id,
                reason: reason.clone(),
            });
        }
        if let Some(code) = self.failures.get(&request.id) {
            trace!(display = %request.id, code = code.0, "scripted apply failure");
            return Ok(*code);
        }
        if self.geometry(&request.id).is_none() {
            return Ok(Self::UNKNOWN_DISPLAY);
        }
        trace!(
            display = %request.id,
            x = request.position.x,
            y = request.position.y,
            turns = request.orientation.turns(),
            "staged"
        );
        self.staged.push(request);
        Ok(ApplyCode::SUCCESS)
    }

    fn finalize_batch(&mut self) -> Result<(), BackendError> {
        self.finalize_calls += 1;
        if let Some(reason) = &self.finalize_fault {
            return Err(BackendError::Finalize(reason.clone()));
        }
        let staged = core::mem::take(&mut self.staged);
        debug!(count = staged.len(), "finalizing staged display changes");
        for request in staged {
            let Some((_, geometry)) = self
                .displays
                .iter_mut()
                .find(|(known, _)| *known == request.id)
            else {
                continue;
            };
            if request.orientation.swaps_axes_from(geometry.orientation) {
                geometry.size = geometry.size.transposed();
            }
            geometry.position = request.position;
            geometry.orientation = request.orientation;
        }
        Ok(())
    }
}
