// Copyright 2025 the Monarrange Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

use crate::geometry::{DisplayGeometry, Orientation, Position};
use crate::id::DisplayId;

/// Raw result code of one [`DisplayBackend::apply`] call.
///
/// Zero means success; every other value is a backend-defined failure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ApplyCode(pub i32);

impl ApplyCode {
    /// The only success code.
    pub const SUCCESS: Self = Self(0);

    /// Returns `true` for [`ApplyCode::SUCCESS`].
    #[must_use]
    pub const fn is_success(self) -> bool {
        self.0 == 0
    }
}

/// Merged geometry to push for one display during a commit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApplyRequest {
    /// Display to change.
    pub id: DisplayId,
    /// Proposed top-left corner.
    pub position: Position,
    /// Proposed rotation.
    pub orientation: Orientation,
}

/// A backend that is broken, as opposed to one that refused a change.
///
/// Refusals are reported through [`ApplyCode`]; these errors abort the current
/// operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The display configuration facility cannot be reached.
    #[error("display backend unavailable: {0}")]
    Unavailable(String),

    /// Enumeration started but could not complete.
    #[error("display enumeration failed: {0}")]
    Enumeration(String),

    /// The call for one display faulted instead of returning a code.
    #[error("applying settings to {display} faulted: {reason}")]
    Apply {
        /// Display the failed call targeted.
        display: DisplayId,
        /// Backend-provided description.
        reason: String,
    },

    /// The batch could not be finalized.
    #[error("finalizing display changes failed: {0}")]
    Finalize(String),
}

/// Operating-system capability to read and change the display arrangement.
///
/// One implementation exists per platform; the model never calls platform APIs
/// directly. A commit issues zero or more [`apply`](Self::apply) calls and then
/// exactly one [`finalize_batch`](Self::finalize_batch).
pub trait DisplayBackend {
    /// Lists every attached display, in a stable order.
    ///
    /// An empty list is a valid answer. Detached or disabled adapters are filtered
    /// out by the backend.
    fn enumerate(&self) -> Result<Vec<(DisplayId, DisplayGeometry)>, BackendError>;

    /// Stages a new position and orientation for one display.
    fn apply(&mut self, request: ApplyRequest) -> Result<ApplyCode, BackendError>;

    /// Re-validates and applies everything staged since the last call.
    fn finalize_batch(&mut self) -> Result<(), BackendError>;
}

impl<B: DisplayBackend + ?Sized> DisplayBackend for Box<B> {
    fn enumerate(&self) -> Result<Vec<(DisplayId, DisplayGeometry)>, BackendError> {
        (**self).enumerate()
    }

    fn apply(&mut self, request: ApplyRequest) -> Result<ApplyCode, BackendError> {
        (**self).apply(request)
    }

    fn finalize_batch(&mut self) -> Result<(), BackendError> {
        (**self).finalize_batch()
    }
}
