// Copyright 2025 the Monarrange Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

/// Stable name of a physical display, as assigned by the operating system.
///
/// Identities are unique among attached displays and do not change while a
/// monitor stays attached. `DisplayId` dereferences to `str`, so any method
/// taking `&str` accepts `&DisplayId` as well.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct DisplayId(String);

impl DisplayId {
    /// Creates an identity from a device name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the device name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for DisplayId {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for DisplayId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DisplayId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for DisplayId {
    fn from(name: String) -> Self {
        Self(name)
    }
}
