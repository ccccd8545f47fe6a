// Copyright 2025 the Monarrange Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input events as delivered by the presentation layer, in view coordinates.

use monarrange_view2d::ViewPoint;

bitflags::bitflags! {
    /// Keyboard modifiers held during a pointer or wheel event.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Control key.
        const CONTROL = 0b0000_0001;
        /// Shift key.
        const SHIFT   = 0b0000_0010;
        /// Alt or Option key.
        const ALT     = 0b0000_0100;
        /// Super, Command or Windows key.
        const META    = 0b0000_1000;
    }
}

/// A single modifier key, as named in configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ModifierKey {
    /// Control key.
    #[default]
    Control,
    /// Shift key.
    Shift,
    /// Alt or Option key.
    Alt,
    /// Super, Command or Windows key.
    Meta,
}

impl ModifierKey {
    /// Returns the corresponding flag.
    #[must_use]
    pub const fn flag(self) -> Modifiers {
        match self {
            Self::Control => Modifiers::CONTROL,
            Self::Shift => Modifiers::SHIFT,
            Self::Alt => Modifiers::ALT,
            Self::Meta => Modifiers::META,
        }
    }
}

/// Pointer button that pressed or released.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointerButton {
    /// Left button, or a touch or pen contact.
    #[default]
    Primary,
    /// Right button.
    Secondary,
    /// Middle button.
    Auxiliary,
}

/// Pointer press, move or release.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PointerEvent {
    /// Pointer location in view pixels.
    pub position: ViewPoint,
    /// Button involved. For moves, the button held.
    pub button: PointerButton,
    /// Modifiers held.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// Creates an unmodified primary-button event at `(x, y)`.
    #[must_use]
    pub const fn at(x: i32, y: i32) -> Self {
        Self {
            position: ViewPoint::new(x, y),
            button: PointerButton::Primary,
            modifiers: Modifiers::empty(),
        }
    }

    /// Returns the event with `modifiers` held.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Returns the event with a different button.
    #[must_use]
    pub const fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }
}

/// Discrete wheel rotation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WheelEvent {
    /// Detents turned; positive is away from the user (scroll up, zoom in).
    pub ticks: i32,
    /// Pointer location in view pixels.
    pub position: ViewPoint,
    /// Modifiers held.
    pub modifiers: Modifiers,
}

impl WheelEvent {
    /// Creates an unmodified wheel event.
    #[must_use]
    pub const fn new(ticks: i32, position: ViewPoint) -> Self {
        Self {
            ticks,
            position,
            modifiers: Modifiers::empty(),
        }
    }

    /// Returns the event with `modifiers` held.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}
