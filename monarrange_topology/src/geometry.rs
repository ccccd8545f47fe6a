// Copyright 2025 the Monarrange Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Top-left corner of a display in the shared virtual-desktop space.
///
/// Unbounded; negative coordinates place a display left of or above the origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Horizontal coordinate in pixels.
    pub x: i32,
    /// Vertical coordinate in pixels.
    pub y: i32,
}

impl Position {
    /// Creates a position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Pixel dimensions of a display. Read-only for this crate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Creates a size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns the size with width and height exchanged.
    #[must_use]
    pub const fn transposed(self) -> Self {
        Self::new(self.height, self.width)
    }
}

/// One of the four quarter-turn rotations of a display.
///
/// The discriminant is the number of 90° turns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[repr(u8)]
pub enum Orientation {
    /// No rotation.
    #[default]
    Landscape = 0,
    /// Rotated 90°.
    Portrait = 1,
    /// Rotated 180°.
    LandscapeFlipped = 2,
    /// Rotated 270°.
    PortraitFlipped = 3,
}

impl Orientation {
    /// All orientations in turn order.
    pub const ALL: [Self; 4] = [
        Self::Landscape,
        Self::Portrait,
        Self::LandscapeFlipped,
        Self::PortraitFlipped,
    ];

    /// Normalizes a turn count modulo 4.
    ///
    /// The result is always in `0..4`, also for negative input: `-1` turns is
    /// the same as `3` turns.
    #[must_use]
    pub const fn from_turns(turns: i32) -> Self {
        Self::ALL[turns.rem_euclid(4) as usize]
    }

    /// Converts an angle in degrees, flooring to whole quarter turns.
    ///
    /// `90` is [`Orientation::Portrait`], `-90` and `270` are both
    /// [`Orientation::PortraitFlipped`], and `100` floors to `90`.
    #[must_use]
    pub const fn from_degrees(degrees: i32) -> Self {
        Self::from_turns(degrees.div_euclid(90))
    }

    /// Returns the number of 90° turns, in `0..4`.
    #[must_use]
    pub const fn turns(self) -> u8 {
        self as u8
    }

    /// Returns the rotation angle in degrees: 0, 90, 180, or 270.
    #[must_use]
    pub const fn degrees(self) -> u16 {
        self as u16 * 90
    }

    /// Returns `true` if going from `other` to `self` exchanges width and height.
    #[must_use]
    pub const fn swaps_axes_from(self, other: Self) -> bool {
        (self.turns() ^ other.turns()) & 1 == 1
    }
}

/// Committed geometry of one display, as reported by the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayGeometry {
    /// Top-left corner in virtual-desktop space.
    pub position: Position,
    /// Current resolution.
    pub size: Size,
    /// Current rotation.
    pub orientation: Orientation,
    /// Refresh rate in hertz; informational.
    pub refresh_rate: u32,
    /// Whether this is the primary display.
    pub is_primary: bool,
}

impl DisplayGeometry {
    /// Creates an unrotated, non-primary geometry with an unknown (zero) refresh rate.
    #[must_use]
    pub const fn new(position: Position, size: Size) -> Self {
        Self {
            position,
            size,
            orientation: Orientation::Landscape,
            refresh_rate: 0,
            is_primary: false,
        }
    }

    /// Sets the orientation.
    #[must_use]
    pub const fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Sets the refresh rate.
    #[must_use]
    pub const fn with_refresh_rate(mut self, hertz: u32) -> Self {
        self.refresh_rate = hertz;
        self
    }

    /// Marks the display as primary.
    #[must_use]
    pub const fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{Orientation, Size};

    #[test]
    fn turns_normalize_modulo_four() {
        assert_eq!(Orientation::from_turns(5), Orientation::Portrait);
        assert_eq!(Orientation::from_turns(-1), Orientation::PortraitFlipped);
        assert_eq!(Orientation::from_turns(-4), Orientation::Landscape);
        assert_eq!(Orientation::from_turns(i32::MIN).turns(), 0);
    }

    #[test]
    fn degrees_floor_to_quarter_turns() {
        assert_eq!(Orientation::from_degrees(0), Orientation::Landscape);
        assert_eq!(Orientation::from_degrees(90), Orientation::Portrait);
        assert_eq!(Orientation::from_degrees(100), Orientation::Portrait);
        assert_eq!(Orientation::from_degrees(-90), Orientation::PortraitFlipped);
        assert_eq!(Orientation::from_degrees(450), Orientation::Portrait);
        for o in Orientation::ALL {
            assert_eq!(Orientation::from_degrees(i32::from(o.degrees())), o);
        }
    }

    #[test]
    fn axis_swap_depends_on_parity() {
        assert!(Orientation::Portrait.swaps_axes_from(Orientation::Landscape));
        assert!(Orientation::LandscapeFlipped.swaps_axes_from(Orientation::PortraitFlipped));
        assert!(!Orientation::LandscapeFlipped.swaps_axes_from(Orientation::Landscape));
        assert_eq!(Size::new(1920, 1080).transposed(), Size::new(1080, 1920));
    }
}
