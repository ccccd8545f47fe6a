// Copyright 2025 the Monarrange Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parsing of the numeric form fields a presentation layer shows next to the
//! canvas. The models only ever receive the parsed integers.

use monarrange_topology::Orientation;
use thiserror::Error;

/// A form field that does not hold a usable number.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    /// A position coordinate is not an integer.
    #[error("position must be a number, got {0:?}")]
    Position(String),
    /// A rotation is not an integer number of degrees.
    #[error("invalid rotation value {0:?}")]
    Rotation(String),
}

/// Parses one position coordinate. Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns [`FieldError::Position`] if the text is not an `i32`.
pub fn parse_position_field(text: &str) -> Result<i32, FieldError> {
    text.trim()
        .parse()
        .map_err(|_| FieldError::Position(text.to_owned()))
}

/// Parses a rotation in degrees, flooring to whole quarter turns.
///
/// # Errors
///
/// Returns [`FieldError::Rotation`] if the text is not an integer.
pub fn parse_rotation_degrees(text: &str) -> Result<Orientation, FieldError> {
    text.trim()
        .parse()
        .map(Orientation::from_degrees)
        .map_err(|_| FieldError::Rotation(text.to_owned()))
}
