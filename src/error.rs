//! User-facing validation errors for the card form.
//!
//! Every variant maps to one fixed message that is shown verbatim in the
//! field's error region.

use crate::Field;
use std::fmt;

/// A validation failure for one field or for the joint expiry date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FieldError {
    /// The trimmed value is empty.
    Blank,

    /// The value exceeds the field's maximum length.
    TooLong,

    /// The value does not match the field's pattern.
    ///
    /// The message depends on the field that failed.
    WrongFormat(Field),

    /// The month is not a zero-padded 01-12.
    InvalidMonth,

    /// The year is not exactly two digits.
    InvalidYear,

    /// The expiry month lies before the current month.
    Expired,
}

impl FieldError {
    /// Returns the message shown to the user.
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Blank => "Can't be blank",
            Self::TooLong => "Too long",
            Self::WrongFormat(Field::Number) => "Wrong format, 16 digits required",
            Self::WrongFormat(Field::Cvc) => "Must be 3 digits",
            Self::WrongFormat(_) => "Wrong format",
            Self::InvalidMonth => "Invalid month",
            Self::InvalidYear => "Invalid year",
            Self::Expired => "Card expired",
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for FieldError {}

/// Error returned when a state transition is not allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionError {
    /// Acknowledge was requested while the form is still being edited.
    NotCompleted,
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotCompleted => write!(f, "form has not been completed yet"),
        }
    }
}

impl std::error::Error for TransitionError {}
