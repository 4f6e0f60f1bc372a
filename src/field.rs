//! Form fields and the error regions they report into.
//!
//! The form has five inputs but only four error regions: month and year
//! share a single expiry region, and both inputs get the error class when it
//! is shown.

use std::fmt;
use std::str::FromStr;

/// One named user-input slot of the card form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Field {
    /// Cardholder name, e.g. "Jane Appleseed".
    Name,
    /// Card number, displayed in four groups of four digits.
    Number,
    /// Expiry month, two digits.
    Month,
    /// Expiry year, two digits.
    Year,
    /// Card verification code, three digits.
    Cvc,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Number,
        Field::Month,
        Field::Year,
        Field::Cvc,
    ];

    /// Returns the lowercase field name used by UIs and scripts.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Number => "number",
            Self::Month => "month",
            Self::Year => "year",
            Self::Cvc => "cvc",
        }
    }

    /// Returns the error region this field reports into.
    #[inline]
    pub const fn error_slot(&self) -> ErrorSlot {
        match self {
            Self::Name => ErrorSlot::Name,
            Self::Number => ErrorSlot::Number,
            Self::Month | Self::Year => ErrorSlot::Expiry,
            Self::Cvc => ErrorSlot::Cvc,
        }
    }

    /// Returns true for the two fields validated jointly as an expiry date.
    #[inline]
    pub const fn is_expiry(&self) -> bool {
        matches!(self, Self::Month | Self::Year)
    }

    /// Returns true if the field is mirrored on the card preview.
    #[inline]
    pub const fn has_preview(&self) -> bool {
        !matches!(self, Self::Cvc)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a field name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFieldError {
    input: String,
}

impl ParseFieldError {
    /// Returns the rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParseFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown field '{}' (expected name, number, month, year or cvc)",
            self.input
        )
    }
}

impl std::error::Error for ParseFieldError {}

impl FromStr for Field {
    type Err = ParseFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "name" => Ok(Self::Name),
            "number" => Ok(Self::Number),
            "month" => Ok(Self::Month),
            "year" => Ok(Self::Year),
            "cvc" => Ok(Self::Cvc),
            _ => Err(ParseFieldError {
                input: s.to_string(),
            }),
        }
    }
}

/// One of the four error-message regions of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ErrorSlot {
    /// Region under the name input.
    Name,
    /// Region under the number input.
    Number,
    /// Shared region under the month and year inputs.
    Expiry,
    /// Region under the cvc input.
    Cvc,
}

impl ErrorSlot {
    /// All slots, in the order submit validates them.
    pub const ALL: [ErrorSlot; 4] = [
        ErrorSlot::Name,
        ErrorSlot::Number,
        ErrorSlot::Cvc,
        ErrorSlot::Expiry,
    ];

    /// Returns the inputs that carry the error class for this slot.
    pub const fn inputs(&self) -> &'static [Field] {
        match self {
            Self::Name => &[Field::Name],
            Self::Number => &[Field::Number],
            Self::Expiry => &[Field::Month, Field::Year],
            Self::Cvc => &[Field::Cvc],
        }
    }

    /// Returns the lowercase slot name.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Number => "number",
            Self::Expiry => "expiry",
            Self::Cvc => "cvc",
        }
    }

    pub(crate) const fn index(&self) -> usize {
        match self {
            Self::Name => 0,
            Self::Number => 1,
            Self::Expiry => 2,
            Self::Cvc => 3,
        }
    }
}

impl fmt::Display for ErrorSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
