//! The live card preview.
//!
//! Four text slots mirror the last valid value of name, number, month and
//! year. Invalid input never reaches the preview, so the card always shows
//! either a placeholder or something that passed validation.

use crate::values::mask_number;
use crate::Field;
use std::fmt;

/// Placeholder cardholder name.
pub const DEFAULT_NAME: &str = "Jane Appleseed";
/// Placeholder card number.
pub const DEFAULT_NUMBER: &str = "0000 0000 0000 0000";
/// Placeholder expiry month.
pub const DEFAULT_MONTH: &str = "00";
/// Placeholder expiry year.
pub const DEFAULT_YEAR: &str = "00";

/// Displayed text of the card preview.
#[derive(Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CardPreview {
    name: String,
    number: String,
    month: String,
    year: String,
}

impl Default for CardPreview {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.to_string(),
            number: DEFAULT_NUMBER.to_string(),
            month: DEFAULT_MONTH.to_string(),
            year: DEFAULT_YEAR.to_string(),
        }
    }
}

impl CardPreview {
    /// Creates a preview showing custom placeholders.
    pub fn with_placeholders(
        name: impl Into<String>,
        number: impl Into<String>,
        month: impl Into<String>,
        year: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            number: number.into(),
            month: month.into(),
            year: year.into(),
        }
    }

    /// Cardholder name text.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Card number text.
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Expiry month text.
    pub fn month(&self) -> &str {
        &self.month
    }

    /// Expiry year text.
    pub fn year(&self) -> &str {
        &self.year
    }

    /// Returns the text shown for a field, or `None` for cvc.
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => Some(&self.name),
            Field::Number => Some(&self.number),
            Field::Month => Some(&self.month),
            Field::Year => Some(&self.year),
            Field::Cvc => None,
        }
    }

    /// Copies a validated value into its slot.
    ///
    /// Returns false if the field has no slot (cvc).
    pub fn sync(&mut self, field: Field, value: &str) -> bool {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Number => &mut self.number,
            Field::Month => &mut self.month,
            Field::Year => &mut self.year,
            Field::Cvc => return false,
        };
        slot.clear();
        slot.push_str(value.trim());
        true
    }

    /// Restores every slot from `placeholders`.
    pub fn reset_to(&mut self, placeholders: &CardPreview) {
        self.clone_from(placeholders);
    }
}

impl fmt::Debug for CardPreview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardPreview")
            .field("name", &self.name)
            .field("number", &mask_number(&self.number))
            .field("month", &self.month)
            .field("year", &self.year)
            .finish()
    }
}
