//! Raw field values held by the form.
//!
//! The card number and CVC are cardholder data: they are zeroed in memory
//! when the form is cleared or dropped and never appear in `Debug` output.

use crate::Field;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// The current text of each input.
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct FormValues {
    name: String,
    number: String,
    month: String,
    year: String,
    cvc: String,
}

impl FormValues {
    /// Creates empty values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current text of a field.
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Number => &self.number,
            Field::Month => &self.month,
            Field::Year => &self.year,
            Field::Cvc => &self.cvc,
        }
    }

    /// Replaces the text of a field, zeroing the previous contents.
    pub fn set(&mut self, field: Field, value: &str) {
        let slot = self.slot_mut(field);
        slot.zeroize();
        slot.push_str(value);
    }

    /// Clears every field, zeroing the previous contents.
    pub fn clear(&mut self) {
        self.zeroize();
    }

    /// Returns true if every field is empty.
    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|&f| self.get(f).is_empty())
    }

    fn slot_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Number => &mut self.number,
            Field::Month => &mut self.month,
            Field::Year => &mut self.year,
            Field::Cvc => &mut self.cvc,
        }
    }
}

impl fmt::Debug for FormValues {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormValues")
            .field("name", &self.name)
            .field("number", &mask_number(&self.number))
            .field("month", &self.month)
            .field("year", &self.year)
            .field("cvc", &"*".repeat(self.cvc.chars().count()))
            .finish()
    }
}

/// Masks every digit but the last four, keeping separators in place.
///
/// ```
/// use card_form::values::mask_number;
///
/// assert_eq!(mask_number("4111 1111 1111 1234"), "**** **** **** 1234");
/// assert_eq!(mask_number("123"), "***");
/// ```
pub fn mask_number(input: &str) -> String {
    let digit_count = input.chars().filter(|c| c.is_ascii_digit()).count();

    // Fewer than 8 digits would reveal too large a share of the number.
    let visible = if digit_count >= 8 { 4 } else { 0 };
    let hidden = digit_count - visible;

    let mut seen = 0;
    input
        .chars()
        .map(|c| {
            if c.is_ascii_digit() {
                seen += 1;
                if seen <= hidden {
                    return '*';
                }
            }
            c
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let mut values = FormValues::new();
        assert!(values.is_empty());

        values.set(Field::Name, "Jane Appleseed");
        values.set(Field::Cvc, "123");
        assert_eq!(values.get(Field::Name), "Jane Appleseed");
        assert_eq!(values.get(Field::Cvc), "123");
        assert_eq!(values.get(Field::Number), "");

        values.set(Field::Cvc, "9");
        assert_eq!(values.get(Field::Cvc), "9");
    }

    #[test]
    fn test_clear() {
        let mut values = FormValues::new();
        for field in Field::ALL {
            values.set(field, "x");
        }
        assert!(!values.is_empty());
        values.clear();
        assert!(values.is_empty());
    }

    #[test]
    fn test_debug_is_safe() {
        let mut values = FormValues::new();
        values.set(Field::Number, "4111 1111 1111 1234");
        values.set(Field::Cvc, "987");

        let debug = format!("{:?}", values);
        assert!(!debug.contains("4111"));
        assert!(!debug.contains("987"));
        assert!(debug.contains("**** **** **** 1234"));
        assert!(debug.contains("\"***\""));
    }

    #[test]
    fn test_mask_number() {
        assert_eq!(mask_number("4111 1111 1111 1234"), "**** **** **** 1234");
        assert_eq!(mask_number("41111111"), "****1111");
        assert_eq!(mask_number("4111 111"), "**** ***");
        assert_eq!(mask_number(""), "");
    }
}
