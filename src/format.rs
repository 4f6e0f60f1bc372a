//! Card number input formatting.
//!
//! As the user types into the number field, everything that is not a digit
//! is dropped and the digits are regrouped in blocks of four separated by a
//! single space. The result is written back into the field before it is
//! validated.
//!
//! # Example
//!
//! ```
//! use card_form::format::{format_card_number, strip_formatting};
//!
//! assert_eq!(format_card_number("12345678"), "1234 5678");
//! assert_eq!(format_card_number("1234-5678-9012-3456"), "1234 5678 9012 3456");
//! assert_eq!(strip_formatting("1234 5678"), "12345678");
//! ```

/// Digits per display group.
pub const GROUP_SIZE: usize = 4;

/// Formats card number input as the user types.
///
/// Strips every non-digit character and inserts a space after each group of
/// four digits. No trailing space is produced, and the digit count is not
/// capped. Formatting is idempotent.
///
/// # Example
///
/// ```
/// use card_form::format::format_card_number;
///
/// assert_eq!(format_card_number("4"), "4");
/// assert_eq!(format_card_number("41111"), "4111 1");
/// assert_eq!(format_card_number(" 4111 1111 1111 1111 "), "4111 1111 1111 1111");
/// assert_eq!(format_card_number("abc"), "");
/// ```
pub fn format_card_number(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.is_empty() {
        return String::new();
    }

    let mut result = String::with_capacity(digits.len() + digits.len() / GROUP_SIZE);

    for (i, c) in digits.iter().enumerate() {
        if i > 0 && i % GROUP_SIZE == 0 {
            result.push(' ');
        }
        result.push(*c);
    }

    result
}

/// Strips all formatting from a card number, leaving only digits.
///
/// # Example
///
/// ```
/// use card_form::format::strip_formatting;
///
/// assert_eq!(strip_formatting("4111 1111 1111 1111"), "4111111111111111");
/// assert_eq!(strip_formatting("4111-1111-1111-1111"), "4111111111111111");
/// ```
pub fn strip_formatting(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Splits the digits of a card number into display groups of four.
///
/// # Example
///
/// ```
/// use card_form::format::split_into_groups;
///
/// assert_eq!(split_into_groups("4111111111111111"), vec!["4111", "1111", "1111", "1111"]);
/// assert_eq!(split_into_groups("411111"), vec!["4111", "11"]);
/// ```
pub fn split_into_groups(input: &str) -> Vec<String> {
    let digits: Vec<char> = input.chars().filter(|c| c.is_ascii_digit()).collect();

    digits
        .chunks(GROUP_SIZE)
        .map(|group| group.iter().collect())
        .collect()
}
