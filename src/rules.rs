//! Per-field validation rules.
//!
//! Each field has an ordered list of checks that short-circuit on the first
//! failure: required, then maximum length, then pattern. Values are trimmed
//! before any check runs.
//!
//! | Field  | Max length | Pattern                         | Message on mismatch                |
//! |--------|------------|---------------------------------|------------------------------------|
//! | name   | 20         | two alphabetic words            | `Wrong format`                     |
//! | number | -          | four groups of four digits      | `Wrong format, 16 digits required` |
//! | cvc    | -          | three digits                    | `Must be 3 digits`                 |
//! | month  | -          | `01`-`12`                       | `Invalid month`                    |
//! | year   | -          | two digits                      | `Invalid year`                     |
//!
//! Month and year are normally checked together by
//! [`validate_expiration`](crate::expiry::validate_expiration); their rows
//! here only cover the standalone checks.
//!
//! # Example
//!
//! ```
//! use card_form::{rules, Field, FieldError};
//!
//! assert_eq!(rules::validate(Field::Name, "Jane Appleseed"), None);
//! assert_eq!(rules::validate(Field::Name, "   "), Some(FieldError::Blank));
//! assert_eq!(
//!     rules::validate(Field::Cvc, "12a"),
//!     Some(FieldError::WrongFormat(Field::Cvc))
//! );
//! ```

use crate::{Field, FieldError};
use regex::Regex;
use std::sync::LazyLock;

// Digit classes are spelled out: `\d` in `regex` matches every Unicode digit.
static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]+\s[A-Za-z]+$").expect("invalid name pattern"));

static NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}\s[0-9]{4}\s[0-9]{4}\s[0-9]{4}$").expect("invalid number pattern")
});

static CVC_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3}$").expect("invalid cvc pattern"));

pub(crate) static MONTH_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0[1-9]|1[0-2])$").expect("invalid month pattern"));

pub(crate) static YEAR_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{2}$").expect("invalid year pattern"));

/// Maximum cardholder name length, in characters.
pub const NAME_MAX_LENGTH: usize = 20;

/// A pattern check together with the error it reports.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: &'static Regex,
    error: FieldError,
}

impl Pattern {
    /// Returns true if the (already trimmed) value matches.
    #[inline]
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }

    /// Returns the error reported on mismatch.
    #[inline]
    pub const fn error(&self) -> FieldError {
        self.error
    }

    /// Returns the regular expression source.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

/// The ordered checks applied to one field.
#[derive(Debug, Clone)]
pub struct ValidationRule {
    /// Reject empty values with [`FieldError::Blank`].
    pub required: bool,
    /// Reject values longer than this many characters with [`FieldError::TooLong`].
    pub max_length: Option<usize>,
    /// Reject values that do not match.
    pub pattern: Option<Pattern>,
}

impl ValidationRule {
    /// Runs the checks against a raw value.
    ///
    /// The value is trimmed first; checks stop at the first failure.
    pub fn check(&self, raw: &str) -> Result<(), FieldError> {
        let value = raw.trim();

        if value.is_empty() {
            return if self.required {
                Err(FieldError::Blank)
            } else {
                Ok(())
            };
        }

        if let Some(max) = self.max_length {
            if value.chars().count() > max {
                return Err(FieldError::TooLong);
            }
        }

        if let Some(pattern) = &self.pattern {
            if !pattern.is_match(value) {
                return Err(pattern.error());
            }
        }

        Ok(())
    }
}

/// The rule table for every field of the form.
///
/// Real-time input validation and submit-time validation both run through
/// the same `RuleSet`, so the two paths can never disagree.
#[derive(Debug, Clone)]
pub struct RuleSet {
    name: ValidationRule,
    number: ValidationRule,
    month: ValidationRule,
    year: ValidationRule,
    cvc: ValidationRule,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl RuleSet {
    /// The standard card form rules.
    pub fn standard() -> Self {
        Self {
            name: ValidationRule {
                required: true,
                max_length: Some(NAME_MAX_LENGTH),
                pattern: Some(Pattern {
                    regex: &NAME_PATTERN,
                    error: FieldError::WrongFormat(Field::Name),
                }),
            },
            number: ValidationRule {
                required: true,
                max_length: None,
                pattern: Some(Pattern {
                    regex: &NUMBER_PATTERN,
                    error: FieldError::WrongFormat(Field::Number),
                }),
            },
            month: ValidationRule {
                required: true,
                max_length: None,
                pattern: Some(Pattern {
                    regex: &MONTH_PATTERN,
                    error: FieldError::InvalidMonth,
                }),
            },
            year: ValidationRule {
                required: true,
                max_length: None,
                pattern: Some(Pattern {
                    regex: &YEAR_PATTERN,
                    error: FieldError::InvalidYear,
                }),
            },
            cvc: ValidationRule {
                required: true,
                max_length: None,
                pattern: Some(Pattern {
                    regex: &CVC_PATTERN,
                    error: FieldError::WrongFormat(Field::Cvc),
                }),
            },
        }
    }

    /// Overrides the maximum cardholder name length.
    #[must_use]
    pub fn with_name_max_length(mut self, max: usize) -> Self {
        self.name.max_length = Some(max);
        self
    }

    /// Returns the rule for a field.
    pub fn rule(&self, field: Field) -> &ValidationRule {
        match field {
            Field::Name => &self.name,
            Field::Number => &self.number,
            Field::Month => &self.month,
            Field::Year => &self.year,
            Field::Cvc => &self.cvc,
        }
    }

    /// Validates one field on its own.
    pub fn validate_field(&self, field: Field, raw: &str) -> Result<(), FieldError> {
        self.rule(field).check(raw)
    }

    /// Validates one field, returning the error if there is one.
    #[inline]
    pub fn validate(&self, field: Field, raw: &str) -> Option<FieldError> {
        self.validate_field(field, raw).err()
    }
}

static STANDARD: LazyLock<RuleSet> = LazyLock::new(RuleSet::standard);

/// Validates one field against the standard rules.
///
/// # Example
///
/// ```
/// use card_form::{rules::validate_field, Field, FieldError};
///
/// assert!(validate_field(Field::Number, "1234 5678 9012 3456").is_ok());
/// assert_eq!(
///     validate_field(Field::Number, "1234 5678"),
///     Err(FieldError::WrongFormat(Field::Number))
/// );
/// ```
pub fn validate_field(field: Field, raw: &str) -> Result<(), FieldError> {
    STANDARD.validate_field(field, raw)
}

/// Validates one field against the standard rules, returning the error if any.
#[inline]
pub fn validate(field: Field, raw: &str) -> Option<FieldError> {
    STANDARD.validate(field, raw)
}

/// Returns a reference to the shared standard rule set.
pub fn standard() -> &'static RuleSet {
    &STANDARD
}
