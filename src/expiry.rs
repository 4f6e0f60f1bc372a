//! Joint month/year expiry validation.
//!
//! The form collects the expiry as two separate two-digit inputs. They are
//! validated together and report into one shared error region:
//!
//! 1. both trimmed values must be non-empty (`Can't be blank`)
//! 2. month must be `01`-`12`, zero-padded (`Invalid month`)
//! 3. year must be exactly two digits (`Invalid year`)
//! 4. the month must not lie before the current month (`Card expired`)
//!
//! A card is valid through the end of its expiry month.
//!
//! # Example
//!
//! ```
//! use card_form::expiry::{validate_expiration, YearMonth};
//! use card_form::FieldError;
//!
//! let today = YearMonth::new(2025, 6).unwrap();
//!
//! assert_eq!(validate_expiration("05", "25", today), Err(FieldError::Expired));
//! assert!(validate_expiration("06", "25", today).is_ok());
//! assert_eq!(validate_expiration("13", "25", today), Err(FieldError::InvalidMonth));
//! ```

use crate::rules::{MONTH_PATTERN, YEAR_PATTERN};
use crate::FieldError;
use chrono::Datelike;
use std::fmt;
use std::str::FromStr;

/// A calendar month, used as "today" for expiry checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    /// Four-digit year.
    year: u16,
    /// Month (1-12).
    month: u8,
}

impl YearMonth {
    /// Creates a year/month pair.
    ///
    /// Returns `None` if the month is not 1-12.
    pub fn new(year: u16, month: u8) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self { year, month })
    }

    /// Returns the four-digit year.
    #[inline]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Returns the year within its century (0-99).
    #[inline]
    pub const fn short_year(&self) -> u8 {
        (self.year % 100) as u8
    }

    /// Returns the month (1-12).
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Error returned when a `YYYY-MM` string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseYearMonthError {
    /// Not in `YYYY-MM` form.
    InvalidFormat,
    /// Month is outside 1-12.
    InvalidMonth(u8),
}

impl fmt::Display for ParseYearMonthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidFormat => write!(f, "invalid date (expected YYYY-MM)"),
            Self::InvalidMonth(m) => write!(f, "invalid month {}: must be 1-12", m),
        }
    }
}

impl std::error::Error for ParseYearMonthError {}

impl FromStr for YearMonth {
    type Err = ParseYearMonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year_str, month_str) = s
            .trim()
            .split_once('-')
            .ok_or(ParseYearMonthError::InvalidFormat)?;

        if year_str.len() != 4 {
            return Err(ParseYearMonthError::InvalidFormat);
        }

        let year: u16 = year_str
            .parse()
            .map_err(|_| ParseYearMonthError::InvalidFormat)?;
        let month: u8 = month_str
            .parse()
            .map_err(|_| ParseYearMonthError::InvalidFormat)?;

        Self::new(year, month).ok_or(ParseYearMonthError::InvalidMonth(month))
    }
}

/// Source of the current month for expiry checks.
pub trait Clock {
    /// Returns the current year and month.
    fn today(&self) -> YearMonth;
}

/// Reads the local calendar date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> YearMonth {
        let now = chrono::Local::now();
        YearMonth {
            // Years before 0 or past 65535 are not card expiry dates.
            year: u16::try_from(now.year()).unwrap_or(0),
            month: now.month() as u8,
        }
    }
}

/// A clock pinned to one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub YearMonth);

impl Clock for FixedClock {
    #[inline]
    fn today(&self) -> YearMonth {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    #[inline]
    fn today(&self) -> YearMonth {
        (**self).today()
    }
}

/// A validated two-digit expiry date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ExpiryDate {
    /// Two-digit year (0-99). Ordered before month so derived `Ord` is chronological.
    year: u8,
    /// Month (1-12).
    month: u8,
}

impl ExpiryDate {
    /// Returns the month (1-12).
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Returns the two-digit year.
    #[inline]
    pub const fn year(&self) -> u8 {
        self.year
    }

    /// Returns true if the date lies before `today`'s month.
    pub fn is_expired_at(&self, today: YearMonth) -> bool {
        let current_year = today.short_year();
        self.year < current_year || (self.year == current_year && self.month < today.month())
    }

    /// Returns the number of months from `today` until expiry, 0 if expired.
    pub fn months_until_expiry(&self, today: YearMonth) -> u32 {
        let expiry = (self.year as u32) * 12 + (self.month as u32);
        let current = (today.short_year() as u32) * 12 + (today.month() as u32);
        expiry.saturating_sub(current)
    }

    /// Formats as MM/YY.
    pub fn format_short(&self) -> String {
        format!("{:02}/{:02}", self.month, self.year)
    }
}

impl fmt::Display for ExpiryDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:02}", self.month, self.year)
    }
}

/// Validates an expiry month and year against `today`.
///
/// # Example
///
/// ```
/// use card_form::expiry::{validate_expiration, YearMonth};
/// use card_form::FieldError;
///
/// let today = YearMonth::new(2025, 6).unwrap();
///
/// let expiry = validate_expiration("07", "25", today).unwrap();
/// assert_eq!(expiry.format_short(), "07/25");
///
/// assert_eq!(validate_expiration("", "25", today), Err(FieldError::Blank));
/// assert_eq!(validate_expiration("06", "abc", today), Err(FieldError::InvalidYear));
/// ```
pub fn validate_expiration(month: &str, year: &str, today: YearMonth) -> Result<ExpiryDate, FieldError> {
    let month = month.trim();
    let year = year.trim();

    if month.is_empty() || year.is_empty() {
        return Err(FieldError::Blank);
    }
    if !MONTH_PATTERN.is_match(month) {
        return Err(FieldError::InvalidMonth);
    }
    if !YEAR_PATTERN.is_match(year) {
        return Err(FieldError::InvalidYear);
    }

    // Both strings are two ASCII digits at this point.
    let expiry = ExpiryDate {
        month: two_digits(month),
        year: two_digits(year),
    };

    if expiry.is_expired_at(today) {
        return Err(FieldError::Expired);
    }

    Ok(expiry)
}

/// Validates an expiry month and year against the system clock.
pub fn validate_expiration_now(month: &str, year: &str) -> Result<ExpiryDate, FieldError> {
    validate_expiration(month, year, SystemClock.today())
}

fn two_digits(s: &str) -> u8 {
    s.bytes().fold(0, |acc, b| acc * 10 + (b - b'0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn june_2025() -> YearMonth {
        YearMonth::new(2025, 6).unwrap()
    }

    #[test]
    fn test_expired_previous_month() {
        assert_eq!(
            validate_expiration("05", "25", june_2025()),
            Err(FieldError::Expired)
        );
    }

    #[test]
    fn test_current_month_is_valid() {
        let expiry = validate_expiration("06", "25", june_2025()).unwrap();
        assert_eq!(expiry.month(), 6);
        assert_eq!(expiry.year(), 25);
    }

    #[test]
    fn test_next_month_is_valid() {
        assert!(validate_expiration("07", "25", june_2025()).is_ok());
    }

    #[test]
    fn test_previous_year_expired() {
        assert_eq!(
            validate_expiration("12", "24", june_2025()),
            Err(FieldError::Expired)
        );
        assert!(validate_expiration("01", "26", june_2025()).is_ok());
    }

    #[test]
    fn test_blank() {
        assert_eq!(validate_expiration("", "25", june_2025()), Err(FieldError::Blank));
        assert_eq!(validate_expiration("06", "  ", june_2025()), Err(FieldError::Blank));
        // Blank wins over an invalid partner value.
        assert_eq!(validate_expiration("13", "", june_2025()), Err(FieldError::Blank));
    }

    #[test]
    fn test_invalid_month() {
        for month in ["13", "00", "1", "1a", "012"] {
            assert_eq!(
                validate_expiration(month, "30", june_2025()),
                Err(FieldError::InvalidMonth),
                "month {month:?}"
            );
        }
    }

    #[test]
    fn test_month_checked_before_year() {
        assert_eq!(
            validate_expiration("13", "abc", june_2025()),
            Err(FieldError::InvalidMonth)
        );
    }

    #[test]
    fn test_invalid_year() {
        for year in ["abc", "2", "2025", "2a"] {
            assert_eq!(
                validate_expiration("06", year, june_2025()),
                Err(FieldError::InvalidYear),
                "year {year:?}"
            );
        }
    }

    #[test]
    fn test_values_are_trimmed() {
        assert!(validate_expiration(" 06 ", " 25 ", june_2025()).is_ok());
    }

    #[test]
    fn test_months_until_expiry() {
        let expiry = validate_expiration("12", "26", june_2025()).unwrap();
        assert_eq!(expiry.months_until_expiry(june_2025()), 18);

        let expiry = validate_expiration("06", "25", june_2025()).unwrap();
        assert_eq!(expiry.months_until_expiry(june_2025()), 0);
    }

    #[test]
    fn test_format() {
        let expiry = validate_expiration("03", "30", june_2025()).unwrap();
        assert_eq!(expiry.format_short(), "03/30");
        assert_eq!(expiry.to_string(), "03/30");
    }

    #[test]
    fn test_year_month_new() {
        assert!(YearMonth::new(2025, 1).is_some());
        assert!(YearMonth::new(2025, 12).is_some());
        assert!(YearMonth::new(2025, 0).is_none());
        assert!(YearMonth::new(2025, 13).is_none());
        assert_eq!(YearMonth::new(2031, 4).unwrap().short_year(), 31);
    }

    #[test]
    fn test_parse_year_month() {
        let ym: YearMonth = "2025-06".parse().unwrap();
        assert_eq!(ym, june_2025());
        assert_eq!(ym.to_string(), "2025-06");

        assert_eq!(
            "2025-13".parse::<YearMonth>(),
            Err(ParseYearMonthError::InvalidMonth(13))
        );
        assert_eq!(
            "25-06".parse::<YearMonth>(),
            Err(ParseYearMonthError::InvalidFormat)
        );
        assert_eq!(
            "june".parse::<YearMonth>(),
            Err(ParseYearMonthError::InvalidFormat)
        );
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(june_2025());
        assert_eq!(clock.today(), june_2025());
        assert_eq!((&clock).today(), june_2025());
    }

    #[test]
    fn test_system_clock_is_plausible() {
        let today = SystemClock.today();
        assert!(today.year() >= 2024);
        assert!((1..=12).contains(&today.month()));
    }
}
