//! Money as an integer count of Vietnamese đồng.
//!
//! The đồng has no subunit in practice, so amounts are whole integers.
//! Catalog data and the public API carry prices as grouped-digit strings
//! (`"142,500"`); [`Vnd`] owns the only parsing and formatting of that
//! representation. Parsing strips exactly the characters `.` and `,` -
//! both appear as thousands separators in the wild.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when parsing a [`Vnd`] amount.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum VndParseError {
    /// The input string is empty (or only separators).
    #[error("amount cannot be empty")]
    Empty,
    /// The input contains a character other than digits and `.`/`,`.
    #[error("amount contains invalid character {0:?}")]
    InvalidCharacter(char),
    /// The digits overflow the amount range.
    #[error("amount out of range")]
    OutOfRange,
}

/// An amount of money in đồng.
///
/// Always non-negative; constructed through [`Vnd::new`] or [`Vnd::parse`].
///
/// ## Examples
///
/// ```
/// use ruouvan_core::Vnd;
///
/// let price = Vnd::parse("55,000").unwrap();
/// assert_eq!(price.as_i64(), 55_000);
/// assert_eq!(price.to_string(), "55,000");
///
/// // Dotted grouping is accepted too
/// assert_eq!(Vnd::parse("142.500").unwrap(), Vnd::new(142_500));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Vnd(i64);

impl Vnd {
    /// Zero đồng.
    pub const ZERO: Self = Self(0);

    /// Create an amount from a non-negative count of đồng.
    ///
    /// # Panics
    ///
    /// Debug-panics on negative input; amounts are never negative in this
    /// system.
    #[must_use]
    pub const fn new(amount: i64) -> Self {
        debug_assert!(amount >= 0, "Vnd amounts are non-negative");
        Self(amount)
    }

    /// Parse an amount from a grouped-digit string.
    ///
    /// Strips exactly `.` and `,` before reading digits, matching the
    /// catalog's price format.
    ///
    /// # Errors
    ///
    /// Returns [`VndParseError`] if the input is empty, contains anything
    /// other than digits and separators, or overflows.
    pub fn parse(s: &str) -> Result<Self, VndParseError> {
        let mut amount: i64 = 0;
        let mut saw_digit = false;

        for c in s.trim().chars() {
            match c {
                '.' | ',' => {}
                '0'..='9' => {
                    saw_digit = true;
                    let digit = i64::from(c as u8 - b'0');
                    amount = amount
                        .checked_mul(10)
                        .and_then(|a| a.checked_add(digit))
                        .ok_or(VndParseError::OutOfRange)?;
                }
                other => return Err(VndParseError::InvalidCharacter(other)),
            }
        }

        if !saw_digit {
            return Err(VndParseError::Empty);
        }

        Ok(Self(amount))
    }

    /// The amount as a count of đồng.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }

    /// Multiply by a quantity, saturating at the maximum amount.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(i64::from(quantity)))
    }
}

impl fmt::Display for Vnd {
    /// Formats with comma thousands separators: `1234567` → `"1,234,567"`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        let offset = digits.len() % 3;
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (i + 3 - offset) % 3 == 0 {
                out.push(',');
            }
            out.push(c);
        }
        f.write_str(&out)
    }
}

impl std::str::FromStr for Vnd {
    type Err = VndParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Add for Vnd {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Vnd {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl Mul<u32> for Vnd {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self {
        self.times(rhs)
    }
}

impl Sum for Vnd {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

// The wire format for prices is the grouped-digit string, so that is the
// default serde representation. Numeric fields (order totals) opt into
// `minor_units` instead.
impl Serialize for Vnd {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Vnd {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// Serde adapter for fields carried as plain integers on the wire
/// (e.g. order totals).
///
/// ```rust,ignore
/// #[serde(with = "ruouvan_core::money::minor_units")]
/// total: Vnd,
/// ```
pub mod minor_units {
    use super::Vnd;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize the amount as a bare integer.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(amount: &Vnd, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(amount.as_i64())
    }

    /// Deserialize the amount from a bare integer.
    ///
    /// # Errors
    ///
    /// Rejects negative values.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vnd, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        if raw < 0 {
            return Err(serde::de::Error::custom("amount cannot be negative"));
        }
        Ok(Vnd::new(raw))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_comma_grouped() {
        assert_eq!(Vnd::parse("55,000").unwrap(), Vnd::new(55_000));
        assert_eq!(Vnd::parse("142,500").unwrap(), Vnd::new(142_500));
        assert_eq!(Vnd::parse("1,234,567").unwrap(), Vnd::new(1_234_567));
    }

    #[test]
    fn test_parse_dot_grouped() {
        assert_eq!(Vnd::parse("55.000").unwrap(), Vnd::new(55_000));
        // Mixed separators are stripped indiscriminately
        assert_eq!(Vnd::parse("1.234,567").unwrap(), Vnd::new(1_234_567));
    }

    #[test]
    fn test_parse_plain_digits() {
        assert_eq!(Vnd::parse("30000").unwrap(), Vnd::new(30_000));
        assert_eq!(Vnd::parse("0").unwrap(), Vnd::ZERO);
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert_eq!(Vnd::parse(""), Err(VndParseError::Empty));
        assert_eq!(Vnd::parse(",,."), Err(VndParseError::Empty));
        assert_eq!(Vnd::parse("   "), Err(VndParseError::Empty));
    }

    #[test]
    fn test_parse_rejects_non_digits() {
        assert_eq!(
            Vnd::parse("55,000đ"),
            Err(VndParseError::InvalidCharacter('đ'))
        );
        assert_eq!(Vnd::parse("-5"), Err(VndParseError::InvalidCharacter('-')));
        assert_eq!(
            Vnd::parse("1 000"),
            Err(VndParseError::InvalidCharacter(' '))
        );
    }

    #[test]
    fn test_display_grouping() {
        assert_eq!(Vnd::new(0).to_string(), "0");
        assert_eq!(Vnd::new(999).to_string(), "999");
        assert_eq!(Vnd::new(1_000).to_string(), "1,000");
        assert_eq!(Vnd::new(55_000).to_string(), "55,000");
        assert_eq!(Vnd::new(1_234_567).to_string(), "1,234,567");
        assert_eq!(Vnd::new(290_000).to_string(), "290,000");
    }

    #[test]
    fn test_display_parse_roundtrip() {
        for amount in [0, 1, 999, 1_000, 55_000, 142_500, 12_345_678] {
            let vnd = Vnd::new(amount);
            assert_eq!(Vnd::parse(&vnd.to_string()).unwrap(), vnd);
        }
    }

    #[test]
    fn test_arithmetic() {
        let total = Vnd::new(55_000) * 2 + Vnd::new(150_000);
        assert_eq!(total, Vnd::new(260_000));

        let summed: Vnd = [Vnd::new(100), Vnd::new(200), Vnd::new(300)]
            .into_iter()
            .sum();
        assert_eq!(summed, Vnd::new(600));
    }

    #[test]
    fn test_serde_string_representation() {
        let price = Vnd::new(142_500);
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "\"142,500\"");

        let back: Vnd = serde_json::from_str("\"142,500\"").unwrap();
        assert_eq!(back, price);
    }

    #[test]
    fn test_serde_minor_units_adapter() {
        #[derive(serde::Serialize, serde::Deserialize)]
        struct Wrapper {
            #[serde(with = "super::minor_units")]
            total: Vnd,
        }

        let json = serde_json::to_string(&Wrapper {
            total: Vnd::new(290_000),
        })
        .unwrap();
        assert_eq!(json, r#"{"total":290000}"#);

        let back: Wrapper = serde_json::from_str(r#"{"total":290000}"#).unwrap();
        assert_eq!(back.total, Vnd::new(290_000));

        assert!(serde_json::from_str::<Wrapper>(r#"{"total":-1}"#).is_err());
    }
}
