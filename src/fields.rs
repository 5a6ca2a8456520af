// 🔢 Field Parsers
// Currency, calendar date and clock time parsing for receipt fields
//
// Currency is held as fixed-point millionths so that the round-dollar and
// quarter-multiple checks are exact integer arithmetic.

use crate::error::{FieldError, FieldKind};
use chrono::{Datelike, NaiveDate, NaiveTime};
use std::cmp::Ordering;

// ============================================================================
// CURRENCY
// ============================================================================

/// Number of fractional digits kept exactly by `Amount`
pub const AMOUNT_SCALE_DIGITS: u32 = 6;

/// Millionths per whole currency unit
pub const MICROS_PER_UNIT: i64 = 1_000_000;

/// Decimal currency amount in millionths of a unit
///
/// Digits past the sixth fractional place are not kept, but `excess` records
/// which side of `micros` the parsed value lies on (`Equal` when nothing
/// non-zero was dropped). Field order makes the derived ordering numeric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount {
    micros: i64,
    excess: Ordering,
}

impl Amount {
    pub const fn from_micros(micros: i64) -> Self {
        Amount {
            micros,
            excess: Ordering::Equal,
        }
    }

    /// Whole units and hundredths, e.g. `from_cents(1225)` is 12.25
    pub const fn from_cents(cents: i64) -> Self {
        Self::from_micros(cents * (MICROS_PER_UNIT / 100))
    }

    pub const fn micros(&self) -> i64 {
        self.micros
    }

    /// True when digits past the sixth fractional place were non-zero
    pub fn is_truncated(&self) -> bool {
        self.excess != Ordering::Equal
    }

    /// True when the amount has no fractional component
    pub fn is_whole(&self) -> bool {
        !self.is_truncated() && self.micros % MICROS_PER_UNIT == 0
    }

    /// True when the amount is an exact multiple of `step`
    pub fn is_multiple_of(&self, step: Amount) -> bool {
        !self.is_truncated() && step.micros != 0 && self.micros % step.micros == 0
    }

    /// `ceil(self * numerator / denominator)` as a whole number of units
    pub fn scaled_ceil(&self, numerator: i64, denominator: i64) -> i64 {
        let scaled = self.micros as i128 * numerator as i128;
        let divisor = denominator as i128 * MICROS_PER_UNIT as i128;
        let quotient = scaled / divisor;
        let remainder = scaled % divisor;
        // Truncation toward zero is already the ceiling for negative values.
        // Dropped digits only matter when the kept part divides exactly.
        let rounds_up = remainder > 0
            || (remainder == 0 && self.excess == Ordering::Greater && numerator > 0);
        let rounded = if rounds_up { quotient + 1 } else { quotient };
        rounded as i64
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self::from_micros(0)
    }
}

/// Parse a plain decimal string ("12.34", "-5", ".5") into an `Amount`
///
/// Any number of fractional digits is accepted. No currency symbols,
/// grouping separators, whitespace or exponents.
pub fn parse_currency(input: &str) -> Result<Amount, FieldError> {
    let err = |reason| FieldError::new(FieldKind::Currency, input, reason);

    let (negative, unsigned) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        Some(_) => (false, input),
        None => return Err(err("empty value")),
    };

    let (whole, frac) = match unsigned.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (unsigned, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(err("no digits"));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(err("not a decimal number"));
    }

    let mut micros: i64 = 0;
    for b in whole.bytes() {
        micros = micros
            .checked_mul(10)
            .and_then(|m| m.checked_add((b - b'0') as i64))
            .ok_or_else(|| err("value out of range"))?;
    }
    micros = micros
        .checked_mul(MICROS_PER_UNIT)
        .ok_or_else(|| err("value out of range"))?;

    let scale = AMOUNT_SCALE_DIGITS as usize;
    let (kept, dropped) = frac.split_at(frac.len().min(scale));

    let mut frac_micros: i64 = 0;
    for b in kept.bytes() {
        frac_micros = frac_micros * 10 + (b - b'0') as i64;
    }
    frac_micros *= 10_i64.pow((scale - kept.len()) as u32);

    let micros = micros
        .checked_add(frac_micros)
        .ok_or_else(|| err("value out of range"))?;

    let excess = match (dropped.bytes().any(|b| b != b'0'), negative) {
        (false, _) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (true, true) => Ordering::Less,
    };

    Ok(Amount {
        micros: if negative { -micros } else { micros },
        excess,
    })
}

// ============================================================================
// DATE / TIME
// ============================================================================

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(input: &str) -> Result<NaiveDate, FieldError> {
    if !matches_shape(input, b"dddd-dd-dd") {
        return Err(FieldError::new(FieldKind::Date, input, "expected YYYY-MM-DD"));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map_err(|_| FieldError::new(FieldKind::Date, input, "not a calendar date"))
}

/// Day-of-month of a `YYYY-MM-DD` date
pub fn parse_day_of_month(input: &str) -> Result<u32, FieldError> {
    parse_date(input).map(|date| date.day())
}

/// Parse an `HH:MM` 24-hour clock time
pub fn parse_time(input: &str) -> Result<NaiveTime, FieldError> {
    if !matches_shape(input, b"dd:dd") {
        return Err(FieldError::new(FieldKind::Time, input, "expected HH:MM"));
    }
    NaiveTime::parse_from_str(input, "%H:%M")
        .map_err(|_| FieldError::new(FieldKind::Time, input, "not a clock time"))
}

/// `d` matches an ASCII digit, anything else matches itself
fn matches_shape(input: &str, shape: &[u8]) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == shape.len()
        && bytes.iter().zip(shape).all(|(b, s)| match s {
            b'd' => b.is_ascii_digit(),
            other => b == other,
        })
}

// ============================================================================
// TESTS
// ============================================================================
