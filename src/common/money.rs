use bigdecimal::num_bigint::BigInt;
use bigdecimal::{BigDecimal, ParseBigDecimalError, ToPrimitive};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
const SCALE: i64 = 10_000;
const CENT: i64 = 100;

/// Largest magnitude a single parsed amount may have, in 4 dp units.
pub const MAX_UNITS: i128 = i64::MAX as i128;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
/// A monetary value stored as a fixed-point integer with 4 decimal places.
///
/// Parsed amounts are limited to the `i64` range (about 9.2e14) while the
/// value itself is held as `i128`. Any ledger that fits in memory can be
/// summed without overflow: fewer than 2^63 entries of at most 2^63 units
/// stay below 2^126.
///
/// # Examples
/// ```
/// use expense_ledger::common::money::Money;
///
/// let amount: Money = "12.5".parse().unwrap();
/// assert_eq!(amount.units(), 125_000);
/// assert_eq!(amount.to_string_4dp(), "12.5000");
/// assert_eq!(amount.to_string_2dp(), "12.50");
/// ```
pub struct Money(i128);

impl Money {
    pub fn new(units: i64) -> Self {
        Self(i128::from(units))
    }

    pub fn zero() -> Self {
        Self(0)
    }

    /// Raw value in ten-thousandths.
    pub fn units(&self) -> i128 {
        self.0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn abs(&self) -> Money {
        Self(self.0.abs())
    }

    pub fn to_string_4dp(&self) -> String {
        format!("{:.4}", BigDecimal::new(BigInt::from(self.0), 4))
    }

    /// Display form with two decimals, rounded half away from zero.
    pub fn to_string_2dp(&self) -> String {
        let units_per_cent = (SCALE / CENT) as u128;
        let cents = (self.0.unsigned_abs() + units_per_cent / 2) / units_per_cent;
        let sign = if self.0 < 0 && cents > 0 { "-" } else { "" };
        let cent = CENT as u128;
        format!("{sign}{}.{:02}", cents / cent, cents % cent)
    }
}

impl std::str::FromStr for Money {
    type Err = ParseBigDecimalError;

    /// Rounds half to even at 4 dp; rejects anything outside `MAX_UNITS`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(ParseBigDecimalError::Other("empty amount".into()));
        }

        let units = (text.parse::<BigDecimal>()? * BigDecimal::from(SCALE))
            .round(0)
            .to_i128()
            .filter(|u| u.abs() <= MAX_UNITS)
            .ok_or_else(|| ParseBigDecimalError::Other(format!("amount out of range: {text}")))?;
        Ok(Self(units))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_4dp())
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money {
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        Self(iter.map(|m| m.0).sum())
    }
}
