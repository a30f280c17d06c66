use bigdecimal::BigDecimal;
use bigdecimal::*;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

const SCALE: i64 = 100;

#[derive(Debug, Clone, Copy, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
/// A monetary value in the smallest currency unit (paise).
///
/// Wrapping an `i64` keeps amounts out of floating point entirely: limit
/// comparisons and balance arithmetic stay exact, and a `Money` cannot be
/// confused with an attempt counter or an account age.
///
/// # Examples
/// ```
/// use branchbank::common::money::Money;
///
/// let amount: Money = "500.00".parse().unwrap();
/// assert_eq!(amount.as_i64(), 50000);
/// assert_eq!(amount.to_string_2dp(), "500.00");
/// ```
pub struct Money(i64);

impl Money {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn zero() -> Self {
        Money(0)
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }

    /// Monthly interest at `rate_bps` basis points per annum, truncated to
    /// the smallest unit.
    pub fn monthly_interest(&self, rate_bps: i64) -> Money {
        Money(self.0 * rate_bps / 10_000 / 12)
    }

    pub fn to_string_2dp(&self) -> String {
        let bd = BigDecimal::from(self.0) / BigDecimal::from(SCALE);
        format!("{:.2}", bd)
    }
}

impl std::str::FromStr for Money {
    type Err = ParseBigDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.is_empty() {
            return Err(ParseBigDecimalError::Other("empty amount".into()));
        }

        let bd: BigDecimal = t.parse()?;

        // Scale to 2 decimal places.
        let scaled = (bd * BigDecimal::from(SCALE)).round(0);
        let value: i64 = scaled
            .to_i64()
            .ok_or_else(|| ParseBigDecimalError::Other("amount overflow".into()))?;

        Ok(Money(value))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_2dp())
    }
}

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl Eq for Money {}

impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.0.cmp(&other.0))
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        *self = *self - rhs;
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(Money::zero(), Money(0));
        assert!(!Money::zero().is_positive());
    }

    #[test]
    fn test_from_str_valid() {
        assert_eq!(Money::from_str("1").unwrap(), Money(100));
        assert_eq!(Money::from_str("1.5").unwrap(), Money(150));
        assert_eq!(Money::from_str("500.00").unwrap(), Money(50000));
        assert_eq!(Money::from_str("0.01").unwrap(), Money(1));
        assert_eq!(Money::from_str("  2.00 ").unwrap(), Money(200));
    }

    #[test]
    fn test_from_str_rounding() {
        assert_eq!(Money::from_str("1.999").unwrap(), Money(200));
        assert_eq!(Money::from_str("0.001").unwrap(), Money(0));
    }

    #[test]
    fn test_from_str_invalid() {
        assert!(Money::from_str("").is_err());
        assert!(Money::from_str("   ").is_err());
        assert!(Money::from_str("abc").is_err());
    }

    #[test]
    fn test_to_string_2dp() {
        assert_eq!(Money(100).to_string_2dp(), "1.00");
        assert_eq!(Money(12345).to_string_2dp(), "123.45");
        assert_eq!(Money(1).to_string_2dp(), "0.01");
        assert_eq!(Money(0).to_string_2dp(), "0.00");
    }

    #[test]
    fn test_display() {
        assert_eq!(Money(10000).to_string(), "100.00");
        assert_eq!(Money(5000).to_string(), "50.00");
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(Money(10000) + Money(5000), Money(15000));
        assert_eq!(Money(15000) - Money(5000), Money(10000));

        let mut m = Money(10000);
        m += Money(5000);
        assert_eq!(m, Money(15000));
        m -= Money(15000);
        assert_eq!(m, Money::zero());
    }

    #[test]
    fn test_ordering() {
        assert!(Money(10000) < Money(15000));
        assert!(Money(15000) > Money(10000));
        assert!(Money(10000) <= Money(10000));
    }

    #[test]
    fn test_monthly_interest() {
        // 4.00% p.a. on 12,000.00 -> 40.00 per month.
        assert_eq!(Money(1_200_000).monthly_interest(400), Money(4000));
        // Truncates below one smallest unit.
        assert_eq!(Money(1).monthly_interest(400), Money::zero());
    }
}
