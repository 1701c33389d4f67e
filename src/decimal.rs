use bigdecimal::num_bigint::BigInt;
use bigdecimal::{BigDecimal, ParseBigDecimalError, RoundingMode, Zero};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use std::str::FromStr;

/// exact conversion of a fixed-precision decimal
fn to_big(d: Decimal) -> BigDecimal {
    BigDecimal::new(BigInt::from(d.mantissa()), i64::from(d.scale()))
}

/// Money type with 8 decimal places precision and no upper bound
///
/// Every stored amount is rounded to at most 8 places, so sums of stored
/// amounts are exact and row identities (end = start + contributions +
/// interest) hold without tolerance. Balances may grow past any fixed-width
/// decimal range (e.g. 1000% for 100 years).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
pub struct Money(BigDecimal);

impl Money {
    /// storage precision
    pub const SCALE: i64 = 8;

    fn stored(value: BigDecimal) -> Self {
        let (_, scale) = value.as_bigint_and_exponent();
        if scale > Self::SCALE {
            Money(value.with_scale_round(Self::SCALE, RoundingMode::HalfEven))
        } else {
            Money(value)
        }
    }

    pub fn zero() -> Self {
        Money(BigDecimal::zero())
    }

    pub fn one() -> Self {
        Money(BigDecimal::from(1))
    }

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Self::stored(to_big(d))
    }

    pub fn from_big_decimal(d: BigDecimal) -> Self {
        Self::stored(d)
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, ParseBigDecimalError> {
        Ok(Self::stored(BigDecimal::from_str(s.trim())?))
    }

    /// create from integer amount (dollars, euros, etc)
    pub fn from_major(amount: i64) -> Self {
        Money(BigDecimal::from(amount))
    }

    /// round to specified decimal places
    pub fn round_dp(&self, dp: u32) -> Self {
        Money(self.0.with_scale_round(i64::from(dp), RoundingMode::HalfEven))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// strictly below zero
    pub fn is_negative(&self) -> bool {
        self.0 < BigDecimal::zero()
    }

    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// multiply by a rate, e.g. balance x periodic rate = interest
    pub fn apply(&self, rate: Rate) -> Money {
        Self::stored(self.0.clone() * to_big(rate.as_decimal()))
    }

    /// multiply by a whole count, e.g. per-event amount x events
    pub fn times(&self, count: u32) -> Money {
        Money(self.0.clone() * BigDecimal::from(count))
    }

    /// split an amount into `parts` equal shares
    pub fn split(&self, parts: u32) -> Money {
        if parts == 0 {
            return Money::zero();
        }
        Self::stored(self.0.clone() / BigDecimal::from(parts))
    }

    /// fixed-point text with exactly `dp` fractional digits, half away from zero
    pub fn to_fixed(&self, dp: u32) -> String {
        let rounded = self.0.with_scale_round(i64::from(dp), RoundingMode::HalfUp);
        let (digits, _) = rounded.as_bigint_and_exponent();
        let text = digits.to_string();
        let (sign, magnitude) = match text.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", text.as_str()),
        };
        let dp = dp as usize;
        if dp == 0 {
            return format!("{sign}{magnitude}");
        }
        let padded = format!("{:0>width$}", magnitude, width = dp + 1);
        let (whole, fraction) = padded.split_at(padded.len() - dp);
        format!("{sign}{whole}.{fraction}")
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = ParseBigDecimalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Money::from_decimal(d)
    }
}

impl From<u32> for Money {
    fn from(i: u32) -> Self {
        Money::from_major(i64::from(i))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0 + other.0)
    }
}

impl<'a> Add<&'a Money> for Money {
    type Output = Money;

    fn add(self, other: &'a Money) -> Money {
        Money(self.0 + &other.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 += other.0;
    }
}

impl<'a> AddAssign<&'a Money> for Money {
    fn add_assign(&mut self, other: &'a Money) {
        self.0 += &other.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, x| acc + x)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), |acc, x| acc + x)
    }
}

/// rate type for interest rates, percentages, and ratios
///
/// Stored as a fraction (0.05 for 5%) at full decimal precision; periodic
/// rates keep up to 28 significant digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);

    /// create from decimal (e.g., 0.05 for 5%)
    pub fn from_decimal(d: Decimal) -> Self {
        Rate(d)
    }

    /// create from percentage (e.g., 5 for 5%, -2.5 for -2.5%)
    pub fn from_percentage(p: Decimal) -> Self {
        Rate(p / Decimal::ONE_HUNDRED)
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    pub fn as_percentage(&self) -> Decimal {
        self.0 * Decimal::ONE_HUNDRED
    }

    /// rate applied per compounding period
    pub fn periodic(&self, periods_per_year: u32) -> Rate {
        if periods_per_year == 0 {
            return Rate::ZERO;
        }
        Rate(self.0 / Decimal::from(periods_per_year))
    }

    /// effective annual yield for a nominal rate compounded n times a year
    ///
    /// Returns `None` when (1 + r/n)^n overflows.
    pub fn effective_annual(&self, periods_per_year: u32) -> Option<Rate> {
        let base = Decimal::ONE.checked_add(self.periodic(periods_per_year).0)?;
        let mut factor = Decimal::ONE;
        for _ in 0..periods_per_year {
            factor = factor.checked_mul(base)?;
        }
        Some(Rate(factor - Decimal::ONE))
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage().normalize())
    }
}

impl From<Decimal> for Rate {
    fn from(d: Decimal) -> Self {
        Rate::from_decimal(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_precision() {
        let m = Money::from_str_exact("100.123456789").unwrap();
        assert_eq!(m.to_string(), "100.12345679"); // rounded to 8 places
    }

    #[test]
    fn test_fixed_formatting() {
        assert_eq!(Money::from_major(1000).to_fixed(2), "1000.00");
        assert_eq!(Money::from_decimal(dec!(57.5)).to_fixed(2), "57.50");
        assert_eq!(Money::from_decimal(dec!(4.165)).to_fixed(2), "4.17");
        assert_eq!(Money::from_decimal(dec!(0.004)).to_fixed(2), "0.00");
        assert_eq!(Money::from_decimal(dec!(-0.001)).to_fixed(2), "0.00");
        assert_eq!(Money::from_decimal(dec!(-12.345)).to_fixed(2), "-12.35");
        assert_eq!(Money::from_decimal(dec!(7.5)).to_fixed(0), "8");
    }

    #[test]
    fn test_decimal_conversion_is_exact() {
        let m = Money::from_decimal(dec!(-1234.56780000));
        assert_eq!(m, Money::from_str_exact("-1234.5678").unwrap());
        assert!(m.is_negative());
        assert_eq!(m.abs(), Money::from_str_exact("1234.5678").unwrap());
    }

    #[test]
    fn test_periodic_rate_precision() {
        let monthly = Rate::from_percentage(dec!(5)).periodic(12);
        // at least 20 fractional digits survive the division
        assert!(monthly.as_decimal().scale() >= 20);
        assert_eq!(monthly.as_decimal().round_dp(10), dec!(0.0041666667));
    }

    #[test]
    fn test_split_and_times() {
        let per_event = Money::from_major(100).split(3);
        assert_eq!(per_event, Money::from_str_exact("33.33333333").unwrap());
        assert_eq!(per_event.times(3), Money::from_str_exact("99.99999999").unwrap());
        assert_eq!(Money::from_major(100).split(0), Money::zero());
    }

    #[test]
    fn test_apply_rounds_to_storage_scale() {
        let interest = Money::from_major(1_000).apply(Rate::from_percentage(dec!(7)).periodic(365));
        assert_eq!(interest, Money::from_str_exact("0.19178082").unwrap());
    }

    #[test]
    fn test_growth_beyond_fixed_width_range() {
        // 1000% a year for a century: 11^100, far past 7.9e28
        let rate = Rate::from_percentage(dec!(1000));
        let mut balance = Money::one();
        for _ in 0..100 {
            let interest = balance.apply(rate);
            balance += interest;
        }
        let expected = BigDecimal::new(BigInt::from(11).pow(100u32), 0);
        assert_eq!(balance, Money::from_big_decimal(expected));
        assert_eq!(balance.to_fixed(2).len(), 105 + 3);
    }

    #[test]
    fn test_effective_annual() {
        let apr = Rate::from_percentage(dec!(18));

        let daily = apr.effective_annual(365).unwrap();
        assert!(daily.as_percentage() > dec!(19.7));
        assert!(daily.as_percentage() < dec!(19.8));

        let monthly = apr.effective_annual(12).unwrap();
        assert!(monthly.as_percentage() > dec!(19.5));
        assert!(monthly.as_percentage() < dec!(19.6));

        assert_eq!(apr.effective_annual(1).unwrap(), Rate::from_decimal(dec!(0.18)));
    }

    #[test]
    fn test_money_sum() {
        let values = [Money::from_major(1), Money::from_major(2), Money::from_major(3)];
        let total: Money = values.iter().sum();
        assert_eq!(total, Money::from_major(6));
    }
}
