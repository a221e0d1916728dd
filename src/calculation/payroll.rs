//! Monetary valuation of worked and overwork time.
//!
//! All worked hours are paid at the base hourly rate. Overwork hours are
//! paid a premium on top of that, expressed as a multiplier of the base
//! rate (0.40 by default, i.e. overwork costs 140% in total).

use chrono::TimeDelta;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::duration::hours_decimal;

/// Default overwork premium multiplier (40%).
pub const DEFAULT_OVERWORK_PREMIUM: Decimal = Decimal::from_parts(40, 0, 0, false, 2);

/// Number of decimal places amounts are rounded to.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// The value of a span of work, split into base pay and overwork premium.
///
/// Amounts are kept at full precision so several values can be summed
/// before rounding; call [`PayValue::rounded`] for presentation.
///
/// # Example
///
/// ```
/// use overwork_tracker::calculation::PayValue;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let value = PayValue {
///     regular_amount: Decimal::from_str("100.005").unwrap(),
///     premium_amount: Decimal::from_str("0.004").unwrap(),
/// };
/// let rounded = value.rounded();
/// assert_eq!(rounded.regular_amount, Decimal::from_str("100.01").unwrap());
/// assert_eq!(rounded.total(), Decimal::from_str("100.01").unwrap());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayValue {
    /// Worked hours at the base rate.
    pub regular_amount: Decimal,
    /// Overwork hours at the base rate times the premium multiplier.
    pub premium_amount: Decimal,
}

impl PayValue {
    /// Sum of base pay and premium.
    pub fn total(&self) -> Decimal {
        self.regular_amount + self.premium_amount
    }

    /// Rounds both components to cents, midpoint away from zero.
    pub fn rounded(&self) -> PayValue {
        PayValue {
            regular_amount: round_money(self.regular_amount),
            premium_amount: round_money(self.premium_amount),
        }
    }
}

impl std::ops::Add for PayValue {
    type Output = PayValue;

    fn add(self, rhs: PayValue) -> PayValue {
        PayValue {
            regular_amount: self.regular_amount + rhs.regular_amount,
            premium_amount: self.premium_amount + rhs.premium_amount,
        }
    }
}

impl std::iter::Sum for PayValue {
    fn sum<I: Iterator<Item = PayValue>>(iter: I) -> PayValue {
        iter.fold(PayValue::default(), |acc, v| acc + v)
    }
}

/// Rounds a monetary amount to [`MONEY_DECIMAL_PLACES`].
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Values worked time and its overwork portion.
///
/// # Arguments
///
/// * `worked` - Total worked duration, overwork included
/// * `overwork` - The part of `worked` that is overwork
/// * `hourly_rate` - Base hourly rate
/// * `premium` - Multiplier applied on top of the base rate for overwork
///
/// # Examples
///
/// ```
/// use overwork_tracker::calculation::{calculate_value, DEFAULT_OVERWORK_PREMIUM};
/// use chrono::TimeDelta;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let value = calculate_value(
///     TimeDelta::hours(10),
///     TimeDelta::hours(1),
///     Decimal::from_str("30.00").unwrap(),
///     DEFAULT_OVERWORK_PREMIUM,
/// );
/// assert_eq!(value.regular_amount, Decimal::from_str("300.00").unwrap());
/// assert_eq!(value.premium_amount, Decimal::from_str("12.00").unwrap());
/// assert_eq!(value.total(), Decimal::from_str("312.00").unwrap());
/// ```
pub fn calculate_value(
    worked: TimeDelta,
    overwork: TimeDelta,
    hourly_rate: Decimal,
    premium: Decimal,
) -> PayValue {
    PayValue {
        regular_amount: hours_decimal(worked) * hourly_rate,
        premium_amount: hours_decimal(overwork) * hourly_rate * premium,
    }
}
