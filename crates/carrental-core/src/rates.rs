//! Per-car rates for each billing basis.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::Basis;

/// Default charge per car per started hour.
pub const DEFAULT_HOURLY_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 0);
/// Default charge per car per started day.
pub const DEFAULT_DAILY_RATE: Decimal = Decimal::from_parts(20, 0, 0, false, 0);
/// Default charge per car per started week.
pub const DEFAULT_WEEKLY_RATE: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// The charge per car for one unit of each basis.
///
/// # Examples
///
/// ```
/// use carrental_core::{Basis, RateTable};
/// use rust_decimal_macros::dec;
///
/// let rates = RateTable::default();
/// assert_eq!(rates.rate(Basis::Daily), dec!(20));
///
/// let discounted = rates.with_rate(Basis::Weekly, dec!(55.50));
/// assert_eq!(discounted.rate(Basis::Weekly), dec!(55.50));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RateTable {
    /// Rate per started hour.
    pub hourly: Decimal,
    /// Rate per started day.
    pub daily: Decimal,
    /// Rate per started week.
    pub weekly: Decimal,
}

impl RateTable {
    /// Look up the rate for a basis.
    #[must_use]
    pub const fn rate(&self, basis: Basis) -> Decimal {
        match basis {
            Basis::Hourly => self.hourly,
            Basis::Daily => self.daily,
            Basis::Weekly => self.weekly,
        }
    }

    /// Replace the rate for a single basis.
    #[must_use]
    pub const fn with_rate(mut self, basis: Basis, rate: Decimal) -> Self {
        match basis {
            Basis::Hourly => self.hourly = rate,
            Basis::Daily => self.daily = rate,
            Basis::Weekly => self.weekly = rate,
        }
        self
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            hourly: DEFAULT_HOURLY_RATE,
            daily: DEFAULT_DAILY_RATE,
            weekly: DEFAULT_WEEKLY_RATE,
        }
    }
}
