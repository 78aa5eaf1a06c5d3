//! Billing basis for a rental.
//!
//! A [`Basis`] names the period a rental is charged by. Every basis has a
//! fixed length; the number of periods a rental spans (rounded up) is what
//! ends up on the bill.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::RentalError;

/// Seconds in one hour.
pub const HOUR_SECONDS: i64 = 3_600;
/// Seconds in one day.
pub const DAY_SECONDS: i64 = 86_400;
/// Seconds in one week.
pub const WEEK_SECONDS: i64 = 7 * DAY_SECONDS;

/// The period a rental is billed by.
///
/// # Examples
///
/// ```
/// use carrental_core::Basis;
///
/// let basis: Basis = "daily".parse().unwrap();
/// assert_eq!(basis, Basis::Daily);
/// assert_eq!(basis.period_seconds(), 86_400);
/// assert_eq!(basis.to_string(), "daily");
///
/// assert!("monthly".parse::<Basis>().is_err());
/// assert!("Daily".parse::<Basis>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Basis {
    /// Charged per started hour.
    Hourly,
    /// Charged per started day.
    Daily,
    /// Charged per started week.
    Weekly,
}

impl Basis {
    /// All bases, shortest period first.
    pub const ALL: [Self; 3] = [Self::Hourly, Self::Daily, Self::Weekly];

    /// Length of one billing period in seconds.
    #[must_use]
    pub const fn period_seconds(self) -> i64 {
        match self {
            Self::Hourly => HOUR_SECONDS,
            Self::Daily => DAY_SECONDS,
            Self::Weekly => WEEK_SECONDS,
        }
    }

    /// Length of one billing period.
    #[must_use]
    pub fn period(self) -> TimeDelta {
        TimeDelta::seconds(self.period_seconds())
    }

    /// Lower-case name, as accepted by [`FromStr`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }
}

/// Only the exact lower-case names are accepted.
impl FromStr for Basis {
    type Err = RentalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            _ => Err(RentalError::UnknownBasis {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
