//! Bills and billable-unit arithmetic.

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Basis, RateTable, RentalError};

/// Number of periods of `basis` charged for a rental lasting `elapsed`.
///
/// Any started period counts as a whole one and the result is never below
/// one, so an instant return (or a clock that stepped backwards) still bills
/// a single unit.
///
/// # Examples
///
/// ```
/// use carrental_core::{billable_units, Basis};
/// use chrono::TimeDelta;
///
/// assert_eq!(billable_units(TimeDelta::hours(25), Basis::Daily), 2);
/// assert_eq!(billable_units(TimeDelta::hours(24), Basis::Daily), 1);
/// assert_eq!(billable_units(TimeDelta::zero(), Basis::Weekly), 1);
/// ```
#[must_use]
pub fn billable_units(elapsed: TimeDelta, basis: Basis) -> u64 {
    if elapsed <= TimeDelta::zero() {
        return 1;
    }
    let period = basis.period_seconds();
    let seconds = elapsed.num_seconds();
    let mut units = seconds / period;
    if seconds % period != 0 || elapsed.subsec_nanos() > 0 {
        units += 1;
    }
    units.max(1) as u64
}

/// The charge for a returned rental.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bill {
    /// Billing basis of the rental.
    pub basis: Basis,
    /// Cars returned.
    pub num_cars: u32,
    /// Billable units (periods started).
    pub units: u64,
    /// Rate per car per unit.
    pub rate: Decimal,
    /// `units * rate * num_cars`.
    pub total: Decimal,
    /// Time between rental and return.
    #[serde(with = "elapsed_seconds")]
    pub elapsed: TimeDelta,
    /// When the cars came back.
    pub returned_at: DateTime<Utc>,
}

impl Bill {
    /// Compute the bill for `num_cars` rented at `rental_time` and returned at `returned_at`.
    ///
    /// Fails with [`RentalError::BillOverflow`] when the total is beyond what
    /// a [`Decimal`] can hold.
    pub fn compute(
        rates: &RateTable,
        basis: Basis,
        num_cars: u32,
        rental_time: DateTime<Utc>,
        returned_at: DateTime<Utc>,
    ) -> Result<Self, RentalError> {
        let elapsed = returned_at - rental_time;
        let units = billable_units(elapsed, basis);
        let rate = rates.rate(basis);
        let total = Decimal::from(units)
            .checked_mul(rate)
            .and_then(|per_car| per_car.checked_mul(Decimal::from(num_cars)))
            .ok_or(RentalError::BillOverflow {
                basis,
                num_cars,
                units,
            })?;
        Ok(Self {
            basis,
            num_cars,
            units,
            rate,
            total,
            elapsed,
            returned_at,
        })
    }
}

impl fmt::Display for Bill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Bill for {} car(s) on a {} basis ({} unit(s)): ${}",
            self.num_cars, self.basis, self.units, self.total
        )
    }
}

mod elapsed_seconds {
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(delta: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(delta.num_seconds())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TimeDelta, D::Error> {
        let seconds = i64::deserialize(deserializer)?;
        TimeDelta::try_seconds(seconds)
            .ok_or_else(|| serde::de::Error::custom("elapsed seconds out of range"))
    }
}
