//! The rental shop.
//!
//! A [`RentalShop`] owns the stock of cars available for rent. Renting
//! validates the request and, only if every check passes, takes the cars out
//! of stock and issues a [`RentalRecord`] in one step. Returning bills the
//! rental from the elapsed time and puts the cars back.
//!
//! The shop remembers every record it has issued and not yet billed, so a
//! record can be settled at most once no matter how it is presented.

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::num::NonZeroU32;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    Basis, Bill, Clock, CountArg, RateTable, RecordId, RentalError, RentalInfo, RentalRecord,
    ShopOptions, SystemClock,
};

/// Identity handed to the next shop created in this process.
static NEXT_SHOP_ID: AtomicU64 = AtomicU64::new(1);

/// A rental that has been granted and not yet returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Outstanding {
    rental_time: DateTime<Utc>,
    basis: Basis,
    num_cars: u32,
}

/// A single-location car rental shop.
///
/// # Examples
///
/// ```
/// use carrental_core::{Basis, ManualClock, RentalShop};
/// use chrono::TimeDelta;
/// use rust_decimal_macros::dec;
/// use std::sync::Arc;
///
/// let clock = Arc::new(ManualClock::starting_now());
/// let mut shop = RentalShop::new(10).with_clock(clock.clone());
///
/// let record = shop.rent(Basis::Daily, 3).unwrap();
/// assert_eq!(shop.stock(), 7);
///
/// clock.advance(TimeDelta::hours(25));
/// let bill = shop.return_cars(record).unwrap();
/// assert_eq!(bill.units, 2);
/// assert_eq!(bill.total, dec!(120));
/// assert_eq!(shop.stock(), 10);
/// ```
#[derive(Debug)]
pub struct RentalShop {
    id: u64,
    stock: u32,
    rates: RateTable,
    clock: Arc<dyn Clock>,
    outstanding: BTreeMap<RecordId, Outstanding>,
    next_id: u64,
}

impl RentalShop {
    /// Create a shop with `stock` cars, the default rates and the system clock.
    #[must_use]
    pub fn new(stock: u32) -> Self {
        Self {
            id: NEXT_SHOP_ID.fetch_add(1, Ordering::Relaxed),
            stock,
            rates: RateTable::default(),
            clock: Arc::new(SystemClock),
            outstanding: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Create a shop from configuration.
    #[must_use]
    pub fn from_options(options: &ShopOptions) -> Self {
        Self::new(options.stock).with_rates(options.rates)
    }

    /// Use a different time source.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Use a different rate table.
    #[must_use]
    pub const fn with_rates(mut self, rates: RateTable) -> Self {
        self.rates = rates;
        self
    }

    /// Identity of this shop, carried by every [`RecordId`] it issues.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Cars currently available.
    #[must_use]
    pub const fn stock(&self) -> u32 {
        self.stock
    }

    /// The rate table in use.
    #[must_use]
    pub const fn rates(&self) -> &RateTable {
        &self.rates
    }

    /// The current instant according to the shop's clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Number of rentals issued and not yet returned.
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.outstanding.len()
    }

    /// Cars currently out on rental.
    #[must_use]
    pub fn outstanding_cars(&self) -> u64 {
        self.outstanding
            .values()
            .map(|o| u64::from(o.num_cars))
            .sum()
    }

    /// Announce and return the current stock.
    pub fn display_stock(&self) -> u32 {
        if self.stock > 0 {
            info!(stock = self.stock, "{} cars available", self.stock);
        } else {
            info!(stock = 0, "no cars available");
        }
        self.stock
    }

    /// Rent `n` cars on `basis`.
    ///
    /// Checks run in order and the first failure wins: the count must be a
    /// genuine integer, at least one, and no more than the current stock.
    /// On failure nothing changes.
    pub fn rent(
        &mut self,
        basis: Basis,
        n: impl Into<CountArg>,
    ) -> Result<RentalRecord, RentalError> {
        let num_cars = match self.validate_count(&n.into()) {
            Ok(num_cars) => num_cars,
            Err(err) => {
                warn!(code = err.code(), %basis, "rental refused: {err}");
                return Err(err);
            }
        };

        let rental_time = self.clock.now();
        let id = RecordId::new(self.id, self.next_id);
        self.next_id += 1;
        self.stock -= num_cars.get();
        self.outstanding.insert(
            id,
            Outstanding {
                rental_time,
                basis,
                num_cars: num_cars.get(),
            },
        );

        info!(
            %id,
            %basis,
            cars = num_cars.get(),
            "You rented {num_cars} car(s) on a {basis} basis"
        );
        Ok(RentalRecord::new(id, rental_time, basis, num_cars))
    }

    /// Rent `n` cars billed per started hour.
    pub fn rent_hourly(&mut self, n: impl Into<CountArg>) -> Result<RentalRecord, RentalError> {
        self.rent(Basis::Hourly, n)
    }

    /// Rent `n` cars billed per started day.
    pub fn rent_daily(&mut self, n: impl Into<CountArg>) -> Result<RentalRecord, RentalError> {
        self.rent(Basis::Daily, n)
    }

    /// Rent `n` cars billed per started week.
    pub fn rent_weekly(&mut self, n: impl Into<CountArg>) -> Result<RentalRecord, RentalError> {
        self.rent(Basis::Weekly, n)
    }

    fn validate_count(&self, arg: &CountArg) -> Result<NonZeroU32, RentalError> {
        let requested = arg.to_count()?;
        if requested <= 0 {
            return Err(RentalError::NonPositiveCount { requested });
        }
        if requested > i64::from(self.stock) {
            return Err(RentalError::InsufficientStock {
                requested,
                available: self.stock,
            });
        }
        u32::try_from(requested)
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or(RentalError::NonPositiveCount { requested })
    }

    /// Return the cars of `record` and bill them.
    ///
    /// The record must have been issued by this shop and not yet returned;
    /// otherwise the result is [`RentalError::AlreadyReturned`] and the stock
    /// is left alone. If the bill cannot be computed the rental stays
    /// outstanding and can still be settled through [`Self::return_info`].
    pub fn return_cars(&mut self, record: RentalRecord) -> Result<Bill, RentalError> {
        let now = self.clock.now();
        let id = record.id();
        let expected = Outstanding {
            rental_time: record.rental_time(),
            basis: record.basis(),
            num_cars: record.num_cars(),
        };

        if id.shop() != self.id || self.outstanding.get(&id) != Some(&expected) {
            let err = RentalError::AlreadyReturned { id };
            warn!(code = err.code(), shop = id.shop(), "return refused: {err}");
            return Err(err);
        }

        self.settle(id, expected, now)
    }

    /// Return cars described field by field and bill them.
    ///
    /// All three fields must be present, the basis must be known, and the
    /// details must match a rental that is still outstanding
    /// ([`RentalError::NoMatchingRental`] otherwise). When several
    /// outstanding rentals match, the oldest is settled.
    pub fn return_info(&mut self, info: &RentalInfo) -> Result<Bill, RentalError> {
        let now = self.clock.now();

        let (Some(rental_time), Some(basis_text), Some(num_cars)) =
            (info.rental_time, info.basis.as_deref(), info.num_cars)
        else {
            return Err(self.refuse_info(info));
        };
        if num_cars == 0 || basis_text.trim().is_empty() {
            return Err(self.refuse_info(info));
        }

        let basis = match basis_text.parse::<Basis>() {
            Ok(basis) => basis,
            Err(err) => {
                warn!(code = err.code(), "return refused: {err}");
                return Err(err);
            }
        };

        let wanted = Outstanding {
            rental_time,
            basis,
            num_cars,
        };
        let Some(id) = self
            .outstanding
            .iter()
            .find(|(_, o)| **o == wanted)
            .map(|(id, _)| *id)
        else {
            let err = RentalError::NoMatchingRental { basis, num_cars };
            warn!(code = err.code(), "return refused: {err}");
            return Err(err);
        };

        self.settle(id, wanted, now)
    }

    fn refuse_info(&self, info: &RentalInfo) -> RentalError {
        let err = RentalError::InvalidRentalInfo {
            missing: info.missing_fields(),
        };
        warn!(code = err.code(), stock = self.stock, "return refused: {err}");
        err
    }

    /// Bill an outstanding rental, then take it off the list and restock.
    /// `now` is read once by the caller. Nothing changes if billing fails.
    fn settle(
        &mut self,
        id: RecordId,
        rental: Outstanding,
        now: DateTime<Utc>,
    ) -> Result<Bill, RentalError> {
        let bill = match Bill::compute(
            &self.rates,
            rental.basis,
            rental.num_cars,
            rental.rental_time,
            now,
        ) {
            Ok(bill) => bill,
            Err(err) => {
                warn!(code = err.code(), %id, "return refused: {err}");
                return Err(err);
            }
        };

        self.outstanding.remove(&id);
        self.stock += rental.num_cars;

        debug!(
            %id,
            elapsed_secs = bill.elapsed.num_seconds(),
            units = bill.units,
            rate = %bill.rate,
            "computed bill"
        );
        info!(%id, total = %bill.total, stock = self.stock, "{bill}");
        Ok(bill)
    }
}

impl Default for RentalShop {
    fn default() -> Self {
        Self::new(0)
    }
}
