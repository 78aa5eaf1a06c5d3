//! Rental records.
//!
//! A [`RentalRecord`] is the receipt for a successful rental. It is not
//! `Clone`: handing it back to the shop moves it, so the same receipt cannot
//! be returned twice. The shop additionally tracks which records are
//! outstanding, which also covers records rebuilt from serialized form.
//!
//! [`RentalInfo`] is the loose form of the same data, where any field may be
//! absent. The shop checks presence explicitly before billing it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

use crate::Basis;

/// Identifier of a rental: the issuing shop plus a sequence number that
/// shop assigned. Shops in one process never share an identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RecordId {
    shop: u64,
    seq: u64,
}

impl RecordId {
    pub(crate) const fn new(shop: u64, seq: u64) -> Self {
        Self { shop, seq }
    }

    /// Identity of the shop that issued the rental.
    #[must_use]
    pub const fn shop(self) -> u64 {
        self.shop
    }

    /// Sequence number within the issuing shop, starting at 1.
    #[must_use]
    pub const fn seq(self) -> u64 {
        self.seq
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.seq)
    }
}

/// The receipt for a successful rental.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalRecord {
    id: RecordId,
    rental_time: DateTime<Utc>,
    basis: Basis,
    num_cars: NonZeroU32,
}

impl RentalRecord {
    pub(crate) const fn new(
        id: RecordId,
        rental_time: DateTime<Utc>,
        basis: Basis,
        num_cars: NonZeroU32,
    ) -> Self {
        Self {
            id,
            rental_time,
            basis,
            num_cars,
        }
    }

    /// The shop-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> RecordId {
        self.id
    }

    /// When the rental was granted.
    #[must_use]
    pub const fn rental_time(&self) -> DateTime<Utc> {
        self.rental_time
    }

    /// The billing basis.
    #[must_use]
    pub const fn basis(&self) -> Basis {
        self.basis
    }

    /// How many cars were rented.
    #[must_use]
    pub const fn num_cars(&self) -> u32 {
        self.num_cars.get()
    }
}

impl fmt::Display for RentalRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rental {}: {} car(s) on a {} basis since {}",
            self.id,
            self.num_cars,
            self.basis,
            self.rental_time.format("%Y-%m-%d %H:%M:%S UTC")
        )
    }
}

/// Rental details supplied field by field.
///
/// `num_cars` of zero is treated the same as a missing count.
///
/// # Examples
///
/// ```
/// use carrental_core::RentalInfo;
///
/// let info = RentalInfo::default();
/// assert_eq!(info.missing_fields(), vec!["rental_time", "basis", "num_cars"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalInfo {
    /// When the rental was granted.
    pub rental_time: Option<DateTime<Utc>>,
    /// Billing basis, as text.
    pub basis: Option<String>,
    /// How many cars were rented.
    pub num_cars: Option<u32>,
}

impl RentalInfo {
    /// Build a complete info value.
    #[must_use]
    pub fn new(rental_time: DateTime<Utc>, basis: impl Into<String>, num_cars: u32) -> Self {
        Self {
            rental_time: Some(rental_time),
            basis: Some(basis.into()),
            num_cars: Some(num_cars),
        }
    }

    /// Names of the fields that are absent (or, for the count, zero).
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.rental_time.is_none() {
            missing.push("rental_time");
        }
        if self.basis.as_deref().map_or(true, |b| b.trim().is_empty()) {
            missing.push("basis");
        }
        if self.num_cars.map_or(true, |n| n == 0) {
            missing.push("num_cars");
        }
        missing
    }
}

impl From<&RentalRecord> for RentalInfo {
    fn from(record: &RentalRecord) -> Self {
        Self::new(
            record.rental_time,
            record.basis.as_str(),
            record.num_cars.get(),
        )
    }
}
