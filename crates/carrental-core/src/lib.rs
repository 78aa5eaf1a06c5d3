//! Core types for carrental
//!
//! This crate models a single-location car rental shop:
//!
//! - [`Basis`] - The period a rental is billed by (hourly, daily, weekly)
//! - [`RateTable`] - Per-car charge for one unit of each basis
//! - [`RentalShop`] - Owns the stock, grants rentals and bills returns
//! - [`RentalRecord`] - The receipt for a rental, consumed on return
//! - [`Bill`] - The charge for a returned rental
//! - [`Customer`] - Holds at most one rental at a time
//! - [`SharedShop`] - A shop handle that serializes callers across threads
//! - [`Clock`] - Replaceable time source ([`SystemClock`], [`ManualClock`])
//!
//! # Example
//!
//! ```
//! use carrental_core::{Customer, ManualClock, RentalError, RentalShop};
//! use chrono::TimeDelta;
//! use rust_decimal_macros::dec;
//! use std::sync::Arc;
//!
//! let clock = Arc::new(ManualClock::starting_now());
//! let mut shop = RentalShop::new(10).with_clock(clock.clone());
//! let mut customer = Customer::new();
//!
//! // Three cars on a daily basis
//! customer.request_car("daily", 3, &mut shop).unwrap();
//! assert_eq!(shop.stock(), 7);
//!
//! // 25 hours later: two started days
//! clock.advance(TimeDelta::hours(25));
//! let bill = customer.return_car(&mut shop).unwrap();
//! assert_eq!(bill.total, dec!(120)); // 2 * 20 * 3
//! assert_eq!(shop.stock(), 10);
//!
//! // Nothing left to return
//! assert_eq!(customer.return_car(&mut shop), Err(RentalError::NoActiveRental));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod basis;
pub mod bill;
pub mod clock;
pub mod count;
pub mod customer;
pub mod error;
pub mod options;
pub mod rates;
pub mod record;
pub mod shared;
pub mod shop;

pub use basis::Basis;
pub use bill::{billable_units, Bill};
pub use clock::{Clock, ManualClock, SystemClock};
pub use count::CountArg;
pub use customer::Customer;
pub use error::RentalError;
pub use options::{OptionWarning, ShopOptions};
pub use rates::{RateTable, DEFAULT_DAILY_RATE, DEFAULT_HOURLY_RATE, DEFAULT_WEEKLY_RATE};
pub use record::{RecordId, RentalInfo, RentalRecord};
pub use shared::SharedShop;
pub use shop::RentalShop;

// Re-export commonly used external types
pub use chrono::{DateTime, TimeDelta, Utc};
pub use rust_decimal::Decimal;
