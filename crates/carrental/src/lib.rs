//! Command-line front end for carrental.
//!
//! The `rental-sim` binary configures a [`RentalShop`](carrental_core::RentalShop),
//! sends one customer through a rent/return cycle on a simulated clock and
//! prints the bill.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cmd;
