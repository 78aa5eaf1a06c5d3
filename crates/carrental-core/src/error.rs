//! Rental failures.
//!
//! Every failure is local and recoverable: the operation that detects it
//! returns it and leaves the shop and the customer exactly as they were.

use thiserror::Error;

use crate::{Basis, RecordId};

/// Errors reported by the shop and by customers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RentalError {
    /// The count was not a genuine integer (booleans and decimals included).
    #[error("please enter an integer number of cars (got {input})")]
    InvalidCountType {
        /// The rejected input, rendered for display.
        input: String,
    },

    /// The count was zero or negative.
    #[error("number of cars should be at least 1 (got {requested})")]
    NonPositiveCount {
        /// The requested count.
        requested: i64,
    },

    /// More cars were requested than are in stock.
    #[error("only {available} car(s) available right now (requested {requested})")]
    InsufficientStock {
        /// The requested count.
        requested: i64,
        /// Stock at the time of the request.
        available: u32,
    },

    /// A customer asked for a rental type other than hourly, daily or weekly.
    #[error("invalid rental type \"{value}\": choose hourly, daily or weekly")]
    InvalidRentalType {
        /// The rejected rental type.
        value: String,
    },

    /// A basis string did not name a known basis.
    #[error("unknown rental basis \"{value}\"")]
    UnknownBasis {
        /// The rejected basis.
        value: String,
    },

    /// A return was attempted with rental details missing.
    #[error("invalid rental info: missing {}", .missing.join(", "))]
    InvalidRentalInfo {
        /// Names of the missing fields.
        missing: Vec<&'static str>,
    },

    /// A customer tried to return cars without holding a rental.
    #[error("no cars to return")]
    NoActiveRental,

    /// The rental is not outstanding at this shop.
    #[error("rental {id} is not outstanding at this shop")]
    AlreadyReturned {
        /// The rental that was presented.
        id: RecordId,
    },

    /// No outstanding rental matches the details supplied for a return.
    #[error("no outstanding {basis} rental of {num_cars} car(s) matches")]
    NoMatchingRental {
        /// Basis of the presented details.
        basis: Basis,
        /// Count of the presented details.
        num_cars: u32,
    },

    /// The bill total does not fit in a decimal.
    #[error("bill for {num_cars} car(s) over {units} {basis} unit(s) is too large to compute")]
    BillOverflow {
        /// Basis of the rental.
        basis: Basis,
        /// Cars being returned.
        num_cars: u32,
        /// Billable units.
        units: u64,
    },

    /// A customer already holds a rental and must return it first.
    #[error("customer already holds rental {id}; return it first")]
    RentalAlreadyHeld {
        /// The rental currently held.
        id: RecordId,
    },
}

impl RentalError {
    /// Stable short code for machine-readable output.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidCountType { .. } => "R001",
            Self::NonPositiveCount { .. } => "R002",
            Self::InsufficientStock { .. } => "R003",
            Self::InvalidRentalType { .. } => "R004",
            Self::UnknownBasis { .. } => "R005",
            Self::InvalidRentalInfo { .. } => "R006",
            Self::NoActiveRental => "R007",
            Self::AlreadyReturned { .. } => "R008",
            Self::RentalAlreadyHeld { .. } => "R009",
            Self::NoMatchingRental { .. } => "R010",
            Self::BillOverflow { .. } => "R011",
        }
    }

    /// Whether this is a notice rather than a real failure.
    #[must_use]
    pub const fn is_informational(&self) -> bool {
        matches!(self, Self::NoActiveRental)
    }
}
