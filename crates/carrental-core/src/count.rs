//! Raw car-count input.
//!
//! Counts reach the shop from loosely typed places (command lines, decoded
//! requests). [`CountArg`] keeps track of what kind of value was supplied so
//! that only genuine integers are accepted: a boolean is never a count, and
//! neither is a decimal, even an integral one like `3.0`.

use rust_decimal::Decimal;
use std::fmt;

use crate::RentalError;

/// A car count as supplied by the caller, before validation.
///
/// # Examples
///
/// ```
/// use carrental_core::{CountArg, RentalError};
///
/// assert_eq!(CountArg::from(3).to_count(), Ok(3));
/// assert_eq!(CountArg::from(" 4 ").to_count(), Ok(4));
/// assert!(matches!(
///     CountArg::from(true).to_count(),
///     Err(RentalError::InvalidCountType { .. })
/// ));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountArg {
    /// A genuine integer.
    Integer(i64),
    /// A boolean. Always rejected.
    Boolean(bool),
    /// A decimal number. Always rejected.
    Decimal(Decimal),
    /// Text; accepted only if it is a plain base-10 integer.
    Text(String),
}

impl CountArg {
    /// Extract the integer count, or fail with [`RentalError::InvalidCountType`].
    ///
    /// Sign is not checked here; the shop rejects counts below one separately.
    pub fn to_count(&self) -> Result<i64, RentalError> {
        match self {
            Self::Integer(n) => Ok(*n),
            Self::Text(text) => text.trim().parse::<i64>().map_err(|_| self.invalid()),
            Self::Boolean(_) | Self::Decimal(_) => Err(self.invalid()),
        }
    }

    fn invalid(&self) -> RentalError {
        RentalError::InvalidCountType {
            input: self.to_string(),
        }
    }
}

impl fmt::Display for CountArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Decimal(d) => write!(f, "{d}"),
            Self::Text(s) => write!(f, "{s:?}"),
        }
    }
}

macro_rules! impl_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for CountArg {
                fn from(n: $t) -> Self {
                    Self::Integer(i64::from(n))
                }
            }
        )*
    };
}

impl_from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for CountArg {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<Decimal> for CountArg {
    fn from(d: Decimal) -> Self {
        Self::Decimal(d)
    }
}

impl From<&str> for CountArg {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CountArg {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}
