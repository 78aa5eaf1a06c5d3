//! Customers of the rental shop.
//!
//! A [`Customer`] holds at most one rental at a time. Requesting stores the
//! shop's record; returning hands it back and clears it.

use tracing::{info, warn};

use crate::{Basis, Bill, CountArg, RentalError, RentalRecord, RentalShop};

/// A customer of a [`RentalShop`].
///
/// # Examples
///
/// ```
/// use carrental_core::{Customer, RentalShop};
/// use rust_decimal_macros::dec;
///
/// let mut shop = RentalShop::new(5);
/// let mut customer = Customer::new();
///
/// customer.request_car("hourly", 2, &mut shop).unwrap();
/// assert_eq!(shop.stock(), 3);
///
/// let bill = customer.return_car(&mut shop).unwrap();
/// assert_eq!(bill.total, dec!(10));
/// assert!(!customer.has_rental());
/// ```
#[derive(Debug, Default)]
pub struct Customer {
    name: Option<String>,
    rental: Option<RentalRecord>,
}

impl Customer {
    /// Create an anonymous customer with no rental.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a named customer with no rental.
    #[must_use]
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            rental: None,
        }
    }

    /// The customer's name, if given.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The rental currently held.
    #[must_use]
    pub const fn rental(&self) -> Option<&RentalRecord> {
        self.rental.as_ref()
    }

    /// Whether a rental is currently held.
    #[must_use]
    pub const fn has_rental(&self) -> bool {
        self.rental.is_some()
    }

    /// Ask `shop` for `num_cars` cars of `rental_type` (hourly, daily or weekly).
    ///
    /// An unrecognized rental type is refused without contacting the shop.
    /// A customer who already holds a rental must return it first. On any
    /// failure the held rental is left as it was.
    pub fn request_car(
        &mut self,
        rental_type: &str,
        num_cars: impl Into<CountArg>,
        shop: &mut RentalShop,
    ) -> Result<&RentalRecord, RentalError> {
        let Ok(basis) = rental_type.parse::<Basis>() else {
            let err = RentalError::InvalidRentalType {
                value: rental_type.to_string(),
            };
            warn!(code = err.code(), customer = self.label(), "{err}");
            return Err(err);
        };

        if let Some(held) = &self.rental {
            let err = RentalError::RentalAlreadyHeld { id: held.id() };
            warn!(code = err.code(), customer = self.label(), "{err}");
            return Err(err);
        }

        let record = shop.rent(basis, num_cars)?;
        Ok(&*self.rental.insert(record))
    }

    /// Return the held rental to `shop` and pay the bill.
    ///
    /// Without a rental this is [`RentalError::NoActiveRental`]. Otherwise the
    /// held record is cleared whatever the shop answers.
    pub fn return_car(&mut self, shop: &mut RentalShop) -> Result<Bill, RentalError> {
        let Some(record) = self.rental.take() else {
            info!(customer = self.label(), "no cars to return");
            return Err(RentalError::NoActiveRental);
        };
        shop.return_cars(record)
    }

    fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("anonymous")
    }
}
