//! A shop handle that can be shared between threads.
//!
//! Every operation takes the shop's lock once, so the stock check and the
//! stock update of a rental can never interleave with another caller.

use parking_lot::Mutex;
use std::sync::Arc;

use crate::{Basis, Bill, CountArg, RentalError, RentalInfo, RentalRecord, RentalShop};

/// Thread-safe handle to a [`RentalShop`]. Clones refer to the same shop.
///
/// # Examples
///
/// ```
/// use carrental_core::{Basis, RentalShop, SharedShop};
/// use std::thread;
///
/// let shop = SharedShop::new(RentalShop::new(4));
/// let handles: Vec<_> = (0..8)
///     .map(|_| {
///         let shop = shop.clone();
///         thread::spawn(move || shop.rent(Basis::Hourly, 1).is_ok())
///     })
///     .collect();
/// let granted = handles
///     .into_iter()
///     .map(|h| h.join().unwrap())
///     .filter(|ok| *ok)
///     .count();
/// assert_eq!(granted, 4);
/// assert_eq!(shop.stock(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct SharedShop {
    inner: Arc<Mutex<RentalShop>>,
}

impl SharedShop {
    /// Wrap a shop for shared use.
    #[must_use]
    pub fn new(shop: RentalShop) -> Self {
        Self {
            inner: Arc::new(Mutex::new(shop)),
        }
    }

    /// Cars currently available.
    #[must_use]
    pub fn stock(&self) -> u32 {
        self.inner.lock().stock()
    }

    /// See [`RentalShop::display_stock`].
    pub fn display_stock(&self) -> u32 {
        self.inner.lock().display_stock()
    }

    /// See [`RentalShop::rent`].
    pub fn rent(
        &self,
        basis: Basis,
        n: impl Into<CountArg>,
    ) -> Result<RentalRecord, RentalError> {
        self.inner.lock().rent(basis, n)
    }

    /// See [`RentalShop::return_cars`].
    pub fn return_cars(&self, record: RentalRecord) -> Result<Bill, RentalError> {
        self.inner.lock().return_cars(record)
    }

    /// See [`RentalShop::return_info`].
    pub fn return_info(&self, info: &RentalInfo) -> Result<Bill, RentalError> {
        self.inner.lock().return_info(info)
    }

    /// Run `f` with exclusive access to the shop.
    pub fn with<R>(&self, f: impl FnOnce(&mut RentalShop) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

impl From<RentalShop> for SharedShop {
    fn from(shop: RentalShop) -> Self {
        Self::new(shop)
    }
}
