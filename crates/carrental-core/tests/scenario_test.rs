//! End-to-end rental scenarios.
//!
//! Each test drives a shop (and sometimes a customer) through a full
//! rent/return cycle on a manual clock and checks stock, bill and errors.

use carrental_core::{
    Basis, Customer, ManualClock, RentalError, RentalInfo, RentalShop, ShopOptions,
};
use chrono::{TimeDelta, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;

fn open_shop(stock: u32) -> (RentalShop, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2025, 2, 3, 8, 0, 0).unwrap(),
    ));
    (RentalShop::new(stock).with_clock(clock.clone()), clock)
}

#[test]
fn test_daily_rental_returned_after_25_hours() {
    let (mut shop, clock) = open_shop(10);

    let record = shop.rent(Basis::Daily, 3).unwrap();
    assert_eq!(shop.stock(), 7);
    assert_eq!(record.basis(), Basis::Daily);
    assert_eq!(record.num_cars(), 3);

    clock.advance(TimeDelta::hours(25));
    let bill = shop.return_cars(record).unwrap();
    assert_eq!(bill.units, 2);
    assert_eq!(bill.total, dec!(120));
    assert_eq!(shop.stock(), 10);
}

#[test]
fn test_hourly_request_beyond_stock() {
    let (mut shop, _) = open_shop(5);
    assert_eq!(
        shop.rent(Basis::Hourly, 6).unwrap_err(),
        RentalError::InsufficientStock {
            requested: 6,
            available: 5
        }
    );
    assert_eq!(shop.stock(), 5);
}

#[test]
fn test_monthly_is_not_a_rental_type() {
    let (mut shop, _) = open_shop(5);
    let mut customer = Customer::new();
    assert!(matches!(
        customer.request_car("monthly", 2, &mut shop),
        Err(RentalError::InvalidRentalType { .. })
    ));
    assert!(matches!(
        "monthly".parse::<Basis>(),
        Err(RentalError::UnknownBasis { .. })
    ));
    assert_eq!(shop.stock(), 5);
    assert_eq!(shop.outstanding(), 0);
}

#[test]
fn test_empty_rental_info_bills_nothing() {
    let (mut shop, _) = open_shop(5);
    let _held = shop.rent(Basis::Weekly, 1).unwrap();

    let result = shop.return_info(&RentalInfo::default());
    assert!(matches!(result, Err(RentalError::InvalidRentalInfo { .. })));
    assert_eq!(result.map_or(Decimal::ZERO, |bill| bill.total), Decimal::ZERO);
    assert_eq!(shop.stock(), 4);
}

#[test]
fn test_boolean_count_is_rejected() {
    let (mut shop, _) = open_shop(5);
    assert!(matches!(
        shop.rent(Basis::Hourly, true),
        Err(RentalError::InvalidCountType { .. })
    ));
    assert_eq!(shop.stock(), 5);
}

#[test]
fn test_immediate_return_bills_minimum_unit_for_each_basis() {
    for (basis, rate) in [
        (Basis::Hourly, dec!(5)),
        (Basis::Daily, dec!(20)),
        (Basis::Weekly, dec!(60)),
    ] {
        let (mut shop, _) = open_shop(6);
        let record = shop.rent(basis, 4).unwrap();
        let bill = shop.return_cars(record).unwrap();
        assert_eq!(bill.units, 1, "{basis}");
        assert_eq!(bill.total, rate * dec!(4), "{basis}");
        assert_eq!(shop.stock(), 6);
    }
}

#[test]
fn test_loose_return_cannot_double_restock() {
    let (mut shop, clock) = open_shop(5);
    let record = shop.rent(Basis::Daily, 2).unwrap();
    let info = RentalInfo::from(&record);

    clock.advance(TimeDelta::days(3));
    shop.return_cars(record).unwrap();
    assert_eq!(shop.stock(), 5);

    assert!(matches!(
        shop.return_info(&info),
        Err(RentalError::NoMatchingRental { .. })
    ));
    assert_eq!(shop.stock(), 5);
}

#[test]
fn test_configured_shop() {
    let options = ShopOptions::parse("stock = 3\nhourly_rate = 7.5\n");
    let clock = Arc::new(ManualClock::starting_now());
    let mut shop = RentalShop::from_options(&options).with_clock(clock.clone());
    assert_eq!(shop.display_stock(), 3);

    let record = shop.rent_hourly("2").unwrap();
    clock.advance(TimeDelta::minutes(121));
    let bill = shop.return_cars(record).unwrap();
    assert_eq!(bill.units, 3);
    assert_eq!(bill.total, dec!(45.0));
}

#[test]
fn test_multiple_customers_share_stock() {
    let (mut shop, clock) = open_shop(4);
    let mut alice = Customer::with_name("alice");
    let mut bob = Customer::with_name("bob");

    alice.request_car("weekly", 3, &mut shop).unwrap();
    assert!(matches!(
        bob.request_car("hourly", 2, &mut shop),
        Err(RentalError::InsufficientStock { available: 1, .. })
    ));
    bob.request_car("hourly", 1, &mut shop).unwrap();
    assert_eq!(shop.stock(), 0);

    clock.advance(TimeDelta::days(8));
    assert_eq!(alice.return_car(&mut shop).unwrap().total, dec!(360));
    assert_eq!(bob.return_car(&mut shop).unwrap().total, dec!(960));
    assert_eq!(shop.stock(), 4);
}

#[test]
fn test_configured_rate_too_large_to_bill() {
    let options = ShopOptions::parse("stock = 2\nhourly_rate = 79228162514264337593543950335\n");
    assert!(options.warnings.is_empty());
    let clock = Arc::new(ManualClock::starting_now());
    let mut shop = RentalShop::from_options(&options).with_clock(clock.clone());
    let mut customer = Customer::new();

    customer.request_car("hourly", 2, &mut shop).unwrap();
    clock.advance(TimeDelta::hours(3));
    assert!(matches!(
        customer.return_car(&mut shop),
        Err(RentalError::BillOverflow { units: 3, .. })
    ));
    assert_eq!(shop.stock(), 0);
    assert_eq!(shop.outstanding(), 1);
}

#[test]
fn test_shop_refuses_records_of_a_twin_shop() {
    let (mut a, clock) = open_shop(5);
    let mut b = RentalShop::new(5).with_clock(clock.clone());
    let mut alice = Customer::with_name("alice");
    let mut bob = Customer::with_name("bob");

    alice.request_car("daily", 2, &mut a).unwrap();
    bob.request_car("daily", 2, &mut b).unwrap();
    clock.advance(TimeDelta::hours(5));

    assert!(matches!(
        alice.return_car(&mut b),
        Err(RentalError::AlreadyReturned { .. })
    ));
    assert_eq!(b.stock(), 3);
    assert_eq!(bob.return_car(&mut b).unwrap().total, dec!(40));
    assert_eq!(b.stock(), 5);
    assert_eq!(a.stock(), 3);
}
