//! Property-based tests for carrental-core.
//!
//! These tests verify invariants hold for arbitrary inputs using proptest.
//!
//! Run with: cargo test -p carrental-core --test `property_tests`

use carrental_core::{
    billable_units, Basis, ManualClock, RateTable, RentalError, RentalRecord, RentalShop,
};
use chrono::{TimeDelta, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;

// ============================================================================
// Arbitrary generators
// ============================================================================

fn arb_basis() -> impl Strategy<Value = Basis> {
    prop_oneof![
        Just(Basis::Hourly),
        Just(Basis::Daily),
        Just(Basis::Weekly),
    ]
}

fn arb_elapsed() -> impl Strategy<Value = TimeDelta> {
    // Up to roughly ten years, with sub-second precision
    (0i64..315_360_000_000i64).prop_map(TimeDelta::milliseconds)
}

#[derive(Debug, Clone)]
enum Op {
    Rent(Basis, i64),
    Return(usize),
    Advance(i64),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (arb_basis(), -3i64..12).prop_map(|(b, n)| Op::Rent(b, n)),
        (0usize..8).prop_map(Op::Return),
        (0i64..1_000_000).prop_map(Op::Advance),
    ]
}

fn open_shop(stock: u32) -> (RentalShop, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    ));
    (RentalShop::new(stock).with_clock(clock.clone()), clock)
}

// ============================================================================
// Billing Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Units cover the elapsed time, and one unit fewer would not.
    #[test]
    fn prop_units_are_ceiling(elapsed in arb_elapsed(), basis in arb_basis()) {
        let units = billable_units(elapsed, basis);
        let period = basis.period();
        prop_assert!(units >= 1);
        prop_assert!(period * units as i32 >= elapsed);
        if units > 1 {
            prop_assert!(period * (units as i32 - 1) < elapsed);
        }
    }

    /// Billing never decreases as time passes.
    #[test]
    fn prop_units_monotonic(
        a in arb_elapsed(),
        b in arb_elapsed(),
        basis in arb_basis()
    ) {
        let (short, long) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(billable_units(short, basis) <= billable_units(long, basis));
    }

    /// Immediate return bills exactly one unit at the basis rate.
    #[test]
    fn prop_round_trip_restores_stock(
        stock in 1u32..50,
        basis in arb_basis(),
        pick in any::<prop::sample::Index>()
    ) {
        let (mut shop, _) = open_shop(stock);
        let n = pick.index(stock as usize) as u32 + 1;

        let record = shop.rent(basis, n).unwrap();
        prop_assert_eq!(shop.stock(), stock - n);
        prop_assert_eq!(record.num_cars(), n);
        prop_assert_eq!(record.basis(), basis);

        let bill = shop.return_cars(record).unwrap();
        prop_assert_eq!(bill.units, 1);
        prop_assert_eq!(bill.total, RateTable::default().rate(basis) * Decimal::from(n));
        prop_assert_eq!(shop.stock(), stock);
    }
}

// ============================================================================
// Stock Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Invalid counts never change stock.
    #[test]
    fn prop_invalid_counts_leave_stock(stock in 0u32..20, n in -20i64..40, basis in arb_basis()) {
        prop_assume!(n <= 0 || n > i64::from(stock));
        let (mut shop, _) = open_shop(stock);
        let err = shop.rent(basis, n).unwrap_err();
        let expected_kind = matches!(
            err,
            RentalError::NonPositiveCount { .. } | RentalError::InsufficientStock { .. }
        );
        prop_assert!(expected_kind);
        prop_assert_eq!(shop.stock(), stock);
        prop_assert_eq!(shop.outstanding(), 0);
    }

    /// Available plus rented-out cars always equals the opening stock.
    #[test]
    fn prop_stock_is_conserved(stock in 0u32..30, ops in prop::collection::vec(arb_op(), 0..40)) {
        let (mut shop, clock) = open_shop(stock);
        let mut held: Vec<RentalRecord> = Vec::new();

        for op in ops {
            match op {
                Op::Rent(basis, n) => {
                    let before = shop.stock();
                    match shop.rent(basis, n) {
                        Ok(record) => {
                            prop_assert_eq!(i64::from(shop.stock()), i64::from(before) - n);
                            held.push(record);
                        }
                        Err(_) => prop_assert_eq!(shop.stock(), before),
                    }
                }
                Op::Return(i) => {
                    if !held.is_empty() {
                        let record = held.remove(i % held.len());
                        let cars = record.num_cars();
                        let before = shop.stock();
                        let bill = shop.return_cars(record).unwrap();
                        prop_assert_eq!(shop.stock(), before + cars);
                        prop_assert!(bill.total > Decimal::ZERO);
                    }
                }
                Op::Advance(secs) => clock.advance(TimeDelta::seconds(secs)),
            }
            prop_assert_eq!(u64::from(shop.stock()) + shop.outstanding_cars(), u64::from(stock));
            prop_assert_eq!(shop.outstanding(), held.len());
        }
    }
}
