//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use core_kernel::{MemberId, Money};
use domain_settlement::{BalanceSheet, SettlementTransfer, SETTLEMENT_EPSILON};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Asserts that two Money values are approximately equal within a tolerance
///
/// # Panics
///
/// Panics if the currencies don't match or the amounts differ by more than
/// tolerance
pub fn assert_money_approx_eq(actual: &Money, expected: &Money, tolerance: Decimal) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "Currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );

    let diff = (actual.amount() - expected.amount()).abs();
    assert!(
        diff <= tolerance,
        "Money amounts differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual.amount(),
        expected.amount(),
        diff,
        tolerance
    );
}

/// Asserts that money values sum to a total
pub fn assert_money_sum_equals(parts: &[Money], total: &Money) {
    let sum = parts.iter().fold(Money::zero(total.currency()), |acc, m| {
        acc.checked_add(m).expect("Currency mismatch in sum")
    });

    assert_eq!(
        sum.amount(),
        total.amount(),
        "Sum of parts ({}) doesn't equal total ({})",
        sum.amount(),
        total.amount()
    );
}

/// Asserts the zero-sum invariant: all balances on the sheet cancel out
pub fn assert_zero_sum(sheet: &BalanceSheet) {
    let total = sheet.total();
    assert!(
        total.amount().abs() <= SETTLEMENT_EPSILON,
        "Balance sheet does not sum to zero: total={}",
        total.amount()
    );
}

/// Asserts that applying every transfer drives every balance to within the
/// settlement epsilon of zero
pub fn assert_transfers_settle(sheet: &BalanceSheet, transfers: &[SettlementTransfer]) {
    let mut remaining: BTreeMap<MemberId, Decimal> =
        sheet.iter().map(|(id, m)| (*id, m.amount())).collect();

    for transfer in transfers {
        assert!(
            transfer.amount.amount() > SETTLEMENT_EPSILON,
            "Transfer below settlement epsilon: {} -> {} for {}",
            transfer.from,
            transfer.to,
            transfer.amount.amount()
        );
        *remaining
            .entry(transfer.from)
            .or_insert_with(|| Decimal::ZERO) += transfer.amount.amount();
        *remaining
            .entry(transfer.to)
            .or_insert_with(|| Decimal::ZERO) -= transfer.amount.amount();
    }

    for (member_id, amount) in remaining {
        assert!(
            amount.abs() <= SETTLEMENT_EPSILON,
            "Member {} left unsettled after transfers: {}",
            member_id,
            amount
        );
    }
}

/// Asserts that a result is Ok and returns the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Asserts that a result is Err and returns the error
#[macro_export]
macro_rules! assert_err {
    ($result:expr) => {
        match $result {
            Ok(value) => panic!("Expected Err, got Ok: {:?}", value),
            Err(e) => e,
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => panic!("{}: got Ok({:?})", $msg, value),
            Err(e) => e,
        }
    };
}

/// Asserts that an error matches a specific variant
#[macro_export]
macro_rules! assert_err_variant {
    ($result:expr, $pattern:pat) => {
        match $result {
            Ok(value) => panic!(
                "Expected Err matching {}, got Ok({:?})",
                stringify!($pattern),
                value
            ),
            Err(ref e) => {
                assert!(
                    matches!(e, $pattern),
                    "Error {:?} does not match pattern {}",
                    e,
                    stringify!($pattern)
                );
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::Currency;
    use rust_decimal_macros::dec;

    #[test]
    fn test_assert_money_approx_eq_passes() {
        let m1 = Money::new(dec!(100.00), Currency::USD);
        let m2 = Money::new(dec!(100.01), Currency::USD);
        assert_money_approx_eq(&m1, &m2, dec!(0.01));
    }

    #[test]
    #[should_panic(expected = "Currency mismatch")]
    fn test_assert_money_approx_eq_currency_mismatch() {
        let m1 = Money::new(dec!(100.00), Currency::USD);
        let m2 = Money::new(dec!(100.00), Currency::EUR);
        assert_money_approx_eq(&m1, &m2, dec!(0.01));
    }

    #[test]
    fn test_assert_money_sum_equals() {
        let parts = vec![
            Money::new(dec!(33.34), Currency::USD),
            Money::new(dec!(33.33), Currency::USD),
            Money::new(dec!(33.33), Currency::USD),
        ];
        let total = Money::new(dec!(100.00), Currency::USD);
        assert_money_sum_equals(&parts, &total);
    }
}
