//! Custom Test Assertions
//!
//! Assertion helpers for domain types that give more meaningful error
//! messages than standard assertions.

use rust_decimal::Decimal;

use core_kernel::Money;
use domain_ledger::{Customer, DebtAdjustment, Order};

/// Asserts that a Money value equals an expected decimal amount
pub fn assert_money_eq(actual: Money, expected: Decimal) {
    assert_eq!(
        actual.amount(),
        Money::new(expected).amount(),
        "Money mismatch: actual={actual}, expected={expected}"
    );
}

/// Asserts that the cached aggregate matches the recomputed balance
///
/// This is the core consistency rule: `pending_amount` must equal the sum
/// of order outstanding balances plus the signed adjustment total.
pub fn assert_pending_consistent(
    customer: &Customer,
    orders: &[Order],
    adjustments: &[DebtAdjustment],
) {
    let order_balance: Money = orders.iter().map(Order::outstanding).sum();
    let adjustment_total: Money = adjustments.iter().map(|a| a.amount).sum();
    let computed = order_balance + adjustment_total;

    assert_eq!(
        customer.pending_amount, computed,
        "Aggregate drift for {}: cached={}, recomputed={}",
        customer.id, customer.pending_amount, computed
    );
}

/// Asserts that no order has been over-paid
pub fn assert_no_overpayment(orders: &[Order]) {
    for order in orders {
        assert!(
            order.paid_amount <= order.total_amount,
            "Order {} over-paid: paid={}, total={}",
            order.id,
            order.paid_amount,
            order.total_amount
        );
    }
}
