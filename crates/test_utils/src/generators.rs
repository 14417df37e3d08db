//! Property-Based Test Generators
//!
//! Proptest strategies for generating random test data that maintains
//! domain invariants (currency amounts always carry two decimal places).

use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::Money;
use domain_ledger::OrderItem;

/// Strategy for amounts in paise (two decimal places), up to one lakh rupees
pub fn positive_paise_strategy() -> impl Strategy<Value = i64> {
    1i64..10_000_000i64
}

/// Strategy for positive Money values
pub fn positive_money_strategy() -> impl Strategy<Value = Money> {
    positive_paise_strategy().prop_map(|paise| Money::new(Decimal::new(paise, 2)))
}

/// Strategy for signed Money values, as adjustments carry
pub fn signed_money_strategy() -> impl Strategy<Value = Money> {
    (-10_000_000i64..10_000_000i64)
        .prop_filter("zero adjustments are rejected", |p| *p != 0)
        .prop_map(|paise| Money::new(Decimal::new(paise, 2)))
}

/// Strategy for a plausible order line item
pub fn order_item_strategy() -> impl Strategy<Value = OrderItem> {
    (
        prop_oneof![
            Just("chicken".to_string()),
            Just("mutton".to_string()),
            Just("eggs".to_string()),
            Just("fish".to_string()),
        ],
        1i64..1000i64,
        1000i64..100_000i64,
    )
        .prop_map(|(item_type, quantity_tenths, rate_paise)| {
            OrderItem::new(
                item_type,
                Decimal::new(quantity_tenths, 1),
                Money::new(Decimal::new(rate_paise, 2)),
            )
        })
}

/// Strategy for a non-empty set of order line items
pub fn order_items_strategy() -> impl Strategy<Value = Vec<OrderItem>> {
    proptest::collection::vec(order_item_strategy(), 1..5)
}
