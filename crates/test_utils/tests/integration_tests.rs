//! Integration tests for the trade ledger
//!
//! Cross-crate workflows exercising the service layer, allocation, the
//! running-account ledger, and integrity repair end to end over the
//! in-memory store.

use proptest::prelude::*;
use rust_decimal_macros::dec;

use core_kernel::Money;
use domain_ledger::{CustomerType, LedgerError, LedgerStore, PaymentStatus};
use test_utils::{
    assert_money_eq, assert_no_overpayment, assert_pending_consistent, memory_service,
    order_items_strategy, positive_money_strategy, signed_money_strategy, MoneyFixtures,
    TestCustomerBuilder, TestOrderBuilder, TestSupplierBuilder,
};

mod payment_workflow {
    use super::*;

    #[tokio::test]
    async fn orders_settle_oldest_first_across_partial_payments() {
        let (store, service) = memory_service();
        let customer = service
            .create_customer("Ravi Traders".into(), None, CustomerType::Retail)
            .await
            .unwrap();

        let mut order_ids = Vec::new();
        for total in [dec!(100), dec!(50), dec!(220.50)] {
            let items = vec![domain_ledger::OrderItem::new(
                "chicken",
                dec!(1),
                Money::new(total),
            )];
            let order = service.create_order(customer.id, items, None).await.unwrap();
            order_ids.push(order.id);
        }

        // 120 pays off the first order and 20 of the second
        let allocation = service
            .record_customer_payment(customer.id, dec!(120))
            .await
            .unwrap();
        assert_money_eq(allocation.applied, dec!(120));
        assert_money_eq(allocation.pending_amount, dec!(250.50));

        let orders = store.orders_for_customer(customer.id).await.unwrap();
        assert_eq!(orders[0].payment_status, PaymentStatus::Paid);
        assert_money_eq(orders[1].paid_amount, dec!(20));
        assert_eq!(orders[2].payment_status, PaymentStatus::Pending);
        assert_no_overpayment(&orders);

        // Settle everything that remains
        service
            .record_customer_payment(customer.id, dec!(250.50))
            .await
            .unwrap();
        let orders = store.orders_for_customer(customer.id).await.unwrap();
        assert!(orders.iter().all(|o| o.payment_status == PaymentStatus::Paid));

        let customer = store.get_customer(customer.id).await.unwrap();
        assert!(customer.pending_amount.is_zero());

        // Nothing left to pay against
        let err = service
            .record_customer_payment(customer.id, dec!(1))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::NoOutstandingBalance(_)));
    }

    #[tokio::test]
    async fn adjustments_shift_the_balance_payments_settle_it() {
        let (store, service) = memory_service();
        let hotel = service
            .create_customer("Hotel Sagar".into(), None, CustomerType::Hotel)
            .await
            .unwrap();

        let items = vec![domain_ledger::OrderItem::new(
            "chicken",
            dec!(10),
            Money::new(dec!(175)),
        )];
        service.create_order(hotel.id, items, None).await.unwrap();

        // Overcharge correction reduces what the hotel owes
        service
            .record_adjustment(hotel.id, dec!(-250), "billing error".into())
            .await
            .unwrap();

        let customer = store.get_customer(hotel.id).await.unwrap();
        assert_money_eq(customer.pending_amount, dec!(1500));

        service
            .record_customer_payment(hotel.id, dec!(1500))
            .await
            .unwrap();

        let customer = store.get_customer(hotel.id).await.unwrap();
        assert!(customer.pending_amount.is_zero());

        let orders = store.orders_for_customer(hotel.id).await.unwrap();
        let adjustments = store.adjustments_for_customer(hotel.id).await.unwrap();
        assert_pending_consistent(&customer, &orders, &adjustments);

        // The mirrored ledger replays to the same balance
        let entries = store.ledger_entries_for_customer(hotel.id).await.unwrap();
        assert_money_eq(domain_ledger::replay(&entries), dec!(0));
        assert!(domain_ledger::running_balances_consistent(&entries));
    }
}

mod seeded_store_workflow {
    use super::*;

    /// Allocation walks `created_at`, not insertion order: a backdated order
    /// seeded later still gets paid first.
    #[tokio::test]
    async fn backdated_orders_are_settled_before_newer_ones() {
        let (store, service) = memory_service();

        let customer = TestCustomerBuilder::new().with_name("Seeded").build();
        store.insert_customer(customer.clone()).await.unwrap();

        let recent = TestOrderBuilder::for_customer(customer.id)
            .with_total(dec!(300))
            .build();
        let old = TestOrderBuilder::for_customer(customer.id)
            .with_total(dec!(100))
            .days_ago(7)
            .build();

        let mut seeded = customer.clone();
        seeded.set_pending(Money::new(dec!(300)));
        store.apply_order(recent.clone(), seeded.clone(), None).await.unwrap();
        seeded.set_pending(Money::new(dec!(400)));
        store.apply_order(old.clone(), seeded, None).await.unwrap();

        let allocation = service
            .record_customer_payment(customer.id, dec!(150))
            .await
            .unwrap();
        assert_eq!(allocation.touched_orders[0].id, old.id);

        let old = store.get_order(old.id).await.unwrap();
        assert_eq!(old.payment_status, PaymentStatus::Paid);
        let recent = store.get_order(recent.id).await.unwrap();
        assert_money_eq(recent.paid_amount, dec!(50));
    }

    #[tokio::test]
    async fn seeded_supplier_debt_settles_flat() {
        let (store, service) = memory_service();

        let supplier = TestSupplierBuilder::new()
            .with_debt(MoneyFixtures::opening_debt())
            .build();
        store.insert_supplier(supplier.clone(), None).await.unwrap();

        let err = service
            .record_supplier_payment(supplier.id, MoneyFixtures::three_decimals())
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount(_)));

        let allocation = service
            .record_supplier_payment(supplier.id, dec!(400))
            .await
            .unwrap();
        assert_money_eq(allocation.debt, dec!(600));

        let supplier = store.get_supplier(supplier.id).await.unwrap();
        assert_money_eq(supplier.debt, dec!(600));
    }
}

mod integrity_workflow {
    use super::*;

    #[tokio::test]
    async fn drifted_aggregate_is_detected_and_repaired_once() {
        let (store, service) = memory_service();
        let customer = service
            .create_customer("Drift".into(), None, CustomerType::Retail)
            .await
            .unwrap();
        let items = vec![domain_ledger::OrderItem::new(
            "mutton",
            dec!(2),
            Money::new(dec!(650)),
        )];
        service.create_order(customer.id, items, None).await.unwrap();

        // Write a bad cache value behind the service's back
        let mut stored = store.get_customer(customer.id).await.unwrap();
        stored.set_pending(Money::new(dec!(9999)));
        store.save_customer(stored).await.unwrap();

        let report = service
            .check_customer_integrity(customer.id, false)
            .await
            .unwrap();
        assert!(!report.is_valid);
        assert_money_eq(report.computed_pending, dec!(1300));

        let report = service
            .check_customer_integrity(customer.id, true)
            .await
            .unwrap();
        assert_eq!(report.repairs.len(), 1);
        assert_money_eq(report.repairs[0].corrected, dec!(1300));

        // Idempotent: a second repair finds nothing to fix
        let report = service
            .check_customer_integrity(customer.id, true)
            .await
            .unwrap();
        assert!(report.is_valid);
        assert!(report.repairs.is_empty());
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Any sequence of valid payments preserves the aggregate invariant
    /// after every step.
    #[test]
    fn random_payment_sequences_keep_the_aggregate_consistent(
        item_sets in proptest::collection::vec(order_items_strategy(), 1..4),
        payments in proptest::collection::vec(positive_money_strategy(), 1..8),
    ) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move {
            let (store, service) = memory_service();
            let customer = service
                .create_customer("Prop".into(), None, CustomerType::Retail)
                .await
                .unwrap();
            for items in item_sets {
                service.create_order(customer.id, items, None).await.unwrap();
            }

            for payment in payments {
                // Over-payments are rejected without mutating anything;
                // either way the invariant must hold afterwards
                let _ = service
                    .record_customer_payment(customer.id, payment.amount())
                    .await;

                let customer = store.get_customer(customer.id).await.unwrap();
                let orders = store.orders_for_customer(customer.id).await.unwrap();
                assert_pending_consistent(&customer, &orders, &[]);
                assert_no_overpayment(&orders);
            }
        });
    }

    /// Signed manual corrections in any order keep the cached aggregate
    /// equal to orders plus adjustments.
    #[test]
    fn random_adjustments_keep_the_aggregate_consistent(
        amounts in proptest::collection::vec(signed_money_strategy(), 1..6),
    ) {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async move {
            let (store, service) = memory_service();
            let customer = service
                .create_customer("Adjusted".into(), None, CustomerType::Retail)
                .await
                .unwrap();

            for amount in amounts {
                service
                    .record_adjustment(customer.id, amount.amount(), "stock correction".into())
                    .await
                    .unwrap();

                let customer = store.get_customer(customer.id).await.unwrap();
                let orders = store.orders_for_customer(customer.id).await.unwrap();
                let adjustments = store.adjustments_for_customer(customer.id).await.unwrap();
                assert_pending_consistent(&customer, &orders, &adjustments);
            }
        });
    }
}
