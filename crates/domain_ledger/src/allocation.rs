//! Payment allocation
//!
//! Applies an incoming payment against what an entity owes. Customer payments
//! are spread across outstanding orders oldest-first (FIFO); supplier payments
//! are a flat debt reduction. Both paths share the same amount validation so
//! the two endpoints reject bad input identically.
//!
//! Over-payment policy: a payment larger than the total outstanding balance
//! is rejected. Nothing in the system models standing credit, so excess money
//! has nowhere sound to go.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use core_kernel::{CustomerId, Money, SupplierId};

use crate::adjustment::DebtAdjustment;
use crate::customer::Customer;
use crate::error::LedgerError;
use crate::order::Order;
use crate::supplier::Supplier;
use crate::transaction::Transaction;

/// Allocator limits, constructor-injected rather than global
#[derive(Debug, Clone)]
pub struct AllocatorConfig {
    /// Upper bound for a single payment
    pub max_payment: Money,
}

impl Default for AllocatorConfig {
    fn default() -> Self {
        Self {
            max_payment: Money::new(dec!(10_000_000)),
        }
    }
}

/// Result of allocating a customer payment
#[derive(Debug, Clone, Serialize)]
pub struct CustomerAllocation {
    /// The paying customer
    pub customer_id: CustomerId,
    /// Full amount applied (equals the validated payment)
    pub applied: Money,
    /// Orders mutated by the allocation, in application order
    pub touched_orders: Vec<Order>,
    /// Recomputed aggregate over ALL the customer's orders and adjustments
    pub pending_amount: Money,
    /// The audit record for this payment
    pub transaction: Transaction,
}

/// Result of settling supplier debt
#[derive(Debug, Clone, Serialize)]
pub struct SupplierAllocation {
    /// The supplier being paid
    pub supplier_id: SupplierId,
    /// Amount applied against the debt
    pub applied: Money,
    /// Remaining debt after settlement
    pub debt: Money,
    /// The audit record for this payment
    pub transaction: Transaction,
}

/// Defensive validation shared by both allocators.
///
/// Upstream DTO validation already enforces these rules; the allocator
/// re-checks so it can never be driven into a bad state by another caller.
fn validate_amount(config: &AllocatorConfig, amount: Decimal) -> Result<Money, LedgerError> {
    let amount = Money::parse_exact(amount)
        .map_err(|e| LedgerError::invalid_amount(e.to_string()))?;

    if !amount.is_positive() {
        return Err(LedgerError::invalid_amount(format!(
            "payment amount must be positive, got {amount}"
        )));
    }
    if amount > config.max_payment {
        return Err(LedgerError::invalid_amount(format!(
            "payment amount {amount} exceeds the maximum of {}",
            config.max_payment
        )));
    }
    Ok(amount)
}

/// Applies a customer payment against outstanding orders, oldest debt first.
///
/// The returned `pending_amount` is recomputed as the sum of every remaining
/// order balance plus manual adjustments — never decremented from the cached
/// value — so a successful allocation also self-heals prior aggregate drift.
///
/// # Errors
///
/// - [`LedgerError::InvalidAmount`] for non-positive, over-limit, or
///   sub-cent amounts
/// - [`LedgerError::NoOutstandingBalance`] when no order has an unpaid
///   balance
/// - [`LedgerError::ExceedsOutstanding`] when the payment is larger than the
///   total owed
pub fn allocate_customer_payment(
    config: &AllocatorConfig,
    customer: &Customer,
    orders: &[Order],
    adjustments: &[DebtAdjustment],
    amount: Decimal,
) -> Result<CustomerAllocation, LedgerError> {
    let amount = validate_amount(config, amount)?;

    let mut orders: Vec<Order> = orders.to_vec();
    // FIFO: oldest debt first, id as deterministic tie-break
    orders.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

    let total_outstanding: Money = orders.iter().map(Order::outstanding).sum();
    if !total_outstanding.is_positive() {
        return Err(LedgerError::NoOutstandingBalance(customer.id.to_string()));
    }
    if amount > total_outstanding {
        return Err(LedgerError::ExceedsOutstanding {
            amount,
            outstanding: total_outstanding,
        });
    }

    let mut remaining = amount;
    let mut touched_orders = Vec::new();
    for order in orders.iter_mut() {
        if remaining.is_zero() {
            break;
        }
        if !order.outstanding().is_positive() {
            continue;
        }
        let applied = order.apply_payment(remaining);
        remaining = remaining - applied;
        touched_orders.push(order.clone());
    }

    // Recompute, never decrement
    let order_balance: Money = orders.iter().map(Order::outstanding).sum();
    let adjustment_total: Money = adjustments.iter().map(|a| a.amount).sum();
    let pending_amount = order_balance + adjustment_total;

    tracing::debug!(
        customer_id = %customer.id,
        applied = %amount,
        orders_touched = touched_orders.len(),
        pending = %pending_amount,
        "Allocated customer payment"
    );

    Ok(CustomerAllocation {
        customer_id: customer.id,
        applied: amount,
        touched_orders,
        pending_amount,
        transaction: Transaction::customer_payment(customer.id, amount),
    })
}

/// Settles supplier debt by a flat amount.
///
/// # Errors
///
/// Same amount validation as the customer path; additionally rejects
/// payments that would push the debt below zero.
pub fn allocate_supplier_payment(
    config: &AllocatorConfig,
    supplier: &Supplier,
    amount: Decimal,
) -> Result<SupplierAllocation, LedgerError> {
    let amount = validate_amount(config, amount)?;

    if !supplier.debt.is_positive() {
        return Err(LedgerError::NoOutstandingBalance(supplier.id.to_string()));
    }
    if amount > supplier.debt {
        return Err(LedgerError::ExceedsOutstanding {
            amount,
            outstanding: supplier.debt,
        });
    }

    let debt = supplier.debt - amount;

    tracing::debug!(
        supplier_id = %supplier.id,
        applied = %amount,
        remaining_debt = %debt,
        "Settled supplier debt"
    );

    Ok(SupplierAllocation {
        supplier_id: supplier.id,
        applied: amount,
        debt,
        transaction: Transaction::supplier_payment(supplier.id, amount),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::CustomerType;
    use crate::order::{OrderItem, PaymentStatus};

    fn customer() -> Customer {
        Customer::new("Test Customer", CustomerType::Retail)
    }

    fn order_for(customer: &Customer, total: Decimal) -> Order {
        Order::new(
            customer.id,
            vec![OrderItem::new("chicken", dec!(1), Money::new(total))],
        )
    }

    #[test]
    fn test_fifo_allocation_across_orders() {
        let config = AllocatorConfig::default();
        let customer = customer();
        let older = order_for(&customer, dec!(100));
        let newer = order_for(&customer, dec!(50));

        let allocation = allocate_customer_payment(
            &config,
            &customer,
            &[newer.clone(), older.clone()],
            &[],
            dec!(120),
        )
        .unwrap();

        assert_eq!(allocation.applied.amount(), dec!(120));
        assert_eq!(allocation.touched_orders.len(), 2);
        // Oldest first regardless of input order
        assert_eq!(allocation.touched_orders[0].id, older.id);
        assert_eq!(allocation.touched_orders[0].paid_amount.amount(), dec!(100));
        assert_eq!(allocation.touched_orders[0].payment_status, PaymentStatus::Paid);
        assert_eq!(allocation.touched_orders[1].id, newer.id);
        assert_eq!(allocation.touched_orders[1].paid_amount.amount(), dec!(20));
        assert_eq!(
            allocation.touched_orders[1].payment_status,
            PaymentStatus::PartiallyPaid
        );
        assert_eq!(allocation.pending_amount.amount(), dec!(30));
    }

    #[test]
    fn test_exact_payment_leaves_zero_pending() {
        let config = AllocatorConfig::default();
        let customer = customer();
        let order = order_for(&customer, dec!(250.50));

        let allocation =
            allocate_customer_payment(&config, &customer, &[order], &[], dec!(250.50)).unwrap();
        assert_eq!(allocation.pending_amount, Money::zero());
        assert_eq!(allocation.touched_orders[0].payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn test_partially_paid_order_only_charges_remainder() {
        let config = AllocatorConfig::default();
        let customer = customer();
        let mut order = order_for(&customer, dec!(100));
        order.apply_payment(Money::new(dec!(40)));

        let allocation =
            allocate_customer_payment(&config, &customer, &[order], &[], dec!(60)).unwrap();
        assert_eq!(allocation.pending_amount, Money::zero());
        assert_eq!(allocation.touched_orders[0].paid_amount.amount(), dec!(100));
    }

    #[test]
    fn test_rejects_non_positive_amounts() {
        let config = AllocatorConfig::default();
        let customer = customer();
        let order = order_for(&customer, dec!(100));

        for bad in [dec!(0), dec!(-5)] {
            let err = allocate_customer_payment(&config, &customer, &[order.clone()], &[], bad)
                .unwrap_err();
            assert!(matches!(err, LedgerError::InvalidAmount(_)), "amount {bad}");
        }
    }

    #[test]
    fn test_rejects_sub_cent_precision() {
        let config = AllocatorConfig::default();
        let customer = customer();
        let order = order_for(&customer, dec!(100));

        let err = allocate_customer_payment(&config, &customer, &[order], &[], dec!(10.005))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount(_)));
    }

    #[test]
    fn test_rejects_amount_over_configured_maximum() {
        let config = AllocatorConfig {
            max_payment: Money::new(dec!(1000)),
        };
        let customer = customer();
        let order = order_for(&customer, dec!(5000));

        let err = allocate_customer_payment(&config, &customer, &[order], &[], dec!(1500))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InvalidAmount(_)));
    }

    #[test]
    fn test_rejects_overpayment() {
        let config = AllocatorConfig::default();
        let customer = customer();
        let order = order_for(&customer, dec!(100));

        let err =
            allocate_customer_payment(&config, &customer, &[order], &[], dec!(100.01)).unwrap_err();
        assert!(matches!(err, LedgerError::ExceedsOutstanding { .. }));
    }

    #[test]
    fn test_rejects_payment_with_nothing_owed() {
        let config = AllocatorConfig::default();
        let customer = customer();
        let mut order = order_for(&customer, dec!(100));
        order.apply_payment(Money::new(dec!(100)));

        let err =
            allocate_customer_payment(&config, &customer, &[order], &[], dec!(10)).unwrap_err();
        assert!(matches!(err, LedgerError::NoOutstandingBalance(_)));
    }

    #[test]
    fn test_pending_includes_manual_adjustments() {
        let config = AllocatorConfig::default();
        let customer = customer();
        let order = order_for(&customer, dec!(100));
        let adjustment = DebtAdjustment::new(customer.id, Money::new(dec!(25)), "carried balance");

        let allocation =
            allocate_customer_payment(&config, &customer, &[order], &[adjustment], dec!(100))
                .unwrap();
        assert_eq!(allocation.pending_amount.amount(), dec!(25));
    }

    #[test]
    fn test_supplier_settlement() {
        let config = AllocatorConfig::default();
        let supplier = Supplier::new("Farm", Money::new(dec!(800)));

        let allocation = allocate_supplier_payment(&config, &supplier, dec!(300)).unwrap();
        assert_eq!(allocation.applied.amount(), dec!(300));
        assert_eq!(allocation.debt.amount(), dec!(500));
    }

    #[test]
    fn test_supplier_rejections_match_customer_path() {
        let config = AllocatorConfig::default();
        let supplier = Supplier::new("Farm", Money::new(dec!(800)));

        for bad in [dec!(0), dec!(-5), dec!(10.005)] {
            let err = allocate_supplier_payment(&config, &supplier, bad).unwrap_err();
            assert!(matches!(err, LedgerError::InvalidAmount(_)), "amount {bad}");
        }

        let err = allocate_supplier_payment(&config, &supplier, dec!(800.01)).unwrap_err();
        assert!(matches!(err, LedgerError::ExceedsOutstanding { .. }));

        let settled = Supplier::new("Settled", Money::zero());
        let err = allocate_supplier_payment(&config, &settled, dec!(10)).unwrap_err();
        assert!(matches!(err, LedgerError::NoOutstandingBalance(_)));
    }
}
