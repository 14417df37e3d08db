//! Orders and payment status derivation
//!
//! An order belongs to one customer and carries its line items, the rounded
//! total, and how much of that total has been settled so far. The payment
//! status is always derived from the amounts and never set independently.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{CustomerId, Money, OrderId};

/// Derived settlement state of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Nothing applied yet (or the order total is not positive)
    Pending,
    /// Some but not all of the total applied
    PartiallyPaid,
    /// Fully settled
    Paid,
}

impl PaymentStatus {
    /// Derives the status from total and paid amounts.
    ///
    /// A non-positive total is always `Pending` regardless of `paid`, and the
    /// `paid >= total` boundary resolves toward `Paid` (inclusive).
    pub fn derive(total: Money, paid: Money) -> Self {
        if !total.is_positive() || !paid.is_positive() {
            PaymentStatus::Pending
        } else if paid >= total {
            PaymentStatus::Paid
        } else {
            PaymentStatus::PartiallyPaid
        }
    }
}

/// A single line on an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    /// Item kind, e.g. "chicken", "mutton", "eggs"
    pub item_type: String,
    /// Quantity in the item's trade unit (kg, dozen, ...)
    pub quantity: Decimal,
    /// Rate per unit
    pub rate: Money,
    /// Free-form detail, e.g. "skinless"
    pub details: Option<String>,
}

impl OrderItem {
    pub fn new(item_type: impl Into<String>, quantity: Decimal, rate: Money) -> Self {
        Self {
            item_type: item_type.into(),
            quantity,
            rate,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Line total: `quantity * rate`, currency-rounded
    pub fn line_total(&self) -> Money {
        self.rate.multiply(self.quantity)
    }
}

/// An order placed by a customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier
    pub id: OrderId,
    /// Owning customer
    pub customer_id: CustomerId,
    /// Line items
    pub items: Vec<OrderItem>,
    /// Sum of line totals, currency-rounded
    pub total_amount: Money,
    /// Amount allocated so far, never exceeds `total_amount`
    pub paid_amount: Money,
    /// Derived from the amounts
    pub payment_status: PaymentStatus,
    /// Free-form note
    pub notes: Option<String>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Creates a new unpaid order; the total is computed from the items
    pub fn new(customer_id: CustomerId, items: Vec<OrderItem>) -> Self {
        let now = Utc::now();
        let total_amount: Money = items.iter().map(OrderItem::line_total).sum();

        Self {
            id: OrderId::new_v7(),
            customer_id,
            items,
            total_amount,
            paid_amount: Money::zero(),
            payment_status: PaymentStatus::derive(total_amount, Money::zero()),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// The unpaid balance on this order
    pub fn outstanding(&self) -> Money {
        self.total_amount - self.paid_amount
    }

    /// Applies up to `amount` against the outstanding balance.
    ///
    /// Returns the amount actually applied (`min(amount, outstanding)`);
    /// the status is re-derived and `paid_amount` can never exceed the total.
    pub fn apply_payment(&mut self, amount: Money) -> Money {
        let applied = amount.min(self.outstanding());
        if applied.is_positive() {
            self.paid_amount = self.paid_amount + applied;
            self.payment_status = PaymentStatus::derive(self.total_amount, self.paid_amount);
            self.updated_at = Utc::now();
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_status_derivation_table() {
        let m = |v: Decimal| Money::new(v);
        assert_eq!(PaymentStatus::derive(m(dec!(100)), m(dec!(0))), PaymentStatus::Pending);
        assert_eq!(
            PaymentStatus::derive(m(dec!(100)), m(dec!(50))),
            PaymentStatus::PartiallyPaid
        );
        assert_eq!(PaymentStatus::derive(m(dec!(100)), m(dec!(100))), PaymentStatus::Paid);
        assert_eq!(PaymentStatus::derive(m(dec!(100)), m(dec!(150))), PaymentStatus::Paid);
        // Zero or negative total is always pending, whatever was paid
        assert_eq!(PaymentStatus::derive(m(dec!(0)), m(dec!(50))), PaymentStatus::Pending);
        assert_eq!(PaymentStatus::derive(m(dec!(-10)), m(dec!(50))), PaymentStatus::Pending);
    }

    #[test]
    fn test_order_total_is_sum_of_rounded_lines() {
        let items = vec![
            OrderItem::new("chicken", dec!(2.5), Money::new(dec!(180.50))),
            OrderItem::new("eggs", dec!(3), Money::new(dec!(72))),
        ];
        let order = Order::new(CustomerId::new(), items);
        assert_eq!(order.total_amount.amount(), dec!(667.25));
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        assert_eq!(order.paid_amount, Money::zero());
    }

    #[test]
    fn test_apply_payment_clamps_to_outstanding() {
        let items = vec![OrderItem::new("mutton", dec!(1), Money::new(dec!(100)))];
        let mut order = Order::new(CustomerId::new(), items);

        let applied = order.apply_payment(Money::new(dec!(60)));
        assert_eq!(applied.amount(), dec!(60));
        assert_eq!(order.payment_status, PaymentStatus::PartiallyPaid);

        // Asking for more than the remainder applies only the remainder
        let applied = order.apply_payment(Money::new(dec!(60)));
        assert_eq!(applied.amount(), dec!(40));
        assert_eq!(order.payment_status, PaymentStatus::Paid);
        assert_eq!(order.outstanding(), Money::zero());

        // Further payments are a no-op
        let applied = order.apply_payment(Money::new(dec!(10)));
        assert!(applied.is_zero());
        assert_eq!(order.paid_amount, order.total_amount);
    }
}
