//! Immutable transaction records
//!
//! Every payment, purchase, expense, and adjustment event produces exactly
//! one transaction. Transactions form the system-wide audit trail and are
//! never mutated or deleted by the domain; they reference entities by id
//! rather than owning them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::{CustomerId, Money, SupplierId, TransactionId};

/// Which side of the counter the entity is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Customer,
    Supplier,
}

/// Kind of audited event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Customer payment allocated against orders
    CustomerPayment,
    /// Payment settling supplier debt
    SupplierPayment,
    /// Stock purchase on supplier credit
    Purchase,
    /// Shop expense paid to a supplier
    Expense,
    /// Opening debt carried over when a supplier is onboarded
    InitialDebt,
    /// Manual debt/stock correction
    StockAdjustment,
}

/// An immutable audit record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,
    /// The customer or supplier this event concerns
    pub entity_id: Uuid,
    /// Whether `entity_id` is a customer or supplier
    pub entity_type: EntityType,
    /// Event kind
    pub txn_type: TransactionType,
    /// Event amount; signed only for adjustments
    pub amount: Money,
    /// Human-readable description
    pub description: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    fn new(
        entity_id: Uuid,
        entity_type: EntityType,
        txn_type: TransactionType,
        amount: Money,
        description: String,
    ) -> Self {
        Self {
            id: TransactionId::new_v7(),
            entity_id,
            entity_type,
            txn_type,
            amount,
            description,
            created_at: Utc::now(),
        }
    }

    /// Records a customer payment for the full applied amount
    pub fn customer_payment(customer_id: CustomerId, amount: Money) -> Self {
        Self::new(
            customer_id.into(),
            EntityType::Customer,
            TransactionType::CustomerPayment,
            amount,
            format!("Payment of {} received", amount),
        )
    }

    /// Records a payment settling supplier debt
    pub fn supplier_payment(supplier_id: SupplierId, amount: Money) -> Self {
        Self::new(
            supplier_id.into(),
            EntityType::Supplier,
            TransactionType::SupplierPayment,
            amount,
            format!("Paid {} against supplier debt", amount),
        )
    }

    /// Records a stock purchase on credit
    pub fn purchase(supplier_id: SupplierId, amount: Money, description: impl Into<String>) -> Self {
        Self::new(
            supplier_id.into(),
            EntityType::Supplier,
            TransactionType::Purchase,
            amount,
            description.into(),
        )
    }

    /// Records a shop expense
    pub fn expense(supplier_id: SupplierId, amount: Money, description: impl Into<String>) -> Self {
        Self::new(
            supplier_id.into(),
            EntityType::Supplier,
            TransactionType::Expense,
            amount,
            description.into(),
        )
    }

    /// Records the opening debt carried when onboarding a supplier
    pub fn initial_debt(supplier_id: SupplierId, amount: Money) -> Self {
        Self::new(
            supplier_id.into(),
            EntityType::Supplier,
            TransactionType::InitialDebt,
            amount,
            format!("Opening debt of {}", amount),
        )
    }

    /// Records a manual adjustment against a customer's running account
    pub fn adjustment(customer_id: CustomerId, amount: Money, reason: impl Into<String>) -> Self {
        Self::new(
            customer_id.into(),
            EntityType::Customer,
            TransactionType::StockAdjustment,
            amount,
            reason.into(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_customer_payment_shape() {
        let customer_id = CustomerId::new();
        let txn = Transaction::customer_payment(customer_id, Money::new(dec!(500)));

        assert_eq!(txn.entity_id, (*customer_id.as_uuid()));
        assert_eq!(txn.entity_type, EntityType::Customer);
        assert_eq!(txn.txn_type, TransactionType::CustomerPayment);
        assert_eq!(txn.amount.amount(), dec!(500));
        assert!(txn.description.contains("500.00"));
    }

    #[test]
    fn test_adjustment_keeps_sign() {
        let txn = Transaction::adjustment(CustomerId::new(), -Money::new(dec!(75)), "billing error");
        assert!(txn.amount.is_negative());
        assert_eq!(txn.txn_type, TransactionType::StockAdjustment);
    }

    #[test]
    fn test_type_serialization_names() {
        assert_eq!(
            serde_json::to_string(&TransactionType::CustomerPayment).unwrap(),
            "\"customer_payment\""
        );
        assert_eq!(
            serde_json::to_string(&TransactionType::InitialDebt).unwrap(),
            "\"initial_debt\""
        );
        assert_eq!(serde_json::to_string(&EntityType::Supplier).unwrap(), "\"supplier\"");
    }
}
