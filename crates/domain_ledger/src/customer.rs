//! Customers and their cached outstanding balance

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{CustomerId, Money};

/// How the customer is billed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomerType {
    /// Walk-in customer, settled per order
    Retail,
    /// Running-account customer (hotels, restaurants) with a mirrored ledger
    Hotel,
}

/// A customer of the shop
///
/// `pending_amount` is a denormalized cache of the customer's unpaid balance.
/// The source of truth is the order set (plus manual adjustments); the cache
/// is recomputed on every mutation and verified by the integrity checker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Unique identifier
    pub id: CustomerId,
    /// Display name
    pub name: String,
    /// Contact phone
    pub phone: Option<String>,
    /// Billing mode
    pub customer_type: CustomerType,
    /// Cached sum of unpaid order balances and adjustments
    pub pending_amount: Money,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Creates a new customer with a clean balance
    pub fn new(name: impl Into<String>, customer_type: CustomerType) -> Self {
        let now = Utc::now();
        Self {
            id: CustomerId::new_v7(),
            name: name.into(),
            phone: None,
            customer_type,
            pending_amount: Money::zero(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// True for running-account customers whose events are mirrored into
    /// the hotel ledger
    pub fn is_hotel(&self) -> bool {
        self.customer_type == CustomerType::Hotel
    }

    /// Replaces the cached aggregate with a recomputed value
    pub fn set_pending(&mut self, pending: Money) {
        self.pending_amount = pending;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_customer_has_zero_pending() {
        let customer = Customer::new("Ravi Traders", CustomerType::Retail);
        assert_eq!(customer.pending_amount, Money::zero());
        assert!(!customer.is_hotel());
    }

    #[test]
    fn test_set_pending_touches_updated_at() {
        let mut customer = Customer::new("Hotel Sagar", CustomerType::Hotel).with_phone("9876543210");
        let before = customer.updated_at;
        customer.set_pending(Money::new(dec!(1250.50)));
        assert_eq!(customer.pending_amount.amount(), dec!(1250.50));
        assert!(customer.updated_at >= before);
        assert!(customer.is_hotel());
    }
}
