//! Suppliers and their scalar debt

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{Money, SupplierId};

/// A supplier the shop buys stock from
///
/// Unlike customers, a supplier has no per-order breakdown: the whole
/// relationship is a single running `debt` that purchases increase and
/// payments reduce. Debt never goes below zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supplier {
    /// Unique identifier
    pub id: SupplierId,
    /// Display name
    pub name: String,
    /// Contact phone
    pub phone: Option<String>,
    /// Outstanding amount owed to the supplier
    pub debt: Money,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl Supplier {
    /// Creates a supplier, optionally carrying an opening debt
    pub fn new(name: impl Into<String>, opening_debt: Money) -> Self {
        let now = Utc::now();
        Self {
            id: SupplierId::new_v7(),
            name: name.into(),
            phone: None,
            debt: opening_debt,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Records a purchase on credit; settlement goes through the allocator
    pub fn increase_debt(&mut self, amount: Money) {
        self.debt = self.debt + amount;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_purchases_accumulate_debt() {
        let mut supplier = Supplier::new("City Poultry Farm", Money::zero());
        supplier.increase_debt(Money::new(dec!(5000)));
        supplier.increase_debt(Money::new(dec!(1500.50)));
        assert_eq!(supplier.debt.amount(), dec!(6500.50));
    }

    #[test]
    fn test_opening_debt() {
        let supplier = Supplier::new("KK Eggs", Money::new(dec!(1200)));
        assert_eq!(supplier.debt.amount(), dec!(1200));
    }
}
