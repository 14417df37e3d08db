//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults.
//! Tests specify only the fields they care about.

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{CustomerId, Money};
use domain_ledger::{Customer, CustomerType, Order, OrderItem, PaymentStatus, Supplier};

use crate::fixtures::NameFixtures;

/// Builder for test customers
pub struct TestCustomerBuilder {
    name: String,
    phone: Option<String>,
    customer_type: CustomerType,
    pending_amount: Money,
}

impl Default for TestCustomerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCustomerBuilder {
    pub fn new() -> Self {
        Self {
            name: NameFixtures::customer_name(),
            phone: None,
            customer_type: CustomerType::Retail,
            pending_amount: Money::zero(),
        }
    }

    pub fn hotel() -> Self {
        Self {
            name: NameFixtures::business_name(),
            customer_type: CustomerType::Hotel,
            ..Self::new()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    /// Presets the cached aggregate, e.g. to simulate drift
    pub fn with_pending(mut self, pending: Money) -> Self {
        self.pending_amount = pending;
        self
    }

    pub fn build(self) -> Customer {
        let mut customer = Customer::new(self.name, self.customer_type);
        if let Some(phone) = self.phone {
            customer = customer.with_phone(phone);
        }
        customer.pending_amount = self.pending_amount;
        customer
    }
}

/// Builder for test orders
pub struct TestOrderBuilder {
    customer_id: CustomerId,
    items: Vec<OrderItem>,
    paid_amount: Money,
    created_at: Option<DateTime<Utc>>,
}

impl TestOrderBuilder {
    pub fn for_customer(customer_id: CustomerId) -> Self {
        Self {
            customer_id,
            items: vec![OrderItem::new("chicken", dec!(2), Money::new(dec!(180)))],
            paid_amount: Money::zero(),
            created_at: None,
        }
    }

    pub fn with_items(mut self, items: Vec<OrderItem>) -> Self {
        self.items = items;
        self
    }

    /// Single line item totaling exactly `total`
    pub fn with_total(mut self, total: Decimal) -> Self {
        self.items = vec![OrderItem::new("chicken", dec!(1), Money::new(total))];
        self
    }

    pub fn with_paid(mut self, paid: Money) -> Self {
        self.paid_amount = paid;
        self
    }

    /// Backdates the order by `days`, for FIFO ordering tests
    pub fn days_ago(mut self, days: i64) -> Self {
        self.created_at = Some(Utc::now() - Duration::days(days));
        self
    }

    pub fn build(self) -> Order {
        let mut order = Order::new(self.customer_id, self.items);
        if let Some(created_at) = self.created_at {
            order.created_at = created_at;
            order.updated_at = created_at;
        }
        if self.paid_amount.is_positive() {
            order.paid_amount = self.paid_amount;
            order.payment_status = PaymentStatus::derive(order.total_amount, order.paid_amount);
        }
        order
    }
}

/// Builder for test suppliers
pub struct TestSupplierBuilder {
    name: String,
    debt: Money,
}

impl Default for TestSupplierBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestSupplierBuilder {
    pub fn new() -> Self {
        Self {
            name: NameFixtures::business_name(),
            debt: Money::zero(),
        }
    }

    pub fn with_debt(mut self, debt: Money) -> Self {
        self.debt = debt;
        self
    }

    pub fn build(self) -> Supplier {
        Supplier::new(self.name, self.debt)
    }
}
