//! Supplier DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use core_kernel::Money;
use domain_ledger::Supplier;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateSupplierRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    pub phone: Option<String>,
    /// Debt carried over from before the system was introduced
    #[serde(default)]
    pub opening_debt: Decimal,
}

#[derive(Debug, Deserialize, Validate)]
pub struct PurchaseRequest {
    pub amount: Decimal,
    #[validate(length(min = 1, max = 500))]
    pub description: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ExpenseRequest {
    pub amount: Decimal,
    #[validate(length(min = 1, max = 500))]
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct SupplierResponse {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub debt: Money,
    pub created_at: DateTime<Utc>,
}

impl From<Supplier> for SupplierResponse {
    fn from(supplier: Supplier) -> Self {
        Self {
            id: supplier.id.into(),
            name: supplier.name,
            phone: supplier.phone,
            debt: supplier.debt,
            created_at: supplier.created_at,
        }
    }
}
