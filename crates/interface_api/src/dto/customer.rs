//! Customer DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use core_kernel::Money;
use domain_ledger::{Customer, CustomerType, DebtAdjustment, IntegrityReport, LedgerEntry};

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCustomerRequest {
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    pub phone: Option<String>,
    pub customer_type: CustomerType,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AdjustmentRequest {
    /// Signed amount: positive increases the debt, negative reduces it
    pub amount: Decimal,
    #[validate(length(min = 1, max = 500))]
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct CustomerResponse {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub customer_type: CustomerType,
    pub pending_amount: Money,
    pub created_at: DateTime<Utc>,
}

impl From<Customer> for CustomerResponse {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id.into(),
            name: customer.name,
            phone: customer.phone,
            customer_type: customer.customer_type,
            pending_amount: customer.pending_amount,
            created_at: customer.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AdjustmentResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub amount: Money,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

impl From<DebtAdjustment> for AdjustmentResponse {
    fn from(adjustment: DebtAdjustment) -> Self {
        Self {
            id: adjustment.id.into(),
            customer_id: adjustment.customer_id.into(),
            amount: adjustment.amount,
            reason: adjustment.reason,
            created_at: adjustment.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LedgerEntryResponse {
    pub id: Uuid,
    pub kind: domain_ledger::LedgerEntryKind,
    pub amount: Money,
    pub description: String,
    pub running_balance: Money,
    pub created_at: DateTime<Utc>,
}

impl From<LedgerEntry> for LedgerEntryResponse {
    fn from(entry: LedgerEntry) -> Self {
        Self {
            id: entry.id.into(),
            kind: entry.kind,
            amount: entry.amount,
            description: entry.description,
            running_balance: entry.running_balance,
            created_at: entry.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RepairActionResponse {
    pub field: String,
    pub previous: Money,
    pub corrected: Money,
}

#[derive(Debug, Serialize)]
pub struct IntegrityResponse {
    pub customer_id: Uuid,
    pub stored_pending: Money,
    pub computed_pending: Money,
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_consistent: Option<bool>,
    pub repairs: Vec<RepairActionResponse>,
}

impl From<IntegrityReport> for IntegrityResponse {
    fn from(report: IntegrityReport) -> Self {
        Self {
            customer_id: report.customer_id.into(),
            stored_pending: report.stored_pending,
            computed_pending: report.computed_pending,
            is_valid: report.is_valid,
            ledger_consistent: report.ledger_consistent,
            repairs: report
                .repairs
                .into_iter()
                .map(|r| RepairActionResponse {
                    field: r.field.to_string(),
                    previous: r.previous,
                    corrected: r.corrected,
                })
                .collect(),
        }
    }
}
