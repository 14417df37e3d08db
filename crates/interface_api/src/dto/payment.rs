//! Payment DTOs shared by the customer and supplier endpoints

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::Money;

use crate::dto::customer::CustomerResponse;
use crate::dto::supplier::SupplierResponse;
use crate::dto::transaction::TransactionResponse;

/// Payment amount as a base-10 decimal; more than two decimal places is
/// rejected downstream, never truncated
#[derive(Debug, Deserialize)]
pub struct PaymentRequest {
    pub amount: Decimal,
}

#[derive(Debug, Serialize)]
pub struct CustomerPaymentResponse {
    pub customer: CustomerResponse,
    pub applied: Money,
    pub transaction: TransactionResponse,
}

#[derive(Debug, Serialize)]
pub struct SupplierPaymentResponse {
    pub supplier: SupplierResponse,
    pub applied: Money,
    pub transaction: TransactionResponse,
}
