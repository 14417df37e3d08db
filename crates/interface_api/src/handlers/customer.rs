//! Customer handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::CustomerId;
use domain_ledger::TransactionFilter;

use crate::dto::customer::*;
use crate::dto::order::OrderResponse;
use crate::dto::payment::{CustomerPaymentResponse, PaymentRequest};
use crate::{error::ApiError, AppState};

/// Creates a new customer
pub async fn create_customer(
    State(state): State<AppState>,
    Json(request): Json<CreateCustomerRequest>,
) -> Result<Json<CustomerResponse>, ApiError> {
    request.validate()?;

    let customer = state
        .service
        .create_customer(request.name, request.phone, request.customer_type)
        .await?;
    Ok(Json(customer.into()))
}

/// Lists customers
pub async fn list_customers(
    State(state): State<AppState>,
) -> Result<Json<Vec<CustomerResponse>>, ApiError> {
    let customers = state.service.customers().await?;
    Ok(Json(customers.into_iter().map(Into::into).collect()))
}

/// Gets a customer by ID
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CustomerResponse>, ApiError> {
    let customer = state.service.customer(CustomerId::from_uuid(id)).await?;
    Ok(Json(customer.into()))
}

/// Records a payment, settling the customer's orders oldest first
pub async fn record_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<PaymentRequest>,
) -> Result<Json<CustomerPaymentResponse>, ApiError> {
    let customer_id = CustomerId::from_uuid(id);
    let allocation = state
        .service
        .record_customer_payment(customer_id, request.amount)
        .await?;

    let customer = state.service.customer(customer_id).await?;
    Ok(Json(CustomerPaymentResponse {
        customer: customer.into(),
        applied: allocation.applied,
        transaction: allocation.transaction.into(),
    }))
}

/// Lists a customer's orders, oldest first
pub async fn list_orders(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let orders = state
        .service
        .orders_for_customer(CustomerId::from_uuid(id))
        .await?;
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

/// Gets a hotel customer's running-account ledger
pub async fn get_ledger(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<LedgerEntryResponse>>, ApiError> {
    let entries = state
        .service
        .ledger_for_customer(CustomerId::from_uuid(id))
        .await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

/// Lists a customer's transactions, newest first
pub async fn list_transactions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<crate::dto::transaction::TransactionResponse>>, ApiError> {
    // Existence check so unknown ids answer 404 rather than an empty list
    state.service.customer(CustomerId::from_uuid(id)).await?;

    let transactions = state
        .service
        .transactions(TransactionFilter::for_entity(id))
        .await?;
    Ok(Json(transactions.into_iter().map(Into::into).collect()))
}

/// Applies a signed manual correction to a customer's balance
pub async fn create_adjustment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AdjustmentRequest>,
) -> Result<Json<AdjustmentResponse>, ApiError> {
    request.validate()?;

    let adjustment = state
        .service
        .record_adjustment(CustomerId::from_uuid(id), request.amount, request.reason)
        .await?;
    Ok(Json(adjustment.into()))
}
