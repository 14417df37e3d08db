//! Supplier handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::SupplierId;

use crate::dto::payment::{PaymentRequest, SupplierPaymentResponse};
use crate::dto::supplier::*;
use crate::dto::transaction::TransactionResponse;
use crate::{error::ApiError, AppState};

/// Creates a new supplier; a positive opening debt is booked as an
/// initial-debt transaction
pub async fn create_supplier(
    State(state): State<AppState>,
    Json(request): Json<CreateSupplierRequest>,
) -> Result<Json<SupplierResponse>, ApiError> {
    request.validate()?;

    let supplier = state
        .service
        .create_supplier(request.name, request.phone, request.opening_debt)
        .await?;
    Ok(Json(supplier.into()))
}

/// Lists suppliers
pub async fn list_suppliers(
    State(state): State<AppState>,
) -> Result<Json<Vec<SupplierResponse>>, ApiError> {
    let suppliers = state.service.suppliers().await?;
    Ok(Json(suppliers.into_iter().map(Into::into).collect()))
}

/// Gets a supplier by ID
pub async fn get_supplier(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SupplierResponse>, ApiError> {
    let supplier = state.service.supplier(SupplierId::from_uuid(id)).await?;
    Ok(Json(supplier.into()))
}

/// Settles supplier debt by a flat amount
pub async fn record_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<PaymentRequest>,
) -> Result<Json<SupplierPaymentResponse>, ApiError> {
    let supplier_id = SupplierId::from_uuid(id);
    let allocation = state
        .service
        .record_supplier_payment(supplier_id, request.amount)
        .await?;

    let supplier = state.service.supplier(supplier_id).await?;
    Ok(Json(SupplierPaymentResponse {
        supplier: supplier.into(),
        applied: allocation.applied,
        transaction: allocation.transaction.into(),
    }))
}

/// Books a stock purchase on supplier credit
pub async fn record_purchase(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<PurchaseRequest>,
) -> Result<Json<TransactionResponse>, ApiError> {
    request.validate()?;

    let transaction = state
        .service
        .record_purchase(SupplierId::from_uuid(id), request.amount, request.description)
        .await?;
    Ok(Json(transaction.into()))
}

/// Records a standalone shop expense
pub async fn record_expense(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ExpenseRequest>,
) -> Result<Json<TransactionResponse>, ApiError> {
    request.validate()?;

    let transaction = state
        .service
        .record_expense(SupplierId::from_uuid(id), request.amount, request.description)
        .await?;
    Ok(Json(transaction.into()))
}
