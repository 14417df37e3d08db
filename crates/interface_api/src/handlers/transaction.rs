//! Transaction handlers

use axum::{
    extract::{Query, State},
    Json,
};

use crate::dto::transaction::{TransactionQuery, TransactionResponse};
use crate::{error::ApiError, AppState};

/// Lists transactions, newest first, optionally filtered by entity
pub async fn list_transactions(
    State(state): State<AppState>,
    Query(query): Query<TransactionQuery>,
) -> Result<Json<Vec<TransactionResponse>>, ApiError> {
    let transactions = state.service.transactions(query.into()).await?;
    Ok(Json(transactions.into_iter().map(Into::into).collect()))
}
