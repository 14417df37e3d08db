//! Administrative handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use core_kernel::CustomerId;

use crate::dto::customer::IntegrityResponse;
use crate::{error::ApiError, AppState};

fn default_repair() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct RepairQuery {
    /// Pass `repair=false` for a dry run that only reports drift
    #[serde(default = "default_repair")]
    pub repair: bool,
}

impl Default for RepairQuery {
    fn default() -> Self {
        Self { repair: true }
    }
}

/// Recomputes a customer's aggregate from source records and repairs the
/// cached value when it has drifted
pub async fn repair_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<RepairQuery>,
) -> Result<Json<IntegrityResponse>, ApiError> {
    let report = state
        .service
        .check_customer_integrity(CustomerId::from_uuid(id), query.repair)
        .await?;
    Ok(Json(report.into()))
}
