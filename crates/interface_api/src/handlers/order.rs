//! Order handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use core_kernel::{CustomerId, Money, OrderId};
use domain_ledger::OrderItem;

use crate::dto::order::*;
use crate::{error::ApiError, AppState};

/// Creates a new order for a customer
pub async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<Json<OrderResponse>, ApiError> {
    request.validate()?;

    let items = request
        .items
        .into_iter()
        .map(|item| {
            let rate = Money::parse_exact(item.rate)
                .map_err(|e| ApiError::BadRequest(e.to_string()))?;
            let mut order_item = OrderItem::new(item.item_type, item.quantity, rate);
            if let Some(details) = item.details {
                order_item = order_item.with_details(details);
            }
            Ok(order_item)
        })
        .collect::<Result<Vec<_>, ApiError>>()?;

    let order = state
        .service
        .create_order(
            CustomerId::from_uuid(request.customer_id),
            items,
            request.notes,
        )
        .await?;
    Ok(Json(order.into()))
}

/// Gets an order by ID
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = state.service.order(OrderId::from_uuid(id)).await?;
    Ok(Json(order.into()))
}
