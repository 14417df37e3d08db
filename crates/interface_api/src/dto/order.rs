//! Order DTOs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use core_kernel::Money;
use domain_ledger::{Order, OrderItem, PaymentStatus};

// Serialize is required by the nested length validation on the items vec
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct OrderItemRequest {
    #[validate(length(min = 1, max = 80))]
    pub item_type: String,
    pub quantity: Decimal,
    pub rate: Decimal,
    pub details: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    pub customer_id: Uuid,
    #[validate(length(min = 1), nested)]
    pub items: Vec<OrderItemRequest>,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OrderItemResponse {
    pub item_type: String,
    pub quantity: Decimal,
    pub rate: Money,
    pub line_total: Money,
    pub details: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub items: Vec<OrderItemResponse>,
    pub total_amount: Money,
    pub paid_amount: Money,
    pub payment_status: PaymentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.into(),
            customer_id: order.customer_id.into(),
            items: order
                .items
                .iter()
                .map(|item: &OrderItem| OrderItemResponse {
                    item_type: item.item_type.clone(),
                    quantity: item.quantity,
                    rate: item.rate,
                    line_total: item.line_total(),
                    details: item.details.clone(),
                })
                .collect(),
            total_amount: order.total_amount,
            paid_amount: order.paid_amount,
            payment_status: order.payment_status,
            notes: order.notes,
            created_at: order.created_at,
        }
    }
}
