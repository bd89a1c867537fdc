use crate::types::entities::{Order, OrderStatus};
use chrono::{DateTime, Utc};
use poem_openapi::Object;
use serde::{Deserialize, Serialize};

/// Request model for order creation. The initial status is caller-supplied
/// but must parse to a known status value.
#[derive(Object, Debug, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub order_id: String,
    pub status: OrderStatus,
    pub total_documents: i32,
    pub document_type: String,
    pub price: f64,
}

/// Request model for a status change
#[derive(Object, Debug, Serialize, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

#[derive(Object, Debug, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: i64,
    pub user_id: i64,
    pub order_id: String,
    pub status: OrderStatus,
    pub total_documents: i32,
    pub document_type: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            order_id: order.order_id,
            status: order.status,
            total_documents: order.total_documents,
            document_type: order.document_type,
            price: order.price,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }
}
