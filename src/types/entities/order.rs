use chrono::{DateTime, Utc};
use poem_openapi::Enum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order lifecycle states. Transitions are validated by
/// [`OrderStatus::can_transition`]; `completed` and `rejected` are terminal.
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[oai(rename = "pending")]
    #[serde(rename = "pending")]
    Pending,
    #[oai(rename = "pending payment")]
    #[serde(rename = "pending payment")]
    PendingPayment,
    #[oai(rename = "processing")]
    #[serde(rename = "processing")]
    Processing,
    #[oai(rename = "completed")]
    #[serde(rename = "completed")]
    Completed,
    #[oai(rename = "rejected")]
    #[serde(rename = "rejected")]
    Rejected,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::PendingPayment => "pending payment",
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Rejected => "rejected",
        }
    }

    /// Whether an order in `self` may move to `to`. Any non-terminal state
    /// may be rejected; forward movement follows
    /// pending -> pending payment -> processing -> completed.
    pub fn can_transition(&self, to: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, to),
            (Pending, PendingPayment)
                | (Pending, Processing)
                | (Pending, Rejected)
                | (PendingPayment, Processing)
                | (PendingPayment, Rejected)
                | (Processing, Completed)
                | (Processing, Rejected)
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A report order. `order_id` is the human-readable code, unique across all
/// orders and immutable once assigned.
#[derive(Debug, Clone)]
pub struct Order {
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

#[derive(Debug, Clone)]
pub struct InsertOrder {
    pub user_id: i64,
    pub order_id: String,
    pub status: OrderStatus,
    pub total_documents: i32,
    pub document_type: String,
    pub price: f64,
}
