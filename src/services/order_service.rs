use crate::errors::{InternalError, ResourceError};
use crate::services::Fanout;
use crate::stores::Storage;
use crate::types::entities::{InsertOrder, NotificationKind, Order, OrderStatus, User};
use std::sync::Arc;

/// Input for a new order; the requester supplies the initial status.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub order_id: String,
    pub status: OrderStatus,
    pub total_documents: i32,
    pub document_type: String,
    pub price: f64,
}

/// Order lifecycle operations. Every mutation fans out one activity and,
/// where the original flow does, one notification for the owner.
pub struct OrderService {
    storage: Arc<dyn Storage>,
    fanout: Arc<Fanout>,
}

impl OrderService {
    pub fn new(storage: Arc<dyn Storage>, fanout: Arc<Fanout>) -> Self {
        Self { storage, fanout }
    }

    pub async fn create(&self, owner: &User, new_order: NewOrder) -> Result<Order, InternalError> {
        let order = self
            .storage
            .create_order(InsertOrder {
                user_id: owner.id,
                order_id: new_order.order_id,
                status: new_order.status,
                total_documents: new_order.total_documents,
                document_type: new_order.document_type,
                price: new_order.price,
            })
            .await?;

        self.fanout
            .record(
                owner.id,
                "Order Created",
                Some(format!("Created order: {}", order.order_id)),
            )
            .await;
        self.fanout
            .notify(
                owner.id,
                "New Order Created",
                &format!(
                    "Your order {} has been created successfully with status: {}",
                    order.order_id, order.status
                ),
                NotificationKind::Info,
            )
            .await;

        Ok(order)
    }

    /// Fetch one order, enforcing ownership. An unknown id is NotFound
    /// regardless of who asks; an existing order owned by someone else is
    /// Forbidden.
    pub async fn get(&self, requester: &User, id: i64) -> Result<Order, InternalError> {
        let order = self
            .storage
            .get_order(id)
            .await?
            .ok_or(ResourceError::NotFound { kind: "order" })?;
        if order.user_id != requester.id {
            return Err(ResourceError::forbidden("order"));
        }
        Ok(order)
    }

    pub async fn list(&self, requester: &User) -> Result<Vec<Order>, InternalError> {
        self.storage.get_orders_by_user(requester.id).await
    }

    /// Move an owned order to a new status.
    ///
    /// The transition must be allowed by [`OrderStatus::can_transition`];
    /// anything else is rejected before the order is touched.
    pub async fn update_status(
        &self,
        requester: &User,
        id: i64,
        new_status: OrderStatus,
    ) -> Result<Order, InternalError> {
        let order = self.get(requester, id).await?;
        if !order.status.can_transition(new_status) {
            return Err(ResourceError::InvalidTransition {
                from: order.status,
                to: new_status,
            }
            .into());
        }

        let updated = self
            .storage
            .update_order_status(id, new_status)
            .await?
            .ok_or(ResourceError::NotFound { kind: "order" })?;

        self.fanout
            .record(
                requester.id,
                "Order Status Updated",
                Some(format!(
                    "Updated order {} status to: {new_status}",
                    updated.order_id
                )),
            )
            .await;
        self.fanout
            .notify(
                requester.id,
                "Order Status Updated",
                &format!(
                    "Your order {} status has been updated to: {new_status}",
                    updated.order_id
                ),
                NotificationKind::Info,
            )
            .await;

        Ok(updated)
    }
}
