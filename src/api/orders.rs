use crate::api::{require_user, SessionAuth};
use crate::auth::SessionManager;
use crate::errors::ApiError;
use crate::services::{NewOrder, OrderService};
use crate::types::dto::orders::{CreateOrderRequest, OrderResponse, UpdateOrderStatusRequest};
use poem_openapi::param::Path;
use poem_openapi::payload::Json;
use poem_openapi::{ApiResponse, OpenApi, Tags};
use std::sync::Arc;

/// Order creation, listing, and status transition endpoints
pub struct OrdersApi {
    orders: Arc<OrderService>,
    sessions: Arc<SessionManager>,
}

impl OrdersApi {
    pub fn new(orders: Arc<OrderService>, sessions: Arc<SessionManager>) -> Self {
        Self { orders, sessions }
    }
}

#[derive(Tags)]
enum OrderTags {
    /// Report order management
    Orders,
}

#[derive(ApiResponse)]
pub enum OrderCreatedResponse {
    #[oai(status = 201)]
    Created(Json<OrderResponse>),
}

#[OpenApi]
impl OrdersApi {
    /// Create a new order
    #[oai(path = "/orders", method = "post", tag = "OrderTags::Orders")]
    async fn create(
        &self,
        auth: SessionAuth,
        body: Json<CreateOrderRequest>,
    ) -> Result<OrderCreatedResponse, ApiError> {
        let user = require_user(&self.sessions, &auth).await?;
        let body = body.0;
        if body.order_id.trim().is_empty() {
            return Err(ApiError::bad_request(
                "missing_order_id",
                "Order code is required",
            ));
        }

        let order = self
            .orders
            .create(
                &user,
                NewOrder {
                    order_id: body.order_id,
                    status: body.status,
                    total_documents: body.total_documents,
                    document_type: body.document_type,
                    price: body.price,
                },
            )
            .await?;
        Ok(OrderCreatedResponse::Created(Json(order.into())))
    }

    /// List the caller's orders
    #[oai(path = "/orders", method = "get", tag = "OrderTags::Orders")]
    async fn list(&self, auth: SessionAuth) -> Result<Json<Vec<OrderResponse>>, ApiError> {
        let user = require_user(&self.sessions, &auth).await?;
        let orders = self.orders.list(&user).await?;
        Ok(Json(orders.into_iter().map(Into::into).collect()))
    }

    /// Fetch one owned order
    #[oai(path = "/orders/:id", method = "get", tag = "OrderTags::Orders")]
    async fn get(
        &self,
        auth: SessionAuth,
        id: Path<i64>,
    ) -> Result<Json<OrderResponse>, ApiError> {
        let user = require_user(&self.sessions, &auth).await?;
        let order = self.orders.get(&user, id.0).await?;
        Ok(Json(order.into()))
    }

    /// Move an owned order to a new status
    #[oai(
        path = "/orders/:id/status",
        method = "patch",
        tag = "OrderTags::Orders"
    )]
    async fn update_status(
        &self,
        auth: SessionAuth,
        id: Path<i64>,
        body: Json<UpdateOrderStatusRequest>,
    ) -> Result<Json<OrderResponse>, ApiError> {
        let user = require_user(&self.sessions, &auth).await?;
        let order = self.orders.update_status(&user, id.0, body.0.status).await?;
        Ok(Json(order.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemorySessionStore;
    use crate::services::Fanout;
    use crate::stores::{MemStorage, Storage};
    use crate::types::entities::{InsertUser, OrderStatus};
    use poem_openapi::auth::ApiKey;

    async fn setup() -> (OrdersApi, SessionAuth) {
        let storage: Arc<dyn Storage> = Arc::new(MemStorage::new());
        let sessions = Arc::new(SessionManager::new(
            storage.clone(),
            Arc::new(MemorySessionStore::new()),
            24,
        ));
        let fanout = Arc::new(Fanout::new(storage.clone()));
        let orders = Arc::new(OrderService::new(storage.clone(), fanout));

        let user = storage
            .create_user(InsertUser {
                username: "alice".to_string(),
                password_hash: "hash.salt".to_string(),
                full_name: None,
                company: None,
                role: "user".to_string(),
            })
            .await
            .unwrap();
        let token = sessions.issue(user.id).await;

        (
            OrdersApi::new(orders, sessions),
            SessionAuth(ApiKey { key: token }),
        )
    }

    fn auth_clone(auth: &SessionAuth) -> SessionAuth {
        SessionAuth(ApiKey {
            key: auth.0.key.clone(),
        })
    }

    fn create_request(code: &str, status: OrderStatus) -> Json<CreateOrderRequest> {
        Json(CreateOrderRequest {
            order_id: code.to_string(),
            status,
            total_documents: 2,
            document_type: "xlsx".to_string(),
            price: 50.0,
        })
    }

    #[tokio::test]
    async fn test_create_then_patch_status() {
        let (api, auth) = setup().await;

        let OrderCreatedResponse::Created(order) = api
            .create(
                auth_clone(&auth),
                create_request("ORD-1", OrderStatus::PendingPayment),
            )
            .await
            .unwrap();
        assert_eq!(order.0.status, OrderStatus::PendingPayment);

        let updated = api
            .update_status(
                auth_clone(&auth),
                Path(order.0.id),
                Json(UpdateOrderStatusRequest {
                    status: OrderStatus::Processing,
                }),
            )
            .await
            .unwrap();
        assert_eq!(updated.0.status, OrderStatus::Processing);
    }

    #[tokio::test]
    async fn test_invalid_transition_is_bad_request() {
        let (api, auth) = setup().await;
        let OrderCreatedResponse::Created(order) = api
            .create(
                auth_clone(&auth),
                create_request("ORD-1", OrderStatus::Completed),
            )
            .await
            .unwrap();

        let err = api
            .update_status(
                auth_clone(&auth),
                Path(order.0.id),
                Json(UpdateOrderStatusRequest {
                    status: OrderStatus::Pending,
                }),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_get_unknown_order_is_not_found() {
        let (api, auth) = setup().await;
        let err = api.get(auth, Path(99)).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_returns_only_own_orders() {
        let (api, auth) = setup().await;
        api.create(
            auth_clone(&auth),
            create_request("ORD-1", OrderStatus::Pending),
        )
        .await
        .unwrap();

        let listed = api.list(auth).await.unwrap();
        assert_eq!(listed.0.len(), 1);
        assert_eq!(listed.0[0].order_id, "ORD-1");
    }
}
