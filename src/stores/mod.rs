// Stores layer - the resource repository contract and its implementations
pub mod memory;
pub mod seed;

pub use memory::MemStorage;

use crate::errors::InternalError;
use crate::types::entities::{
    Activity, Document, InsertActivity, InsertDocument, InsertNotification, InsertOrder,
    InsertResident, InsertUser, Notification, Order, OrderStatus, Resident, ResidentSource, User,
};
use async_trait::async_trait;

/// Resource repository over the six entity kinds.
///
/// Each create assigns the next id for its kind (monotonic, never reused,
/// deletes leave no gaps to refill) and stamps creation timestamps, as a
/// single logical unit that cannot interleave with another create of the
/// same kind. Username and order-code uniqueness are enforced here, at
/// creation.
///
/// The in-memory [`MemStorage`] is the default implementation; a
/// database-backed one can replace it without touching call sites.
#[async_trait]
pub trait Storage: Send + Sync {
    // User operations
    async fn get_user(&self, id: i64) -> Result<Option<User>, InternalError>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, InternalError>;
    async fn create_user(&self, user: InsertUser) -> Result<User, InternalError>;

    // Document operations
    async fn get_document(&self, id: i64) -> Result<Option<Document>, InternalError>;
    async fn get_documents_by_user(&self, user_id: i64) -> Result<Vec<Document>, InternalError>;
    async fn create_document(&self, document: InsertDocument) -> Result<Document, InternalError>;
    async fn delete_document(&self, id: i64) -> Result<bool, InternalError>;

    // Order operations
    async fn get_order(&self, id: i64) -> Result<Option<Order>, InternalError>;
    async fn get_order_by_code(&self, order_id: &str) -> Result<Option<Order>, InternalError>;
    async fn get_orders_by_user(&self, user_id: i64) -> Result<Vec<Order>, InternalError>;
    async fn create_order(&self, order: InsertOrder) -> Result<Order, InternalError>;
    async fn update_order_status(
        &self,
        id: i64,
        status: OrderStatus,
    ) -> Result<Option<Order>, InternalError>;

    // Resident operations
    async fn get_resident(&self, id: i64) -> Result<Option<Resident>, InternalError>;
    async fn get_residents(
        &self,
        source: Option<ResidentSource>,
    ) -> Result<Vec<Resident>, InternalError>;
    async fn create_resident(&self, resident: InsertResident) -> Result<Resident, InternalError>;

    // Notification operations
    async fn get_notification(&self, id: i64) -> Result<Option<Notification>, InternalError>;
    async fn get_notifications_by_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<Notification>, InternalError>;
    async fn create_notification(
        &self,
        notification: InsertNotification,
    ) -> Result<Notification, InternalError>;
    async fn mark_notification_read(&self, id: i64) -> Result<bool, InternalError>;

    // Activity operations, list is ordered newest first
    async fn get_activities_by_user(&self, user_id: i64) -> Result<Vec<Activity>, InternalError>;
    async fn create_activity(&self, activity: InsertActivity) -> Result<Activity, InternalError>;
}
