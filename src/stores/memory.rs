use crate::errors::{InternalError, ResourceError};
use crate::stores::Storage;
use crate::types::entities::{
    Activity, Document, InsertActivity, InsertDocument, InsertNotification, InsertOrder,
    InsertResident, InsertUser, Notification, Order, OrderStatus, Resident, ResidentSource, User,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

/// One entity table: the row map plus the id counter. The counter lives
/// with the rows so both advance under a single write lock.
struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    fn insert_with(&mut self, build: impl FnOnce(i64) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }
}

/// In-memory resource repository. Process-wide state with no persistence;
/// the per-table `RwLock`s serialize mutations of each entity kind.
pub struct MemStorage {
    users: RwLock<Table<User>>,
    documents: RwLock<Table<Document>>,
    orders: RwLock<Table<Order>>,
    residents: RwLock<Table<Resident>>,
    notifications: RwLock<Table<Notification>>,
    activities: RwLock<Table<Activity>>,
}

impl MemStorage {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Table::new()),
            documents: RwLock::new(Table::new()),
            orders: RwLock::new(Table::new()),
            residents: RwLock::new(Table::new()),
            notifications: RwLock::new(Table::new()),
            activities: RwLock::new(Table::new()),
        }
    }
}

impl Default for MemStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemStorage {
    async fn get_user(&self, id: i64) -> Result<Option<User>, InternalError> {
        Ok(self.users.read().await.rows.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, InternalError> {
        Ok(self
            .users
            .read()
            .await
            .rows
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn create_user(&self, user: InsertUser) -> Result<User, InternalError> {
        let mut table = self.users.write().await;
        if table.rows.values().any(|u| u.username == user.username) {
            return Err(ResourceError::DuplicateUsername(user.username).into());
        }
        let created_at = Utc::now();
        Ok(table.insert_with(|id| User {
            id,
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
            full_name: user.full_name.clone(),
            company: user.company.clone(),
            role: user.role.clone(),
            created_at,
        }))
    }

    async fn get_document(&self, id: i64) -> Result<Option<Document>, InternalError> {
        Ok(self.documents.read().await.rows.get(&id).cloned())
    }

    async fn get_documents_by_user(&self, user_id: i64) -> Result<Vec<Document>, InternalError> {
        Ok(self
            .documents
            .read()
            .await
            .rows
            .values()
            .filter(|document| document.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_document(&self, document: InsertDocument) -> Result<Document, InternalError> {
        let mut table = self.documents.write().await;
        let uploaded_at = Utc::now();
        Ok(table.insert_with(|id| Document {
            id,
            user_id: document.user_id,
            name: document.name.clone(),
            kind: document.kind,
            path: document.path.clone(),
            size: document.size,
            uploaded_at,
        }))
    }

    async fn delete_document(&self, id: i64) -> Result<bool, InternalError> {
        Ok(self.documents.write().await.rows.remove(&id).is_some())
    }

    async fn get_order(&self, id: i64) -> Result<Option<Order>, InternalError> {
        Ok(self.orders.read().await.rows.get(&id).cloned())
    }

    async fn get_order_by_code(&self, order_id: &str) -> Result<Option<Order>, InternalError> {
        Ok(self
            .orders
            .read()
            .await
            .rows
            .values()
            .find(|order| order.order_id == order_id)
            .cloned())
    }

    async fn get_orders_by_user(&self, user_id: i64) -> Result<Vec<Order>, InternalError> {
        Ok(self
            .orders
            .read()
            .await
            .rows
            .values()
            .filter(|order| order.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_order(&self, order: InsertOrder) -> Result<Order, InternalError> {
        let mut table = self.orders.write().await;
        if table.rows.values().any(|o| o.order_id == order.order_id) {
            return Err(ResourceError::DuplicateOrderId(order.order_id).into());
        }
        let created_at = Utc::now();
        Ok(table.insert_with(|id| Order {
            id,
            user_id: order.user_id,
            order_id: order.order_id.clone(),
            status: order.status,
            total_documents: order.total_documents,
            document_type: order.document_type.clone(),
            price: order.price,
            created_at,
            updated_at: created_at,
        }))
    }

    async fn update_order_status(
        &self,
        id: i64,
        status: OrderStatus,
    ) -> Result<Option<Order>, InternalError> {
        let mut table = self.orders.write().await;
        Ok(table.rows.get_mut(&id).map(|order| {
            order.status = status;
            order.updated_at = Utc::now();
            order.clone()
        }))
    }

    async fn get_resident(&self, id: i64) -> Result<Option<Resident>, InternalError> {
        Ok(self.residents.read().await.rows.get(&id).cloned())
    }

    async fn get_residents(
        &self,
        source: Option<ResidentSource>,
    ) -> Result<Vec<Resident>, InternalError> {
        Ok(self
            .residents
            .read()
            .await
            .rows
            .values()
            .filter(|resident| source.map_or(true, |s| resident.source == s))
            .cloned()
            .collect())
    }

    async fn create_resident(&self, resident: InsertResident) -> Result<Resident, InternalError> {
        let mut table = self.residents.write().await;
        Ok(table.insert_with(|id| Resident {
            id,
            name: resident.name.clone(),
            resident_id: resident.resident_id.clone(),
            address: resident.address.clone(),
            registration_date: resident.registration_date,
            source: resident.source,
            data: resident.data.clone(),
        }))
    }

    async fn get_notification(&self, id: i64) -> Result<Option<Notification>, InternalError> {
        Ok(self.notifications.read().await.rows.get(&id).cloned())
    }

    async fn get_notifications_by_user(
        &self,
        user_id: i64,
    ) -> Result<Vec<Notification>, InternalError> {
        Ok(self
            .notifications
            .read()
            .await
            .rows
            .values()
            .filter(|notification| notification.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create_notification(
        &self,
        notification: InsertNotification,
    ) -> Result<Notification, InternalError> {
        let mut table = self.notifications.write().await;
        let created_at = Utc::now();
        Ok(table.insert_with(|id| Notification {
            id,
            user_id: notification.user_id,
            title: notification.title.clone(),
            message: notification.message.clone(),
            kind: notification.kind,
            is_read: false,
            created_at,
        }))
    }

    async fn mark_notification_read(&self, id: i64) -> Result<bool, InternalError> {
        let mut table = self.notifications.write().await;
        match table.rows.get_mut(&id) {
            Some(notification) => {
                notification.is_read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get_activities_by_user(&self, user_id: i64) -> Result<Vec<Activity>, InternalError> {
        let mut activities: Vec<Activity> = self
            .activities
            .read()
            .await
            .rows
            .values()
            .filter(|activity| activity.user_id == user_id)
            .cloned()
            .collect();
        activities.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(activities)
    }

    async fn create_activity(&self, activity: InsertActivity) -> Result<Activity, InternalError> {
        let mut table = self.activities.write().await;
        let created_at = Utc::now();
        Ok(table.insert_with(|id| Activity {
            id,
            user_id: activity.user_id,
            action: activity.action.clone(),
            details: activity.details.clone(),
            created_at,
        }))
    }
}
