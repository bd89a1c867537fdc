// Domain entities - one file per entity kind
pub mod activity;
pub mod document;
pub mod notification;
pub mod order;
pub mod resident;
pub mod user;

pub use activity::{Activity, InsertActivity};
pub use document::{Document, DocumentKind, InsertDocument};
pub use notification::{InsertNotification, Notification, NotificationKind};
pub use order::{InsertOrder, Order, OrderStatus};
pub use resident::{InsertResident, Resident, ResidentSource};
pub use user::{InsertUser, User};
