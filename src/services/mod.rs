// Services layer - business logic and side-effect orchestration
pub mod document_service;
pub mod fanout;
pub mod order_service;

pub use document_service::{DocumentService, UploadedFile, MAX_UPLOAD_BYTES};
pub use fanout::Fanout;
pub use order_service::{NewOrder, OrderService};
