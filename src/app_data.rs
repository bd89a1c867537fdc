use crate::auth::{MemorySessionStore, SessionManager, SessionStore};
use crate::config::AppSettings;
use crate::errors::InternalError;
use crate::services::{DocumentService, Fanout, OrderService};
use crate::stores::{seed::seed_residents, MemStorage, Storage};
use std::sync::Arc;

/// Centralized application state following the main-owned stores pattern.
///
/// All dependencies are created once at startup and shared across the API
/// structs, so each endpoint group receives exactly the services it uses.
pub struct AppData {
    pub settings: AppSettings,
    pub storage: Arc<dyn Storage>,
    pub sessions: Arc<SessionManager>,
    pub fanout: Arc<Fanout>,
    pub orders: Arc<OrderService>,
    pub documents: Arc<DocumentService>,
}

impl AppData {
    /// Initialize all application state: the in-memory repository (seeded
    /// with the resident registry), the session manager, and the services.
    ///
    /// # Errors
    ///
    /// Returns `InternalError` when seeding or upload-directory creation
    /// fails.
    pub async fn init(settings: AppSettings) -> Result<Arc<Self>, InternalError> {
        tracing::info!("Initializing application state...");

        let storage: Arc<dyn Storage> = Arc::new(MemStorage::new());
        seed_residents(storage.as_ref()).await?;

        let session_store: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
        let sessions = Arc::new(SessionManager::new(
            storage.clone(),
            session_store,
            settings.session_ttl_hours,
        ));

        let fanout = Arc::new(Fanout::new(storage.clone()));
        let orders = Arc::new(OrderService::new(storage.clone(), fanout.clone()));
        let documents = Arc::new(DocumentService::new(
            storage.clone(),
            fanout.clone(),
            settings.upload_dir.clone(),
        ));
        documents.ensure_upload_dir().await?;

        tracing::info!("Application state ready");

        Ok(Arc::new(Self {
            settings,
            storage,
            sessions,
            fanout,
            orders,
            documents,
        }))
    }
}
