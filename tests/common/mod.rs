use rta_backend::app_data::AppData;
use rta_backend::auth::hash_password;
use rta_backend::config::AppSettings;
use rta_backend::stores::Storage;
use rta_backend::types::entities::{InsertUser, User};
use std::sync::Arc;
use tempfile::TempDir;

/// Fully wired application state with a throwaway upload directory.
pub struct TestApp {
    pub app: Arc<AppData>,
    _upload_dir: TempDir,
}

pub async fn setup_app() -> TestApp {
    let upload_dir = tempfile::tempdir().expect("Failed to create temp upload dir");
    let settings = AppSettings {
        bind_addr: "127.0.0.1:0".to_string(),
        upload_dir: upload_dir.path().to_path_buf(),
        session_ttl_hours: 24,
    };
    let app = AppData::init(settings)
        .await
        .expect("Failed to initialize application state");
    TestApp {
        app,
        _upload_dir: upload_dir,
    }
}

pub async fn register_user(app: &AppData, username: &str, password: &str) -> User {
    let password_hash = hash_password(password).expect("Failed to hash password");
    app.storage
        .create_user(InsertUser {
            username: username.to_string(),
            password_hash,
            full_name: None,
            company: None,
            role: "user".to_string(),
        })
        .await
        .expect("Failed to create user")
}
