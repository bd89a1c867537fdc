use crate::auth::password::verify_password;
use crate::errors::InternalError;
use crate::stores::Storage;
use crate::types::entities::User;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

const TOKEN_BYTES: usize = 32;

/// Server-side session record keyed by its opaque token.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub token: String,
    pub user_id: i64,
    pub expires_at: DateTime<Utc>,
}

/// Pluggable session persistence. The in-memory implementation below is the
/// default; a deployment needing cross-process sessions swaps this for an
/// external store.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert(&self, record: SessionRecord);
    async fn get(&self, token: &str) -> Option<SessionRecord>;
    async fn touch(&self, token: &str, expires_at: DateTime<Utc>);
    async fn remove(&self, token: &str);
}

/// Process-local session store.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, SessionRecord>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert(&self, record: SessionRecord) {
        self.sessions
            .write()
            .await
            .insert(record.token.clone(), record);
    }

    async fn get(&self, token: &str) -> Option<SessionRecord> {
        self.sessions.read().await.get(token).cloned()
    }

    async fn touch(&self, token: &str, expires_at: DateTime<Utc>) {
        if let Some(record) = self.sessions.write().await.get_mut(token) {
            record.expires_at = expires_at;
        }
    }

    async fn remove(&self, token: &str) {
        self.sessions.write().await.remove(token);
    }
}

/// Issues and resolves opaque session tokens.
///
/// Sessions expire after a sliding inactivity window: every successful
/// [`SessionManager::current_user`] lookup extends the expiry. Expired
/// records are dropped lazily on access. Concurrent sessions per user are
/// permitted.
pub struct SessionManager {
    storage: Arc<dyn Storage>,
    store: Arc<dyn SessionStore>,
    ttl: Duration,
}

impl SessionManager {
    pub fn new(storage: Arc<dyn Storage>, store: Arc<dyn SessionStore>, ttl_hours: i64) -> Self {
        Self {
            storage,
            store,
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Verify credentials and establish a session.
    ///
    /// Returns `None` for an unknown username or a password mismatch; the
    /// two causes are indistinguishable to the caller.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<(User, String)>, InternalError> {
        let Some(user) = self.storage.get_user_by_username(username).await? else {
            return Ok(None);
        };
        if !verify_password(password, &user.password_hash) {
            return Ok(None);
        }
        let token = self.issue(user.id).await;
        Ok(Some((user, token)))
    }

    /// Establish a session for an already-authenticated user (registration
    /// logs the new account in without a second credential check).
    pub async fn issue(&self, user_id: i64) -> String {
        let token = generate_token();
        self.store
            .insert(SessionRecord {
                token: token.clone(),
                user_id,
                expires_at: Utc::now() + self.ttl,
            })
            .await;
        token
    }

    /// Resolve a token to its owning user, extending the inactivity window.
    pub async fn current_user(&self, token: &str) -> Result<Option<User>, InternalError> {
        let Some(record) = self.store.get(token).await else {
            return Ok(None);
        };
        if record.expires_at <= Utc::now() {
            self.store.remove(token).await;
            return Ok(None);
        }
        self.store.touch(token, Utc::now() + self.ttl).await;
        self.storage.get_user(record.user_id).await
    }

    pub async fn logout(&self, token: &str) {
        self.store.remove(token).await;
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl.num_seconds()
    }
}

fn generate_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::hash_password;
    use crate::stores::MemStorage;
    use crate::types::entities::InsertUser;

    async fn setup(ttl_hours: i64) -> (Arc<MemStorage>, SessionManager) {
        let storage = Arc::new(MemStorage::new());
        storage
            .create_user(InsertUser {
                username: "alice".to_string(),
                password_hash: hash_password("secret123").unwrap(),
                full_name: None,
                company: None,
                role: "user".to_string(),
            })
            .await
            .unwrap();
        let sessions = SessionManager::new(
            storage.clone(),
            Arc::new(MemorySessionStore::new()),
            ttl_hours,
        );
        (storage, sessions)
    }

    #[tokio::test]
    async fn test_login_with_valid_credentials_resolves_token() {
        let (_storage, sessions) = setup(24).await;

        let (user, token) = sessions
            .login("alice", "secret123")
            .await
            .unwrap()
            .expect("login should succeed");
        assert_eq!(user.username, "alice");

        let resolved = sessions.current_user(&token).await.unwrap();
        assert_eq!(resolved.map(|u| u.id), Some(user.id));
    }

    #[tokio::test]
    async fn test_login_fails_with_wrong_password() {
        let (_storage, sessions) = setup(24).await;
        assert!(sessions.login("alice", "wrong").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_login_fails_with_unknown_username() {
        let (_storage, sessions) = setup(24).await;
        assert!(sessions
            .login("nobody", "secret123")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_logout_invalidates_token() {
        let (_storage, sessions) = setup(24).await;
        let (_, token) = sessions.login("alice", "secret123").await.unwrap().unwrap();

        sessions.logout(&token).await;

        assert!(sessions.current_user(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_session_is_rejected() {
        let (_storage, sessions) = setup(0).await;
        let (_, token) = sessions.login("alice", "secret123").await.unwrap().unwrap();

        assert!(sessions.current_user(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_sessions_for_one_user_are_permitted() {
        let (_storage, sessions) = setup(24).await;
        let (_, first) = sessions.login("alice", "secret123").await.unwrap().unwrap();
        let (_, second) = sessions.login("alice", "secret123").await.unwrap().unwrap();

        assert_ne!(first, second);
        assert!(sessions.current_user(&first).await.unwrap().is_some());
        assert!(sessions.current_user(&second).await.unwrap().is_some());
    }

    #[test]
    fn test_generated_tokens_are_unique_hex() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), TOKEN_BYTES * 2);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }
}
