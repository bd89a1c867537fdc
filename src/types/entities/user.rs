use chrono::{DateTime, Utc};

/// A registered account. The password hash is never serialized to clients;
/// the API layer converts to a response DTO that omits it.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub company: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable shape for a new user. The repository assigns `id` and
/// `created_at`.
#[derive(Debug, Clone)]
pub struct InsertUser {
    pub username: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub company: Option<String>,
    pub role: String,
}
