use chrono::{DateTime, Utc};

/// Append-only audit record. Never updated or deleted; listed newest first.
#[derive(Debug, Clone)]
pub struct Activity {
    pub id: i64,
    pub user_id: i64,
    pub action: String,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct InsertActivity {
    pub user_id: i64,
    pub action: String,
    pub details: Option<String>,
}
