use chrono::{DateTime, Utc};
use poem_openapi::Enum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which registry a resident record came from.
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[oai(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ResidentSource {
    Internal,
    External,
}

impl fmt::Display for ResidentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResidentSource::Internal => f.write_str("internal"),
            ResidentSource::External => f.write_str("external"),
        }
    }
}

/// Read-mostly registry entry, seeded at startup and immutable afterwards.
/// `data` is an opaque attribute bag (contact details etc.).
#[derive(Debug, Clone)]
pub struct Resident {
    pub id: i64,
    pub name: String,
    pub resident_id: String,
    pub address: String,
    pub registration_date: DateTime<Utc>,
    pub source: ResidentSource,
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Clone)]
pub struct InsertResident {
    pub name: String,
    pub resident_id: String,
    pub address: String,
    pub registration_date: DateTime<Utc>,
    pub source: ResidentSource,
    pub data: Option<serde_json::Value>,
}
