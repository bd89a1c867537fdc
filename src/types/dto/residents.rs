use crate::types::entities::{Resident, ResidentSource};
use chrono::{DateTime, Utc};
use poem_openapi::Object;
use serde::{Deserialize, Serialize};

#[derive(Object, Debug, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct ResidentResponse {
    pub id: i64,
    pub name: String,
    pub resident_id: String,
    pub address: String,
    pub registration_date: DateTime<Utc>,
    pub source: ResidentSource,
    pub data: Option<serde_json::Value>,
}

impl From<Resident> for ResidentResponse {
    fn from(resident: Resident) -> Self {
        Self {
            id: resident.id,
            name: resident.name,
            resident_id: resident.resident_id,
            address: resident.address,
            registration_date: resident.registration_date,
            source: resident.source,
            data: resident.data,
        }
    }
}
