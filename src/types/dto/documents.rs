use crate::types::entities::{Document, DocumentKind};
use chrono::{DateTime, Utc};
use poem_openapi::types::multipart::Upload;
use poem_openapi::{Multipart, Object};
use serde::{Deserialize, Serialize};

/// Multipart payload for document upload; the file arrives in the
/// `document` field.
#[derive(Debug, Multipart)]
pub struct UploadDocumentPayload {
    pub document: Upload,
}

#[derive(Object, Debug, Serialize, Deserialize)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct DocumentResponse {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    #[oai(rename = "type")]
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    pub path: String,
    pub size: i64,
    pub uploaded_at: DateTime<Utc>,
}

impl From<Document> for DocumentResponse {
    fn from(document: Document) -> Self {
        Self {
            id: document.id,
            user_id: document.user_id,
            name: document.name,
            kind: document.kind,
            path: document.path,
            size: document.size,
            uploaded_at: document.uploaded_at,
        }
    }
}
