use crate::api::{require_user, SessionAuth};
use crate::auth::SessionManager;
use crate::errors::{ApiError, InternalError};
use crate::services::{DocumentService, UploadedFile};
use crate::types::dto::common::MessageResponse;
use crate::types::dto::documents::{DocumentResponse, UploadDocumentPayload};
use poem_openapi::param::Path;
use poem_openapi::payload::{Attachment, AttachmentType, Json};
use poem_openapi::{ApiResponse, OpenApi, Tags};
use std::sync::Arc;

/// Document upload, listing, download, and deletion endpoints
pub struct DocumentsApi {
    documents: Arc<DocumentService>,
    sessions: Arc<SessionManager>,
}

impl DocumentsApi {
    pub fn new(documents: Arc<DocumentService>, sessions: Arc<SessionManager>) -> Self {
        Self {
            documents,
            sessions,
        }
    }
}

#[derive(Tags)]
enum DocumentTags {
    /// Document management
    Documents,
}

#[derive(ApiResponse)]
pub enum DocumentCreatedResponse {
    #[oai(status = 201)]
    Created(Json<DocumentResponse>),
}

#[OpenApi]
impl DocumentsApi {
    /// Upload a document (multipart field `document`, xlsx/docx, max 10 MiB)
    #[oai(
        path = "/documents/upload",
        method = "post",
        tag = "DocumentTags::Documents"
    )]
    async fn upload(
        &self,
        auth: SessionAuth,
        payload: UploadDocumentPayload,
    ) -> Result<DocumentCreatedResponse, ApiError> {
        let user = require_user(&self.sessions, &auth).await?;

        let name = payload
            .document
            .file_name()
            .map(ToString::to_string)
            .unwrap_or_default();
        let content_type = payload.document.content_type().map(ToString::to_string);
        let data = payload
            .document
            .into_vec()
            .await
            .map_err(|e| ApiError::from(InternalError::io("read_upload", e)))?;

        let document = self
            .documents
            .upload(
                &user,
                UploadedFile {
                    name,
                    content_type,
                    data,
                },
            )
            .await?;
        Ok(DocumentCreatedResponse::Created(Json(document.into())))
    }

    /// List the caller's documents
    #[oai(path = "/documents", method = "get", tag = "DocumentTags::Documents")]
    async fn list(&self, auth: SessionAuth) -> Result<Json<Vec<DocumentResponse>>, ApiError> {
        let user = require_user(&self.sessions, &auth).await?;
        let documents = self.documents.list(&user).await?;
        Ok(Json(documents.into_iter().map(Into::into).collect()))
    }

    /// Delete an owned document and its stored file
    #[oai(
        path = "/documents/:id",
        method = "delete",
        tag = "DocumentTags::Documents"
    )]
    async fn delete(
        &self,
        auth: SessionAuth,
        id: Path<i64>,
    ) -> Result<Json<MessageResponse>, ApiError> {
        let user = require_user(&self.sessions, &auth).await?;
        self.documents.delete(&user, id.0).await?;
        Ok(Json(MessageResponse {
            message: "Document deleted successfully".to_string(),
        }))
    }

    /// Download an owned document under its original filename
    #[oai(
        path = "/documents/:id/download",
        method = "get",
        tag = "DocumentTags::Documents"
    )]
    async fn download(
        &self,
        auth: SessionAuth,
        id: Path<i64>,
    ) -> Result<Attachment<Vec<u8>>, ApiError> {
        let user = require_user(&self.sessions, &auth).await?;
        let (document, bytes) = self.documents.download(&user, id.0).await?;
        Ok(Attachment::new(bytes)
            .attachment_type(AttachmentType::Attachment)
            .filename(document.name))
    }
}
