use crate::errors::{InternalError, ResourceError};
use crate::services::Fanout;
use crate::stores::Storage;
use crate::types::entities::{Document, DocumentKind, InsertDocument, User};
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

/// Upload size ceiling: 10 MiB.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// An incoming upload, already detached from the HTTP framework so the
/// pipeline stays testable without a request in flight.
#[derive(Debug)]
pub struct UploadedFile {
    /// Original client filename, kept for later downloads.
    pub name: String,
    /// Declared media type from the multipart part, if any.
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// Validates, persists, and serves uploaded files.
///
/// Accepted files are written under the upload directory with a generated
/// collision-resistant name; the original filename only survives in the
/// Document record. Rejected uploads leave neither a record nor a file.
pub struct DocumentService {
    storage: Arc<dyn Storage>,
    fanout: Arc<Fanout>,
    upload_dir: PathBuf,
}

impl DocumentService {
    pub fn new(storage: Arc<dyn Storage>, fanout: Arc<Fanout>, upload_dir: PathBuf) -> Self {
        Self {
            storage,
            fanout,
            upload_dir,
        }
    }

    pub async fn ensure_upload_dir(&self) -> Result<(), InternalError> {
        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|e| InternalError::io("create_upload_dir", e))
    }

    /// Validate and persist an upload for `owner`.
    ///
    /// The declared media type and the filename extension are validated
    /// independently and must name the same document kind; the payload must
    /// fit the 10 MiB ceiling. Any violation rejects the upload before a
    /// record or file exists.
    pub async fn upload(&self, owner: &User, file: UploadedFile) -> Result<Document, InternalError> {
        let mime_kind = file
            .content_type
            .as_deref()
            .and_then(DocumentKind::from_mime)
            .ok_or_else(|| {
                ResourceError::upload_rejected("Only .xlsx and .docx files are allowed")
            })?;
        let ext_kind = Path::new(&file.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(DocumentKind::from_extension)
            .ok_or_else(|| {
                ResourceError::upload_rejected(
                    "Invalid file type. Only .xlsx and .docx files are allowed",
                )
            })?;
        if mime_kind != ext_kind {
            return Err(ResourceError::upload_rejected(
                "File extension does not match the declared media type",
            ));
        }
        if file.data.len() > MAX_UPLOAD_BYTES {
            return Err(ResourceError::upload_rejected(
                "File is too large. The limit is 10 MiB",
            ));
        }

        let stored_name = format!(
            "{}-{}.{}",
            Utc::now().timestamp_millis(),
            Uuid::new_v4(),
            ext_kind.extension()
        );
        let path = self.upload_dir.join(stored_name);
        tokio::fs::write(&path, &file.data)
            .await
            .map_err(|e| InternalError::io("write_upload", e))?;

        let document = match self
            .storage
            .create_document(InsertDocument {
                user_id: owner.id,
                name: file.name,
                kind: ext_kind,
                path: path.to_string_lossy().into_owned(),
                size: file.data.len() as i64,
            })
            .await
        {
            Ok(document) => document,
            Err(err) => {
                // The record never existed, so the file must not either.
                let _ = tokio::fs::remove_file(&path).await;
                return Err(err);
            }
        };

        self.fanout
            .record(
                owner.id,
                "Document Upload",
                Some(format!("Uploaded document: {}", document.name)),
            )
            .await;

        Ok(document)
    }

    pub async fn list(&self, requester: &User) -> Result<Vec<Document>, InternalError> {
        self.storage.get_documents_by_user(requester.id).await
    }

    /// Fetch one document, enforcing ownership. Unknown ids are NotFound
    /// regardless of who asks.
    pub async fn get_owned(&self, requester: &User, id: i64) -> Result<Document, InternalError> {
        let document = self
            .storage
            .get_document(id)
            .await?
            .ok_or(ResourceError::NotFound { kind: "document" })?;
        if document.user_id != requester.id {
            return Err(ResourceError::forbidden("document"));
        }
        Ok(document)
    }

    /// Read an owned document's bytes for download, recording the access.
    /// A record whose file has gone missing on disk reads as NotFound.
    pub async fn download(
        &self,
        requester: &User,
        id: i64,
    ) -> Result<(Document, Vec<u8>), InternalError> {
        let document = self.get_owned(requester, id).await?;
        let bytes = tokio::fs::read(&document.path)
            .await
            .map_err(|_| ResourceError::NotFound { kind: "file" })?;

        self.fanout
            .record(
                requester.id,
                "Document Download",
                Some(format!("Downloaded document: {}", document.name)),
            )
            .await;

        Ok((document, bytes))
    }

    /// Delete an owned document: best-effort file removal, then the record.
    /// The activity is recorded only when the record removal succeeded.
    pub async fn delete(&self, requester: &User, id: i64) -> Result<(), InternalError> {
        let document = self.get_owned(requester, id).await?;

        if let Err(err) = tokio::fs::remove_file(&document.path).await {
            tracing::warn!(path = %document.path, %err, "failed to remove uploaded file");
        }

        let removed = self.storage.delete_document(document.id).await?;
        if removed {
            self.fanout
                .record(
                    requester.id,
                    "Document Delete",
                    Some(format!("Deleted document: {}", document.name)),
                )
                .await;
        }
        Ok(())
    }
}
