use chrono::{DateTime, Utc};
use poem_openapi::Enum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Recognized document formats. Uploads must declare one of the matching
/// OOXML media types and carry the matching file extension.
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[oai(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Xlsx,
    Docx,
}

impl DocumentKind {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "xlsx" => Some(DocumentKind::Xlsx),
            "docx" => Some(DocumentKind::Docx),
            _ => None,
        }
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" => {
                Some(DocumentKind::Xlsx)
            }
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Some(DocumentKind::Docx)
            }
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentKind::Xlsx => "xlsx",
            DocumentKind::Docx => "docx",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            DocumentKind::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            DocumentKind::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// An uploaded file owned by exactly one user. `path` is the server-local
/// storage location; `name` is the original client filename.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub kind: DocumentKind,
    pub path: String,
    pub size: i64,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct InsertDocument {
    pub user_id: i64,
    pub name: String,
    pub kind: DocumentKind,
    pub path: String,
    pub size: i64,
}
