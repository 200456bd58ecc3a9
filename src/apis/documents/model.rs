use crate::hal::{impl_hal_resource, Resource};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum DocumentType {
    Passport,
    License,
    IdCard,
    Other,
}

impl DocumentType {
    /// Value of the `documentType` form field.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Passport => "passport",
            DocumentType::License => "license",
            DocumentType::IdCard => "idCard",
            DocumentType::Other => "other",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An identity document uploaded for verification.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(flatten)]
    pub resource: Resource,
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "type", default)]
    pub document_type: Option<DocumentType>,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub failure_reason: Option<String>,
}

impl_hal_resource!(Document);

/// A file to upload, sent as `multipart/form-data`.
///
/// The content is kept in memory so the upload can be replayed after a token renewal.
#[derive(Clone)]
pub struct DocumentRequest {
    pub document_type: DocumentType,
    pub file_name: String,
    pub content: Vec<u8>,
}

impl fmt::Debug for DocumentRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentRequest")
            .field("document_type", &self.document_type)
            .field("file_name", &self.file_name)
            .field("content", &format_args!("[{} bytes]", self.content.len()))
            .finish()
    }
}
