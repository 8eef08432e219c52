// Document intake and transfer encoding
//
// Files are validated against size/type constraints before any draft
// mutation, and converted to the base64 transfer shape only at submission
// time. A rejected file leaves no trace in the session.

use std::path::Path;

use base64::Engine;
use chrono::{DateTime, Utc};
use log::info;
use uuid::Uuid;

use crate::config::UploadConfig;
use crate::error::PortalError;
use crate::models::requests::{DocumentPayload, DOCUMENT_VERSION};

/// One file accepted from the applicant.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub id: Uuid,
    /// Server-side document library id, present once the backend has stored
    /// the file (populated on resume).
    pub doc_lib_id: Option<String>,
    /// Numeric document type code from master data.
    pub document_type: i32,
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub uploaded_at: DateTime<Utc>,
    bytes: Vec<u8>,
}

impl UploadedFile {
    /// Validate and accept a file from in-memory bytes.
    pub fn from_bytes(
        name: &str,
        document_type: i32,
        bytes: Vec<u8>,
        constraints: &UploadConfig,
    ) -> Result<Self, PortalError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(PortalError::file("file name is required"));
        }
        let extension = extension_of(trimmed);
        if extension.is_empty() || !constraints.allowed_extensions.iter().any(|e| *e == extension) {
            return Err(PortalError::file(format!(
                "file type '.{}' is not accepted (allowed: {})",
                extension,
                constraints.allowed_extensions.join(", ")
            )));
        }
        if bytes.is_empty() {
            return Err(PortalError::file("file is empty"));
        }
        if bytes.len() as u64 > constraints.max_size_bytes {
            return Err(PortalError::file(format!(
                "file exceeds the {} byte limit",
                constraints.max_size_bytes
            )));
        }
        info!(
            "[PHASE: documents] [STEP: intake] accepted '{}' ({} bytes)",
            trimmed,
            bytes.len()
        );
        Ok(Self {
            id: Uuid::new_v4(),
            doc_lib_id: None,
            document_type,
            name: trimmed.to_string(),
            size_bytes: bytes.len() as u64,
            mime_type: mime_for_extension(&extension).to_string(),
            uploaded_at: Utc::now(),
            bytes,
        })
    }

    /// Validate and accept a file from disk.
    pub async fn from_path(
        path: &Path,
        document_type: i32,
        constraints: &UploadConfig,
    ) -> Result<Self, PortalError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| PortalError::file("file name is required"))?;
        // Size-check the metadata before pulling the content into memory.
        let meta = tokio::fs::metadata(path).await?;
        if meta.len() > constraints.max_size_bytes {
            return Err(PortalError::file(format!(
                "file exceeds the {} byte limit",
                constraints.max_size_bytes
            )));
        }
        let bytes = tokio::fs::read(path).await?;
        Self::from_bytes(&name, document_type, bytes, constraints)
    }

    pub fn file_extension(&self) -> String {
        extension_of(&self.name)
    }

    pub fn content(&self) -> &[u8] {
        &self.bytes
    }

    /// Build the transfer payload. Base64, no data-URL prefix.
    pub fn to_payload(&self) -> DocumentPayload {
        DocumentPayload {
            doc_lib_id: self.doc_lib_id.clone(),
            document_type: self.document_type,
            name: self.name.clone(),
            file_extension: self.file_extension(),
            version_number: DOCUMENT_VERSION.to_string(),
            file_content: base64::engine::general_purpose::STANDARD.encode(&self.bytes),
        }
    }

    /// Rebuild a file entry from a server payload (resume). Content may be
    /// absent; such entries carry metadata only.
    pub fn from_payload(payload: DocumentPayload) -> Self {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload.file_content.as_bytes())
            .unwrap_or_default();
        Self {
            id: Uuid::new_v4(),
            doc_lib_id: payload.doc_lib_id,
            document_type: payload.document_type,
            name: payload.name,
            size_bytes: bytes.len() as u64,
            mime_type: mime_for_extension(&payload.file_extension.to_ascii_lowercase()).to_string(),
            uploaded_at: Utc::now(),
            bytes,
        }
    }
}

fn extension_of(name: &str) -> String {
    name.rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default()
}

fn mime_for_extension(extension: &str) -> &'static str {
    match extension {
        "pdf" => "application/pdf",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}
