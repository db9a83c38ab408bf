//! Supporting document storage
//!
//! Uploads are checked for size and type, stored under a fresh UUID file
//! name, and addressed afterwards by a stable `/uploads/<name>` reference.
//! Claim submission refuses references the store never issued.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use core_kernel::{AdapterType, DomainPort, HealthCheckResult, HealthCheckable};

use crate::error::DocumentError;

/// Largest accepted upload (10 MiB)
pub const MAX_DOCUMENT_BYTES: u64 = 10 * 1024 * 1024;

/// Accepted extensions, lower case with the leading dot
pub const ALLOWED_EXTENSIONS: [&str; 3] = [".pdf", ".docx", ".xlsx"];

/// Prefix shared by every stored reference
pub const UPLOADS_PREFIX: &str = "/uploads/";

/// A file received from a client
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl DocumentUpload {
    pub fn new(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content,
        }
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    /// Lower-cased extension including the dot, empty when there is none
    pub fn extension(&self) -> String {
        Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_ascii_lowercase()))
            .unwrap_or_default()
    }

    /// Checks size and type
    ///
    /// # Returns
    ///
    /// `Ok(None)` for an empty upload, otherwise the extension to store under
    pub fn check(&self) -> Result<Option<String>, DocumentError> {
        if self.content.is_empty() {
            return Ok(None);
        }
        if self.size() > MAX_DOCUMENT_BYTES {
            return Err(DocumentError::TooLarge {
                size: self.size(),
                max_bytes: MAX_DOCUMENT_BYTES,
            });
        }
        let extension = self.extension();
        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(DocumentError::InvalidType { extension });
        }
        Ok(Some(extension))
    }
}

/// Name part of a stored reference, if it is one of ours
fn stored_name(reference: &str) -> Option<&str> {
    reference
        .strip_prefix(UPLOADS_PREFIX)
        .filter(|name| !name.is_empty() && !name.contains(['/', '\\']) && !name.contains(".."))
}

/// Document storage port
#[async_trait]
pub trait DocumentStore: DomainPort + HealthCheckable {
    /// Stores an upload
    ///
    /// # Returns
    ///
    /// The new reference, or `None` when the upload was empty
    async fn save(&self, upload: DocumentUpload) -> Result<Option<String>, DocumentError>;

    /// Reads a stored document back
    async fn load(&self, reference: &str) -> Result<Option<Vec<u8>>, DocumentError>;

    /// True when `reference` names a document this store holds
    async fn exists(&self, reference: &str) -> Result<bool, DocumentError> {
        Ok(self.load(reference).await?.is_some())
    }

    /// Removes a stored document
    ///
    /// Returns false for references outside `/uploads/` or unknown files.
    async fn delete(&self, reference: &str) -> Result<bool, DocumentError>;
}

/// Stores documents in `<root>/uploads` on the local filesystem
#[derive(Debug, Clone)]
pub struct LocalDocumentStore {
    uploads_dir: PathBuf,
}

impl LocalDocumentStore {
    /// # Arguments
    ///
    /// * `web_root` - Directory that `/uploads/...` references are relative to
    pub fn new(web_root: impl Into<PathBuf>) -> Self {
        Self {
            uploads_dir: web_root.into().join("uploads"),
        }
    }

    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }
}

impl DomainPort for LocalDocumentStore {}

#[async_trait]
impl HealthCheckable for LocalDocumentStore {
    async fn health_check(&self) -> HealthCheckResult {
        let mut result = HealthCheckResult::healthy("local-documents", AdapterType::Filesystem);
        if let Err(e) = tokio::fs::create_dir_all(&self.uploads_dir).await {
            result.status = core_kernel::AdapterHealth::Unhealthy;
            result.message = Some(e.to_string());
        }
        result
    }
}

#[async_trait]
impl DocumentStore for LocalDocumentStore {
    #[instrument(skip(self, upload), fields(file_name = %upload.file_name, size = upload.size()))]
    async fn save(&self, upload: DocumentUpload) -> Result<Option<String>, DocumentError> {
        let Some(extension) = upload.check()? else {
            return Ok(None);
        };

        tokio::fs::create_dir_all(&self.uploads_dir).await?;
        let name = format!("{}{}", Uuid::new_v4(), extension);
        tokio::fs::write(self.uploads_dir.join(&name), &upload.content).await?;

        info!(stored_as = %name, "Document stored");
        Ok(Some(format!("{UPLOADS_PREFIX}{name}")))
    }

    async fn load(&self, reference: &str) -> Result<Option<Vec<u8>>, DocumentError> {
        let Some(name) = stored_name(reference) else {
            return Ok(None);
        };
        match tokio::fs::read(self.uploads_dir.join(name)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, reference: &str) -> Result<bool, DocumentError> {
        let Some(name) = stored_name(reference) else {
            return Ok(false);
        };
        Ok(tokio::fs::try_exists(self.uploads_dir.join(name)).await?)
    }

    #[instrument(skip(self))]
    async fn delete(&self, reference: &str) -> Result<bool, DocumentError> {
        let Some(name) = stored_name(reference) else {
            return Ok(false);
        };
        match tokio::fs::remove_file(self.uploads_dir.join(name)).await {
            Ok(()) => {
                debug!("Document deleted");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// Keeps documents in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentStore {
    files: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.files.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.files.read().await.is_empty()
    }
}

impl DomainPort for InMemoryDocumentStore {}

#[async_trait]
impl HealthCheckable for InMemoryDocumentStore {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::healthy("memory-documents", AdapterType::InMemory)
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn save(&self, upload: DocumentUpload) -> Result<Option<String>, DocumentError> {
        let Some(extension) = upload.check()? else {
            return Ok(None);
        };
        let reference = format!("{UPLOADS_PREFIX}{}{}", Uuid::new_v4(), extension);
        self.files.write().await.insert(reference.clone(), upload.content);
        Ok(Some(reference))
    }

    async fn load(&self, reference: &str) -> Result<Option<Vec<u8>>, DocumentError> {
        Ok(self.files.read().await.get(reference).cloned())
    }

    async fn exists(&self, reference: &str) -> Result<bool, DocumentError> {
        Ok(self.files.read().await.contains_key(reference))
    }

    async fn delete(&self, reference: &str) -> Result<bool, DocumentError> {
        if stored_name(reference).is_none() {
            return Ok(false);
        }
        Ok(self.files.write().await.remove(reference).is_some())
    }
}
