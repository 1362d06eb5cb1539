//! Attachment storage
//!
//! Uploaded PDFs are written under the uploads directory with a generated
//! id. Submissions only keep the id and original name; admins fetch the
//! bytes back through the download endpoint.

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    constants::{API_BASE_PATH, ATTACHMENT_CONTENT_TYPE, ATTACHMENT_EXTENSION, MAX_ATTACHMENT_SIZE},
    error::{AppError, AppResult},
    models::FileRef,
    utils::{crypto::hash_bytes, validation::sanitize_string},
};

const PDF_MAGIC: &[u8] = b"%PDF-";

/// File reference collaborator
#[derive(Debug, Clone)]
pub struct FileService {
    root: PathBuf,
    public_base_url: String,
}

impl FileService {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    /// Check an upload against the attachment rules without storing it
    pub fn check_upload(
        original_name: &str,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> AppResult<()> {
        let name = display_name(original_name);

        if bytes.is_empty() {
            return Err(AppError::Validation("Attached file is empty".to_string()));
        }
        if bytes.len() > MAX_ATTACHMENT_SIZE {
            return Err(AppError::Validation(format!(
                "Attached file exceeds maximum size of {} MB",
                MAX_ATTACHMENT_SIZE / (1024 * 1024)
            )));
        }
        if !is_pdf(&name, content_type, bytes) {
            return Err(AppError::Validation(
                "Only PDF attachments are accepted".to_string(),
            ));
        }
        Ok(())
    }

    /// Store an uploaded attachment and return its reference
    pub async fn save(
        &self,
        original_name: &str,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> AppResult<FileRef> {
        Self::check_upload(original_name, content_type, bytes)?;
        let name = display_name(original_name);

        let id = format!("{}.{}", Uuid::new_v4(), ATTACHMENT_EXTENSION);

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create uploads directory: {}", e)))?;
        tokio::fs::write(self.root.join(&id), bytes)
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to write attachment: {}", e)))?;

        info!(
            file_id = %id,
            file_name = %name,
            size = bytes.len(),
            sha256 = %hash_bytes(bytes),
            "Attachment stored"
        );

        Ok(FileRef { id, name })
    }

    /// Read an attachment back
    pub async fn read(&self, file_id: &str) -> AppResult<Vec<u8>> {
        if !is_valid_file_id(file_id) {
            debug!(file_id = %file_id, "Rejected malformed file id");
            return Err(AppError::NotFound("File not found".to_string()));
        }

        match tokio::fs::read(self.root.join(file_id)).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(AppError::NotFound("File not found".to_string()))
            }
            Err(e) => Err(AppError::Internal(anyhow::anyhow!(
                "Failed to read attachment {}: {}",
                file_id,
                e
            ))),
        }
    }

    /// Delete an attachment that never made it into a submission
    pub async fn remove(&self, file_id: &str) -> AppResult<()> {
        if !is_valid_file_id(file_id) {
            return Ok(());
        }

        match tokio::fs::remove_file(self.root.join(file_id)).await {
            Ok(()) => {
                debug!(file_id = %file_id, "Attachment removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::Internal(anyhow::anyhow!(
                "Failed to remove attachment {}: {}",
                file_id,
                e
            ))),
        }
    }

    /// Absolute URL an admin can use to download the attachment
    pub fn build_download_url(&self, file_id: &str) -> String {
        format!(
            "{}{}/admin/files/{}",
            self.public_base_url.trim_end_matches('/'),
            API_BASE_PATH,
            file_id
        )
    }
}

/// Generated ids are `<uuid>.pdf`; anything else never names a stored file
fn is_valid_file_id(file_id: &str) -> bool {
    file_id
        .strip_suffix(&format!(".{}", ATTACHMENT_EXTENSION))
        .map(|stem| Uuid::parse_str(stem).is_ok())
        .unwrap_or(false)
}

fn display_name(original_name: &str) -> String {
    let base = Path::new(original_name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");
    let name = sanitize_string(base);
    if name.is_empty() {
        format!("attachment.{}", ATTACHMENT_EXTENSION)
    } else {
        name
    }
}

fn is_pdf(name: &str, content_type: Option<&str>, bytes: &[u8]) -> bool {
    let declared = content_type
        .map(|ct| ct.eq_ignore_ascii_case(ATTACHMENT_CONTENT_TYPE))
        .unwrap_or(false)
        || Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case(ATTACHMENT_EXTENSION))
            .unwrap_or(false);

    declared && bytes.starts_with(PDF_MAGIC)
}
