//! Survey request DTOs

use axum::extract::Multipart;

use crate::error::{AppError, AppResult};

/// Name of the multipart part carrying the attachment
pub const FILE_PART: &str = "file";

/// Uploaded attachment as received
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// A posted survey form: text parts in arrival order plus the optional file
#[derive(Debug, Clone, Default)]
pub struct SurveyFormData {
    pub fields: Vec<(String, String)>,
    pub file: Option<UploadedFile>,
}

impl SurveyFormData {
    /// Drain a multipart body. An empty file part counts as no file.
    pub async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read multipart: {}", e)))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if name == FILE_PART {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read file: {}", e)))?;

                if !bytes.is_empty() {
                    form.file = Some(UploadedFile {
                        file_name,
                        content_type,
                        bytes: bytes.to_vec(),
                    });
                }
            } else {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read field {}: {}", name, e)))?;
                form.fields.push((name, value));
            }
        }

        Ok(form)
    }
}
