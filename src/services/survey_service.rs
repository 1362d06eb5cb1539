//! Survey intake service

use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    constants::MAX_TEXT_FIELD_LENGTH,
    error::{AppError, AppResult},
    handlers::survey::request::SurveyFormData,
    services::FileService,
    models::FieldName,
    sink::{Ack, SubmissionSink},
    survey::{validate, FieldInput, FormController, SubmitOutcome},
    utils::validation::truncate_chars,
};

/// Survey service for the public intake
pub struct SurveyService;

impl SurveyService {
    /// Run one posted form through a fresh form controller.
    ///
    /// Each text part becomes a field edit. The draft and the optional PDF
    /// are checked together, so a bad upload is reported as an
    /// `attachedFile` field error next to any other field errors and nothing
    /// is written. Only then is the PDF stored, attached and the draft
    /// submitted. A stored attachment is removed again when the submission
    /// does not go through.
    pub async fn submit(
        sink: Arc<dyn SubmissionSink>,
        files: &FileService,
        form: SurveyFormData,
    ) -> AppResult<Ack> {
        let controller = FormController::new(sink);

        for (part, value) in form.fields {
            match FieldInput::from_part(&part, truncate_chars(&value, MAX_TEXT_FIELD_LENGTH)) {
                Some(input) => {
                    controller.set_field(input);
                }
                None => debug!(part = %part, "Ignoring unknown survey form part"),
            }
        }

        let mut errors = validate(&controller.state().draft);
        if let Some(upload) = &form.file {
            let checked = FileService::check_upload(
                &upload.file_name,
                upload.content_type.as_deref(),
                &upload.bytes,
            );
            match checked {
                Ok(()) => {}
                Err(AppError::Validation(msg)) => {
                    errors.insert(FieldName::AttachedFile, msg);
                }
                Err(e) => return Err(e),
            }
        }
        if !errors.is_empty() {
            debug!(errors = errors.len(), "Survey form rejected before storing the attachment");
            return Err(AppError::InvalidForm(errors));
        }

        let attached = match form.file {
            Some(upload) => {
                let file = files
                    .save(&upload.file_name, upload.content_type.as_deref(), &upload.bytes)
                    .await?;
                controller.attach_file(file.clone());
                Some(file)
            }
            None => None,
        };

        let result = match controller.submit().await {
            SubmitOutcome::Accepted(ack) => return Ok(ack),
            SubmitOutcome::Invalid(errors) => Err(AppError::InvalidForm(errors)),
            SubmitOutcome::Rejected(e) => Err(e.into()),
            SubmitOutcome::Busy => Err(AppError::Unavailable(
                "A submission is already in progress".to_string(),
            )),
        };

        if let Some(file) = attached {
            if let Err(e) = files.remove(&file.id).await {
                warn!(file_id = %file.id, error = %e, "Failed to clean up attachment");
            }
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::store::{MemoryStore, SubmissionStore},
        handlers::survey::request::UploadedFile,
        models::{FieldName, Role, TechChoice},
        sink::StoreSink,
    };

    const PDF: &[u8] = b"%PDF-1.4\n%test\n";

    fn fields(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn setup() -> (Arc<MemoryStore>, Arc<dyn SubmissionSink>, tempfile::TempDir, FileService) {
        let store = Arc::new(MemoryStore::new());
        let sink: Arc<dyn SubmissionSink> = Arc::new(StoreSink::new(store.clone()));
        let dir = tempfile::tempdir().unwrap();
        let files = FileService::new(dir.path(), "http://localhost:8080");
        (store, sink, dir, files)
    }

    #[tokio::test]
    async fn test_valid_backend_form_is_stored() {
        let (store, sink, _dir, files) = setup();
        let form = SurveyFormData {
            fields: fields(&[
                ("name", "Bob"),
                ("email", "bob@example.com"),
                ("role", "backend"),
                ("preferredBackend", "Other"),
                ("preferredBackendOther", "Elixir"),
                ("preferredDatabase", "PostgreSQL"),
                ("preferredHosting", "AWS"),
                ("preferredFrontend", "React"),
                ("unexpected", "ignored"),
            ]),
            file: Some(UploadedFile {
                file_name: "cv.pdf".to_string(),
                content_type: Some("application/pdf".to_string()),
                bytes: PDF.to_vec(),
            }),
        };

        let ack = SurveyService::submit(sink, &files, form).await.unwrap();

        let stored = store.find(&ack.id).await.unwrap().unwrap();
        assert_eq!(stored.role, Role::Backend);
        assert_eq!(stored.preferred_backend, Some(TechChoice::Other("Elixir".to_string())));
        // Frontend is hidden for the backend role
        assert_eq!(stored.preferred_frontend, None);
        let file = stored.attached_file.unwrap();
        assert_eq!(file.name, "cv.pdf");
        assert_eq!(files.read(&file.id).await.unwrap(), PDF);
    }

    #[tokio::test]
    async fn test_invalid_form_reports_fields_and_skips_upload() {
        let (store, sink, dir, files) = setup();
        let form = SurveyFormData {
            fields: fields(&[("role", "fullstack"), ("email", "nope")]),
            file: Some(UploadedFile {
                file_name: "cv.pdf".to_string(),
                content_type: None,
                bytes: PDF.to_vec(),
            }),
        };

        let err = SurveyService::submit(sink, &files, form).await.unwrap_err();
        let AppError::InvalidForm(errors) = err else {
            panic!("expected field errors, got {:?}", err);
        };
        assert_eq!(errors[&FieldName::PreferredFrontend], "Frontend tech is required");
        assert_eq!(errors[&FieldName::Email], "Invalid email");
        assert!(store.is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_bad_upload_reported_with_field_errors() {
        let (store, sink, dir, files) = setup();
        let form = SurveyFormData {
            fields: fields(&[("name", "Eve"), ("email", "eve@example.com")]),
            file: Some(UploadedFile {
                file_name: "notes.txt".to_string(),
                content_type: Some("text/plain".to_string()),
                bytes: b"hello".to_vec(),
            }),
        };

        let err = SurveyService::submit(sink, &files, form).await.unwrap_err();
        let AppError::InvalidForm(errors) = err else {
            panic!("expected field errors, got {:?}", err);
        };
        assert_eq!(errors[&FieldName::Role], "Role is required");
        assert_eq!(errors[&FieldName::AttachedFile], "Only PDF attachments are accepted");
        assert!(store.is_empty());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_bad_upload_alone_blocks_valid_draft() {
        let (store, sink, _dir, files) = setup();
        let form = SurveyFormData {
            fields: fields(&[
                ("role", "backend"),
                ("preferredBackend", "Go"),
                ("preferredDatabase", "MongoDB"),
            ]),
            file: Some(UploadedFile {
                file_name: "cv.pdf".to_string(),
                content_type: Some("application/pdf".to_string()),
                bytes: Vec::new(),
            }),
        };

        let err = SurveyService::submit(sink, &files, form).await.unwrap_err();
        let AppError::InvalidForm(errors) = err else {
            panic!("expected field errors, got {:?}", err);
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[&FieldName::AttachedFile], "Attached file is empty");
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_missing_role() {
        let (_store, sink, _dir, files) = setup();
        let form = SurveyFormData {
            fields: Vec::new(),
            file: None,
        };

        let err = SurveyService::submit(sink, &files, form).await.unwrap_err();
        let AppError::InvalidForm(errors) = err else {
            panic!("expected field errors, got {:?}", err);
        };
        assert_eq!(errors[&FieldName::Role], "Role is required");
    }
}
