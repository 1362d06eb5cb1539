//! Form interaction controller
//!
//! The draft lives in a [`FormState`] that only changes through [`reduce`].
//! [`FormController`] drives the reducer and owns the sink call, gating it
//! so that a draft is never submitted twice concurrently.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{
    constants::messages,
    models::{FieldName, FileRef},
    sink::{Ack, SinkError, SubmissionSink},
};

use super::{
    draft::{Draft, FieldInput},
    validation::{required_fields, validate, FieldErrors},
};

/// Lifecycle of the draft.
///
/// `Editing -> Validating -> Submitting -> {Accepted, Rejected}`. Both end
/// phases accept input again; the next edit returns the form to `Editing`
/// and a new submit may start straight from either of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormPhase {
    #[default]
    Editing,
    Validating,
    Submitting,
    Accepted,
    Rejected,
}

impl FormPhase {
    /// Phases from which an explicit submit may start
    fn can_submit(&self) -> bool {
        matches!(self, Self::Editing | Self::Accepted | Self::Rejected)
    }
}

/// Severity of a user-visible notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

/// Transient notice shown after a submission attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Events that move the form state
#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    SetField(FieldInput),
    AttachFile(FileRef),
    ClearFile,
    SubmitRequested,
    SubmitStarted,
    SubmitSucceeded,
    SubmitFailed,
}

/// Snapshot of the form as the user sees it
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub draft: Draft,
    pub touched: BTreeSet<FieldName>,
    pub required: BTreeSet<FieldName>,
    pub errors: FieldErrors,
    pub phase: FormPhase,
    pub notice: Option<Notice>,
}

impl Default for FormState {
    fn default() -> Self {
        let draft = Draft::default();
        Self {
            required: required_fields(draft.role()),
            errors: validate(&draft),
            draft,
            touched: BTreeSet::new(),
            phase: FormPhase::Editing,
            notice: None,
        }
    }
}

impl FormState {
    /// Errors for fields the user has touched
    pub fn visible_errors(&self) -> FieldErrors {
        self.errors
            .iter()
            .filter(|(field, _)| self.touched.contains(field))
            .map(|(field, message)| (*field, message.clone()))
            .collect()
    }

    /// Whether a preference field is shown for the current role
    pub fn is_visible(&self, field: FieldName) -> bool {
        field.category().is_none() || self.required.contains(&field)
    }

    pub fn is_input_enabled(&self) -> bool {
        self.phase != FormPhase::Submitting
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Pure transition function of the form.
pub fn reduce(mut state: FormState, action: FormAction) -> FormState {
    match action {
        FormAction::SetField(input) => {
            if state.phase == FormPhase::Submitting {
                return state;
            }
            state.phase = FormPhase::Editing;
            let field = input.field;
            let role_changed = field == FieldName::Role && input.value != state.draft.role;
            state.draft.apply(input);
            state.touched.insert(field);
            if role_changed {
                state.required = required_fields(state.draft.role());
            }
            state.errors = validate(&state.draft);
        }
        FormAction::AttachFile(file) => {
            if state.phase == FormPhase::Submitting {
                return state;
            }
            state.phase = FormPhase::Editing;
            state.draft.attached_file = Some(file);
            state.touched.insert(FieldName::AttachedFile);
        }
        FormAction::ClearFile => {
            if state.phase == FormPhase::Submitting {
                return state;
            }
            state.phase = FormPhase::Editing;
            state.draft.attached_file = None;
        }
        FormAction::SubmitRequested => {
            if !state.phase.can_submit() {
                return state;
            }
            state.touched.extend(FieldName::ALL);
            state.required = required_fields(state.draft.role());
            state.errors = validate(&state.draft);
            state.notice = None;
            state.phase = if state.errors.is_empty() {
                FormPhase::Validating
            } else {
                FormPhase::Editing
            };
        }
        FormAction::SubmitStarted => {
            if state.phase == FormPhase::Validating {
                state.phase = FormPhase::Submitting;
            }
        }
        FormAction::SubmitSucceeded => {
            state = FormState {
                notice: Some(Notice {
                    kind: NoticeKind::Success,
                    message: messages::SUBMIT_SUCCESS.to_string(),
                }),
                phase: FormPhase::Accepted,
                ..FormState::default()
            };
        }
        FormAction::SubmitFailed => {
            state.phase = FormPhase::Rejected;
            state.notice = Some(Notice {
                kind: NoticeKind::Error,
                message: messages::SUBMIT_FAILURE.to_string(),
            });
        }
    }
    state
}

/// Result of an explicit submit
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The sink recorded the submission and the draft was reset
    Accepted(Ack),
    /// Validation failed, nothing was sent
    Invalid(FieldErrors),
    /// The sink failed, the draft is preserved for a retry
    Rejected(SinkError),
    /// Another submit for this draft is still in flight
    Busy,
}

/// Releases the busy flag when dropped
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Drives one draft from editing to the sink
pub struct FormController<S> {
    state: Mutex<FormState>,
    busy: AtomicBool,
    sink: S,
}

impl<S: SubmissionSink> FormController<S> {
    pub fn new(sink: S) -> Self {
        Self {
            state: Mutex::new(FormState::default()),
            busy: AtomicBool::new(false),
            sink,
        }
    }

    /// Apply an action and return the resulting state
    pub fn dispatch(&self, action: FormAction) -> FormState {
        let mut guard = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let current = std::mem::take(&mut *guard);
        *guard = reduce(current, action);
        guard.clone()
    }

    pub fn set_field(&self, input: FieldInput) -> FormState {
        self.dispatch(FormAction::SetField(input))
    }

    pub fn attach_file(&self, file: FileRef) -> FormState {
        self.dispatch(FormAction::AttachFile(file))
    }

    pub fn clear_file(&self) -> FormState {
        self.dispatch(FormAction::ClearFile)
    }

    pub fn state(&self) -> FormState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Validate the draft and hand it to the sink.
    ///
    /// Only one call per controller reaches the sink at a time; overlapping
    /// calls return [`SubmitOutcome::Busy`] immediately.
    pub async fn submit(&self) -> SubmitOutcome {
        let Some(_guard) = BusyGuard::acquire(&self.busy) else {
            debug!("Submit ignored: a submission is already in flight");
            return SubmitOutcome::Busy;
        };

        let state = self.dispatch(FormAction::SubmitRequested);
        if !state.errors.is_empty() {
            debug!(errors = state.errors.len(), "Submit blocked by validation errors");
            return SubmitOutcome::Invalid(state.errors);
        }

        let Some(submission) = state.draft.to_submission() else {
            // A valid draft always carries a role
            self.dispatch(FormAction::SubmitFailed);
            return SubmitOutcome::Invalid(state.errors);
        };

        self.dispatch(FormAction::SubmitStarted);

        match self.sink.submit(submission).await {
            Ok(ack) => {
                info!(submission_id = %ack.id, "Survey submission accepted");
                self.dispatch(FormAction::SubmitSucceeded);
                SubmitOutcome::Accepted(ack)
            }
            Err(e) => {
                warn!(error = %e, "Survey submission rejected by sink");
                self.dispatch(FormAction::SubmitFailed);
                SubmitOutcome::Rejected(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::Utc;
    use tokio::sync::Notify;
    use uuid::Uuid;

    use super::*;
    use crate::models::NewSubmission;

    /// Sink that records calls and can be told to fail
    #[derive(Default)]
    struct RecordingSink {
        appends: Mutex<Vec<NewSubmission>>,
        fail: AtomicBool,
    }

    #[async_trait]
    impl SubmissionSink for RecordingSink {
        async fn submit(&self, submission: NewSubmission) -> Result<Ack, SinkError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(SinkError::Unavailable("collector offline".to_string()));
            }
            self.appends.lock().unwrap().push(submission);
            Ok(Ack {
                id: Uuid::new_v4(),
                submitted_at: Utc::now(),
            })
        }
    }

    /// Sink that blocks until released, to observe the in-flight window
    #[derive(Default)]
    struct GatedSink {
        entered: Notify,
        release: Notify,
        appends: AtomicUsize,
    }

    #[async_trait]
    impl SubmissionSink for GatedSink {
        async fn submit(&self, _submission: NewSubmission) -> Result<Ack, SinkError> {
            self.entered.notify_one();
            self.release.notified().await;
            self.appends.fetch_add(1, Ordering::SeqCst);
            Ok(Ack {
                id: Uuid::new_v4(),
                submitted_at: Utc::now(),
            })
        }
    }

    fn fill_frontend<S: SubmissionSink>(controller: &FormController<S>) {
        controller.set_field(FieldInput::new(FieldName::Role, "frontend"));
        controller.set_field(FieldInput::new(FieldName::PreferredFrontend, "React"));
        controller.set_field(FieldInput::new(FieldName::PreferredHosting, "Vercel"));
    }

    #[test]
    fn test_errors_only_visible_once_touched() {
        let state = reduce(
            FormState::default(),
            FormAction::SetField(FieldInput::new(FieldName::Role, "fullstack")),
        );
        assert_eq!(state.errors.len(), 4);
        assert!(state.visible_errors().is_empty());

        let state = reduce(
            state,
            FormAction::SetField(FieldInput::new(FieldName::PreferredFrontend, "")),
        );
        assert_eq!(
            state.visible_errors().keys().copied().collect::<Vec<_>>(),
            vec![FieldName::PreferredFrontend]
        );
    }

    #[test]
    fn test_role_change_hides_fields_and_their_errors() {
        let mut state = FormState::default();
        for input in [
            FieldInput::new(FieldName::Role, "fullstack"),
            FieldInput::new(FieldName::PreferredBackend, "Go"),
            FieldInput::new(FieldName::PreferredFrontend, "Vue"),
            FieldInput::new(FieldName::PreferredHosting, "Azure"),
        ] {
            state = reduce(state, FormAction::SetField(input));
        }
        assert!(state.is_visible(FieldName::PreferredBackend));
        assert!(state.errors.contains_key(&FieldName::PreferredDatabase));

        let state = reduce(
            state,
            FormAction::SetField(FieldInput::new(FieldName::Role, "frontend")),
        );
        assert!(!state.is_visible(FieldName::PreferredBackend));
        assert!(!state.is_visible(FieldName::PreferredDatabase));
        assert_eq!(state.draft.preferred_backend, "Go");
        assert!(state.errors.is_empty());
    }

    #[test]
    fn test_submit_requested_touches_everything() {
        let state = reduce(FormState::default(), FormAction::SubmitRequested);
        assert_eq!(state.phase, FormPhase::Editing);
        assert_eq!(state.touched.len(), FieldName::ALL.len());
        assert!(state.visible_errors().contains_key(&FieldName::Role));
    }

    #[test]
    fn test_submitting_ignores_edits() {
        let mut state = FormState::default();
        state = reduce(state, FormAction::SetField(FieldInput::new(FieldName::Role, "backend")));
        state = reduce(state, FormAction::SetField(FieldInput::new(FieldName::PreferredBackend, "Go")));
        state = reduce(
            state,
            FormAction::SetField(FieldInput::new(FieldName::PreferredDatabase, "MongoDB")),
        );
        state = reduce(state, FormAction::SubmitRequested);
        assert_eq!(state.phase, FormPhase::Validating);
        state = reduce(state, FormAction::SubmitStarted);
        assert!(!state.is_input_enabled());

        let frozen = reduce(
            state.clone(),
            FormAction::SetField(FieldInput::new(FieldName::Name, "late edit")),
        );
        assert_eq!(frozen, state);
    }

    #[test]
    fn test_end_phases_return_to_editing_on_input() {
        let rejected = FormState {
            phase: FormPhase::Rejected,
            ..FormState::default()
        };
        assert!(rejected.is_input_enabled());
        let state = reduce(
            rejected,
            FormAction::SetField(FieldInput::new(FieldName::Name, "Dana")),
        );
        assert_eq!(state.phase, FormPhase::Editing);

        let accepted = reduce(FormState::default(), FormAction::SubmitSucceeded);
        assert_eq!(accepted.phase, FormPhase::Accepted);
        let state = reduce(accepted, FormAction::ClearFile);
        assert_eq!(state.phase, FormPhase::Editing);
    }

    #[test]
    fn test_submit_may_restart_from_rejected() {
        let mut state = FormState::default();
        state = reduce(state, FormAction::SetField(FieldInput::new(FieldName::Role, "backend")));
        state = reduce(state, FormAction::SetField(FieldInput::new(FieldName::PreferredBackend, "Go")));
        state = reduce(
            state,
            FormAction::SetField(FieldInput::new(FieldName::PreferredDatabase, "MongoDB")),
        );
        state = reduce(state, FormAction::SubmitRequested);
        state = reduce(state, FormAction::SubmitStarted);
        state = reduce(state, FormAction::SubmitFailed);
        assert_eq!(state.phase, FormPhase::Rejected);

        state = reduce(state, FormAction::SubmitRequested);
        assert_eq!(state.phase, FormPhase::Validating);
    }

    #[tokio::test]
    async fn test_submit_success_resets_draft() {
        let sink = Arc::new(RecordingSink::default());
        let controller = FormController::new(sink.clone());
        fill_frontend(&controller);
        controller.attach_file(FileRef {
            id: "abc.pdf".to_string(),
            name: "cv.pdf".to_string(),
        });

        let outcome = controller.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Accepted(_)));

        let state = controller.state();
        assert_eq!(state.draft, Draft::default());
        assert!(state.draft.attached_file.is_none());
        assert_eq!(state.phase, FormPhase::Accepted);
        assert!(state.is_input_enabled());
        assert_eq!(state.notice.map(|n| n.kind), Some(NoticeKind::Success));

        let appends = sink.appends.lock().unwrap();
        assert_eq!(appends.len(), 1);
        assert_eq!(appends[0].attached_file.as_ref().map(|f| f.name.as_str()), Some("cv.pdf"));
    }

    #[tokio::test]
    async fn test_submit_failure_preserves_draft() {
        let sink = Arc::new(RecordingSink::default());
        sink.fail.store(true, Ordering::SeqCst);
        let controller = FormController::new(sink.clone());
        fill_frontend(&controller);
        let before = controller.state().draft;

        let outcome = controller.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Rejected(SinkError::Unavailable(_))));

        let state = controller.state();
        assert_eq!(state.draft, before);
        assert_eq!(state.phase, FormPhase::Rejected);
        assert!(state.is_input_enabled());
        assert!(!controller.is_busy());
        let notice = state.notice.expect("failure notice");
        assert_eq!(notice.kind, NoticeKind::Error);
        assert_eq!(notice.message, messages::SUBMIT_FAILURE);

        sink.fail.store(false, Ordering::SeqCst);
        assert!(matches!(controller.submit().await, SubmitOutcome::Accepted(_)));
    }

    #[tokio::test]
    async fn test_invalid_draft_never_reaches_sink() {
        let sink = Arc::new(RecordingSink::default());
        let controller = FormController::new(sink.clone());
        controller.set_field(FieldInput::new(FieldName::Role, "fullstack"));
        controller.set_field(FieldInput::new(FieldName::PreferredFrontend, "Angular"));

        match controller.submit().await {
            SubmitOutcome::Invalid(errors) => {
                assert_eq!(
                    errors.keys().copied().collect::<BTreeSet<_>>(),
                    BTreeSet::from([
                        FieldName::PreferredBackend,
                        FieldName::PreferredDatabase,
                        FieldName::PreferredHosting,
                    ])
                );
            }
            other => panic!("expected validation failure, got {:?}", other),
        }
        assert!(sink.appends.lock().unwrap().is_empty());
        assert_eq!(controller.state().phase, FormPhase::Editing);
    }

    #[tokio::test]
    async fn test_double_submit_appends_once() {
        let sink = Arc::new(GatedSink::default());
        let controller = Arc::new(FormController::new(sink.clone()));
        fill_frontend(controller.as_ref());

        let first = tokio::spawn({
            let controller = controller.clone();
            async move { controller.submit().await }
        });

        sink.entered.notified().await;
        assert_eq!(controller.state().phase, FormPhase::Submitting);
        assert!(!controller.state().is_input_enabled());
        assert_eq!(controller.submit().await, SubmitOutcome::Busy);

        sink.release.notify_one();
        let outcome = first.await.unwrap();
        assert!(matches!(outcome, SubmitOutcome::Accepted(_)));
        assert_eq!(sink.appends.load(Ordering::SeqCst), 1);
        assert!(!controller.is_busy());
    }
}
