//! Survey engine
//!
//! Everything that decides what a valid survey is and how collected
//! submissions are browsed, independent of HTTP and storage:
//!
//! - **draft**: raw form values and their promotion into a submission
//! - **validation**: role-driven required fields and field errors
//! - **form**: the form state machine and the busy-gated submit
//! - **query**: admin list filtering and pagination
//! - **stats**: dashboard counts and chart rows

pub mod draft;
pub mod form;
pub mod query;
pub mod stats;
pub mod validation;

pub use draft::{Draft, FieldInput};
pub use form::{FormAction, FormController, FormPhase, FormState, SubmitOutcome};
pub use query::{query, ListAction, ListView, QueryPage, SubmissionFilter};
pub use stats::DashboardStats;
pub use validation::{required_fields, validate, FieldErrors};
