//! Conditional validation engine
//!
//! The selected role decides which preference fields are required. The
//! engine is pure: it never fails, it only reports field-scoped messages.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    constants::messages,
    models::{FieldName, Role},
    utils::validation::is_valid_email,
};

use super::draft::Draft;

/// Field-scoped validation messages. An empty map means the draft is valid.
pub type FieldErrors = BTreeMap<FieldName, String>;

/// Preference fields required by a role, plus the role selector itself.
pub fn required_fields(role: Option<Role>) -> BTreeSet<FieldName> {
    let mut fields = BTreeSet::from([FieldName::Role]);
    let preferences: &[FieldName] = match role {
        Some(Role::Frontend) => &[FieldName::PreferredFrontend, FieldName::PreferredHosting],
        Some(Role::Backend) => &[FieldName::PreferredBackend, FieldName::PreferredDatabase],
        Some(Role::Fullstack) => &[
            FieldName::PreferredFrontend,
            FieldName::PreferredHosting,
            FieldName::PreferredBackend,
            FieldName::PreferredDatabase,
        ],
        None => &[],
    };
    fields.extend(preferences.iter().copied());
    fields
}

/// Message shown when a required field is left empty
pub fn required_message(field: FieldName) -> &'static str {
    match field {
        FieldName::PreferredFrontend => messages::FRONTEND_REQUIRED,
        FieldName::PreferredBackend => messages::BACKEND_REQUIRED,
        FieldName::PreferredDatabase => messages::DATABASE_REQUIRED,
        FieldName::PreferredHosting => messages::HOSTING_REQUIRED,
        _ => messages::ROLE_REQUIRED,
    }
}

/// Validate a draft against the fields its role makes visible.
pub fn validate(draft: &Draft) -> FieldErrors {
    let mut errors = FieldErrors::new();

    let role_text = draft.role.trim();
    let role = draft.role();
    if role_text.is_empty() {
        errors.insert(FieldName::Role, messages::ROLE_REQUIRED.to_string());
    } else if role.is_none() {
        errors.insert(FieldName::Role, messages::ROLE_INVALID.to_string());
    }

    for field in required_fields(role) {
        if field == FieldName::Role {
            continue;
        }
        if draft.value(field).trim().is_empty() {
            errors.insert(field, required_message(field).to_string());
        }
    }

    let email = draft.email.trim();
    if !email.is_empty() && !is_valid_email(email) {
        errors.insert(FieldName::Email, messages::EMAIL_INVALID.to_string());
    }

    errors
}
