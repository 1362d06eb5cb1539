//! In-progress survey draft

use serde::{Deserialize, Serialize};

use crate::models::{FieldName, FileRef, NewSubmission, Role, TechCategory, TechChoice};

use super::validation::required_fields;

/// Raw form values as the user enters them.
///
/// Preference fields keep the main value and its `*Other` companion side by
/// side until the draft is promoted into a [`NewSubmission`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Draft {
    pub name: String,
    pub email: String,
    pub role: String,
    pub preferred_frontend: String,
    pub preferred_frontend_other: String,
    pub preferred_backend: String,
    pub preferred_backend_other: String,
    pub preferred_database: String,
    pub preferred_database_other: String,
    pub preferred_hosting: String,
    pub preferred_hosting_other: String,
    #[serde(skip)]
    pub attached_file: Option<FileRef>,
}

/// A single edit to a draft field, addressed by its form part name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInput {
    pub field: FieldName,
    /// True when the value targets the `*Other` companion of a preference
    pub companion: bool,
    pub value: String,
}

impl FieldInput {
    pub fn new(field: FieldName, value: impl Into<String>) -> Self {
        Self {
            field,
            companion: false,
            value: value.into(),
        }
    }

    pub fn other(field: FieldName, value: impl Into<String>) -> Self {
        Self {
            field,
            companion: true,
            value: value.into(),
        }
    }

    /// Resolve a form part name such as `preferredHostingOther`
    pub fn from_part(part: &str, value: impl Into<String>) -> Option<Self> {
        if let Some(field) = FieldName::parse(part) {
            if field == FieldName::AttachedFile {
                return None;
            }
            return Some(Self::new(field, value));
        }
        let main = part.strip_suffix("Other")?;
        let field = FieldName::parse(main)?;
        field.category()?;
        Some(Self::other(field, value))
    }
}

impl Draft {
    /// Parsed role, `None` when empty or unrecognised
    pub fn role(&self) -> Option<Role> {
        Role::parse(self.role.trim())
    }

    /// Current text of a field
    pub fn value(&self, field: FieldName) -> &str {
        match field {
            FieldName::Name => &self.name,
            FieldName::Email => &self.email,
            FieldName::Role => &self.role,
            FieldName::PreferredFrontend => &self.preferred_frontend,
            FieldName::PreferredBackend => &self.preferred_backend,
            FieldName::PreferredDatabase => &self.preferred_database,
            FieldName::PreferredHosting => &self.preferred_hosting,
            FieldName::AttachedFile => self
                .attached_file
                .as_ref()
                .map(|f| f.name.as_str())
                .unwrap_or(""),
        }
    }

    /// Apply a field edit. Edits to the attachment slot are ignored here,
    /// attachments go through [`Draft::attached_file`].
    pub fn apply(&mut self, input: FieldInput) {
        let FieldInput {
            field,
            companion,
            value,
        } = input;

        let slot = match (field, companion) {
            (FieldName::Name, false) => &mut self.name,
            (FieldName::Email, false) => &mut self.email,
            (FieldName::Role, false) => &mut self.role,
            (FieldName::PreferredFrontend, false) => &mut self.preferred_frontend,
            (FieldName::PreferredFrontend, true) => &mut self.preferred_frontend_other,
            (FieldName::PreferredBackend, false) => &mut self.preferred_backend,
            (FieldName::PreferredBackend, true) => &mut self.preferred_backend_other,
            (FieldName::PreferredDatabase, false) => &mut self.preferred_database,
            (FieldName::PreferredDatabase, true) => &mut self.preferred_database_other,
            (FieldName::PreferredHosting, false) => &mut self.preferred_hosting,
            (FieldName::PreferredHosting, true) => &mut self.preferred_hosting_other,
            _ => return,
        };
        *slot = value;
    }

    /// Preference of a category as a tagged choice
    pub fn choice(&self, category: TechCategory) -> Option<TechChoice> {
        let (value, other) = match category {
            TechCategory::Frontend => (&self.preferred_frontend, &self.preferred_frontend_other),
            TechCategory::Backend => (&self.preferred_backend, &self.preferred_backend_other),
            TechCategory::Database => (&self.preferred_database, &self.preferred_database_other),
            TechCategory::Hosting => (&self.preferred_hosting, &self.preferred_hosting_other),
        };
        TechChoice::from_parts(value, other)
    }

    /// Promote the draft into a submission.
    ///
    /// Returns `None` without a valid role. Preferences hidden by the role are
    /// dropped even if the draft still holds content for them. Callers are
    /// expected to have validated the draft first.
    pub fn to_submission(&self) -> Option<NewSubmission> {
        let role = self.role()?;
        let required = required_fields(Some(role));
        let visible = |category: TechCategory| {
            if required.contains(&category.field()) {
                self.choice(category)
            } else {
                None
            }
        };

        Some(NewSubmission {
            name: non_empty(&self.name),
            email: non_empty(&self.email),
            role,
            preferred_frontend: visible(TechCategory::Frontend),
            preferred_backend: visible(TechCategory::Backend),
            preferred_database: visible(TechCategory::Database),
            preferred_hosting: visible(TechCategory::Hosting),
            attached_file: self.attached_file.clone(),
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_input_from_part() {
        assert_eq!(
            FieldInput::from_part("preferredHostingOther", "Fly.io"),
            Some(FieldInput::other(FieldName::PreferredHosting, "Fly.io"))
        );
        assert_eq!(
            FieldInput::from_part("role", "backend"),
            Some(FieldInput::new(FieldName::Role, "backend"))
        );
        assert_eq!(FieldInput::from_part("emailOther", "x"), None);
        assert_eq!(FieldInput::from_part("attachedFile", "x"), None);
        assert_eq!(FieldInput::from_part("unknown", "x"), None);
    }

    #[test]
    fn test_to_submission_drops_hidden_preferences() {
        let mut draft = Draft::default();
        draft.apply(FieldInput::new(FieldName::Role, "frontend"));
        draft.apply(FieldInput::new(FieldName::PreferredFrontend, "Other"));
        draft.apply(FieldInput::other(FieldName::PreferredFrontend, "Svelte"));
        draft.apply(FieldInput::new(FieldName::PreferredHosting, "Vercel"));
        draft.apply(FieldInput::new(FieldName::PreferredBackend, "Go"));
        draft.apply(FieldInput::new(FieldName::Name, "  "));

        let submission = draft.to_submission().expect("role is set");
        assert_eq!(submission.role, Role::Frontend);
        assert_eq!(
            submission.preferred_frontend,
            Some(TechChoice::Other("Svelte".to_string()))
        );
        assert_eq!(
            submission.preferred_hosting,
            Some(TechChoice::Known("Vercel".to_string()))
        );
        assert_eq!(submission.preferred_backend, None);
        assert_eq!(submission.name, None);
    }

    #[test]
    fn test_to_submission_requires_role() {
        let draft = Draft {
            role: "designer".to_string(),
            ..Default::default()
        };
        assert!(draft.to_submission().is_none());
    }

    #[test]
    fn test_companion_without_other_is_dropped() {
        let draft = Draft {
            role: "backend".to_string(),
            preferred_backend: "Go".to_string(),
            preferred_backend_other: "Rust".to_string(),
            preferred_database: "PostgreSQL".to_string(),
            ..Default::default()
        };
        let submission = draft.to_submission().unwrap();
        assert_eq!(
            submission.preferred_backend,
            Some(TechChoice::Known("Go".to_string()))
        );
    }
}
