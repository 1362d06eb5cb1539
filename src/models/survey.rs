//! Survey submission model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::{tech_options, OTHER_CHOICE};

/// Developer role selected on the survey
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Frontend,
    Backend,
    Fullstack,
}

impl Role {
    /// All roles, in the order the form lists them
    pub const ALL: [Role; 3] = [Role::Frontend, Role::Fullstack, Role::Backend];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::Backend => "backend",
            Self::Fullstack => "fullstack",
        }
    }

    /// Parse a role from its wire name
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "frontend" => Some(Self::Frontend),
            "backend" => Some(Self::Backend),
            "fullstack" => Some(Self::Fullstack),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Technology category a preference belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TechCategory {
    Frontend,
    Backend,
    Database,
    Hosting,
}

impl TechCategory {
    pub const ALL: [TechCategory; 4] = [
        TechCategory::Frontend,
        TechCategory::Backend,
        TechCategory::Database,
        TechCategory::Hosting,
    ];

    /// Known options offered for this category, excluding the `Other` sentinel
    pub fn known_options(&self) -> &'static [&'static str] {
        match self {
            Self::Frontend => tech_options::FRONTEND,
            Self::Backend => tech_options::BACKEND,
            Self::Database => tech_options::DATABASE,
            Self::Hosting => tech_options::HOSTING,
        }
    }

    /// Form field carrying the preference for this category
    pub fn field(&self) -> FieldName {
        match self {
            Self::Frontend => FieldName::PreferredFrontend,
            Self::Backend => FieldName::PreferredBackend,
            Self::Database => FieldName::PreferredDatabase,
            Self::Hosting => FieldName::PreferredHosting,
        }
    }
}

/// A technology preference: either one of the listed options or free text
/// entered next to the `Other` choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum TechChoice {
    Known(String),
    Other(String),
}

impl TechChoice {
    /// Build a choice from the main field value and its `*Other` companion.
    ///
    /// Returns `None` when the main value is empty. The companion is only
    /// kept when the main value is the `Other` sentinel.
    pub fn from_parts(value: &str, other: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        if value == OTHER_CHOICE {
            Some(Self::Other(other.trim().to_string()))
        } else {
            Some(Self::Known(value.to_string()))
        }
    }

    /// Value of the main field as the form submits it
    pub fn value(&self) -> &str {
        match self {
            Self::Known(name) => name,
            Self::Other(_) => OTHER_CHOICE,
        }
    }

    /// Free text of the `Other` companion, if any
    pub fn other_text(&self) -> Option<&str> {
        match self {
            Self::Known(_) => None,
            Self::Other(text) => Some(text),
        }
    }

    /// Label used when showing the choice to an admin
    pub fn display(&self) -> String {
        match self {
            Self::Known(name) => name.clone(),
            Self::Other(text) if text.is_empty() => OTHER_CHOICE.to_string(),
            Self::Other(text) => format!("{} ({})", OTHER_CHOICE, text),
        }
    }
}

/// Form field identifiers, serialized with the names the form uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    Name,
    Email,
    Role,
    PreferredFrontend,
    PreferredBackend,
    PreferredDatabase,
    PreferredHosting,
    AttachedFile,
}

impl FieldName {
    /// Every field a user can touch on the form
    pub const ALL: [FieldName; 8] = [
        FieldName::Name,
        FieldName::Email,
        FieldName::Role,
        FieldName::PreferredFrontend,
        FieldName::PreferredBackend,
        FieldName::PreferredDatabase,
        FieldName::PreferredHosting,
        FieldName::AttachedFile,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Role => "role",
            Self::PreferredFrontend => "preferredFrontend",
            Self::PreferredBackend => "preferredBackend",
            Self::PreferredDatabase => "preferredDatabase",
            Self::PreferredHosting => "preferredHosting",
            Self::AttachedFile => "attachedFile",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == s)
    }

    /// Category of a preference field, `None` for the other fields
    pub fn category(&self) -> Option<TechCategory> {
        match self {
            Self::PreferredFrontend => Some(TechCategory::Frontend),
            Self::PreferredBackend => Some(TechCategory::Backend),
            Self::PreferredDatabase => Some(TechCategory::Database),
            Self::PreferredHosting => Some(TechCategory::Hosting),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to an uploaded attachment. Only the identity is kept, never the bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub id: String,
    pub name: String,
}

/// A survey submission accepted by the sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveySubmission {
    pub id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Role,
    pub preferred_frontend: Option<TechChoice>,
    pub preferred_backend: Option<TechChoice>,
    pub preferred_database: Option<TechChoice>,
    pub preferred_hosting: Option<TechChoice>,
    pub attached_file: Option<FileRef>,
    pub submitted_at: DateTime<Utc>,
}

impl SurveySubmission {
    /// Preference recorded for a category
    pub fn preference(&self, category: TechCategory) -> Option<&TechChoice> {
        match category {
            TechCategory::Frontend => self.preferred_frontend.as_ref(),
            TechCategory::Backend => self.preferred_backend.as_ref(),
            TechCategory::Database => self.preferred_database.as_ref(),
            TechCategory::Hosting => self.preferred_hosting.as_ref(),
        }
    }

    /// Iterate over all recorded preferences
    pub fn preferences(&self) -> impl Iterator<Item = (TechCategory, &TechChoice)> {
        TechCategory::ALL
            .into_iter()
            .filter_map(|c| self.preference(c).map(|p| (c, p)))
    }
}

/// A validated submission that the sink has not stamped yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Role,
    pub preferred_frontend: Option<TechChoice>,
    pub preferred_backend: Option<TechChoice>,
    pub preferred_database: Option<TechChoice>,
    pub preferred_hosting: Option<TechChoice>,
    pub attached_file: Option<FileRef>,
}

impl NewSubmission {
    /// Stamp identity and acceptance time
    pub fn accept(self, id: Uuid, submitted_at: DateTime<Utc>) -> SurveySubmission {
        SurveySubmission {
            id,
            name: self.name,
            email: self.email,
            role: self.role,
            preferred_frontend: self.preferred_frontend,
            preferred_backend: self.preferred_backend,
            preferred_database: self.preferred_database,
            preferred_hosting: self.preferred_hosting,
            attached_file: self.attached_file,
            submitted_at,
        }
    }
}
