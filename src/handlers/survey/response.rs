//! Survey response DTOs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    constants::OTHER_CHOICE,
    models::{Role, TechCategory},
};

/// Accepted survey response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveySubmittedResponse {
    pub id: Uuid,
    pub message: String,
    pub submitted_at: DateTime<Utc>,
}

/// Options the survey form offers
#[derive(Debug, Serialize)]
pub struct SurveyOptionsResponse {
    pub roles: Vec<Role>,
    pub frontend: Vec<&'static str>,
    pub backend: Vec<&'static str>,
    pub database: Vec<&'static str>,
    pub hosting: Vec<&'static str>,
}

impl SurveyOptionsResponse {
    pub fn current() -> Self {
        let options = |category: TechCategory| {
            let mut list = category.known_options().to_vec();
            list.push(OTHER_CHOICE);
            list
        };

        Self {
            roles: Role::ALL.to_vec(),
            frontend: options(TechCategory::Frontend),
            backend: options(TechCategory::Backend),
            database: options(TechCategory::Database),
            hosting: options(TechCategory::Hosting),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_end_with_other() {
        let options = SurveyOptionsResponse::current();
        assert_eq!(options.frontend, vec!["React", "Vue", "Angular", "Other"]);
        assert_eq!(options.hosting.last(), Some(&"Other"));
        assert_eq!(options.roles.len(), 3);
    }
}
