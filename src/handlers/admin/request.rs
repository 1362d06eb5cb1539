//! Admin request DTOs

use serde::Deserialize;
use validator::Validate;

use crate::survey::SubmissionFilter;

/// Query parameters of the submission list
#[derive(Debug, Default, Deserialize, Validate)]
pub struct ListSubmissionsQuery {
    #[validate(length(max = 256))]
    pub search: Option<String>,

    #[validate(length(max = 32))]
    pub role: Option<String>,

    #[validate(length(max = 256))]
    pub tech: Option<String>,

    /// 1-based page, clamped to the available range
    pub page: Option<usize>,
}

impl ListSubmissionsQuery {
    pub fn filter(&self) -> SubmissionFilter {
        SubmissionFilter {
            text_search: self.search.clone().unwrap_or_default(),
            role: self.role.clone().unwrap_or_default(),
            tech: self.tech.clone().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_params_mean_no_filter() {
        let query = ListSubmissionsQuery::default();
        assert_eq!(query.filter(), SubmissionFilter::default());
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_overlong_search_is_rejected() {
        let query = ListSubmissionsQuery {
            search: Some("x".repeat(257)),
            ..Default::default()
        };
        assert!(query.validate().is_err());
    }
}
