//! Submission query and filter engine for the admin list

use serde::{Deserialize, Serialize};

use crate::{constants::SURVEY_PAGE_SIZE, models::SurveySubmission};

/// Admin list filters. Empty values match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmissionFilter {
    pub text_search: String,
    pub role: String,
    pub tech: String,
}

impl SubmissionFilter {
    /// All predicates must hold
    pub fn matches(&self, submission: &SurveySubmission) -> bool {
        self.matches_search(submission) && self.matches_role(submission) && self.matches_tech(submission)
    }

    fn matches_search(&self, submission: &SurveySubmission) -> bool {
        let needle = self.text_search.to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let contains = |field: &Option<String>| {
            field
                .as_deref()
                .map(|v| v.to_lowercase().contains(&needle))
                .unwrap_or(false)
        };
        contains(&submission.name) || contains(&submission.email)
    }

    fn matches_role(&self, submission: &SurveySubmission) -> bool {
        self.role.is_empty() || submission.role.as_str() == self.role
    }

    fn matches_tech(&self, submission: &SurveySubmission) -> bool {
        self.tech.is_empty()
            || submission
                .preferences()
                .any(|(_, choice)| choice.value() == self.tech)
    }
}

/// One page of filtered submissions
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryPage<T> {
    pub items: Vec<T>,
    /// Number of submissions matching the filter
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
    pub page_size: usize,
}

impl<T> QueryPage<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> QueryPage<U> {
        QueryPage {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            total_pages: self.total_pages,
            page_size: self.page_size,
        }
    }
}

/// Number of pages for `total` items; an empty result still has one page
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Clamp a 1-based page index into `[1, total_pages]`
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Filter and paginate with the default page size
pub fn query(
    all: &[SurveySubmission],
    filter: &SubmissionFilter,
    page: usize,
) -> QueryPage<SurveySubmission> {
    query_with_page_size(all, filter, page, SURVEY_PAGE_SIZE)
}

/// Filter and paginate, preserving input order
pub fn query_with_page_size(
    all: &[SurveySubmission],
    filter: &SubmissionFilter,
    page: usize,
    page_size: usize,
) -> QueryPage<SurveySubmission> {
    let page_size = page_size.max(1);
    let matching: Vec<&SurveySubmission> = all.iter().filter(|s| filter.matches(s)).collect();
    let total = matching.len();
    let total_pages = total_pages(total, page_size);
    let page = clamp_page(page, total_pages);

    let items = matching
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .cloned()
        .collect();

    QueryPage {
        items,
        total,
        page,
        total_pages,
        page_size,
    }
}

/// Admin list view state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub filter: SubmissionFilter,
    pub page: usize,
    pub selected: Option<uuid::Uuid>,
}

impl Default for ListView {
    fn default() -> Self {
        Self {
            filter: SubmissionFilter::default(),
            page: 1,
            selected: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListAction {
    SetSearch(String),
    SetRole(String),
    SetTech(String),
    NextPage,
    PrevPage,
    GoTo(usize),
    Select(uuid::Uuid),
    CloseDetails,
}

/// Pure transition of the list view. `total_pages` is the page count of the
/// current result set; any filter change sends the view back to page 1.
pub fn reduce_list(mut view: ListView, action: ListAction, total_pages: usize) -> ListView {
    match action {
        ListAction::SetSearch(text) => {
            view.filter.text_search = text;
            view.page = 1;
        }
        ListAction::SetRole(role) => {
            view.filter.role = role;
            view.page = 1;
        }
        ListAction::SetTech(tech) => {
            view.filter.tech = tech;
            view.page = 1;
        }
        ListAction::NextPage => view.page = clamp_page(view.page + 1, total_pages),
        ListAction::PrevPage => view.page = clamp_page(view.page.saturating_sub(1), total_pages),
        ListAction::GoTo(page) => view.page = clamp_page(page, total_pages),
        ListAction::Select(id) => view.selected = Some(id),
        ListAction::CloseDetails => view.selected = None,
    }
    view
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::models::{Role, TechChoice};

    fn submission(name: &str, email: &str, role: Role) -> SurveySubmission {
        SurveySubmission {
            id: Uuid::new_v4(),
            name: Some(name.to_string()).filter(|n| !n.is_empty()),
            email: Some(email.to_string()).filter(|e| !e.is_empty()),
            role,
            preferred_frontend: None,
            preferred_backend: None,
            preferred_database: None,
            preferred_hosting: None,
            attached_file: None,
            submitted_at: Utc::now(),
        }
    }

    fn twelve() -> Vec<SurveySubmission> {
        (1..=12)
            .map(|i| submission(&format!("user{}", i), "", Role::Frontend))
            .collect()
    }

    #[test]
    fn test_first_page_of_twelve() {
        let all = twelve();
        let page = query(&all, &SubmissionFilter::default(), 1);
        assert_eq!(page.total, 12);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 3);
        let names: Vec<_> = page.items.iter().map(|s| s.name.clone().unwrap()).collect();
        assert_eq!(names, vec!["user1", "user2", "user3", "user4", "user5"]);
    }

    #[test]
    fn test_page_beyond_last_clamps() {
        let all = twelve();
        let page = query(&all, &SubmissionFilter::default(), 5);
        assert_eq!(page.page, 3);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].name.as_deref(), Some("user11"));

        let page = query(&all, &SubmissionFilter::default(), 0);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn test_empty_result_is_page_one_of_one() {
        let page = query(&[], &SubmissionFilter::default(), 3);
        assert_eq!(page.total, 0);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());
    }

    #[test]
    fn test_text_search_is_case_insensitive_over_name_or_email() {
        let all = vec![
            submission("", "Alice@X.com", Role::Backend),
            submission("Bob", "bob@x.com", Role::Backend),
            submission("Malice", "", Role::Frontend),
        ];
        let filter = SubmissionFilter {
            text_search: "alice".to_string(),
            ..Default::default()
        };
        let page = query(&all, &filter, 1);
        assert_eq!(page.total, 2);
        assert_eq!(page.items[0].email.as_deref(), Some("Alice@X.com"));
        assert_eq!(page.items[1].name.as_deref(), Some("Malice"));
    }

    #[test]
    fn test_search_is_not_trimmed() {
        let all = vec![
            submission("Joanna", "", Role::Frontend),
            submission("Ann Lee", "", Role::Backend),
        ];

        let blank = SubmissionFilter {
            text_search: " ".to_string(),
            ..Default::default()
        };
        let page = query(&all, &blank, 1);
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name.as_deref(), Some("Ann Lee"));

        let padded = SubmissionFilter {
            text_search: "ann ".to_string(),
            ..Default::default()
        };
        let page = query(&all, &padded, 1);
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name.as_deref(), Some("Ann Lee"));
    }

    #[test]
    fn test_tech_matches_backend_or_hosting_only() {
        let mut go_backend = submission("go", "", Role::Backend);
        go_backend.preferred_backend = Some(TechChoice::Known("Go".to_string()));
        let mut azure_host = submission("azure", "", Role::Frontend);
        azure_host.preferred_hosting = Some(TechChoice::Known("Azure".to_string()));
        let all = vec![go_backend, azure_host];

        let by_backend = SubmissionFilter {
            tech: "Go".to_string(),
            ..Default::default()
        };
        let page = query(&all, &by_backend, 1);
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name.as_deref(), Some("go"));

        let by_hosting = SubmissionFilter {
            tech: "Azure".to_string(),
            ..Default::default()
        };
        let page = query(&all, &by_hosting, 1);
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name.as_deref(), Some("azure"));
    }

    #[test]
    fn test_filters_combine_with_and() {
        let mut react_front = submission("a", "", Role::Frontend);
        react_front.preferred_frontend = Some(TechChoice::Known("React".to_string()));
        let mut react_full = submission("b", "", Role::Fullstack);
        react_full.preferred_frontend = Some(TechChoice::Known("React".to_string()));
        let mut other_db = submission("c", "", Role::Backend);
        other_db.preferred_database = Some(TechChoice::Other("Neo4j".to_string()));
        let all = vec![react_front, react_full, other_db];

        let filter = SubmissionFilter {
            role: "fullstack".to_string(),
            tech: "React".to_string(),
            ..Default::default()
        };
        let page = query(&all, &filter, 1);
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name.as_deref(), Some("b"));

        let filter = SubmissionFilter {
            tech: "Other".to_string(),
            ..Default::default()
        };
        assert_eq!(query(&all, &filter, 1).items[0].name.as_deref(), Some("c"));
    }

    #[test]
    fn test_filter_change_resets_page() {
        let view = reduce_list(ListView::default(), ListAction::GoTo(3), 3);
        assert_eq!(view.page, 3);

        let view = reduce_list(view, ListAction::SetTech("Go".to_string()), 3);
        assert_eq!(view.page, 1);
        assert_eq!(view.filter.tech, "Go");
    }

    #[test]
    fn test_page_navigation_clamps() {
        let view = reduce_list(ListView::default(), ListAction::PrevPage, 2);
        assert_eq!(view.page, 1);
        let view = reduce_list(view, ListAction::NextPage, 2);
        let view = reduce_list(view, ListAction::NextPage, 2);
        assert_eq!(view.page, 2);

        let id = Uuid::new_v4();
        let view = reduce_list(view, ListAction::Select(id), 2);
        assert_eq!(view.selected, Some(id));
        assert_eq!(reduce_list(view, ListAction::CloseDetails, 2).selected, None);
    }
}
