//! Dashboard statistics over collected submissions

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::models::{SurveySubmission, TechCategory};

/// Per-technology counts for one category
pub type TechCounts = BTreeMap<String, usize>;

/// One row of the dashboard bar chart
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartRow {
    pub tech: String,
    pub frontend: usize,
    pub backend: usize,
    pub database: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_submissions: usize,
    pub frontend: TechCounts,
    pub backend: TechCounts,
    pub database: TechCounts,
    pub hosting: TechCounts,
    pub most_selected_frontend: String,
    pub most_selected_backend: String,
    pub most_selected_database: String,
    pub chart: Vec<ChartRow>,
}

impl DashboardStats {
    pub fn compute(submissions: &[SurveySubmission]) -> Self {
        let frontend = count(submissions, TechCategory::Frontend);
        let backend = count(submissions, TechCategory::Backend);
        let database = count(submissions, TechCategory::Database);
        let hosting = count(submissions, TechCategory::Hosting);

        let techs: BTreeSet<&String> = frontend
            .keys()
            .chain(backend.keys())
            .chain(database.keys())
            .collect();
        let chart = techs
            .into_iter()
            .map(|tech| ChartRow {
                tech: tech.clone(),
                frontend: frontend.get(tech).copied().unwrap_or(0),
                backend: backend.get(tech).copied().unwrap_or(0),
                database: database.get(tech).copied().unwrap_or(0),
            })
            .collect();

        Self {
            total_submissions: submissions.len(),
            most_selected_frontend: most_selected(&frontend),
            most_selected_backend: most_selected(&backend),
            most_selected_database: most_selected(&database),
            frontend,
            backend,
            database,
            hosting,
            chart,
        }
    }
}

fn count(submissions: &[SurveySubmission], category: TechCategory) -> TechCounts {
    let mut counts = TechCounts::new();
    for choice in submissions.iter().filter_map(|s| s.preference(category)) {
        let value = choice.value();
        if !value.is_empty() {
            *counts.entry(value.to_string()).or_default() += 1;
        }
    }
    counts
}

/// Highest count wins; ties go to the alphabetically first name
fn most_selected(counts: &TechCounts) -> String {
    counts
        .iter()
        .fold(None::<(&String, usize)>, |best, (tech, &n)| match best {
            Some((_, best_n)) if best_n >= n => best,
            _ => Some((tech, n)),
        })
        .map(|(tech, _)| tech.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::models::{Role, TechChoice};

    fn known(v: &str) -> Option<TechChoice> {
        Some(TechChoice::Known(v.to_string()))
    }

    fn submission(
        role: Role,
        frontend: Option<TechChoice>,
        backend: Option<TechChoice>,
        database: Option<TechChoice>,
    ) -> SurveySubmission {
        SurveySubmission {
            id: Uuid::new_v4(),
            name: None,
            email: None,
            role,
            preferred_frontend: frontend,
            preferred_backend: backend,
            preferred_database: database,
            preferred_hosting: None,
            attached_file: None,
            submitted_at: Utc::now(),
        }
    }

    #[test]
    fn test_empty_stats() {
        let stats = DashboardStats::compute(&[]);
        assert_eq!(stats.total_submissions, 0);
        assert_eq!(stats.most_selected_frontend, "");
        assert!(stats.chart.is_empty());
    }

    #[test]
    fn test_counts_and_most_selected() {
        let all = vec![
            submission(Role::Frontend, known("React"), None, None),
            submission(Role::Frontend, known("Vue"), None, None),
            submission(Role::Fullstack, known("Vue"), known("Go"), known("PostgreSQL")),
            submission(
                Role::Backend,
                None,
                Some(TechChoice::Other("Elixir".to_string())),
                known("PostgreSQL"),
            ),
        ];
        let stats = DashboardStats::compute(&all);

        assert_eq!(stats.total_submissions, 4);
        assert_eq!(stats.frontend["Vue"], 2);
        assert_eq!(stats.backend["Other"], 1);
        assert_eq!(stats.most_selected_frontend, "Vue");
        assert_eq!(stats.most_selected_database, "PostgreSQL");
        // Go and Other tie at one each
        assert_eq!(stats.most_selected_backend, "Go");

        let techs: Vec<_> = stats.chart.iter().map(|r| r.tech.as_str()).collect();
        assert_eq!(techs, vec!["Go", "Other", "PostgreSQL", "React", "Vue"]);
        let postgres = stats.chart.iter().find(|r| r.tech == "PostgreSQL").unwrap();
        assert_eq!((postgres.frontend, postgres.backend, postgres.database), (0, 0, 2));
    }
}
