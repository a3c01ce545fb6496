//! Scalar totals.

use std::collections::HashSet;

use crate::models::{MatchRecord, Project};

/// Headline counts for a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScalarTotals {
    pub total_games: u32,
    pub total_projects: u32,
    pub total_users: u32,
}

/// Count records, distinct projects, and distinct owners across those projects.
pub fn scalar_totals(records: &[MatchRecord], projects: &[Project]) -> ScalarTotals {
    let project_ids: HashSet<&str> = projects.iter().map(|p| p.id.as_str()).collect();
    let user_ids: HashSet<&str> = projects
        .iter()
        .flat_map(|p| p.owner_user_ids.iter().map(|u| u.as_str()))
        .collect();

    ScalarTotals {
        total_games: records.len() as u32,
        total_projects: project_ids.len() as u32,
        total_users: user_ids.len() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::test_support::*;
    use crate::models::MatchResult;

    fn project(id: &str, owners: &[&str]) -> Project {
        Project::new(id.into(), "tcg".into(), id)
            .with_owners(owners.iter().map(|&o| o.into()).collect())
    }

    #[test]
    fn test_users_deduplicated_across_projects() {
        let projects = vec![
            project("p1", &["alice", "bob"]),
            project("p2", &["bob"]),
            project("p3", &["carol", "alice"]),
        ];
        let records = games(4, "A", "B", MatchResult::Win);

        let totals = scalar_totals(&records, &projects);
        assert_eq!(totals.total_games, 4);
        assert_eq!(totals.total_projects, 3);
        assert_eq!(totals.total_users, 3);
    }

    #[test]
    fn test_projects_without_records_still_count() {
        let totals = scalar_totals(&[], &[project("p1", &["alice"])]);
        assert_eq!(totals.total_games, 0);
        assert_eq!(totals.total_projects, 1);
        assert_eq!(totals.total_users, 1);
    }

    #[test]
    fn test_empty() {
        assert_eq!(scalar_totals(&[], &[]), ScalarTotals::default());
    }
}
