//! Report assembly.

use chrono::{DateTime, Utc};
use tracing::debug;

use super::{
    battlefield_stats, category_stats, deck_stats, matchup_stats, most_played_decks,
    scalar_totals, trend_data, AnalyticsSettings,
};
use crate::models::{AnalyticsReport, MatchRecord, Project, ProjectId};

/// Build the cross-project report for one TCG.
///
/// `records` and `projects` must already be scoped to that TCG. Each list is
/// computed independently from the same inputs.
pub fn compute_global_report(
    records: &[MatchRecord],
    projects: &[Project],
    settings: &AnalyticsSettings,
    now: DateTime<Utc>,
) -> AnalyticsReport {
    let totals = scalar_totals(records, projects);

    let report = AnalyticsReport {
        total_games: totals.total_games,
        total_projects: totals.total_projects,
        total_users: totals.total_users,
        deck_stats: deck_stats(records, settings.min_sample),
        matchup_stats: matchup_stats(records, settings.min_sample),
        battlefield_stats: battlefield_stats(records, settings.min_sample),
        category_stats: category_stats(records, settings.min_sample),
        trend_data: trend_data(records, settings.trend_window_days, now),
        most_played_decks: most_played_decks(records, settings.most_played_limit),
    };

    debug!(
        games = report.total_games,
        decks = report.deck_stats.len(),
        matchups = report.matchup_stats.len(),
        battlefields = report.battlefield_stats.len(),
        categories = report.category_stats.len(),
        trend_points = report.trend_data.len(),
        "Computed analytics report"
    );

    report
}

/// [`compute_global_report`] against the current time.
pub fn compute_global_report_now(
    records: &[MatchRecord],
    projects: &[Project],
    settings: &AnalyticsSettings,
) -> AnalyticsReport {
    compute_global_report(records, projects, settings, Utc::now())
}

/// Same report restricted to a single project's records and owners.
pub fn compute_project_report(
    project_id: &ProjectId,
    records: &[MatchRecord],
    projects: &[Project],
    settings: &AnalyticsSettings,
    now: DateTime<Utc>,
) -> AnalyticsReport {
    let records: Vec<MatchRecord> = records
        .iter()
        .filter(|r| &r.owner_project_id == project_id)
        .cloned()
        .collect();
    let projects: Vec<Project> = projects
        .iter()
        .filter(|p| &p.id == project_id)
        .cloned()
        .collect();

    compute_global_report(&records, &projects, settings, now)
}
