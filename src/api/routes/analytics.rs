use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;

use crate::api::state::AppState;
use crate::api::ApiError;
use crate::calculate::{compute_global_report, compute_project_report};
use crate::models::{AnalyticsReport, MatchRecord, Project, ProjectId};
use crate::storage::validate_tcg_id;

// ── Input Scoping ───────────────────────────────────────────────

/// Load everything the engine needs for one TCG. Store failures stop here,
/// before any computation.
async fn load_scope(
    state: &AppState,
    tcg: &str,
) -> Result<(Vec<MatchRecord>, Vec<Project>), ApiError> {
    validate_tcg_id(tcg).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let (records, projects) = tokio::try_join!(
        state.store.load_matches(tcg),
        state.store.load_projects(tcg)
    )?;
    Ok((records, projects))
}

async fn run_engine<F>(compute: F) -> Result<AnalyticsReport, ApiError>
where
    F: FnOnce() -> AnalyticsReport + Send + 'static,
{
    tokio::task::spawn_blocking(compute)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))
}

// ── Global Endpoint ─────────────────────────────────────────────

pub async fn global_analytics(
    State(state): State<AppState>,
    Path(tcg): Path<String>,
) -> Result<Json<AnalyticsReport>, ApiError> {
    let (records, projects) = load_scope(&state, &tcg).await?;
    let settings = state.settings;

    tracing::info!(
        tcg = %tcg,
        records = records.len(),
        projects = projects.len(),
        "Computing global analytics"
    );

    let report = run_engine(move || {
        compute_global_report(&records, &projects, &settings, Utc::now())
    })
    .await?;

    Ok(Json(report))
}

// ── Project Endpoint ────────────────────────────────────────────

pub async fn project_analytics(
    State(state): State<AppState>,
    Path((tcg, project)): Path<(String, String)>,
) -> Result<Json<AnalyticsReport>, ApiError> {
    let (records, projects) = load_scope(&state, &tcg).await?;
    let project_id = ProjectId::from(project);

    if !projects.iter().any(|p| p.id == project_id) {
        return Err(ApiError::NotFound(format!(
            "project {} in {}",
            project_id, tcg
        )));
    }

    let settings = state.settings;
    let report = run_engine(move || {
        compute_project_report(&project_id, &records, &projects, &settings, Utc::now())
    })
    .await?;

    Ok(Json(report))
}
