//! Project submission and project queries.

use axum::extract::multipart::{Field, MultipartError, MultipartRejection};
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use bc_03_ledger::LedgerError;
use bc_04_submission::{RawSubmission, SubmissionOutcome};
use shared_types::{Evidence, ProjectId};
use tracing::{debug, info, warn};

use crate::domain::{ApiError, ProjectDetail, UserProjects};
use crate::handlers::{ensure_ledger, parse_address};
use crate::router::AppState;

/// `POST /api/projects`
pub async fn submit_project(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<SubmissionOutcome>, ApiError> {
    let multipart = multipart.map_err(|rejection| {
        ApiError::bad_request("Image file is required").with_details(rejection.body_text())
    })?;
    let raw = read_form(multipart, state.max_evidence_bytes).await?;

    let outcome = state.submissions.submit(raw).await.map_err(|e| {
        if e.status_code() >= 500 {
            warn!("[bc-05] Submission failed: {}", e);
        }
        ApiError::from(e)
    })?;

    info!(
        project_id = %outcome.project_id,
        result_id = %outcome.analysis.id,
        "[bc-05] 📨 Submission accepted ({})",
        outcome.ledger.outcome.as_str()
    );
    Ok(Json(outcome))
}

async fn read_form(
    mut multipart: Multipart,
    max_evidence_bytes: usize,
) -> Result<RawSubmission, ApiError> {
    let mut raw = RawSubmission::default();
    let fail = |e: MultipartError| multipart_error(e, max_evidence_bytes);

    while let Some(field) = multipart.next_field().await.map_err(fail)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(fail)?;
                raw.evidence = Some(Evidence::new(bytes.to_vec(), content_type));
            }
            "name" => raw.name = Some(text(field, max_evidence_bytes).await?),
            "location" => raw.location = Some(text(field, max_evidence_bytes).await?),
            "area" => raw.area = Some(text(field, max_evidence_bytes).await?),
            "ecosystemType" => raw.ecosystem_type = Some(text(field, max_evidence_bytes).await?),
            "userAddress" => raw.submitter = Some(text(field, max_evidence_bytes).await?),
            other => debug!("[bc-05] Ignoring form field '{}'", other),
        }
    }

    Ok(raw)
}

async fn text(field: Field<'_>, max_evidence_bytes: usize) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| multipart_error(e, max_evidence_bytes))
}

fn multipart_error(err: MultipartError, max_evidence_bytes: usize) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::file_too_large(max_evidence_bytes)
    } else {
        ApiError::bad_request("Malformed multipart body").with_details(err.body_text())
    }
}

/// `GET /api/projects/user/:address`
pub async fn user_projects(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<UserProjects>, ApiError> {
    ensure_ledger(&state)?;
    let owner = parse_address(&address, "Invalid user address")?;

    let context = "Failed to fetch user projects";
    let ids = state
        .ledger
        .user_projects(owner)
        .await
        .map_err(|e| ApiError::from_ledger(context, &e))?;

    let mut projects = Vec::with_capacity(ids.len());
    for id in ids {
        let project = state
            .ledger
            .project(id)
            .await
            .map_err(|e| ApiError::from_ledger(context, &e))?;
        projects.push(project);
    }

    Ok(Json(UserProjects { owner, projects }))
}

/// `GET /api/projects/:id`
pub async fn get_project(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ProjectDetail>, ApiError> {
    ensure_ledger(&state)?;

    let project_id = match raw_id.parse::<ProjectId>() {
        Ok(ProjectId::Ledger(id)) => id,
        Ok(ProjectId::Local(_)) => {
            return Err(ApiError::not_found("Project not found")
                .with_details("locally assigned project ids are not recorded on the ledger"))
        }
        Err(e) => return Err(ApiError::bad_request("Invalid project id").with_details(e.to_string())),
    };

    let project = match state.ledger.project(project_id).await {
        Ok(project) => project,
        Err(LedgerError::Rejected(detail)) => {
            return Err(ApiError::not_found("Project not found").with_details(detail))
        }
        Err(e) => return Err(ApiError::from_ledger("Failed to fetch project", &e)),
    };

    let analysis = if project.ai_results_hash.is_empty() {
        None
    } else {
        match state.store.lookup(&project.ai_results_hash).await {
            Ok(result) => Some(result),
            Err(e) => {
                if !e.is_not_found() {
                    warn!(project_id, "[bc-05] Could not attach analysis: {}", e);
                }
                None
            }
        }
    };

    Ok(Json(ProjectDetail { project, analysis }))
}
