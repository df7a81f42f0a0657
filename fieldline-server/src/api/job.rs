//! Job API Handlers
//!
//! Dispatcher HTTP endpoints for job lifecycle management.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use fieldline_core::domain::job::Job;
use fieldline_core::dto::job::{CreateJobInput, JobPatch, MoveJobRequest};
use uuid::Uuid;

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};
use crate::api::identity::Identity;
use crate::service::job_service;

/// POST /jobs
/// Create a new job
pub async fn create_job(
    State(state): State<AppState>,
    identity: Identity,
    Json(req): Json<CreateJobInput>,
) -> ApiResult<Json<Job>> {
    identity.require_dispatcher()?;

    tracing::info!("Creating job for company: {}", identity.company_id);

    let job = job_service::create_job(
        &state.pool,
        &state.feed,
        identity.company_id,
        req,
        &identity.actor(),
    )
    .await
    .map_err(job_error)?;

    Ok(Json(job))
}

/// GET /jobs
/// List all of the company's jobs
pub async fn list_jobs(
    State(state): State<AppState>,
    identity: Identity,
) -> ApiResult<Json<Vec<Job>>> {
    identity.require_dispatcher()?;

    tracing::debug!("Listing jobs for company: {}", identity.company_id);

    let jobs = job_service::list_jobs(&state.pool, identity.company_id)
        .await
        .map_err(job_error)?;

    Ok(Json(jobs))
}

/// GET /jobs/{id}
/// Get job details by ID
pub async fn get_job(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Job>> {
    tracing::debug!("Getting job: {}", id);

    let job = job_service::get_job(&state.pool, identity.company_id, id)
        .await
        .map_err(job_error)?;

    Ok(Json(job))
}

/// PATCH /jobs/{id}
/// Apply a partial edit to a job
pub async fn update_job(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<Uuid>,
    Json(patch): Json<JobPatch>,
) -> ApiResult<Json<Job>> {
    identity.require_dispatcher()?;

    tracing::debug!("Updating job: {}", id);

    let job = job_service::update_job(
        &state.pool,
        &state.feed,
        identity.company_id,
        id,
        patch,
        &identity.actor(),
    )
    .await
    .map_err(job_error)?;

    Ok(Json(job))
}

/// POST /jobs/{id}/move
/// Move a job to another board lane
pub async fn move_job(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<Uuid>,
    Json(req): Json<MoveJobRequest>,
) -> ApiResult<Json<Job>> {
    identity.require_dispatcher()?;

    tracing::debug!("Moving job {} to {}", id, req.to);

    let job = job_service::move_job(
        &state.pool,
        &state.feed,
        identity.company_id,
        id,
        req.to,
        &identity.actor(),
    )
    .await
    .map_err(job_error)?;

    Ok(Json(job))
}

/// POST /jobs/{id}/cancel
/// Cancel a job
pub async fn cancel_job(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Job>> {
    identity.require_dispatcher()?;

    tracing::info!("Cancelling job: {}", id);

    let job = job_service::cancel_job(
        &state.pool,
        &state.feed,
        identity.company_id,
        id,
        &identity.actor(),
    )
    .await
    .map_err(job_error)?;

    Ok(Json(job))
}

/// DELETE /jobs/{id}
/// Delete a job
pub async fn delete_job(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    identity.require_dispatcher()?;

    tracing::info!("Deleting job: {}", id);

    job_service::delete_job(&state.pool, &state.feed, identity.company_id, id)
        .await
        .map_err(job_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Error Mapping
// =============================================================================

pub(crate) fn job_error(e: job_service::JobError) -> ApiError {
    match e {
        job_service::JobError::NotFound(id) => ApiError::NotFound(format!("Job {} not found", id)),
        job_service::JobError::TechnicianNotFound(id) => {
            ApiError::NotFound(format!("Technician {} not found", id))
        }
        job_service::JobError::PlanLimitExceeded(msg) => ApiError::PaymentRequired(msg),
        job_service::JobError::Validation(err) => ApiError::BadRequest(err.to_string()),
        job_service::JobError::Transition(err) => ApiError::Conflict(err.to_string()),
        job_service::JobError::DatabaseError(err) => ApiError::DatabaseError(err),
    }
}
