//! Technician API Handlers
//!
//! HTTP endpoints for the technician app: the personal job list, the
//! forward lifecycle steps, and field artifacts.

use axum::{
    Json,
    extract::{Path, State},
};
use fieldline_core::domain::job::Job;
use fieldline_core::dto::job::{
    AddPhotoRequest, CompleteJobRequest, SetSignatureRequest, SetTechNotesRequest,
};
use uuid::Uuid;

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};
use crate::api::identity::Identity;
use crate::service::tech_service;

/// GET /tech/jobs
/// List the calling technician's open jobs
pub async fn list_my_jobs(
    State(state): State<AppState>,
    identity: Identity,
) -> ApiResult<Json<Vec<Job>>> {
    identity.require_technician()?;

    tracing::debug!("Listing jobs for technician: {}", identity.user_id);

    let jobs = tech_service::list_my_jobs(&state.pool, identity.company_id, &identity.actor())
        .await
        .map_err(tech_error)?;

    Ok(Json(jobs))
}

/// POST /tech/jobs/{id}/en-route
/// Mark a job en route
pub async fn mark_en_route(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Job>> {
    identity.require_technician()?;

    let job = tech_service::mark_en_route(
        &state.pool,
        &state.feed,
        identity.company_id,
        id,
        &identity.actor(),
    )
    .await
    .map_err(tech_error)?;

    Ok(Json(job))
}

/// POST /tech/jobs/{id}/start
/// Start work on a job
pub async fn start_work(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Job>> {
    identity.require_technician()?;

    let job = tech_service::start_work(
        &state.pool,
        &state.feed,
        identity.company_id,
        id,
        &identity.actor(),
    )
    .await
    .map_err(tech_error)?;

    Ok(Json(job))
}

/// POST /tech/jobs/{id}/complete
/// Complete a job with the timer's elapsed seconds
pub async fn complete_job(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<Uuid>,
    Json(req): Json<CompleteJobRequest>,
) -> ApiResult<Json<Job>> {
    identity.require_technician()?;

    let job = tech_service::complete_job(
        &state.pool,
        &state.feed,
        identity.company_id,
        id,
        req.duration_secs,
        &identity.actor(),
    )
    .await
    .map_err(tech_error)?;

    Ok(Json(job))
}

/// POST /tech/jobs/{id}/photos
/// Attach a photo URL to a job
pub async fn add_photo(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<Uuid>,
    Json(req): Json<AddPhotoRequest>,
) -> ApiResult<Json<Job>> {
    identity.require_technician()?;

    let job = tech_service::add_photo(
        &state.pool,
        &state.feed,
        identity.company_id,
        id,
        &req.url,
        &identity.actor(),
    )
    .await
    .map_err(tech_error)?;

    Ok(Json(job))
}

/// PUT /tech/jobs/{id}/signature
/// Set or replace the customer signature
pub async fn set_signature(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<Uuid>,
    Json(req): Json<SetSignatureRequest>,
) -> ApiResult<Json<Job>> {
    identity.require_technician()?;

    let job = tech_service::set_signature(
        &state.pool,
        &state.feed,
        identity.company_id,
        id,
        &req.url,
        &identity.actor(),
    )
    .await
    .map_err(tech_error)?;

    Ok(Json(job))
}

/// PUT /tech/jobs/{id}/notes
/// Set the technician's work notes
pub async fn set_tech_notes(
    State(state): State<AppState>,
    identity: Identity,
    Path(id): Path<Uuid>,
    Json(req): Json<SetTechNotesRequest>,
) -> ApiResult<Json<Job>> {
    identity.require_technician()?;

    let job = tech_service::set_tech_notes(
        &state.pool,
        &state.feed,
        identity.company_id,
        id,
        &req.notes,
        &identity.actor(),
    )
    .await
    .map_err(tech_error)?;

    Ok(Json(job))
}

// =============================================================================
// Error Mapping
// =============================================================================

pub(crate) fn tech_error(e: tech_service::TechError) -> ApiError {
    match e {
        tech_service::TechError::NotFound(id) => {
            ApiError::NotFound(format!("Job {} not found", id))
        }
        tech_service::TechError::NotAssigned(id) => {
            ApiError::Forbidden(format!("Job {} is not assigned to you", id))
        }
        tech_service::TechError::PlanLimitExceeded(msg) => ApiError::PaymentRequired(msg),
        tech_service::TechError::Validation(err) => ApiError::BadRequest(err.to_string()),
        tech_service::TechError::Transition(err) => ApiError::Conflict(err.to_string()),
        tech_service::TechError::DatabaseError(err) => ApiError::DatabaseError(err),
    }
}
