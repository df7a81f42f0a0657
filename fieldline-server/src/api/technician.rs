//! Technician Roster Handlers
//!
//! HTTP endpoints for managing a company's technician roster.

use axum::{Json, extract::State};
use fieldline_core::domain::technician::Technician;
use fieldline_core::dto::technician::CreateTechnician;

use crate::api::AppState;
use crate::api::error::ApiResult;
use crate::api::identity::Identity;
use crate::api::tech::tech_error;
use crate::service::tech_service;

/// POST /technicians
/// Register a new technician
pub async fn create_technician(
    State(state): State<AppState>,
    identity: Identity,
    Json(req): Json<CreateTechnician>,
) -> ApiResult<Json<Technician>> {
    identity.require_dispatcher()?;

    tracing::info!("Registering technician for company: {}", identity.company_id);

    let technician = tech_service::register_technician(&state.pool, identity.company_id, req)
        .await
        .map_err(tech_error)?;

    Ok(Json(technician))
}

/// GET /technicians
/// List the company's technicians
pub async fn list_technicians(
    State(state): State<AppState>,
    identity: Identity,
) -> ApiResult<Json<Vec<Technician>>> {
    tracing::debug!("Listing technicians for company: {}", identity.company_id);

    let technicians = tech_service::list_technicians(&state.pool, identity.company_id)
        .await
        .map_err(tech_error)?;

    Ok(Json(technicians))
}
