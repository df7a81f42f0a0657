//! API Module
//!
//! HTTP API layer for the server.
//! Each submodule handles endpoints for a specific concern.

pub mod board;
pub mod error;
pub mod health;
pub mod identity;
pub mod job;
pub mod tech;
pub mod technician;

use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::service::live::ChangeFeed;

/// Shared state for all handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub feed: ChangeFeed,
}

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Dispatcher job endpoints
        .route("/jobs", post(job::create_job))
        .route("/jobs", get(job::list_jobs))
        .route("/jobs/{id}", get(job::get_job))
        .route("/jobs/{id}", patch(job::update_job))
        .route("/jobs/{id}", delete(job::delete_job))
        .route("/jobs/{id}/move", post(job::move_job))
        .route("/jobs/{id}/cancel", post(job::cancel_job))
        // Board endpoints
        .route("/board", get(board::get_board))
        .route("/board/live", get(board::live_board))
        // Technician app endpoints
        .route("/tech/jobs", get(tech::list_my_jobs))
        .route("/tech/jobs/{id}/en-route", post(tech::mark_en_route))
        .route("/tech/jobs/{id}/start", post(tech::start_work))
        .route("/tech/jobs/{id}/complete", post(tech::complete_job))
        .route("/tech/jobs/{id}/photos", post(tech::add_photo))
        .route("/tech/jobs/{id}/signature", put(tech::set_signature))
        .route("/tech/jobs/{id}/notes", put(tech::set_tech_notes))
        // Technician roster endpoints
        .route("/technicians", post(technician::create_technician))
        .route("/technicians", get(technician::list_technicians))
        // Add state and middleware
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
