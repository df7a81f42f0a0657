//! Board API Handlers
//!
//! The dispatch board: a filtered snapshot and a live stream that pushes a
//! fresh board view after every job change.

use axum::{
    Json,
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
};
use chrono::Utc;
use fieldline_core::board::{BoardFilters, DateRange, Projector};
use fieldline_core::domain::job::{Job, JobType, Priority};
use fieldline_core::dto::board::BoardView;
use futures_util::Stream;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::AppState;
use crate::api::error::{ApiError, ApiResult};
use crate::api::identity::Identity;
use crate::api::job::job_error;
use crate::service::{job_service, live};

/// Query parameters for board filtering
#[derive(Debug, Default, Deserialize)]
pub struct BoardQuery {
    pub technician: Option<Uuid>,
    pub search: Option<String>,
    pub priority: Option<Priority>,
    pub job_type: Option<JobType>,
    pub date_range: Option<DateRange>,
}

impl BoardQuery {
    fn into_filters(self) -> BoardFilters {
        BoardFilters {
            technician: self.technician,
            search: self.search.unwrap_or_default(),
            priority: self.priority,
            job_type: self.job_type,
            date_range: self.date_range.unwrap_or_default(),
        }
    }
}

/// GET /board
/// Snapshot of the dispatch board through the given filters
pub async fn get_board(
    State(state): State<AppState>,
    identity: Identity,
    Query(query): Query<BoardQuery>,
) -> ApiResult<Json<BoardView>> {
    identity.require_dispatcher()?;

    tracing::debug!("Projecting board for company: {}", identity.company_id);

    let jobs = job_service::list_jobs(&state.pool, identity.company_id)
        .await
        .map_err(job_error)?;

    Ok(Json(project(jobs, query.into_filters())))
}

/// GET /board/live
/// Server-sent stream of board views, one per job change
///
/// The first event carries the current board; each subsequent event is a
/// full re-projection after a change to the company's jobs.
pub async fn live_board(
    State(state): State<AppState>,
    identity: Identity,
    Query(query): Query<BoardQuery>,
) -> ApiResult<Sse<impl Stream<Item = Result<Event, axum::Error>>>> {
    identity.require_dispatcher()?;

    tracing::debug!("Live board stream for company: {}", identity.company_id);

    let rx = live::watch_company(state.pool.clone(), &state.feed, identity.company_id)
        .await
        .map_err(ApiError::DatabaseError)?;

    let filters = query.into_filters();
    let stream = futures_util::stream::unfold(
        (rx, filters, true),
        |(mut rx, filters, first)| async move {
            if !first && rx.changed().await.is_err() {
                return None;
            }
            let jobs = rx.borrow_and_update().clone();
            let event = Event::default().json_data(&project(jobs, filters.clone()));
            Some((event, (rx, filters, false)))
        },
    );

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

fn project(jobs: Vec<Job>, filters: BoardFilters) -> BoardView {
    let mut projector = Projector::new();
    projector.apply_snapshot(jobs);
    projector.set_filters(filters);
    projector.view(Utc::now())
}
