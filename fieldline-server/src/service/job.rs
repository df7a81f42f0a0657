//! Job Service
//!
//! Dispatcher-side business logic: job creation behind the plan gate, edits,
//! board moves, cancellation, and deletion. Every successful write publishes
//! the company on the change feed.

use chrono::Utc;
use fieldline_core::domain::job::{Job, JobStatus};
use fieldline_core::dto::board::LANE_STATUSES;
use fieldline_core::dto::job::{AssignmentChange, CreateJobInput, JobPatch};
use fieldline_core::engine::{Actor, TransitionError, ValidationError, edit};
use sqlx::PgPool;
use uuid::Uuid;

use crate::repository::{job_repository, technician_repository};
use crate::service::live::ChangeFeed;
use crate::service::plan_service;

/// Service error type
#[derive(Debug)]
pub enum JobError {
    NotFound(Uuid),
    TechnicianNotFound(Uuid),
    PlanLimitExceeded(String),
    Validation(ValidationError),
    Transition(TransitionError),
    DatabaseError(sqlx::Error),
}

impl From<sqlx::Error> for JobError {
    fn from(err: sqlx::Error) -> Self {
        JobError::DatabaseError(err)
    }
}

impl From<ValidationError> for JobError {
    fn from(err: ValidationError) -> Self {
        JobError::Validation(err)
    }
}

impl From<TransitionError> for JobError {
    fn from(err: TransitionError) -> Self {
        JobError::Transition(err)
    }
}

/// Create a new job
///
/// The monthly plan limit is checked before anything is written. When the
/// request names a technician, the denormalized name is resolved from the
/// technician record rather than trusted from the caller.
pub async fn create_job(
    pool: &PgPool,
    feed: &ChangeFeed,
    company_id: Uuid,
    mut input: CreateJobInput,
    actor: &Actor,
) -> Result<Job, JobError> {
    let now = Utc::now();

    let plan = plan_service::company_plan(pool, company_id).await?;
    let created_this_month =
        job_repository::count_created_since(pool, company_id, plan_service::month_start(now))
            .await?;
    if !plan_service::can_create_job(plan, created_this_month) {
        return Err(JobError::PlanLimitExceeded(format!(
            "monthly job limit reached on the {} plan",
            plan.as_str()
        )));
    }

    if let Some(technician_id) = input.assigned_to {
        let technician = technician_repository::find_by_id(pool, company_id, technician_id)
            .await?
            .ok_or(JobError::TechnicianNotFound(technician_id))?;
        input.assigned_to_name = Some(technician.name);
    }

    let job = edit::create(company_id, input, actor, now)?;
    job_repository::create(pool, &job).await?;
    feed.publish(company_id);

    tracing::info!("Job created: {} for company: {}", job.id, company_id);

    Ok(job)
}

/// Get a job by ID
pub async fn get_job(pool: &PgPool, company_id: Uuid, id: Uuid) -> Result<Job, JobError> {
    let job = job_repository::find_by_id(pool, company_id, id)
        .await?
        .ok_or(JobError::NotFound(id))?;

    Ok(job)
}

/// List all of a company's jobs
pub async fn list_jobs(pool: &PgPool, company_id: Uuid) -> Result<Vec<Job>, JobError> {
    let jobs = job_repository::list_for_company(pool, company_id).await?;
    Ok(jobs)
}

/// Apply a partial edit to a job
pub async fn update_job(
    pool: &PgPool,
    feed: &ChangeFeed,
    company_id: Uuid,
    job_id: Uuid,
    mut patch: JobPatch,
    actor: &Actor,
) -> Result<Job, JobError> {
    let mut job = job_repository::find_by_id(pool, company_id, job_id)
        .await?
        .ok_or(JobError::NotFound(job_id))?;

    // The denormalized name always comes from the technician record
    if let Some(AssignmentChange::Assign {
        technician_id,
        technician_name,
    }) = &mut patch.assignment
    {
        let technician = technician_repository::find_by_id(pool, company_id, *technician_id)
            .await?
            .ok_or(JobError::TechnicianNotFound(*technician_id))?;
        *technician_name = technician.name;
    }

    let entries = edit::apply_edit(&mut job, patch, actor, Utc::now())?;
    job_repository::update(pool, &job, &entries).await?;
    feed.publish(company_id);

    Ok(job)
}

/// Move a job to another board lane
///
/// Cancellation is not a lane; it goes through [`cancel_job`].
pub async fn move_job(
    pool: &PgPool,
    feed: &ChangeFeed,
    company_id: Uuid,
    job_id: Uuid,
    to: JobStatus,
    actor: &Actor,
) -> Result<Job, JobError> {
    let mut job = job_repository::find_by_id(pool, company_id, job_id)
        .await?
        .ok_or(JobError::NotFound(job_id))?;

    if !LANE_STATUSES.contains(&to) {
        return Err(JobError::Transition(TransitionError::InvalidTransition {
            from: job.status,
            to,
        }));
    }

    let entries = edit::override_status(&mut job, to, actor, Utc::now())?;
    if !entries.is_empty() {
        job_repository::update(pool, &job, &entries).await?;
        feed.publish(company_id);
        tracing::info!("Job {} moved to {}", job_id, to);
    }

    Ok(job)
}

/// Cancel a job
///
/// Completed work stays completed; cancelling an already-cancelled job is a
/// no-op.
pub async fn cancel_job(
    pool: &PgPool,
    feed: &ChangeFeed,
    company_id: Uuid,
    job_id: Uuid,
    actor: &Actor,
) -> Result<Job, JobError> {
    let mut job = job_repository::find_by_id(pool, company_id, job_id)
        .await?
        .ok_or(JobError::NotFound(job_id))?;

    if job.status == JobStatus::Completed {
        return Err(JobError::Transition(TransitionError::InvalidTransition {
            from: job.status,
            to: JobStatus::Cancelled,
        }));
    }

    let entries = edit::override_status(&mut job, JobStatus::Cancelled, actor, Utc::now())?;
    if !entries.is_empty() {
        job_repository::update(pool, &job, &entries).await?;
        feed.publish(company_id);
        tracing::info!("Job {} cancelled", job_id);
    }

    Ok(job)
}

/// Delete a job
pub async fn delete_job(
    pool: &PgPool,
    feed: &ChangeFeed,
    company_id: Uuid,
    job_id: Uuid,
) -> Result<(), JobError> {
    let deleted = job_repository::delete(pool, company_id, job_id).await?;
    if !deleted {
        return Err(JobError::NotFound(job_id));
    }

    feed.publish(company_id);
    tracing::info!("Job {} deleted", job_id);

    Ok(())
}
