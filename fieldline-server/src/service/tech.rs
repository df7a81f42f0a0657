//! Technician Service
//!
//! Business logic for the technician app: the personal job list, the
//! forward-only lifecycle steps, field artifacts, and technician
//! registration behind the plan gate.

use chrono::Utc;
use fieldline_core::domain::job::Job;
use fieldline_core::domain::technician::{Availability, Technician};
use fieldline_core::dto::technician::CreateTechnician;
use fieldline_core::engine::{Actor, TransitionError, ValidationError, field, transition};
use sqlx::PgPool;
use uuid::Uuid;

use crate::repository::{job_repository, technician_repository};
use crate::service::live::ChangeFeed;
use crate::service::plan_service;

/// Service error type
#[derive(Debug)]
pub enum TechError {
    NotFound(Uuid),
    NotAssigned(Uuid),
    PlanLimitExceeded(String),
    Validation(ValidationError),
    Transition(TransitionError),
    DatabaseError(sqlx::Error),
}

impl From<sqlx::Error> for TechError {
    fn from(err: sqlx::Error) -> Self {
        TechError::DatabaseError(err)
    }
}

impl From<ValidationError> for TechError {
    fn from(err: ValidationError) -> Self {
        TechError::Validation(err)
    }
}

impl From<TransitionError> for TechError {
    fn from(err: TransitionError) -> Self {
        TechError::Transition(err)
    }
}

/// List a technician's open jobs, soonest scheduled first
pub async fn list_my_jobs(
    pool: &PgPool,
    company_id: Uuid,
    actor: &Actor,
) -> Result<Vec<Job>, TechError> {
    let jobs =
        job_repository::list_for_assignee(pool, company_id, actor.id, &actor.name).await?;

    Ok(jobs
        .into_iter()
        .filter(|job| !job.status.is_terminal())
        .collect())
}

/// Scheduled -> EnRoute
pub async fn mark_en_route(
    pool: &PgPool,
    feed: &ChangeFeed,
    company_id: Uuid,
    job_id: Uuid,
    actor: &Actor,
) -> Result<Job, TechError> {
    let mut job = fetch_owned(pool, company_id, job_id, actor).await?;

    let entries = transition::mark_en_route(&mut job, actor, Utc::now())?;
    job_repository::update(pool, &job, &entries).await?;
    feed.publish(company_id);

    tracing::info!("Job {} en route", job_id);

    Ok(job)
}

/// EnRoute -> InProgress
pub async fn start_work(
    pool: &PgPool,
    feed: &ChangeFeed,
    company_id: Uuid,
    job_id: Uuid,
    actor: &Actor,
) -> Result<Job, TechError> {
    let mut job = fetch_owned(pool, company_id, job_id, actor).await?;

    let entries = transition::start_work(&mut job, actor, Utc::now())?;
    job_repository::update(pool, &job, &entries).await?;
    feed.publish(company_id);

    tracing::info!("Job {} started", job_id);

    Ok(job)
}

/// InProgress -> Completed, with the timer's elapsed seconds
pub async fn complete_job(
    pool: &PgPool,
    feed: &ChangeFeed,
    company_id: Uuid,
    job_id: Uuid,
    duration_secs: i64,
    actor: &Actor,
) -> Result<Job, TechError> {
    let mut job = fetch_owned(pool, company_id, job_id, actor).await?;

    let entries = transition::complete(&mut job, duration_secs, actor, Utc::now())?;
    job_repository::update(pool, &job, &entries).await?;
    feed.publish(company_id);

    tracing::info!("Job {} completed in {}s", job_id, duration_secs);

    Ok(job)
}

/// Attach a photo URL to a job
pub async fn add_photo(
    pool: &PgPool,
    feed: &ChangeFeed,
    company_id: Uuid,
    job_id: Uuid,
    url: &str,
    actor: &Actor,
) -> Result<Job, TechError> {
    let mut job = fetch_owned(pool, company_id, job_id, actor).await?;

    let entries = field::attach_photo(&mut job, url, actor, Utc::now())?;
    job_repository::append_photo(pool, company_id, job_id, url, &entries, job.updated_at).await?;
    feed.publish(company_id);

    Ok(job)
}

/// Set or replace the customer signature
pub async fn set_signature(
    pool: &PgPool,
    feed: &ChangeFeed,
    company_id: Uuid,
    job_id: Uuid,
    url: &str,
    actor: &Actor,
) -> Result<Job, TechError> {
    let mut job = fetch_owned(pool, company_id, job_id, actor).await?;

    let entries = field::set_signature(&mut job, url, actor, Utc::now());
    job_repository::update(pool, &job, &entries).await?;
    feed.publish(company_id);

    Ok(job)
}

/// Set the technician's work notes
pub async fn set_tech_notes(
    pool: &PgPool,
    feed: &ChangeFeed,
    company_id: Uuid,
    job_id: Uuid,
    notes: &str,
    actor: &Actor,
) -> Result<Job, TechError> {
    let mut job = fetch_owned(pool, company_id, job_id, actor).await?;

    let entries = field::set_tech_notes(&mut job, notes, actor, Utc::now());
    job_repository::update(pool, &job, &entries).await?;
    feed.publish(company_id);

    Ok(job)
}

/// Register a new technician
///
/// The plan's technician limit is checked before anything is written.
pub async fn register_technician(
    pool: &PgPool,
    company_id: Uuid,
    req: CreateTechnician,
) -> Result<Technician, TechError> {
    require(&req.name, "name")?;
    require(&req.email, "email")?;
    require(&req.phone, "phone")?;

    let plan = plan_service::company_plan(pool, company_id).await?;
    let current = technician_repository::count_for_company(pool, company_id).await?;
    if !plan_service::can_add_technician(plan, current) {
        return Err(TechError::PlanLimitExceeded(format!(
            "technician limit reached on the {} plan",
            plan.as_str()
        )));
    }

    let technician = Technician {
        id: Uuid::new_v4(),
        company_id,
        name: req.name.trim().to_string(),
        email: req.email.trim().to_string(),
        phone: req.phone.trim().to_string(),
        availability: Availability::Available,
    };
    technician_repository::create(pool, &technician).await?;

    tracing::info!(
        "Technician registered: {} for company: {}",
        technician.id,
        company_id
    );

    Ok(technician)
}

/// List a company's technicians
pub async fn list_technicians(
    pool: &PgPool,
    company_id: Uuid,
) -> Result<Vec<Technician>, TechError> {
    let technicians = technician_repository::list_for_company(pool, company_id).await?;
    Ok(technicians)
}

/// Fetch a job and check the acting technician is assigned to it
async fn fetch_owned(
    pool: &PgPool,
    company_id: Uuid,
    job_id: Uuid,
    actor: &Actor,
) -> Result<Job, TechError> {
    let job = job_repository::find_by_id(pool, company_id, job_id)
        .await?
        .ok_or(TechError::NotFound(job_id))?;

    let owned = job.assigned_to == Some(actor.id)
        || job.assigned_to_name.as_deref() == Some(actor.name.as_str());
    if !owned {
        return Err(TechError::NotAssigned(job_id));
    }

    Ok(job)
}

fn require(value: &str, name: &'static str) -> Result<(), TechError> {
    if value.trim().is_empty() {
        Err(TechError::Validation(ValidationError::MissingField(name)))
    } else {
        Ok(())
    }
}
