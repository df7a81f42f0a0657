//! Job Repository
//!
//! Handles all database operations related to jobs. Every query is scoped to
//! a company id. The activity log column is append-only: updates concatenate
//! new entries with `||` rather than rewriting the array.

use chrono::{DateTime, Utc};
use fieldline_core::domain::activity::ActivityEntry;
use fieldline_core::domain::job::{Job, JobStatus, JobType, Priority};
use sqlx::PgPool;
use uuid::Uuid;

/// Insert a new job record
pub async fn create(pool: &PgPool, job: &Job) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO jobs (id, company_id, customer_name, customer_phone, address,
                          job_type, priority, status, scheduled_at, assigned_to,
                          assigned_to_name, notes, photos, signature, tech_notes,
                          job_duration_secs, created_at, updated_at, en_route_at,
                          started_at, completed_at, created_by, activity_log)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                $16, $17, $18, $19, $20, $21, $22, $23)
        "#,
    )
    .bind(job.id)
    .bind(job.company_id)
    .bind(&job.customer_name)
    .bind(&job.customer_phone)
    .bind(&job.address)
    .bind(job.job_type.as_str())
    .bind(job.priority.as_str())
    .bind(job.status.as_str())
    .bind(job.scheduled_at)
    .bind(job.assigned_to)
    .bind(&job.assigned_to_name)
    .bind(&job.notes)
    .bind(&job.photos)
    .bind(&job.signature)
    .bind(&job.tech_notes)
    .bind(job.job_duration_secs)
    .bind(job.created_at)
    .bind(job.updated_at)
    .bind(job.en_route_at)
    .bind(job.started_at)
    .bind(job.completed_at)
    .bind(job.created_by)
    .bind(serde_json::to_value(&job.activity_log).unwrap())
    .execute(pool)
    .await?;

    Ok(())
}

/// Find a job by ID within a company
pub async fn find_by_id(
    pool: &PgPool,
    company_id: Uuid,
    id: Uuid,
) -> Result<Option<Job>, sqlx::Error> {
    let row = sqlx::query_as::<_, JobRow>(
        r#"
        SELECT id, company_id, customer_name, customer_phone, address, job_type,
               priority, status, scheduled_at, assigned_to, assigned_to_name,
               notes, photos, signature, tech_notes, job_duration_secs,
               created_at, updated_at, en_route_at, started_at, completed_at,
               created_by, activity_log
        FROM jobs
        WHERE id = $1 AND company_id = $2
        "#,
    )
    .bind(id)
    .bind(company_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| r.into()))
}

/// List all of a company's jobs, newest first
pub async fn list_for_company(pool: &PgPool, company_id: Uuid) -> Result<Vec<Job>, sqlx::Error> {
    let rows = sqlx::query_as::<_, JobRow>(
        r#"
        SELECT id, company_id, customer_name, customer_phone, address, job_type,
               priority, status, scheduled_at, assigned_to, assigned_to_name,
               notes, photos, signature, tech_notes, job_duration_secs,
               created_at, updated_at, en_route_at, started_at, completed_at,
               created_by, activity_log
        FROM jobs
        WHERE company_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(company_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
}

/// List jobs assigned to a technician, soonest scheduled first
///
/// Matches on either the technician id or the denormalized name so that jobs
/// assigned before the technician record existed still show up.
pub async fn list_for_assignee(
    pool: &PgPool,
    company_id: Uuid,
    technician_id: Uuid,
    technician_name: &str,
) -> Result<Vec<Job>, sqlx::Error> {
    let rows = sqlx::query_as::<_, JobRow>(
        r#"
        SELECT id, company_id, customer_name, customer_phone, address, job_type,
               priority, status, scheduled_at, assigned_to, assigned_to_name,
               notes, photos, signature, tech_notes, job_duration_secs,
               created_at, updated_at, en_route_at, started_at, completed_at,
               created_by, activity_log
        FROM jobs
        WHERE company_id = $1 AND (assigned_to = $2 OR assigned_to_name = $3)
        ORDER BY scheduled_at ASC NULLS LAST
        "#,
    )
    .bind(company_id)
    .bind(technician_id)
    .bind(technician_name)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
}

/// Write a job's current state and append new activity entries
pub async fn update(
    pool: &PgPool,
    job: &Job,
    new_entries: &[ActivityEntry],
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE jobs
        SET customer_name = $1, customer_phone = $2, address = $3, job_type = $4,
            priority = $5, status = $6, scheduled_at = $7, assigned_to = $8,
            assigned_to_name = $9, notes = $10, photos = $11, signature = $12,
            tech_notes = $13, job_duration_secs = $14, updated_at = $15,
            en_route_at = $16, started_at = $17, completed_at = $18,
            activity_log = activity_log || $19::jsonb
        WHERE id = $20 AND company_id = $21
        "#,
    )
    .bind(&job.customer_name)
    .bind(&job.customer_phone)
    .bind(&job.address)
    .bind(job.job_type.as_str())
    .bind(job.priority.as_str())
    .bind(job.status.as_str())
    .bind(job.scheduled_at)
    .bind(job.assigned_to)
    .bind(&job.assigned_to_name)
    .bind(&job.notes)
    .bind(&job.photos)
    .bind(&job.signature)
    .bind(&job.tech_notes)
    .bind(job.job_duration_secs)
    .bind(job.updated_at)
    .bind(job.en_route_at)
    .bind(job.started_at)
    .bind(job.completed_at)
    .bind(serde_json::to_value(new_entries).unwrap())
    .bind(job.id)
    .bind(job.company_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Append a single photo URL and its activity entries
pub async fn append_photo(
    pool: &PgPool,
    company_id: Uuid,
    job_id: Uuid,
    url: &str,
    new_entries: &[ActivityEntry],
    updated_at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE jobs
        SET photos = array_append(photos, $1),
            updated_at = $2,
            activity_log = activity_log || $3::jsonb
        WHERE id = $4 AND company_id = $5
        "#,
    )
    .bind(url)
    .bind(updated_at)
    .bind(serde_json::to_value(new_entries).unwrap())
    .bind(job_id)
    .bind(company_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// Delete a job by ID within a company
pub async fn delete(pool: &PgPool, company_id: Uuid, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM jobs WHERE id = $1 AND company_id = $2")
        .bind(id)
        .bind(company_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Count jobs a company created at or after the given instant
pub async fn count_created_since(
    pool: &PgPool,
    company_id: Uuid,
    since: DateTime<Utc>,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM jobs WHERE company_id = $1 AND created_at >= $2")
        .bind(company_id)
        .bind(since)
        .fetch_one(pool)
        .await
}

// =============================================================================
// Helper Functions
// =============================================================================

fn string_to_status(s: &str) -> JobStatus {
    JobStatus::parse(s).unwrap_or(JobStatus::Unassigned)
}

fn string_to_job_type(s: &str) -> JobType {
    JobType::parse(s).unwrap_or(JobType::Repair)
}

fn string_to_priority(s: &str) -> Priority {
    Priority::parse(s).unwrap_or(Priority::Medium)
}

// =============================================================================
// Database Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct JobRow {
    id: Uuid,
    company_id: Uuid,
    customer_name: String,
    customer_phone: String,
    address: String,
    job_type: String,
    priority: String,
    status: String,
    scheduled_at: Option<DateTime<Utc>>,
    assigned_to: Option<Uuid>,
    assigned_to_name: Option<String>,
    notes: String,
    photos: Vec<String>,
    signature: Option<String>,
    tech_notes: String,
    job_duration_secs: Option<i64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    en_route_at: Option<DateTime<Utc>>,
    started_at: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
    created_by: Uuid,
    activity_log: serde_json::Value,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        let activity_log = serde_json::from_value(row.activity_log).unwrap_or_default();

        Job {
            id: row.id,
            company_id: row.company_id,
            customer_name: row.customer_name,
            customer_phone: row.customer_phone,
            address: row.address,
            job_type: string_to_job_type(&row.job_type),
            priority: string_to_priority(&row.priority),
            status: string_to_status(&row.status),
            scheduled_at: row.scheduled_at,
            assigned_to: row.assigned_to,
            assigned_to_name: row.assigned_to_name,
            notes: row.notes,
            photos: row.photos,
            signature: row.signature,
            tech_notes: row.tech_notes,
            job_duration_secs: row.job_duration_secs,
            created_at: row.created_at,
            updated_at: row.updated_at,
            en_route_at: row.en_route_at,
            started_at: row.started_at,
            completed_at: row.completed_at,
            created_by: row.created_by,
            activity_log,
        }
    }
}
