//! Technician write path
//!
//! The forward-only half of the lifecycle: Scheduled -> EnRoute ->
//! InProgress -> Completed. Each step stamps its timestamp, and completion
//! requires the field artifacts to be present first. Any other from/to pair
//! is rejected and the job is left unchanged.

use chrono::{DateTime, Utc};

use crate::domain::activity::{ActivityEntry, ActivityKind};
use crate::domain::job::{Job, JobStatus};
use crate::engine::{Actor, TransitionError};

/// Scheduled -> EnRoute, stamping `en_route_at`
pub fn mark_en_route(
    job: &mut Job,
    actor: &Actor,
    now: DateTime<Utc>,
) -> Result<Vec<ActivityEntry>, TransitionError> {
    ensure_status(job, JobStatus::Scheduled, JobStatus::EnRoute)?;

    job.en_route_at = Some(now);
    Ok(advance(job, JobStatus::EnRoute, actor, now))
}

/// EnRoute -> InProgress, stamping `started_at`
pub fn start_work(
    job: &mut Job,
    actor: &Actor,
    now: DateTime<Utc>,
) -> Result<Vec<ActivityEntry>, TransitionError> {
    ensure_status(job, JobStatus::EnRoute, JobStatus::InProgress)?;

    job.started_at = Some(now);
    Ok(advance(job, JobStatus::InProgress, actor, now))
}

/// InProgress -> Completed
///
/// Requires at least one photo, a signature, and non-blank technician notes;
/// the error names the first missing artifact. `duration_secs` is the
/// elapsed time the technician's timer accumulated.
pub fn complete(
    job: &mut Job,
    duration_secs: i64,
    actor: &Actor,
    now: DateTime<Utc>,
) -> Result<Vec<ActivityEntry>, TransitionError> {
    ensure_status(job, JobStatus::InProgress, JobStatus::Completed)?;

    if job.photos.is_empty() {
        return Err(TransitionError::MissingArtifact("photo"));
    }
    if job.signature.is_none() {
        return Err(TransitionError::MissingArtifact("signature"));
    }
    if job.tech_notes.trim().is_empty() {
        return Err(TransitionError::MissingArtifact("technician notes"));
    }

    job.completed_at = Some(now);
    job.job_duration_secs = Some(duration_secs);
    Ok(advance(job, JobStatus::Completed, actor, now))
}

fn ensure_status(job: &Job, expected: JobStatus, to: JobStatus) -> Result<(), TransitionError> {
    if job.status != expected {
        return Err(TransitionError::InvalidTransition {
            from: job.status,
            to,
        });
    }
    Ok(())
}

fn advance(job: &mut Job, to: JobStatus, actor: &Actor, now: DateTime<Utc>) -> Vec<ActivityEntry> {
    let entry = ActivityEntry::diff(
        ActivityKind::StatusChanged,
        "status",
        Some(job.status.as_str().to_string()),
        Some(to.as_str().to_string()),
        &actor.name,
        now,
    );

    job.status = to;
    job.updated_at = now;
    job.activity_log.push(entry.clone());

    vec![entry]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::job::{JobType, Priority};
    use crate::dto::job::CreateJobInput;
    use crate::engine::edit;
    use uuid::Uuid;

    fn actor() -> Actor {
        Actor::new(Uuid::new_v4(), "Bob")
    }

    fn now() -> DateTime<Utc> {
        "2026-03-02T15:00:00Z".parse().unwrap()
    }

    fn scheduled_job() -> Job {
        let input = CreateJobInput {
            customer_name: "Jane Doe".to_string(),
            customer_phone: "555-0100".to_string(),
            address: "1 Elm St".to_string(),
            job_type: JobType::Repair,
            priority: Priority::High,
            scheduled_date: None,
            scheduled_time: None,
            assigned_to: Some(Uuid::new_v4()),
            assigned_to_name: Some("Bob".to_string()),
            notes: String::new(),
        };
        edit::create(Uuid::new_v4(), input, &actor(), now()).unwrap()
    }

    fn with_artifacts(job: &mut Job) {
        job.photos.push("https://cdn.example/p1.jpg".to_string());
        job.signature = Some("https://cdn.example/sig.png".to_string());
        job.tech_notes = "Replaced the valve".to_string();
    }

    #[test]
    fn test_forward_path_stamps_timestamps() {
        let mut job = scheduled_job();

        mark_en_route(&mut job, &actor(), now()).unwrap();
        assert_eq!(job.status, JobStatus::EnRoute);
        assert!(job.en_route_at.is_some());

        start_work(&mut job, &actor(), now()).unwrap();
        assert_eq!(job.status, JobStatus::InProgress);
        assert!(job.started_at.is_some());

        with_artifacts(&mut job);
        complete(&mut job, 3600, &actor(), now()).unwrap();
        assert_eq!(job.status, JobStatus::Completed);
        assert!(job.completed_at.is_some());
        assert_eq!(job.job_duration_secs, Some(3600));
    }

    #[test]
    fn test_each_step_logs_status_change() {
        let mut job = scheduled_job();

        let entries = mark_en_route(&mut job, &actor(), now()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, ActivityKind::StatusChanged);
        assert_eq!(entries[0].old_value.as_deref(), Some("scheduled"));
        assert_eq!(entries[0].new_value.as_deref(), Some("en_route"));
    }

    #[test]
    fn test_cannot_skip_en_route() {
        let mut job = scheduled_job();

        let err = start_work(&mut job, &actor(), now()).unwrap_err();

        assert_eq!(
            err,
            TransitionError::InvalidTransition {
                from: JobStatus::Scheduled,
                to: JobStatus::InProgress,
            }
        );
        assert_eq!(job.status, JobStatus::Scheduled);
        assert!(job.started_at.is_none());
    }

    #[test]
    fn test_cannot_complete_from_scheduled() {
        let mut job = scheduled_job();
        with_artifacts(&mut job);

        let err = complete(&mut job, 60, &actor(), now()).unwrap_err();

        assert_eq!(
            err,
            TransitionError::InvalidTransition {
                from: JobStatus::Scheduled,
                to: JobStatus::Completed,
            }
        );
        assert_eq!(job.status, JobStatus::Scheduled);
    }

    #[test]
    fn test_cannot_go_backwards() {
        let mut job = scheduled_job();
        mark_en_route(&mut job, &actor(), now()).unwrap();
        start_work(&mut job, &actor(), now()).unwrap();

        let err = mark_en_route(&mut job, &actor(), now()).unwrap_err();

        assert_eq!(
            err,
            TransitionError::InvalidTransition {
                from: JobStatus::InProgress,
                to: JobStatus::EnRoute,
            }
        );
        assert_eq!(job.status, JobStatus::InProgress);
    }

    #[test]
    fn test_complete_requires_each_artifact() {
        let mut job = scheduled_job();
        mark_en_route(&mut job, &actor(), now()).unwrap();
        start_work(&mut job, &actor(), now()).unwrap();

        let err = complete(&mut job, 60, &actor(), now()).unwrap_err();
        assert_eq!(err, TransitionError::MissingArtifact("photo"));

        job.photos.push("https://cdn.example/p1.jpg".to_string());
        let err = complete(&mut job, 60, &actor(), now()).unwrap_err();
        assert_eq!(err, TransitionError::MissingArtifact("signature"));

        job.signature = Some("https://cdn.example/sig.png".to_string());
        let err = complete(&mut job, 60, &actor(), now()).unwrap_err();
        assert_eq!(err, TransitionError::MissingArtifact("technician notes"));

        assert_eq!(job.status, JobStatus::InProgress);
        assert!(job.completed_at.is_none());
        assert!(job.job_duration_secs.is_none());
    }

    #[test]
    fn test_cannot_complete_unassigned_job() {
        let mut job = scheduled_job();
        job.status = JobStatus::Unassigned;
        with_artifacts(&mut job);

        let err = complete(&mut job, 60, &actor(), now()).unwrap_err();

        assert_eq!(
            err,
            TransitionError::InvalidTransition {
                from: JobStatus::Unassigned,
                to: JobStatus::Completed,
            }
        );
    }
}
