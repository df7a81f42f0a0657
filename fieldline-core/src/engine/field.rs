//! Technician field artifact updates
//!
//! Photos, customer signature, and technician notes. These are the
//! completion artifacts; attaching them does not change status.

use chrono::{DateTime, Utc};

use crate::domain::activity::{ActivityEntry, ActivityKind};
use crate::domain::job::Job;
use crate::engine::{Actor, MAX_PHOTOS, TransitionError};

/// Attach a photo URL; the job holds at most [`MAX_PHOTOS`]
pub fn attach_photo(
    job: &mut Job,
    url: impl Into<String>,
    actor: &Actor,
    now: DateTime<Utc>,
) -> Result<Vec<ActivityEntry>, TransitionError> {
    if job.photos.len() >= MAX_PHOTOS {
        return Err(TransitionError::PhotoLimitReached);
    }

    let url = url.into();
    let entry = ActivityEntry::diff(
        ActivityKind::Updated,
        "photo",
        None,
        Some(url.clone()),
        &actor.name,
        now,
    );

    job.photos.push(url);
    job.updated_at = now;
    job.activity_log.push(entry.clone());

    Ok(vec![entry])
}

/// Set or replace the customer signature URL
pub fn set_signature(
    job: &mut Job,
    url: impl Into<String>,
    actor: &Actor,
    now: DateTime<Utc>,
) -> Vec<ActivityEntry> {
    let url = url.into();
    let entry = ActivityEntry::diff(
        ActivityKind::Updated,
        "signature",
        job.signature.clone(),
        Some(url.clone()),
        &actor.name,
        now,
    );

    job.signature = Some(url);
    job.updated_at = now;
    job.activity_log.push(entry.clone());

    vec![entry]
}

/// Set the technician's work notes
pub fn set_tech_notes(
    job: &mut Job,
    notes: impl Into<String>,
    actor: &Actor,
    now: DateTime<Utc>,
) -> Vec<ActivityEntry> {
    let notes = notes.into();
    let old = if job.tech_notes.is_empty() {
        None
    } else {
        Some(job.tech_notes.clone())
    };
    let entry = ActivityEntry::diff(
        ActivityKind::NoteAdded,
        "technician notes",
        old,
        Some(notes.clone()),
        &actor.name,
        now,
    );

    job.tech_notes = notes;
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

    fn job() -> Job {
        let input = CreateJobInput {
            customer_name: "Jane Doe".to_string(),
            customer_phone: "555-0100".to_string(),
            address: "1 Elm St".to_string(),
            job_type: JobType::Repair,
            priority: Priority::High,
            scheduled_date: None,
            scheduled_time: None,
            assigned_to: None,
            assigned_to_name: None,
            notes: String::new(),
        };
        edit::create(Uuid::new_v4(), input, &actor(), now()).unwrap()
    }

    #[test]
    fn test_attach_photo_appends_url_and_entry() {
        let mut job = job();

        let entries = attach_photo(&mut job, "https://cdn.example/p1.jpg", &actor(), now()).unwrap();

        assert_eq!(job.photos, vec!["https://cdn.example/p1.jpg".to_string()]);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].field.as_deref(), Some("photo"));
    }

    #[test]
    fn test_sixth_photo_is_rejected_without_mutation() {
        let mut job = job();
        for i in 0..MAX_PHOTOS {
            attach_photo(&mut job, format!("https://cdn.example/p{}.jpg", i), &actor(), now())
                .unwrap();
        }
        let log_len = job.activity_log.len();

        let err = attach_photo(&mut job, "https://cdn.example/p6.jpg", &actor(), now()).unwrap_err();

        assert_eq!(err, TransitionError::PhotoLimitReached);
        assert_eq!(job.photos.len(), MAX_PHOTOS);
        assert_eq!(job.activity_log.len(), log_len);
    }

    #[test]
    fn test_set_signature_records_replacement() {
        let mut job = job();

        set_signature(&mut job, "https://cdn.example/sig1.png", &actor(), now());
        let entries = set_signature(&mut job, "https://cdn.example/sig2.png", &actor(), now());

        assert_eq!(job.signature.as_deref(), Some("https://cdn.example/sig2.png"));
        assert_eq!(
            entries[0].old_value.as_deref(),
            Some("https://cdn.example/sig1.png")
        );
    }

    #[test]
    fn test_set_tech_notes_logs_note_added() {
        let mut job = job();

        let entries = set_tech_notes(&mut job, "Replaced the valve", &actor(), now());

        assert_eq!(job.tech_notes, "Replaced the valve");
        assert_eq!(entries[0].kind, ActivityKind::NoteAdded);
        assert!(entries[0].old_value.is_none());
    }
}
