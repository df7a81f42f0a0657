//! Dispatcher write path
//!
//! Job creation, per-field edits with activity diffs, and the explicit
//! status override used by the details form, the board drag handler, and
//! cancellation. Edits batch all their activity entries into one append.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use crate::domain::activity::{ActivityEntry, ActivityKind};
use crate::domain::job::{Job, JobStatus};
use crate::dto::job::{AssignmentChange, CreateJobInput, JobPatch, ScheduleChange};
use crate::engine::{Actor, TransitionError, ValidationError};

/// Create a new job
///
/// Required fields are checked one by one so the error names the first
/// missing one. Status is derived from assignment: a job created with a
/// technician starts `Scheduled`, otherwise `Unassigned`. The activity log
/// starts with a single `created` entry.
pub fn create(
    company_id: Uuid,
    input: CreateJobInput,
    actor: &Actor,
    now: DateTime<Utc>,
) -> Result<Job, ValidationError> {
    require(&input.customer_name, "customer name")?;
    require(&input.customer_phone, "phone number")?;
    require(&input.address, "address")?;

    let scheduled_at = input
        .scheduled_date
        .map(|date| scheduled_datetime(date, input.scheduled_time));

    let status = if input.assigned_to.is_some() {
        JobStatus::Scheduled
    } else {
        JobStatus::Unassigned
    };

    Ok(Job {
        id: Uuid::new_v4(),
        company_id,
        customer_name: input.customer_name.trim().to_string(),
        customer_phone: input.customer_phone.trim().to_string(),
        address: input.address.trim().to_string(),
        job_type: input.job_type,
        priority: input.priority,
        status,
        scheduled_at,
        assigned_to: input.assigned_to,
        assigned_to_name: input.assigned_to_name,
        notes: input.notes,
        photos: Vec::new(),
        signature: None,
        tech_notes: String::new(),
        job_duration_secs: None,
        created_at: now,
        updated_at: now,
        en_route_at: None,
        started_at: None,
        completed_at: None,
        created_by: actor.id,
        activity_log: vec![ActivityEntry::event(ActivityKind::Created, &actor.name, now)],
    })
}

/// Apply a partial edit to a job
///
/// Each changed field yields one activity entry with the field's display
/// label and old/new values; all entries from one edit are appended as a
/// single batch. Assignment changes couple into status: assigning an
/// unassigned job schedules it (a job already past `Scheduled` keeps its
/// status), unassigning a non-terminal job returns it to `Unassigned`.
/// An edit that changes nothing still appends one generic `updated` entry.
pub fn apply_edit(
    job: &mut Job,
    patch: JobPatch,
    actor: &Actor,
    now: DateTime<Utc>,
) -> Result<Vec<ActivityEntry>, ValidationError> {
    if let Some(name) = &patch.customer_name {
        require(name, "customer name")?;
    }
    if let Some(phone) = &patch.customer_phone {
        require(phone, "phone number")?;
    }
    if let Some(address) = &patch.address {
        require(address, "address")?;
    }

    let mut entries = Vec::new();

    if let Some(name) = patch.customer_name {
        let name = name.trim().to_string();
        if name != job.customer_name {
            entries.push(ActivityEntry::diff(
                ActivityKind::Updated,
                "customer name",
                Some(job.customer_name.clone()),
                Some(name.clone()),
                &actor.name,
                now,
            ));
            job.customer_name = name;
        }
    }

    if let Some(phone) = patch.customer_phone {
        let phone = phone.trim().to_string();
        if phone != job.customer_phone {
            entries.push(ActivityEntry::diff(
                ActivityKind::Updated,
                "phone number",
                Some(job.customer_phone.clone()),
                Some(phone.clone()),
                &actor.name,
                now,
            ));
            job.customer_phone = phone;
        }
    }

    if let Some(address) = patch.address {
        let address = address.trim().to_string();
        if address != job.address {
            entries.push(ActivityEntry::diff(
                ActivityKind::Updated,
                "address",
                Some(job.address.clone()),
                Some(address.clone()),
                &actor.name,
                now,
            ));
            job.address = address;
        }
    }

    if let Some(job_type) = patch.job_type {
        if job_type != job.job_type {
            entries.push(ActivityEntry::diff(
                ActivityKind::Updated,
                "job type",
                Some(job.job_type.as_str().to_string()),
                Some(job_type.as_str().to_string()),
                &actor.name,
                now,
            ));
            job.job_type = job_type;
        }
    }

    if let Some(priority) = patch.priority {
        if priority != job.priority {
            entries.push(ActivityEntry::diff(
                ActivityKind::Updated,
                "priority",
                Some(job.priority.as_str().to_string()),
                Some(priority.as_str().to_string()),
                &actor.name,
                now,
            ));
            job.priority = priority;
        }
    }

    match patch.schedule {
        Some(ScheduleChange::Set { date, time }) => {
            let scheduled = scheduled_datetime(date, time);
            if job.scheduled_at != Some(scheduled) {
                entries.push(ActivityEntry::diff(
                    ActivityKind::Updated,
                    "scheduled time",
                    job.scheduled_at.map(format_schedule),
                    Some(format_schedule(scheduled)),
                    &actor.name,
                    now,
                ));
                job.scheduled_at = Some(scheduled);
            }
        }
        Some(ScheduleChange::Clear) => {
            if let Some(previous) = job.scheduled_at.take() {
                entries.push(ActivityEntry::diff(
                    ActivityKind::Updated,
                    "scheduled time",
                    Some(format_schedule(previous)),
                    None,
                    &actor.name,
                    now,
                ));
            }
        }
        None => {}
    }

    if let Some(notes) = patch.notes {
        if notes != job.notes {
            let old = if job.notes.is_empty() {
                None
            } else {
                Some(job.notes.clone())
            };
            entries.push(ActivityEntry::diff(
                ActivityKind::NoteAdded,
                "notes",
                old,
                Some(notes.clone()),
                &actor.name,
                now,
            ));
            job.notes = notes;
        }
    }

    match patch.assignment {
        Some(AssignmentChange::Assign {
            technician_id,
            technician_name,
        }) => {
            if job.assigned_to != Some(technician_id) {
                entries.push(ActivityEntry::diff(
                    ActivityKind::Assigned,
                    "technician",
                    job.assigned_to_name.clone(),
                    Some(technician_name.clone()),
                    &actor.name,
                    now,
                ));
                job.assigned_to = Some(technician_id);
                job.assigned_to_name = Some(technician_name);
                if job.status == JobStatus::Unassigned {
                    job.status = JobStatus::Scheduled;
                }
            }
        }
        Some(AssignmentChange::Unassign) => {
            if job.assigned_to.is_some() {
                entries.push(ActivityEntry::diff(
                    ActivityKind::Assigned,
                    "technician",
                    job.assigned_to_name.clone(),
                    None,
                    &actor.name,
                    now,
                ));
                job.assigned_to = None;
                job.assigned_to_name = None;
                if !job.status.is_terminal() {
                    job.status = JobStatus::Unassigned;
                }
            }
        }
        None => {}
    }

    if entries.is_empty() {
        entries.push(ActivityEntry::diff(
            ActivityKind::Updated,
            "general",
            None,
            None,
            &actor.name,
            now,
        ));
    }

    job.updated_at = now;
    job.activity_log.extend(entries.iter().cloned());

    Ok(entries)
}

/// Set a job's status directly, bypassing the forward-only machine
///
/// The dispatcher's escape hatch: any target status is accepted, including
/// `Cancelled`. A cancelled job accepts no further changes, and moving a job
/// to the status it already has is a no-op that appends nothing.
pub fn override_status(
    job: &mut Job,
    to: JobStatus,
    actor: &Actor,
    now: DateTime<Utc>,
) -> Result<Vec<ActivityEntry>, TransitionError> {
    if job.status == to {
        return Ok(Vec::new());
    }
    if job.status == JobStatus::Cancelled {
        return Err(TransitionError::InvalidTransition {
            from: job.status,
            to,
        });
    }

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

    Ok(vec![entry])
}

/// Combine a date with an optional time; a missing time means 09:00
pub fn scheduled_datetime(date: NaiveDate, time: Option<NaiveTime>) -> DateTime<Utc> {
    let time = time.unwrap_or_else(default_start_time);
    date.and_time(time).and_utc()
}

fn default_start_time() -> NaiveTime {
    NaiveTime::from_hms_opt(9, 0, 0).unwrap()
}

fn format_schedule(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M").to_string()
}

fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}
