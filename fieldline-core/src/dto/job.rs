//! Job request DTOs

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::job::{JobStatus, JobType, Priority};

/// Request to create a new job
///
/// `scheduled_time` is optional even when a date is given; a date without a
/// time schedules the job for 09:00. `assigned_to_name` is denormalized from
/// the technician record; the server resolves it from `assigned_to` and
/// overrides whatever the caller sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJobInput {
    pub customer_name: String,
    pub customer_phone: String,
    pub address: String,
    pub job_type: JobType,
    pub priority: Priority,
    #[serde(default)]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(default)]
    pub scheduled_time: Option<NaiveTime>,
    #[serde(default)]
    pub assigned_to: Option<Uuid>,
    #[serde(default)]
    pub assigned_to_name: Option<String>,
    #[serde(default)]
    pub notes: String,
}

/// Partial update to a job; `None` fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobPatch {
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub job_type: Option<JobType>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub schedule: Option<ScheduleChange>,
    #[serde(default)]
    pub assignment: Option<AssignmentChange>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Change to a job's scheduled time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum ScheduleChange {
    Set {
        date: NaiveDate,
        #[serde(default)]
        time: Option<NaiveTime>,
    },
    Clear,
}

/// Change to a job's technician assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum AssignmentChange {
    Assign {
        technician_id: Uuid,
        technician_name: String,
    },
    Unassign,
}

/// Request body for the board drag-move endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveJobRequest {
    pub to: JobStatus,
}

/// Request body for technician job completion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompleteJobRequest {
    pub duration_secs: i64,
}

/// Request body for attaching a photo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddPhotoRequest {
    pub url: String,
}

/// Request body for setting the customer signature
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetSignatureRequest {
    pub url: String,
}

/// Request body for setting technician notes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetTechNotesRequest {
    pub notes: String,
}
