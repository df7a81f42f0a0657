//! Job domain types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::activity::ActivityEntry;

/// A field-service job record
///
/// Structure shared between the server (persists) and clients (display and
/// technician updates). One record per job, scoped to a company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: Uuid,
    pub company_id: Uuid,
    pub customer_name: String,
    pub customer_phone: String,
    pub address: String,
    pub job_type: JobType,
    pub priority: Priority,
    pub status: JobStatus,
    pub scheduled_at: Option<chrono::DateTime<chrono::Utc>>,
    pub assigned_to: Option<Uuid>,
    pub assigned_to_name: Option<String>,
    pub notes: String,
    pub photos: Vec<String>,
    pub signature: Option<String>,
    pub tech_notes: String,
    pub job_duration_secs: Option<i64>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub en_route_at: Option<chrono::DateTime<chrono::Utc>>,
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_by: Uuid,
    pub activity_log: Vec<ActivityEntry>,
}

/// Job lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Unassigned,
    Scheduled,
    EnRoute,
    InProgress,
    Completed,
    Cancelled,
}

impl JobStatus {
    /// Wire representation, also used as the activity-log value
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Unassigned => "unassigned",
            JobStatus::Scheduled => "scheduled",
            JobStatus::EnRoute => "en_route",
            JobStatus::InProgress => "in_progress",
            JobStatus::Completed => "completed",
            JobStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<JobStatus> {
        match s {
            "unassigned" => Some(JobStatus::Unassigned),
            "scheduled" => Some(JobStatus::Scheduled),
            "en_route" => Some(JobStatus::EnRoute),
            "in_progress" => Some(JobStatus::InProgress),
            "completed" => Some(JobStatus::Completed),
            "cancelled" => Some(JobStatus::Cancelled),
            _ => None,
        }
    }

    /// Terminal statuses accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Cancelled)
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of work a job involves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    Installation,
    Repair,
    Maintenance,
    Inspection,
    Emergency,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::Installation => "installation",
            JobType::Repair => "repair",
            JobType::Maintenance => "maintenance",
            JobType::Inspection => "inspection",
            JobType::Emergency => "emergency",
        }
    }

    pub fn parse(s: &str) -> Option<JobType> {
        match s {
            "installation" => Some(JobType::Installation),
            "repair" => Some(JobType::Repair),
            "maintenance" => Some(JobType::Maintenance),
            "inspection" => Some(JobType::Inspection),
            "emergency" => Some(JobType::Emergency),
            _ => None,
        }
    }
}

/// Dispatch priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn parse(s: &str) -> Option<Priority> {
        match s {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}
