//! Board filters
//!
//! Filters compose as a pure intersection and never reorder jobs. Search is
//! case-insensitive over customer name and address; phone numbers are
//! matched as a raw substring. Date ranges are evaluated against the clock
//! the caller passes in, and any range other than `All` excludes
//! unscheduled jobs.

use chrono::{DateTime, Datelike, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::job::{Job, JobStatus, JobType, Priority};

/// Filter selection for the dispatch board
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardFilters {
    #[serde(default)]
    pub technician: Option<Uuid>,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub job_type: Option<JobType>,
    #[serde(default)]
    pub date_range: DateRange,
}

impl BoardFilters {
    /// Whether a job passes every active filter
    pub fn matches(&self, job: &Job, now: DateTime<Utc>) -> bool {
        if let Some(technician) = self.technician {
            if job.assigned_to != Some(technician) {
                return false;
            }
        }

        let query = self.search.trim().to_lowercase();
        if !query.is_empty() {
            let hit = job.customer_name.to_lowercase().contains(&query)
                || job.address.to_lowercase().contains(&query)
                || job.customer_phone.contains(&query);
            if !hit {
                return false;
            }
        }

        if let Some(priority) = self.priority {
            if job.priority != priority {
                return false;
            }
        }

        if let Some(job_type) = self.job_type {
            if job.job_type != job_type {
                return false;
            }
        }

        self.date_range.contains(job.scheduled_at, job.status, now)
    }

    /// Apply the filters to a job list, preserving input order
    pub fn apply<'a>(&self, jobs: &'a [Job], now: DateTime<Utc>) -> Vec<&'a Job> {
        jobs.iter().filter(|job| self.matches(job, now)).collect()
    }
}

/// Scheduled-date window for the board
///
/// Weeks end on the upcoming Sunday at midnight; the next week runs from
/// the day after through the following seven days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRange {
    #[default]
    All,
    Today,
    Tomorrow,
    ThisWeek,
    NextWeek,
    Overdue,
}

impl DateRange {
    /// Whether a job's schedule falls in this window
    pub fn contains(
        &self,
        scheduled_at: Option<DateTime<Utc>>,
        status: JobStatus,
        now: DateTime<Utc>,
    ) -> bool {
        if *self == DateRange::All {
            return true;
        }

        let Some(scheduled) = scheduled_at else {
            return false;
        };

        let today = now.date_naive();
        let today_start = today.and_hms_opt(0, 0, 0).unwrap().and_utc();
        let days_to_sunday = 7 - today.weekday().num_days_from_sunday() as i64;
        let end_of_week = today_start + Duration::days(days_to_sunday);

        match self {
            DateRange::All => true,
            DateRange::Today => scheduled.date_naive() == today,
            DateRange::Tomorrow => scheduled.date_naive() == today + Duration::days(1),
            DateRange::ThisWeek => scheduled >= today_start && scheduled <= end_of_week,
            DateRange::NextWeek => {
                let start = end_of_week + Duration::days(1);
                let end = start + Duration::days(7);
                scheduled >= start && scheduled <= end
            }
            DateRange::Overdue => scheduled < today_start && status != JobStatus::Completed,
        }
    }
}
