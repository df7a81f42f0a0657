//! Board view DTOs

use serde::{Deserialize, Serialize};

use crate::domain::job::{Job, JobStatus};

/// The five board lanes, in display order
pub const LANE_STATUSES: [JobStatus; 5] = [
    JobStatus::Unassigned,
    JobStatus::Scheduled,
    JobStatus::EnRoute,
    JobStatus::InProgress,
    JobStatus::Completed,
];

/// Lane-partitioned view of the dispatch board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardView {
    pub lanes: Vec<BoardLane>,
}

impl BoardView {
    /// Lane for a given status, if it is one of the five board lanes
    pub fn lane(&self, status: JobStatus) -> Option<&BoardLane> {
        self.lanes.iter().find(|l| l.status == status)
    }
}

/// One board lane with its jobs and count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardLane {
    pub status: JobStatus,
    pub count: usize,
    pub jobs: Vec<Job>,
}
