//! Board projector
//!
//! Holds the authoritative job snapshot and projects it into the five-lane
//! board view. A pending move overlays at most one job into its target lane
//! before the store write lands; `confirm_move` commits the overlay into the
//! local snapshot and `revert_move` drops it, putting the job back in its
//! authoritative lane. Cancelled jobs appear in no lane.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::board::filters::BoardFilters;
use crate::domain::job::{Job, JobStatus};
use crate::dto::board::{BoardLane, BoardView, LANE_STATUSES};

/// Projects job snapshots into lane-partitioned board views
#[derive(Debug, Default)]
pub struct Projector {
    jobs: Vec<Job>,
    filters: BoardFilters,
    pending: Option<PendingMove>,
}

#[derive(Debug, Clone, Copy)]
struct PendingMove {
    job_id: Uuid,
    to: JobStatus,
}

impl Projector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the authoritative snapshot
    ///
    /// The snapshot's order is preserved in every lane, so callers should
    /// hand in jobs newest-first.
    pub fn apply_snapshot(&mut self, jobs: Vec<Job>) {
        self.jobs = jobs;
    }

    pub fn set_filters(&mut self, filters: BoardFilters) {
        self.filters = filters;
    }

    pub fn filters(&self) -> &BoardFilters {
        &self.filters
    }

    /// Overlay a job into a target lane ahead of the store write
    ///
    /// Only one move can be pending at a time; starting another replaces it.
    pub fn begin_move(&mut self, job_id: Uuid, to: JobStatus) {
        self.pending = Some(PendingMove { job_id, to });
    }

    pub fn pending_move(&self) -> Option<(Uuid, JobStatus)> {
        self.pending.map(|p| (p.job_id, p.to))
    }

    /// The store write succeeded: fold the overlay into the snapshot
    pub fn confirm_move(&mut self) {
        if let Some(pending) = self.pending.take() {
            if let Some(job) = self.jobs.iter_mut().find(|j| j.id == pending.job_id) {
                job.status = pending.to;
            }
        }
    }

    /// The store write failed: drop the overlay, restoring the source lane
    pub fn revert_move(&mut self) {
        self.pending = None;
    }

    /// Project the current snapshot through filters and the pending overlay
    pub fn view(&self, now: DateTime<Utc>) -> BoardView {
        let mut lanes: Vec<BoardLane> = LANE_STATUSES
            .iter()
            .map(|status| BoardLane {
                status: *status,
                count: 0,
                jobs: Vec::new(),
            })
            .collect();

        for job in &self.jobs {
            let status = match self.pending {
                Some(p) if p.job_id == job.id => p.to,
                _ => job.status,
            };

            if !self.filters.matches(job, now) {
                continue;
            }

            if let Some(lane) = lanes.iter_mut().find(|l| l.status == status) {
                lane.jobs.push(job.clone());
            }
        }

        for lane in &mut lanes {
            lane.count = lane.jobs.len();
        }

        BoardView { lanes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::job::{JobType, Priority};
    use crate::dto::job::CreateJobInput;
    use crate::engine::{Actor, edit};

    fn now() -> DateTime<Utc> {
        "2026-03-04T12:00:00Z".parse().unwrap()
    }

    fn job(name: &str, status: JobStatus) -> Job {
        let actor = Actor::new(Uuid::new_v4(), "Dana");
        let input = CreateJobInput {
            customer_name: name.to_string(),
            customer_phone: "555-0100".to_string(),
            address: "1 Elm St".to_string(),
            job_type: JobType::Repair,
            priority: Priority::Medium,
            scheduled_date: None,
            scheduled_time: None,
            assigned_to: None,
            assigned_to_name: None,
            notes: String::new(),
        };
        let mut job = edit::create(Uuid::new_v4(), input, &actor, now()).unwrap();
        job.status = status;
        job
    }

    #[test]
    fn test_view_partitions_into_five_lanes() {
        let mut projector = Projector::new();
        projector.apply_snapshot(vec![
            job("A", JobStatus::Unassigned),
            job("B", JobStatus::Scheduled),
            job("C", JobStatus::EnRoute),
            job("D", JobStatus::InProgress),
            job("E", JobStatus::Completed),
        ]);

        let view = projector.view(now());

        assert_eq!(view.lanes.len(), 5);
        for lane in &view.lanes {
            assert_eq!(lane.count, 1, "lane {:?}", lane.status);
        }
    }

    #[test]
    fn test_cancelled_jobs_appear_in_no_lane() {
        let mut projector = Projector::new();
        projector.apply_snapshot(vec![
            job("A", JobStatus::Scheduled),
            job("B", JobStatus::Cancelled),
        ]);

        let view = projector.view(now());

        let total: usize = view.lanes.iter().map(|l| l.count).sum();
        assert_eq!(total, 1);
    }

    #[test]
    fn test_lanes_preserve_snapshot_order() {
        let mut projector = Projector::new();
        projector.apply_snapshot(vec![
            job("Newest", JobStatus::Scheduled),
            job("Middle", JobStatus::Scheduled),
            job("Oldest", JobStatus::Scheduled),
        ]);

        let view = projector.view(now());

        let lane = view.lane(JobStatus::Scheduled).unwrap();
        let names: Vec<&str> = lane.jobs.iter().map(|j| j.customer_name.as_str()).collect();
        assert_eq!(names, vec!["Newest", "Middle", "Oldest"]);
    }

    #[test]
    fn test_pending_move_relocates_one_job() {
        let moving = job("A", JobStatus::Scheduled);
        let moving_id = moving.id;
        let mut projector = Projector::new();
        projector.apply_snapshot(vec![moving, job("B", JobStatus::Scheduled)]);

        projector.begin_move(moving_id, JobStatus::InProgress);
        let view = projector.view(now());

        assert_eq!(view.lane(JobStatus::Scheduled).unwrap().count, 1);
        assert_eq!(view.lane(JobStatus::InProgress).unwrap().count, 1);
        assert_eq!(
            view.lane(JobStatus::InProgress).unwrap().jobs[0].id,
            moving_id
        );
    }

    #[test]
    fn test_revert_restores_authoritative_lane() {
        let moving = job("A", JobStatus::Scheduled);
        let moving_id = moving.id;
        let mut projector = Projector::new();
        projector.apply_snapshot(vec![moving]);

        projector.begin_move(moving_id, JobStatus::InProgress);
        projector.revert_move();
        let view = projector.view(now());

        assert_eq!(view.lane(JobStatus::Scheduled).unwrap().count, 1);
        assert_eq!(view.lane(JobStatus::InProgress).unwrap().count, 0);
        assert!(projector.pending_move().is_none());
    }

    #[test]
    fn test_confirm_commits_move_into_snapshot() {
        let moving = job("A", JobStatus::Scheduled);
        let moving_id = moving.id;
        let mut projector = Projector::new();
        projector.apply_snapshot(vec![moving]);

        projector.begin_move(moving_id, JobStatus::InProgress);
        projector.confirm_move();
        let view = projector.view(now());

        assert_eq!(view.lane(JobStatus::InProgress).unwrap().count, 1);
        assert!(projector.pending_move().is_none());
    }

    #[test]
    fn test_filters_apply_to_view() {
        let mut high = job("Urgent", JobStatus::Scheduled);
        high.priority = Priority::High;
        let mut projector = Projector::new();
        projector.apply_snapshot(vec![high, job("Routine", JobStatus::Scheduled)]);
        projector.set_filters(BoardFilters {
            priority: Some(Priority::High),
            ..Default::default()
        });

        let view = projector.view(now());

        let lane = view.lane(JobStatus::Scheduled).unwrap();
        assert_eq!(lane.count, 1);
        assert_eq!(lane.jobs[0].customer_name, "Urgent");
    }
}
