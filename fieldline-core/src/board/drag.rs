//! Drag-and-drop resolution
//!
//! Pointer-driven card dragging with an 8-unit activation threshold, so a
//! plain click never starts a drag. Dropping on a lane targets that lane's
//! status; dropping on another card targets that card's status. Resolution
//! yields a [`MoveRequest`] for the caller to persist, or nothing when the
//! drop is a no-op.

use uuid::Uuid;

use crate::domain::job::{Job, JobStatus};
use crate::dto::board::LANE_STATUSES;

/// Pointer travel required before a drag activates
pub const ACTIVATION_DISTANCE: f32 = 8.0;

/// Tracks one pointer interaction with a board card
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
enum DragState {
    #[default]
    Idle,
    Pending {
        job_id: Uuid,
        origin: (f32, f32),
    },
    Active {
        job_id: Uuid,
    },
}

/// What the pointer was released over
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DropTarget {
    Lane(JobStatus),
    Card(Uuid),
}

/// A resolved drag that the caller should persist
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveRequest {
    pub job_id: Uuid,
    pub to: JobStatus,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer pressed on a card
    pub fn begin(&mut self, job_id: Uuid, x: f32, y: f32) {
        self.state = DragState::Pending {
            job_id,
            origin: (x, y),
        };
    }

    /// Pointer moved; activates the drag once it travels far enough
    pub fn update(&mut self, x: f32, y: f32) {
        if let DragState::Pending { job_id, origin } = self.state {
            let (dx, dy) = (x - origin.0, y - origin.1);
            if (dx * dx + dy * dy).sqrt() >= ACTIVATION_DISTANCE {
                self.state = DragState::Active { job_id };
            }
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, DragState::Active { .. })
    }

    pub fn dragged_job(&self) -> Option<Uuid> {
        match self.state {
            DragState::Active { job_id } => Some(job_id),
            _ => None,
        }
    }

    /// Pointer released
    ///
    /// Returns the move to persist, or `None` when the interaction never
    /// activated, the target is unresolvable, or the job is already in the
    /// target lane. Within-lane drops never produce a move.
    pub fn end(&mut self, target: Option<DropTarget>, jobs: &[Job]) -> Option<MoveRequest> {
        let state = std::mem::take(&mut self.state);

        let DragState::Active { job_id } = state else {
            return None;
        };

        let dragged = jobs.iter().find(|j| j.id == job_id)?;
        let to = match target? {
            DropTarget::Lane(status) => status,
            DropTarget::Card(card_id) => jobs.iter().find(|j| j.id == card_id)?.status,
        };

        if !LANE_STATUSES.contains(&to) {
            return None;
        }
        if dragged.status == to {
            return None;
        }

        Some(MoveRequest { job_id, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::job::{JobType, Priority};
    use crate::dto::job::CreateJobInput;
    use crate::engine::{Actor, edit};

    fn job(status: JobStatus) -> Job {
        let actor = Actor::new(Uuid::new_v4(), "Dana");
        let input = CreateJobInput {
            customer_name: "Jane Doe".to_string(),
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
        let mut job =
            edit::create(Uuid::new_v4(), input, &actor, "2026-03-04T12:00:00Z".parse().unwrap())
                .unwrap();
        job.status = status;
        job
    }

    #[test]
    fn test_click_without_travel_never_activates() {
        let jobs = vec![job(JobStatus::Scheduled)];
        let mut drag = DragController::new();

        drag.begin(jobs[0].id, 100.0, 100.0);
        drag.update(103.0, 104.0);
        assert!(!drag.is_active());

        let request = drag.end(Some(DropTarget::Lane(JobStatus::InProgress)), &jobs);
        assert!(request.is_none());
    }

    #[test]
    fn test_drag_activates_at_threshold() {
        let jobs = vec![job(JobStatus::Scheduled)];
        let mut drag = DragController::new();

        drag.begin(jobs[0].id, 100.0, 100.0);
        drag.update(108.0, 100.0);

        assert!(drag.is_active());
        assert_eq!(drag.dragged_job(), Some(jobs[0].id));
    }

    #[test]
    fn test_lane_drop_yields_move_to_lane_status() {
        let jobs = vec![job(JobStatus::Scheduled)];
        let mut drag = DragController::new();
        drag.begin(jobs[0].id, 0.0, 0.0);
        drag.update(20.0, 0.0);

        let request = drag
            .end(Some(DropTarget::Lane(JobStatus::InProgress)), &jobs)
            .unwrap();

        assert_eq!(request.job_id, jobs[0].id);
        assert_eq!(request.to, JobStatus::InProgress);
        assert!(!drag.is_active());
    }

    #[test]
    fn test_card_drop_inherits_that_cards_status() {
        let jobs = vec![job(JobStatus::Scheduled), job(JobStatus::EnRoute)];
        let mut drag = DragController::new();
        drag.begin(jobs[0].id, 0.0, 0.0);
        drag.update(20.0, 0.0);

        let request = drag.end(Some(DropTarget::Card(jobs[1].id)), &jobs).unwrap();

        assert_eq!(request.to, JobStatus::EnRoute);
    }

    #[test]
    fn test_same_lane_drop_is_noop() {
        let jobs = vec![job(JobStatus::Scheduled), job(JobStatus::Scheduled)];
        let mut drag = DragController::new();
        drag.begin(jobs[0].id, 0.0, 0.0);
        drag.update(20.0, 0.0);

        let request = drag.end(Some(DropTarget::Card(jobs[1].id)), &jobs);

        assert!(request.is_none());
    }

    #[test]
    fn test_drop_outside_any_target_is_noop() {
        let jobs = vec![job(JobStatus::Scheduled)];
        let mut drag = DragController::new();
        drag.begin(jobs[0].id, 0.0, 0.0);
        drag.update(20.0, 0.0);

        let request = drag.end(None, &jobs);

        assert!(request.is_none());
        assert!(!drag.is_active());
    }

    #[test]
    fn test_cancelled_is_not_a_drop_target() {
        let jobs = vec![job(JobStatus::Scheduled)];
        let mut drag = DragController::new();
        drag.begin(jobs[0].id, 0.0, 0.0);
        drag.update(20.0, 0.0);

        let request = drag.end(Some(DropTarget::Lane(JobStatus::Cancelled)), &jobs);

        assert!(request.is_none());
    }
}
