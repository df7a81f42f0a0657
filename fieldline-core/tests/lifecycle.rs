//! End-to-end job lifecycle against an in-memory job list
//!
//! Walks one job from creation through assignment, the technician's forward
//! path, and completion with artifacts, checking the board view and the
//! activity log at each step.

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use fieldline_core::board::Projector;
use fieldline_core::domain::activity::ActivityKind;
use fieldline_core::domain::job::{JobStatus, JobType, Priority};
use fieldline_core::dto::job::{AssignmentChange, CreateJobInput, JobPatch};
use fieldline_core::engine::{Actor, edit, field, transition};
use fieldline_core::timer::TimerSet;

fn at(minutes: i64) -> DateTime<Utc> {
    let base: DateTime<Utc> = "2026-03-04T08:00:00Z".parse().unwrap();
    base + Duration::minutes(minutes)
}

#[test]
fn test_full_job_lifecycle() {
    let dispatcher = Actor::new(Uuid::new_v4(), "Dana Dispatcher");
    let company_id = Uuid::new_v4();

    // Dispatcher creates the job.
    let input = CreateJobInput {
        customer_name: "Jane Doe".to_string(),
        customer_phone: "555-0100".to_string(),
        address: "1 Elm St".to_string(),
        job_type: JobType::Repair,
        priority: Priority::High,
        scheduled_date: Some("2026-03-04".parse().unwrap()),
        scheduled_time: None,
        assigned_to: None,
        assigned_to_name: None,
        notes: String::new(),
    };
    let job = edit::create(company_id, input, &dispatcher, at(0)).unwrap();
    let job_id = job.id;

    assert_eq!(job.status, JobStatus::Unassigned);
    assert_eq!(job.scheduled_at.unwrap().to_rfc3339(), "2026-03-04T09:00:00+00:00");

    let mut jobs = vec![job];

    // The board shows it in the unassigned lane.
    let mut projector = Projector::new();
    projector.apply_snapshot(jobs.clone());
    let view = projector.view(at(1));
    assert_eq!(view.lane(JobStatus::Unassigned).unwrap().count, 1);

    // Dispatcher assigns Bob; the job schedules itself.
    let bob_id = Uuid::new_v4();
    let bob = Actor::new(bob_id, "Bob");
    let patch = JobPatch {
        assignment: Some(AssignmentChange::Assign {
            technician_id: bob_id,
            technician_name: "Bob".to_string(),
        }),
        ..Default::default()
    };
    let entries = edit::apply_edit(&mut jobs[0], patch, &dispatcher, at(5)).unwrap();

    assert_eq!(jobs[0].status, JobStatus::Scheduled);
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].kind, ActivityKind::Assigned);

    projector.apply_snapshot(jobs.clone());
    let view = projector.view(at(6));
    assert_eq!(view.lane(JobStatus::Unassigned).unwrap().count, 0);
    assert_eq!(view.lane(JobStatus::Scheduled).unwrap().count, 1);

    // Bob heads out, arrives, and starts the clock.
    transition::mark_en_route(&mut jobs[0], &bob, at(30)).unwrap();
    assert_eq!(jobs[0].status, JobStatus::EnRoute);
    assert_eq!(jobs[0].en_route_at, Some(at(30)));

    transition::start_work(&mut jobs[0], &bob, at(50)).unwrap();
    assert_eq!(jobs[0].status, JobStatus::InProgress);
    assert_eq!(jobs[0].started_at, Some(at(50)));

    let mut timers = TimerSet::new();
    timers.start(job_id, at(50));

    // Completion is blocked until every artifact is in place.
    let err = transition::complete(&mut jobs[0], 0, &bob, at(60)).unwrap_err();
    assert_eq!(
        err,
        fieldline_core::engine::TransitionError::MissingArtifact("photo")
    );

    field::attach_photo(&mut jobs[0], "https://cdn.example/before.jpg", &bob, at(90)).unwrap();
    field::attach_photo(&mut jobs[0], "https://cdn.example/after.jpg", &bob, at(110)).unwrap();
    field::set_signature(&mut jobs[0], "https://cdn.example/sig.png", &bob, at(115));
    field::set_tech_notes(&mut jobs[0], "Replaced the faulty valve", &bob, at(118));

    // Bob pauses for a break partway through.
    timers.pause(job_id, at(80));
    timers.start(job_id, at(95));
    timers.pause(job_id, at(120));

    let duration = timers.elapsed_secs(job_id, at(120));
    assert_eq!(duration, 55 * 60);

    transition::complete(&mut jobs[0], duration, &bob, at(120)).unwrap();
    timers.remove(job_id);

    assert_eq!(jobs[0].status, JobStatus::Completed);
    assert_eq!(jobs[0].completed_at, Some(at(120)));
    assert_eq!(jobs[0].job_duration_secs, Some(55 * 60));
    assert!(timers.is_empty());

    // Completed lane on the board.
    projector.apply_snapshot(jobs.clone());
    let view = projector.view(at(121));
    assert_eq!(view.lane(JobStatus::Completed).unwrap().count, 1);
    assert_eq!(view.lane(JobStatus::InProgress).unwrap().count, 0);

    // The activity log tells the whole story in order.
    let kinds: Vec<ActivityKind> = jobs[0].activity_log.iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ActivityKind::Created,
            ActivityKind::Assigned,
            ActivityKind::StatusChanged, // en route
            ActivityKind::StatusChanged, // in progress
            ActivityKind::Updated,       // photo
            ActivityKind::Updated,       // photo
            ActivityKind::Updated,       // signature
            ActivityKind::NoteAdded,     // technician notes
            ActivityKind::StatusChanged, // completed
        ]
    );

    let timestamps: Vec<DateTime<Utc>> =
        jobs[0].activity_log.iter().map(|e| e.timestamp).collect();
    let mut sorted = timestamps.clone();
    sorted.sort();
    assert_eq!(timestamps, sorted);
}
