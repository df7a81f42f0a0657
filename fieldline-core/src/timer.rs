//! Per-job elapsed-time tracking
//!
//! Timers accumulate across start/pause cycles and are independent per job.
//! [`TimerSet`] is the serializable collection the client persists; the
//! accumulated seconds feed `job_duration_secs` at completion and are never
//! reconciled into the job record before then.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Elapsed-time tracker for a single job
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobTimer {
    accumulated_secs: i64,
    running_since: Option<DateTime<Utc>>,
}

impl JobTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the timer; a running timer is unaffected
    pub fn start(&mut self, now: DateTime<Utc>) {
        if self.running_since.is_none() {
            self.running_since = Some(now);
        }
    }

    /// Pause the timer, folding the running span into the accumulator
    pub fn pause(&mut self, now: DateTime<Utc>) {
        if let Some(since) = self.running_since.take() {
            self.accumulated_secs += (now - since).num_seconds().max(0);
        }
    }

    /// Discard all accumulated time and stop
    pub fn reset(&mut self) {
        self.accumulated_secs = 0;
        self.running_since = None;
    }

    pub fn is_running(&self) -> bool {
        self.running_since.is_some()
    }

    /// Total elapsed seconds, including the currently running span
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> i64 {
        let running = self
            .running_since
            .map(|since| (now - since).num_seconds().max(0))
            .unwrap_or(0);
        self.accumulated_secs + running
    }
}

/// All of a technician's job timers, keyed by job id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimerSet {
    timers: HashMap<Uuid, JobTimer>,
}

impl TimerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn get(&self, job_id: Uuid) -> Option<&JobTimer> {
        self.timers.get(&job_id)
    }

    pub fn start(&mut self, job_id: Uuid, now: DateTime<Utc>) {
        self.timers.entry(job_id).or_default().start(now);
    }

    pub fn pause(&mut self, job_id: Uuid, now: DateTime<Utc>) {
        if let Some(timer) = self.timers.get_mut(&job_id) {
            timer.pause(now);
        }
    }

    pub fn reset(&mut self, job_id: Uuid) {
        if let Some(timer) = self.timers.get_mut(&job_id) {
            timer.reset();
        }
    }

    /// Elapsed seconds for a job; zero when no timer exists
    pub fn elapsed_secs(&self, job_id: Uuid, now: DateTime<Utc>) -> i64 {
        self.timers
            .get(&job_id)
            .map(|t| t.elapsed_secs(now))
            .unwrap_or(0)
    }

    /// Drop a job's timer entirely (after completion)
    pub fn remove(&mut self, job_id: Uuid) {
        self.timers.remove(&job_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn at(secs: i64) -> DateTime<Utc> {
        let base: DateTime<Utc> = "2026-03-04T12:00:00Z".parse().unwrap();
        base + Duration::seconds(secs)
    }

    #[test]
    fn test_timer_accumulates_across_cycles() {
        let mut timer = JobTimer::new();

        timer.start(at(0));
        timer.pause(at(60));
        timer.start(at(300));
        timer.pause(at(330));

        assert_eq!(timer.elapsed_secs(at(400)), 90);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_running_timer_counts_live() {
        let mut timer = JobTimer::new();

        timer.start(at(0));

        assert!(timer.is_running());
        assert_eq!(timer.elapsed_secs(at(45)), 45);
    }

    #[test]
    fn test_start_while_running_is_noop() {
        let mut timer = JobTimer::new();

        timer.start(at(0));
        timer.start(at(30));
        timer.pause(at(60));

        assert_eq!(timer.elapsed_secs(at(60)), 60);
    }

    #[test]
    fn test_reset_discards_everything() {
        let mut timer = JobTimer::new();

        timer.start(at(0));
        timer.pause(at(60));
        timer.reset();

        assert_eq!(timer.elapsed_secs(at(120)), 0);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_timers_are_independent_per_job() {
        let mut timers = TimerSet::new();
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        timers.start(a, at(0));
        timers.start(b, at(0));
        timers.pause(a, at(60));
        timers.pause(b, at(90));

        assert_eq!(timers.elapsed_secs(a, at(100)), 60);
        assert_eq!(timers.elapsed_secs(b, at(100)), 90);
    }

    #[test]
    fn test_missing_timer_reads_zero() {
        let timers = TimerSet::new();

        assert_eq!(timers.elapsed_secs(Uuid::new_v4(), at(0)), 0);
    }

    #[test]
    fn test_remove_clears_a_jobs_timer() {
        let mut timers = TimerSet::new();
        let job = Uuid::new_v4();

        timers.start(job, at(0));
        timers.pause(job, at(60));
        timers.remove(job);

        assert!(timers.is_empty());
        assert_eq!(timers.elapsed_secs(job, at(60)), 0);
    }
}
