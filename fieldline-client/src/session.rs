//! Client sessions
//!
//! The server trusts identity headers forwarded by the gateway; in
//! development and tooling the client sets them directly from a [`Session`].
//! [`TechSession`] layers the technician's locally persisted job timers on
//! top of the API client.

use chrono::Utc;
use fieldline_core::domain::job::Job;
use fieldline_core::timer::TimerSet;
use uuid::Uuid;

use crate::FieldlineClient;
use crate::error::Result;
use crate::timer_store::TimerStore;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_NAME_HEADER: &str = "x-user-name";
pub const COMPANY_ID_HEADER: &str = "x-company-id";
pub const ROLE_HEADER: &str = "x-role";

/// Who the client is acting as
#[derive(Debug, Clone)]
pub struct Session {
    pub user_id: Uuid,
    pub user_name: String,
    pub company_id: Uuid,
    pub role: SessionRole,
}

/// The acting role, mirrored in the role header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRole {
    Dispatcher,
    Technician,
}

impl SessionRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionRole::Dispatcher => "dispatcher",
            SessionRole::Technician => "technician",
        }
    }
}

impl Session {
    /// A dispatcher session
    pub fn dispatcher(user_id: Uuid, user_name: impl Into<String>, company_id: Uuid) -> Self {
        Self {
            user_id,
            user_name: user_name.into(),
            company_id,
            role: SessionRole::Dispatcher,
        }
    }

    /// A technician session
    pub fn technician(user_id: Uuid, user_name: impl Into<String>, company_id: Uuid) -> Self {
        Self {
            user_id,
            user_name: user_name.into(),
            company_id,
            role: SessionRole::Technician,
        }
    }
}

/// A technician's app session: the API client plus persisted job timers
///
/// Timer mutations are written to the store immediately, so elapsed time
/// survives an app restart mid-job. The timer only ever reaches the server
/// at completion, as the job's recorded duration.
pub struct TechSession {
    client: FieldlineClient,
    store: TimerStore,
    timers: TimerSet,
}

impl TechSession {
    /// Open a session, picking up any timers persisted by earlier runs
    pub fn open(client: FieldlineClient, store: TimerStore) -> Result<Self> {
        let timers = store.load()?;
        Ok(Self {
            client,
            store,
            timers,
        })
    }

    /// The underlying API client
    pub fn client(&self) -> &FieldlineClient {
        &self.client
    }

    /// Whether a job's timer is currently running
    pub fn is_timing(&self, job_id: Uuid) -> bool {
        self.timers
            .get(job_id)
            .map(|t| t.is_running())
            .unwrap_or(false)
    }

    /// Elapsed seconds on a job's timer, including the running span
    pub fn elapsed_secs(&self, job_id: Uuid) -> i64 {
        self.timers.elapsed_secs(job_id, Utc::now())
    }

    /// Start (or resume) a job's timer
    pub fn start_timer(&mut self, job_id: Uuid) -> Result<()> {
        self.timers.start(job_id, Utc::now());
        self.store.save(&self.timers)
    }

    /// Pause a job's timer, keeping the accumulated time
    pub fn pause_timer(&mut self, job_id: Uuid) -> Result<()> {
        self.timers.pause(job_id, Utc::now());
        self.store.save(&self.timers)
    }

    /// Discard a job's accumulated time
    pub fn reset_timer(&mut self, job_id: Uuid) -> Result<()> {
        self.timers.reset(job_id);
        self.store.save(&self.timers)
    }

    /// List the session's open jobs
    pub async fn my_jobs(&self) -> Result<Vec<Job>> {
        self.client.my_jobs().await
    }

    /// Mark a job en route
    pub async fn mark_en_route(&self, job_id: Uuid) -> Result<Job> {
        self.client.mark_en_route(job_id).await
    }

    /// Start work on a job; its timer starts with it
    pub async fn start_work(&mut self, job_id: Uuid) -> Result<Job> {
        let job = self.client.start_work(job_id).await?;
        self.start_timer(job_id)?;
        Ok(job)
    }

    /// Complete a job with the timer's accumulated seconds
    ///
    /// The timer is paused and persisted before the request goes out, so a
    /// failed completion keeps the elapsed time. On success the job's timer
    /// is dropped from the store.
    pub async fn complete_job(&mut self, job_id: Uuid) -> Result<Job> {
        self.pause_timer(job_id)?;
        let duration = self.timers.elapsed_secs(job_id, Utc::now());

        let job = self.client.complete_job(job_id, duration).await?;

        self.timers.remove(job_id);
        self.store.save(&self.timers)?;
        Ok(job)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tech_session(dir: &std::path::Path) -> TechSession {
        let client = FieldlineClient::new(
            "http://localhost:8080",
            Session::technician(Uuid::new_v4(), "Bob", Uuid::new_v4()),
        );
        TechSession::open(client, TimerStore::at(dir.join("timers.json"))).unwrap()
    }

    #[test]
    fn test_timer_survives_session_restart() {
        let dir = tempfile::tempdir().unwrap();
        let job_id = Uuid::new_v4();

        let mut session = tech_session(dir.path());
        session.start_timer(job_id).unwrap();
        session.pause_timer(job_id).unwrap();
        drop(session);

        let session = tech_session(dir.path());
        assert!(!session.is_timing(job_id));
        assert!(session.elapsed_secs(job_id) >= 0);
    }

    #[test]
    fn test_start_and_pause_toggle_running() {
        let dir = tempfile::tempdir().unwrap();
        let job_id = Uuid::new_v4();
        let mut session = tech_session(dir.path());

        session.start_timer(job_id).unwrap();
        assert!(session.is_timing(job_id));

        session.pause_timer(job_id).unwrap();
        assert!(!session.is_timing(job_id));
    }

    #[test]
    fn test_reset_discards_accumulated_time() {
        let dir = tempfile::tempdir().unwrap();
        let job_id = Uuid::new_v4();
        let mut session = tech_session(dir.path());

        session.start_timer(job_id).unwrap();
        session.pause_timer(job_id).unwrap();
        session.reset_timer(job_id).unwrap();

        assert_eq!(session.elapsed_secs(job_id), 0);
    }

    #[test]
    fn test_role_strings() {
        assert_eq!(SessionRole::Dispatcher.as_str(), "dispatcher");
        assert_eq!(SessionRole::Technician.as_str(), "technician");
    }

    #[test]
    fn test_session_constructors_set_role() {
        let company = Uuid::new_v4();

        let d = Session::dispatcher(Uuid::new_v4(), "Dana", company);
        assert_eq!(d.role, SessionRole::Dispatcher);

        let t = Session::technician(Uuid::new_v4(), "Bob", company);
        assert_eq!(t.role, SessionRole::Technician);
        assert_eq!(t.company_id, company);
    }
}
