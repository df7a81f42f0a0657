//! Dispatcher API endpoints
//!
//! Job CRUD, the board drag-move, and the technician roster. Every method
//! requires a dispatcher session; the server rejects technician sessions
//! with 403.

use crate::FieldlineClient;
use crate::error::Result;
use fieldline_core::board::BoardFilters;
use fieldline_core::domain::job::{Job, JobStatus};
use fieldline_core::domain::technician::Technician;
use fieldline_core::dto::board::BoardView;
use fieldline_core::dto::job::{CreateJobInput, JobPatch, MoveJobRequest};
use fieldline_core::dto::technician::CreateTechnician;
use reqwest::Method;
use uuid::Uuid;

impl FieldlineClient {
    // =============================================================================
    // Jobs
    // =============================================================================

    /// Create a new job
    ///
    /// # Arguments
    /// * `input` - The job creation request
    ///
    /// # Returns
    /// The created job
    ///
    /// # Example
    /// ```no_run
    /// # use fieldline_client::{FieldlineClient, Session};
    /// # use fieldline_core::domain::job::{JobType, Priority};
    /// # use fieldline_core::dto::job::CreateJobInput;
    /// # use uuid::Uuid;
    /// # async fn example() -> fieldline_client::Result<()> {
    /// # let session = Session::dispatcher(Uuid::new_v4(), "Dana", Uuid::new_v4());
    /// let client = FieldlineClient::new("http://localhost:8080", session);
    /// let job = client.create_job(CreateJobInput {
    ///     customer_name: "Jane Doe".to_string(),
    ///     customer_phone: "555-0100".to_string(),
    ///     address: "1 Elm St".to_string(),
    ///     job_type: JobType::Repair,
    ///     priority: Priority::Medium,
    ///     scheduled_date: None,
    ///     scheduled_time: None,
    ///     assigned_to: None,
    ///     assigned_to_name: None,
    ///     notes: String::new(),
    /// }).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_job(&self, input: CreateJobInput) -> Result<Job> {
        let response = self
            .request(Method::POST, "/jobs")
            .json(&input)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// List all of the company's jobs, newest first
    ///
    /// # Returns
    /// A list of all jobs
    pub async fn list_jobs(&self) -> Result<Vec<Job>> {
        let response = self.request(Method::GET, "/jobs").send().await?;

        self.handle_response(response).await
    }

    /// Get a job by ID
    ///
    /// # Arguments
    /// * `job_id` - The job UUID
    ///
    /// # Returns
    /// The job details
    pub async fn get_job(&self, job_id: Uuid) -> Result<Job> {
        let path = format!("/jobs/{}", job_id);
        let response = self.request(Method::GET, &path).send().await?;

        self.handle_response(response).await
    }

    /// Apply a partial update to a job
    ///
    /// # Arguments
    /// * `job_id` - The job UUID
    /// * `patch` - The fields to change; `None` fields are left untouched
    ///
    /// # Returns
    /// The updated job
    pub async fn update_job(&self, job_id: Uuid, patch: JobPatch) -> Result<Job> {
        let path = format!("/jobs/{}", job_id);
        let response = self
            .request(Method::PATCH, &path)
            .json(&patch)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Move a job to another board lane
    ///
    /// # Arguments
    /// * `job_id` - The job UUID
    /// * `to` - The target lane status
    ///
    /// # Returns
    /// The moved job
    pub async fn move_job(&self, job_id: Uuid, to: JobStatus) -> Result<Job> {
        let path = format!("/jobs/{}/move", job_id);
        let response = self
            .request(Method::POST, &path)
            .json(&MoveJobRequest { to })
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Cancel a job
    ///
    /// # Arguments
    /// * `job_id` - The job UUID
    ///
    /// # Returns
    /// The cancelled job
    pub async fn cancel_job(&self, job_id: Uuid) -> Result<Job> {
        let path = format!("/jobs/{}/cancel", job_id);
        let response = self.request(Method::POST, &path).send().await?;

        self.handle_response(response).await
    }

    /// Delete a job permanently
    ///
    /// # Arguments
    /// * `job_id` - The job UUID
    pub async fn delete_job(&self, job_id: Uuid) -> Result<()> {
        let path = format!("/jobs/{}", job_id);
        let response = self.request(Method::DELETE, &path).send().await?;

        self.handle_empty_response(response).await
    }

    // =============================================================================
    // Board
    // =============================================================================

    /// Get the filtered lane view of the dispatch board
    ///
    /// # Arguments
    /// * `filters` - The filter selection; `Default::default()` shows everything
    ///
    /// # Returns
    /// The board's lanes in fixed order
    pub async fn get_board(&self, filters: &BoardFilters) -> Result<BoardView> {
        let response = self
            .request(Method::GET, "/board")
            .query(filters)
            .send()
            .await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Technician Roster
    // =============================================================================

    /// Register a new technician
    ///
    /// # Arguments
    /// * `req` - The technician's name and contact details
    ///
    /// # Returns
    /// The registered technician
    pub async fn create_technician(&self, req: CreateTechnician) -> Result<Technician> {
        let response = self
            .request(Method::POST, "/technicians")
            .json(&req)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// List the company's technicians
    ///
    /// # Returns
    /// The technician roster, sorted by name
    pub async fn list_technicians(&self) -> Result<Vec<Technician>> {
        let response = self.request(Method::GET, "/technicians").send().await?;

        self.handle_response(response).await
    }
}
