//! Technician API endpoints
//!
//! The personal job list, the forward lifecycle steps, and field artifacts.
//! Every method requires a technician session.

use crate::FieldlineClient;
use crate::error::Result;
use fieldline_core::domain::job::Job;
use fieldline_core::dto::job::{
    AddPhotoRequest, CompleteJobRequest, SetSignatureRequest, SetTechNotesRequest,
};
use reqwest::Method;
use uuid::Uuid;

impl FieldlineClient {
    // =============================================================================
    // My Jobs
    // =============================================================================

    /// List the calling technician's open jobs
    ///
    /// # Returns
    /// Assigned jobs that are not completed or cancelled, soonest first
    pub async fn my_jobs(&self) -> Result<Vec<Job>> {
        let response = self.request(Method::GET, "/tech/jobs").send().await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Lifecycle
    // =============================================================================

    /// Mark a job en route
    ///
    /// # Arguments
    /// * `job_id` - The job UUID
    ///
    /// # Returns
    /// The updated job
    pub async fn mark_en_route(&self, job_id: Uuid) -> Result<Job> {
        let path = format!("/tech/jobs/{}/en-route", job_id);
        let response = self.request(Method::POST, &path).send().await?;

        self.handle_response(response).await
    }

    /// Start work on a job
    ///
    /// # Arguments
    /// * `job_id` - The job UUID
    ///
    /// # Returns
    /// The updated job
    pub async fn start_work(&self, job_id: Uuid) -> Result<Job> {
        let path = format!("/tech/jobs/{}/start", job_id);
        let response = self.request(Method::POST, &path).send().await?;

        self.handle_response(response).await
    }

    /// Complete a job
    ///
    /// The server rejects completion until the job has at least one photo, a
    /// customer signature, and non-blank work notes.
    ///
    /// # Arguments
    /// * `job_id` - The job UUID
    /// * `duration_secs` - Elapsed seconds from the job's timer
    ///
    /// # Returns
    /// The completed job
    pub async fn complete_job(&self, job_id: Uuid, duration_secs: i64) -> Result<Job> {
        let path = format!("/tech/jobs/{}/complete", job_id);
        let response = self
            .request(Method::POST, &path)
            .json(&CompleteJobRequest { duration_secs })
            .send()
            .await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Field Artifacts
    // =============================================================================

    /// Attach a photo URL to a job
    ///
    /// # Arguments
    /// * `job_id` - The job UUID
    /// * `url` - The uploaded photo's URL
    ///
    /// # Returns
    /// The updated job
    pub async fn add_photo(&self, job_id: Uuid, url: impl Into<String>) -> Result<Job> {
        let path = format!("/tech/jobs/{}/photos", job_id);
        let response = self
            .request(Method::POST, &path)
            .json(&AddPhotoRequest { url: url.into() })
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Set or replace the customer signature
    ///
    /// # Arguments
    /// * `job_id` - The job UUID
    /// * `url` - The uploaded signature image's URL
    ///
    /// # Returns
    /// The updated job
    pub async fn set_signature(&self, job_id: Uuid, url: impl Into<String>) -> Result<Job> {
        let path = format!("/tech/jobs/{}/signature", job_id);
        let response = self
            .request(Method::PUT, &path)
            .json(&SetSignatureRequest { url: url.into() })
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Set the technician's work notes
    ///
    /// # Arguments
    /// * `job_id` - The job UUID
    /// * `notes` - The work notes text
    ///
    /// # Returns
    /// The updated job
    pub async fn set_tech_notes(&self, job_id: Uuid, notes: impl Into<String>) -> Result<Job> {
        let path = format!("/tech/jobs/{}/notes", job_id);
        let response = self
            .request(Method::PUT, &path)
            .json(&SetTechNotesRequest {
                notes: notes.into(),
            })
            .send()
            .await?;

        self.handle_response(response).await
    }
}
