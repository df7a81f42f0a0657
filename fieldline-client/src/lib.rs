//! Fieldline HTTP Client
//!
//! A type-safe HTTP client for the Fieldline dispatch API, plus the local
//! timer store the technician app uses to keep elapsed time across restarts.
//!
//! Every request carries the session's identity headers; the server trusts
//! these the same way it trusts the gateway in production.
//!
//! # Example
//!
//! ```no_run
//! use fieldline_client::{FieldlineClient, Session};
//! use uuid::Uuid;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), fieldline_client::ClientError> {
//!     let session = Session::dispatcher(Uuid::new_v4(), "Dana", Uuid::new_v4());
//!     let client = FieldlineClient::new("http://localhost:8080", session);
//!
//!     let jobs = client.list_jobs().await?;
//!     println!("{} jobs on the board", jobs.len());
//!     Ok(())
//! }
//! ```

pub mod error;
mod jobs;
pub mod session;
mod tech;
pub mod timer_store;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use session::{Session, SessionRole, TechSession};
pub use timer_store::TimerStore;

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::session::{COMPANY_ID_HEADER, ROLE_HEADER, USER_ID_HEADER, USER_NAME_HEADER};

/// HTTP client for the Fieldline dispatch API
///
/// Methods are organized into two groups mirroring the two apps:
/// - Dispatcher operations (jobs, board, technician roster)
/// - Technician operations (personal job list, lifecycle steps, artifacts)
#[derive(Debug, Clone)]
pub struct FieldlineClient {
    /// Base URL of the server (e.g., "http://localhost:8080")
    base_url: String,
    /// HTTP client instance
    client: Client,
    /// Identity attached to every request
    session: Session,
}

impl FieldlineClient {
    /// Create a new client
    ///
    /// # Example
    /// ```
    /// use fieldline_client::{FieldlineClient, Session};
    /// use uuid::Uuid;
    ///
    /// let session = Session::technician(Uuid::new_v4(), "Bob", Uuid::new_v4());
    /// let client = FieldlineClient::new("http://localhost:8080", session);
    /// ```
    pub fn new(base_url: impl Into<String>, session: Session) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
            session,
        }
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows configuring timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client, session: Session) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            session,
        }
    }

    /// Get the base URL of the server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The session this client acts as
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Build a request with the session's identity headers attached
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, url)
            .header(USER_ID_HEADER, self.session.user_id.to_string())
            .header(USER_NAME_HEADER, &self.session.user_name)
            .header(COMPANY_ID_HEADER, self.session.company_id.to_string())
            .header(ROLE_HEADER, self.session.role.as_str())
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response that returns no content (e.g., DELETE operations)
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn session() -> Session {
        Session::dispatcher(Uuid::new_v4(), "Dana", Uuid::new_v4())
    }

    #[test]
    fn test_client_creation() {
        let client = FieldlineClient::new("http://localhost:8080", session());
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = FieldlineClient::new("http://localhost:8080/", session());
        assert_eq!(client.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_with_custom_client() {
        let http_client = Client::new();
        let client = FieldlineClient::with_client("http://localhost:8080", http_client, session());
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
