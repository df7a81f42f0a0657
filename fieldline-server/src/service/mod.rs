//! Service Module
//!
//! Business logic layer for the server.
//! Services orchestrate between repositories and the core engine.

pub mod job;
pub mod live;
pub mod plan;
pub mod tech;

// Re-export for convenience
pub use job as job_service;
pub use plan as plan_service;
pub use tech as tech_service;
