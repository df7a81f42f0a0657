//! Job lifecycle engine
//!
//! Pure operations over [`Job`](crate::domain::job::Job) values. The engine
//! has two write paths: the dispatcher path (`edit`), which may set any
//! status through an explicit override, and the technician path
//! (`transition`), which only ever moves a job forward. Field artifact
//! updates live in `field`.
//!
//! Every operation takes the acting user and the current time explicitly and
//! either mutates the job and returns the batch of activity entries it
//! appended, or fails leaving the job untouched.

pub mod edit;
pub mod field;
pub mod transition;

use thiserror::Error;
use uuid::Uuid;

use crate::domain::job::JobStatus;

/// Maximum photos a job can carry
pub const MAX_PHOTOS: usize = 5;

/// The user performing an operation
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: Uuid,
    pub name: String,
}

impl Actor {
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Rejected input on the create/edit path
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),
}

/// Rejected status change or artifact update
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("cannot move job from {from} to {to}")]
    InvalidTransition { from: JobStatus, to: JobStatus },

    #[error("cannot complete job without {0}")]
    MissingArtifact(&'static str),

    #[error("photo limit of {} reached", MAX_PHOTOS)]
    PhotoLimitReached,
}
