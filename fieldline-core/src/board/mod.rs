//! Dispatch board
//!
//! The dispatcher's lane view of a company's jobs: filtering, lane
//! partitioning with an optimistic pending-move overlay, and drag-and-drop
//! resolution. The projector never writes jobs; it projects the latest
//! snapshot it was handed, and callers persist moves through the engine.

pub mod drag;
pub mod filters;
pub mod projector;

pub use drag::{DragController, DropTarget, MoveRequest};
pub use filters::{BoardFilters, DateRange};
pub use projector::Projector;
