//! Technician request DTOs

use serde::{Deserialize, Serialize};

/// Request to register a new technician
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTechnician {
    pub name: String,
    pub email: String,
    pub phone: String,
}
