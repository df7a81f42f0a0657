//! Subscription plan types
//!
//! Plans gate how many technicians a company may register and how many jobs
//! it may create per calendar month. `None` means unlimited.

use serde::{Deserialize, Serialize};

/// Subscription tier a company is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPlan {
    Starter,
    Growth,
    Professional,
}

impl SubscriptionPlan {
    /// Maximum number of technicians, `None` for unlimited
    pub fn technician_limit(&self) -> Option<u32> {
        match self {
            SubscriptionPlan::Starter => Some(10),
            SubscriptionPlan::Growth => Some(20),
            SubscriptionPlan::Professional => None,
        }
    }

    /// Maximum jobs created per calendar month, `None` for unlimited
    pub fn monthly_job_limit(&self) -> Option<u32> {
        match self {
            SubscriptionPlan::Starter => Some(500),
            SubscriptionPlan::Growth => Some(2000),
            SubscriptionPlan::Professional => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionPlan::Starter => "starter",
            SubscriptionPlan::Growth => "growth",
            SubscriptionPlan::Professional => "professional",
        }
    }

    pub fn parse(s: &str) -> Option<SubscriptionPlan> {
        match s {
            "starter" => Some(SubscriptionPlan::Starter),
            "growth" => Some(SubscriptionPlan::Growth),
            "professional" => Some(SubscriptionPlan::Professional),
            _ => None,
        }
    }
}

/// A company account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: uuid::Uuid,
    pub name: String,
    pub plan: SubscriptionPlan,
}
