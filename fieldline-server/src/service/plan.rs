//! Plan Service
//!
//! Subscription limit checks. Companies are provisioned out of band; a
//! company with no row falls back to the starter plan.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use fieldline_core::domain::plan::SubscriptionPlan;
use sqlx::PgPool;
use uuid::Uuid;

use crate::repository::company_repository;

/// Look up a company's plan, defaulting to starter when no row exists
pub async fn company_plan(pool: &PgPool, company_id: Uuid) -> Result<SubscriptionPlan, sqlx::Error> {
    let company = company_repository::find_by_id(pool, company_id).await?;

    Ok(company
        .map(|c| c.plan)
        .unwrap_or(SubscriptionPlan::Starter))
}

/// Whether the plan allows one more technician on top of the current count
pub fn can_add_technician(plan: SubscriptionPlan, current: i64) -> bool {
    match plan.technician_limit() {
        Some(limit) => current < limit as i64,
        None => true,
    }
}

/// Whether the plan allows one more job on top of this month's count
pub fn can_create_job(plan: SubscriptionPlan, jobs_this_month: i64) -> bool {
    match plan.monthly_job_limit() {
        Some(limit) => jobs_this_month < limit as i64,
        None => true,
    }
}

/// Midnight UTC on the first day of the current calendar month
pub fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_technician_limit() {
        assert!(can_add_technician(SubscriptionPlan::Starter, 9));
        assert!(!can_add_technician(SubscriptionPlan::Starter, 10));
    }

    #[test]
    fn test_growth_technician_limit() {
        assert!(can_add_technician(SubscriptionPlan::Growth, 19));
        assert!(!can_add_technician(SubscriptionPlan::Growth, 20));
    }

    #[test]
    fn test_professional_is_unlimited() {
        assert!(can_add_technician(SubscriptionPlan::Professional, 10_000));
        assert!(can_create_job(SubscriptionPlan::Professional, 1_000_000));
    }

    #[test]
    fn test_monthly_job_limits() {
        assert!(can_create_job(SubscriptionPlan::Starter, 499));
        assert!(!can_create_job(SubscriptionPlan::Starter, 500));
        assert!(can_create_job(SubscriptionPlan::Growth, 1999));
        assert!(!can_create_job(SubscriptionPlan::Growth, 2000));
    }

    #[test]
    fn test_month_start_is_first_midnight() {
        let now: DateTime<Utc> = "2026-03-17T15:42:10Z".parse().unwrap();
        let start = month_start(now);

        assert_eq!(start.to_rfc3339(), "2026-03-01T00:00:00+00:00");
    }
}
