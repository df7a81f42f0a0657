//! Company Repository
//!
//! Handles database operations related to company accounts. Accounts are
//! provisioned out of band, so only lookups live here.

use fieldline_core::domain::plan::{Company, SubscriptionPlan};
use sqlx::PgPool;
use uuid::Uuid;

/// Find a company by ID
pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Company>, sqlx::Error> {
    let row = sqlx::query_as::<_, CompanyRow>(
        r#"
        SELECT id, name, plan
        FROM companies
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| r.into()))
}

// =============================================================================
// Database Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct CompanyRow {
    id: Uuid,
    name: String,
    plan: String,
}

impl From<CompanyRow> for Company {
    fn from(row: CompanyRow) -> Self {
        Company {
            id: row.id,
            name: row.name,
            plan: SubscriptionPlan::parse(&row.plan).unwrap_or(SubscriptionPlan::Starter),
        }
    }
}
