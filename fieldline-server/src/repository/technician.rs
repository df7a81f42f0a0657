//! Technician Repository
//!
//! Handles all database operations related to technicians.

use fieldline_core::domain::technician::{Availability, Technician};
use sqlx::PgPool;
use uuid::Uuid;

/// Insert a new technician record
pub async fn create(pool: &PgPool, technician: &Technician) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO technicians (id, company_id, name, email, phone, availability)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(technician.id)
    .bind(technician.company_id)
    .bind(&technician.name)
    .bind(&technician.email)
    .bind(&technician.phone)
    .bind(technician.availability.as_str())
    .execute(pool)
    .await?;

    Ok(())
}

/// Find a technician by ID within a company
pub async fn find_by_id(
    pool: &PgPool,
    company_id: Uuid,
    id: Uuid,
) -> Result<Option<Technician>, sqlx::Error> {
    let row = sqlx::query_as::<_, TechnicianRow>(
        r#"
        SELECT id, company_id, name, email, phone, availability
        FROM technicians
        WHERE id = $1 AND company_id = $2
        "#,
    )
    .bind(id)
    .bind(company_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| r.into()))
}

/// List a company's technicians by name
pub async fn list_for_company(
    pool: &PgPool,
    company_id: Uuid,
) -> Result<Vec<Technician>, sqlx::Error> {
    let rows = sqlx::query_as::<_, TechnicianRow>(
        r#"
        SELECT id, company_id, name, email, phone, availability
        FROM technicians
        WHERE company_id = $1
        ORDER BY name ASC
        "#,
    )
    .bind(company_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
}

/// Count a company's technicians
pub async fn count_for_company(pool: &PgPool, company_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM technicians WHERE company_id = $1")
        .bind(company_id)
        .fetch_one(pool)
        .await
}

// =============================================================================
// Database Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct TechnicianRow {
    id: Uuid,
    company_id: Uuid,
    name: String,
    email: String,
    phone: String,
    availability: String,
}

impl From<TechnicianRow> for Technician {
    fn from(row: TechnicianRow) -> Self {
        Technician {
            id: row.id,
            company_id: row.company_id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            availability: Availability::parse(&row.availability)
                .unwrap_or(Availability::Available),
        }
    }
}
