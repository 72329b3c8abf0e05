//! Repository for the `applications` table.

use cardapply_core::types::DbId;
use sqlx::PgPool;

use crate::models::application::{Application, CreateApplication};

/// Column list for `applications` queries.
const COLUMNS: &str = "id, first_name, last_name, email, phone, employment_type, \
     company_name, monthly_salary, salary_cert_name, national_id_name, status, created_at";

/// Provides insert and read operations for submitted applications.
pub struct ApplicationRepo;

impl ApplicationRepo {
    /// Insert a new application, returning the stored row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateApplication,
    ) -> Result<Application, sqlx::Error> {
        let query = format!(
            "INSERT INTO applications \
                (first_name, last_name, email, phone, employment_type, \
                 company_name, monthly_salary, salary_cert_name, national_id_name) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.employment_type.as_str())
            .bind(&input.company_name)
            .bind(input.monthly_salary)
            .bind(&input.salary_cert_name)
            .bind(&input.national_id_name)
            .fetch_one(pool)
            .await
    }

    /// Find an application by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Application>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM applications WHERE id = $1");
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The most recent applications, newest first.
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<Application>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM applications \
             ORDER BY created_at DESC, id DESC \
             LIMIT $1"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Total number of stored applications.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM applications")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
