//! Application entity model and DTOs.

use cardapply_core::application::{ApplicationStatus, EmploymentType};
use cardapply_core::error::CoreError;
use cardapply_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `applications` table.
///
/// Serializes in camelCase; this is the shape returned by the listing API.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub employment_type: String,
    pub company_name: Option<String>,
    pub monthly_salary: Option<f64>,
    pub salary_cert_name: Option<String>,
    pub national_id_name: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
}

impl Application {
    pub fn employment(&self) -> Result<EmploymentType, CoreError> {
        EmploymentType::from_str_db(&self.employment_type)
    }

    pub fn application_status(&self) -> Result<ApplicationStatus, CoreError> {
        ApplicationStatus::from_str_db(&self.status)
    }
}

/// DTO for inserting a submitted application.
///
/// Only document names are stored; status is left to its column default.
#[derive(Debug, Clone)]
pub struct CreateApplication {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub employment_type: EmploymentType,
    pub company_name: Option<String>,
    pub monthly_salary: Option<f64>,
    pub salary_cert_name: Option<String>,
    pub national_id_name: Option<String>,
}
