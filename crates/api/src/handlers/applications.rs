//! Handlers for card application submission and listing.
//!
//! Submissions are untrusted: the handler re-checks required fields,
//! eligibility and the field rules before anything is stored.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Deserializer, Serialize};

use cardapply_core::application::{parse_amount, EmploymentType};
use cardapply_core::error::CoreError;
use cardapply_core::reference::generate_reference_id;
use cardapply_core::types::DbId;
use cardapply_core::validation::{
    fields, missing_required_fields, validate_customer_details, FieldSource,
};
use cardapply_db::models::application::{Application, CreateApplication};
use cardapply_db::repositories::ApplicationRepo;

use crate::error::{AppError, AppResult};
use crate::query::{clamp_limit, ListParams, MAX_LIST_LIMIT};
use crate::response::ListResponse;
use crate::state::AppState;

/// Returned with a successful submission.
pub const SUBMITTED_MESSAGE: &str = "Application submitted successfully";

/// Returned when any required field is absent or empty.
pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields";

// ---------------------------------------------------------------------------
// Request / response bodies
// ---------------------------------------------------------------------------

/// Metadata of an attached document. Only the name is kept.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentRef {
    pub name: String,
}

/// Body of `POST /api/applications`.
///
/// Every field is optional at the wire level so that a missing field
/// produces the JSON error envelope rather than a deserialization failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SubmitApplicationRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub employment_type: Option<String>,
    pub company_name: Option<String>,
    /// Accepted as a JSON string or number.
    #[serde(deserialize_with = "string_or_number")]
    pub salary: Option<String>,
    pub salary_certificate: Option<DocumentRef>,
    pub national_id: Option<DocumentRef>,
}

impl FieldSource for SubmitApplicationRequest {
    fn field_value(&self, field: &str) -> &str {
        let value = match field {
            fields::FIRST_NAME => &self.first_name,
            fields::LAST_NAME => &self.last_name,
            fields::EMAIL => &self.email,
            fields::PHONE => &self.phone,
            fields::EMPLOYMENT_TYPE => &self.employment_type,
            fields::COMPANY_NAME => &self.company_name,
            fields::SALARY => &self.salary,
            _ => return "",
        };
        value.as_deref().unwrap_or("")
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    }))
}

/// Body of a successful submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub success: bool,
    /// Display reference code, e.g. `CC-7KQ2M9XH`.
    pub id: String,
    pub db_id: DbId,
    pub status: String,
    pub message: &'static str,
}

// ---------------------------------------------------------------------------
// POST /api/applications
// ---------------------------------------------------------------------------

/// Re-check and store a completed application.
pub async fn submit_application(
    State(state): State<AppState>,
    body: Result<Json<SubmitApplicationRequest>, JsonRejection>,
) -> AppResult<Json<SubmissionResponse>> {
    let Json(body) = body?;

    let missing = missing_required_fields(&body);
    if !missing.is_empty() {
        tracing::warn!(?missing, "Rejected submission with missing fields");
        return Err(AppError::BadRequest(MISSING_FIELDS_MESSAGE.to_string()));
    }

    let employment_type =
        EmploymentType::from_str_db(body.field_value(fields::EMPLOYMENT_TYPE))?;
    let salary = body.field_value(fields::SALARY);

    let policy = state.config.eligibility_policy();
    if let Err(reason) = policy.check(Some(employment_type), salary) {
        tracing::warn!(?reason, "Rejected ineligible submission");
        return Err(CoreError::Ineligible(reason.rejection_message().to_string()).into());
    }

    if let Err(errors) = validate_customer_details(&body) {
        tracing::warn!(%errors, "Rejected submission with invalid fields");
        return Err(CoreError::InvalidFields(errors).into());
    }

    let input = to_create_application(body, employment_type);
    let reference_id = generate_reference_id();
    let application = ApplicationRepo::create(&state.pool, &input).await?;

    tracing::info!(
        application_id = application.id,
        reference_id = %reference_id,
        employment_type = %application.employment_type,
        "Application submitted"
    );

    Ok(Json(SubmissionResponse {
        success: true,
        id: reference_id,
        db_id: application.id,
        status: application.status,
        message: SUBMITTED_MESSAGE,
    }))
}

/// Build the insert DTO. Employer fields are kept only for employed types.
fn to_create_application(
    body: SubmitApplicationRequest,
    employment_type: EmploymentType,
) -> CreateApplication {
    let employed = employment_type.is_employed();
    CreateApplication {
        monthly_salary: body
            .salary
            .as_deref()
            .filter(|_| employed)
            .and_then(parse_amount),
        company_name: body
            .company_name
            .map(|name| name.trim().to_string())
            .filter(|name| employed && !name.is_empty()),
        first_name: body.first_name.unwrap_or_default(),
        last_name: body.last_name.unwrap_or_default(),
        email: body.email.unwrap_or_default(),
        phone: body.phone.unwrap_or_default(),
        employment_type,
        salary_cert_name: body.salary_certificate.map(|doc| doc.name),
        national_id_name: body.national_id.map(|doc| doc.name),
    }
}

// ---------------------------------------------------------------------------
// GET /api/applications
// ---------------------------------------------------------------------------

/// List the most recent submissions, newest first.
pub async fn list_applications(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> AppResult<Json<ListResponse<Application>>> {
    let Query(params) = params?;
    let limit = clamp_limit(params.limit, state.config.list_limit, MAX_LIST_LIMIT);

    let applications = ApplicationRepo::list_recent(&state.pool, limit).await?;
    tracing::debug!(limit, returned = applications.len(), "Listed applications");

    Ok(Json(ListResponse::new(applications)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salary_accepts_string_or_number() {
        let from_number: SubmitApplicationRequest =
            serde_json::from_str(r#"{"salary": 15000}"#).unwrap();
        assert_eq!(from_number.salary.as_deref(), Some("15000"));

        let from_text: SubmitApplicationRequest =
            serde_json::from_str(r#"{"salary": "12500.50"}"#).unwrap();
        assert_eq!(from_text.salary.as_deref(), Some("12500.50"));

        let absent: SubmitApplicationRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.salary, None);
    }

    #[test]
    fn document_metadata_keeps_only_the_name() {
        let body: SubmitApplicationRequest = serde_json::from_str(
            r#"{"nationalId": {"name": "id.pdf", "size": 2048, "type": "application/pdf"}}"#,
        )
        .unwrap();
        assert_eq!(body.national_id.map(|d| d.name).as_deref(), Some("id.pdf"));
    }

    #[test]
    fn employer_fields_dropped_for_non_employed() {
        let body = SubmitApplicationRequest {
            company_name: Some("  Acme  ".into()),
            salary: Some("15000".into()),
            ..Default::default()
        };
        let input = to_create_application(body, EmploymentType::Student);
        assert_eq!(input.company_name, None);
        assert_eq!(input.monthly_salary, None);

        let body = SubmitApplicationRequest {
            company_name: Some("  Acme  ".into()),
            salary: Some("15000".into()),
            ..Default::default()
        };
        let input = to_create_application(body, EmploymentType::Salaried);
        assert_eq!(input.company_name.as_deref(), Some("Acme"));
        assert_eq!(input.monthly_salary, Some(15000.0));
    }
}
