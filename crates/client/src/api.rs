//! REST client for the `/api/applications` endpoints, using [`reqwest`].

use async_trait::async_trait;
use serde::Deserialize;

use cardapply_core::application::{ApplicationData, ApplicationStatus, EmploymentType};
use cardapply_core::types::{DbId, Timestamp};
use cardapply_core::wizard::{SubmissionGateway, SubmissionReceipt};

/// HTTP client for one API server.
#[derive(Debug, Clone)]
pub struct ApplicationsApi {
    client: reqwest::Client,
    api_url: String,
}

/// Errors from the applications REST layer.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// The HTTP request itself failed (network, DNS, TLS, body decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("Server rejected request ({status}): {message}")]
    Rejected {
        status: u16,
        /// The envelope's `message`, or the raw body if it had none.
        message: String,
    },
}

impl GatewayError {
    /// HTTP status of a rejection, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            Self::Request(err) => err.status().map(|s| s.as_u16()),
        }
    }
}

/// One row of `GET /api/applications`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSummary {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub employment_type: EmploymentType,
    pub company_name: Option<String>,
    pub monthly_salary: Option<f64>,
    pub salary_cert_name: Option<String>,
    pub national_id_name: Option<String>,
    pub status: ApplicationStatus,
    pub created_at: Timestamp,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitResponse {
    id: String,
    db_id: DbId,
    status: ApplicationStatus,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    data: Vec<ApplicationSummary>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl ApplicationsApi {
    /// * `api_url` - Base HTTP URL, e.g. `http://localhost:3000`.
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), api_url)
    }

    /// Reuse an existing [`reqwest::Client`] for connection pooling.
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        Self {
            client,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Send a completed application. Returns the server's receipt.
    pub async fn submit_application(
        &self,
        data: &ApplicationData,
    ) -> Result<SubmissionReceipt, GatewayError> {
        let response = self
            .client
            .post(format!("{}/api/applications", self.api_url))
            .json(data)
            .send()
            .await?;

        let body: SubmitResponse = Self::parse_response(response).await?;
        tracing::debug!(reference_id = %body.id, db_id = body.db_id, "Application accepted");

        Ok(SubmissionReceipt {
            reference_id: body.id,
            internal_id: body.db_id,
            status: body.status,
        })
    }

    /// Most recent submissions, newest first. `None` uses the server default.
    pub async fn list_recent(
        &self,
        limit: Option<i64>,
    ) -> Result<Vec<ApplicationSummary>, GatewayError> {
        let mut request = self
            .client
            .get(format!("{}/api/applications", self.api_url));
        if let Some(limit) = limit {
            request = request.query(&[("limit", limit)]);
        }

        let body: ListResponse = Self::parse_response(request.send().await?).await?;
        Ok(body.data)
    }

    // ---- private helpers ----

    /// Return the response unchanged on success, or a
    /// [`GatewayError::Rejected`] carrying the server's message.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            return Err(GatewayError::Rejected {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl SubmissionGateway for ApplicationsApi {
    type Error = GatewayError;

    async fn submit(&self, data: &ApplicationData) -> Result<SubmissionReceipt, GatewayError> {
        self.submit_application(data).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let api = ApplicationsApi::new("http://localhost:3000/");
        assert_eq!(api.api_url, "http://localhost:3000");
    }

    #[test]
    fn rejection_exposes_status() {
        let err = GatewayError::Rejected {
            status: 400,
            message: "Missing required fields".into(),
        };
        assert_eq!(err.status(), Some(400));
        assert_eq!(
            err.to_string(),
            "Server rejected request (400): Missing required fields"
        );
    }

    #[test]
    fn summary_rows_deserialize_from_camel_case() {
        let row: ApplicationSummary = serde_json::from_value(serde_json::json!({
            "id": 7,
            "firstName": "Ana",
            "lastName": "Ortiz",
            "email": "ana@x.com",
            "phone": "0501234567",
            "employmentType": "salaried",
            "companyName": "Acme",
            "monthlySalary": 15000.0,
            "salaryCertName": null,
            "nationalIdName": "id.pdf",
            "status": "under_review",
            "createdAt": "2025-01-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(row.employment_type, EmploymentType::Salaried);
        assert_eq!(row.status, ApplicationStatus::UnderReview);
    }
}
