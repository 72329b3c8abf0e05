//! The seam between the wizard and whatever accepts finished applications.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationData, ApplicationStatus};
use crate::types::DbId;

/// What the gateway returns for an accepted application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    /// Display code to show the applicant (see [`crate::reference`]).
    pub reference_id: String,
    /// Primary key of the stored submission.
    pub internal_id: DbId,
    pub status: ApplicationStatus,
}

/// Accepts a completed application and stores it.
#[async_trait]
pub trait SubmissionGateway: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    async fn submit(&self, data: &ApplicationData) -> Result<SubmissionReceipt, Self::Error>;
}
