//! HTTP client for the card application API.
//!
//! [`ApplicationsApi`] implements the wizard's
//! [`SubmissionGateway`](cardapply_core::wizard::SubmissionGateway) over
//! `POST /api/applications`, and reads recent submissions back.

pub mod api;

pub use api::{ApplicationSummary, ApplicationsApi, GatewayError};
