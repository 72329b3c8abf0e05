//! Domain logic for the credit-card application flow.
//!
//! Everything here is pure: the applicant data model, field validation,
//! the eligibility policy, display reference codes, and the wizard state
//! machine that drives an applicant from the start screen to submission.
//! I/O lives in the `db`, `api` and `client` crates.

pub mod application;
pub mod eligibility;
pub mod error;
pub mod reference;
pub mod types;
pub mod validation;
pub mod wizard;
