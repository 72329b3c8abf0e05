//! The application wizard state machine.
//!
//! A [`Wizard`] owns the current step and the applicant data for one
//! session. Its mutation surface is [`update`](Wizard::update),
//! [`advance`](Wizard::advance), [`retreat`](Wizard::retreat),
//! [`reset`](Wizard::reset) and the submission pair
//! [`begin_submission`](Wizard::begin_submission) /
//! [`finish_submission`](Wizard::finish_submission) (or
//! [`submit`](Wizard::submit), which runs both around a gateway call).
//!
//! ```text
//! Start -> Details -> Documents -> Confirmation -> Status
//!            |            |             |
//!     validation +   national id    gateway call
//!     eligibility     present
//! ```
//!
//! A guard that fails reports a [`StepBlock`]; calling an operation that is
//! not allowed on the current step returns a [`WizardError`]. Neither path
//! changes the data the applicant entered.

pub mod gateway;
pub mod step;
pub mod view;

use std::collections::BTreeSet;

use crate::application::{ApplicationData, ApplicationPatch};
use crate::eligibility::{EligibilityPolicy, Ineligibility};
use crate::validation::{fields, validate_customer_details, FieldErrors};

pub use gateway::{SubmissionGateway, SubmissionReceipt};
pub use step::{tracker, StepProgress, TrackerEntry, WizardStep, TOTAL_STEPS};
pub use view::StepView;

/// Shown when the gateway call fails. Deliberately generic.
pub const SUBMISSION_FAILED_NOTICE: &str = "Failed to submit application. Please try again.";

/// Error attached to the national id slot while no file is selected.
pub const NATIONAL_ID_REQUIRED: &str = "National ID is required";

// ---------------------------------------------------------------------------
// Outcomes and errors
// ---------------------------------------------------------------------------

/// Why a guarded transition did not happen.
#[derive(Debug, Clone, PartialEq)]
pub enum StepBlock {
    /// Field validation failed; one message per field.
    InvalidFields(FieldErrors),
    /// The details are valid but the applicant is not eligible.
    Ineligible(Ineligibility),
    /// A required document has not been selected.
    MissingDocument {
        field: &'static str,
        message: &'static str,
    },
}

/// Result of [`Wizard::advance`].
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceOutcome {
    Advanced(WizardStep),
    Blocked(StepBlock),
}

/// Result of a finished gateway call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Submitted(SubmissionReceipt),
    /// The wizard stayed on the confirmation step with `notice` set.
    Failed {
        notice: &'static str,
        error: String,
    },
}

/// An operation that is not available in the wizard's current state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("Already on the first step; cannot go back")]
    AtFirstStep,

    #[error("The application has already been submitted")]
    AlreadySubmitted,

    #[error("The confirmation step is left by submitting the application")]
    SubmissionRequired,

    #[error("Submission is only possible from the confirmation step")]
    NotAtConfirmation,

    #[error("A submission is already in progress")]
    SubmissionInProgress,

    #[error("No submission is in progress")]
    NoSubmissionInProgress,

    #[error("Only a submitted application can be reset")]
    NotSubmitted,

    #[error("Applicant data cannot be edited on the {} step", .0.title())]
    NotEditable(WizardStep),

    #[error("Application is not ready to submit: {0}")]
    NotSubmittable(String),
}

// ---------------------------------------------------------------------------
// Wizard
// ---------------------------------------------------------------------------

/// One applicant's pass through the wizard.
#[derive(Debug, Clone)]
pub struct Wizard {
    step: WizardStep,
    data: ApplicationData,
    policy: EligibilityPolicy,
    touched: BTreeSet<&'static str>,
    errors: FieldErrors,
    reference_id: Option<String>,
    submitting: bool,
    notice: Option<&'static str>,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new(EligibilityPolicy::default())
    }
}

impl Wizard {
    pub fn new(policy: EligibilityPolicy) -> Self {
        Self {
            step: WizardStep::Start,
            data: ApplicationData::default(),
            policy,
            touched: BTreeSet::new(),
            errors: FieldErrors::new(),
            reference_id: None,
            submitting: false,
            notice: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn data(&self) -> &ApplicationData {
        &self.data
    }

    pub fn policy(&self) -> &EligibilityPolicy {
        &self.policy
    }

    /// Errors for the fields the applicant has touched.
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Reference code of the accepted submission, once on the status step.
    pub fn reference_id(&self) -> Option<&str> {
        self.reference_id.as_deref()
    }

    /// Non-field notice, e.g. after a failed submission.
    pub fn notice(&self) -> Option<&'static str> {
        self.notice
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }

    /// Progress tracker for the current step.
    pub fn tracker(&self) -> Vec<TrackerEntry> {
        tracker(self.step)
    }

    // -- Editing ------------------------------------------------------------

    /// Apply a partial update to the applicant data.
    ///
    /// Only the details and documents steps collect input.
    pub fn update(&mut self, patch: ApplicationPatch) -> Result<(), WizardError> {
        if self.submitting {
            return Err(WizardError::SubmissionInProgress);
        }
        if !matches!(self.step, WizardStep::Details | WizardStep::Documents) {
            return Err(WizardError::NotEditable(self.step));
        }

        patch.apply_to(&mut self.data);
        self.refresh_errors();
        Ok(())
    }

    /// Mark a field as touched so its errors become visible.
    ///
    /// Unknown field names are ignored.
    pub fn touch(&mut self, field: &str) {
        let known = fields::DETAILS
            .into_iter()
            .chain([fields::SALARY_CERTIFICATE, fields::NATIONAL_ID])
            .find(|f| *f == field);

        if let Some(field) = known {
            self.touched.insert(field);
            self.refresh_errors();
        }
    }

    fn refresh_errors(&mut self) {
        let mut errors = validate_customer_details(&self.data)
            .err()
            .unwrap_or_default();
        if self.data.national_id.is_none() {
            errors.insert_first(fields::NATIONAL_ID, NATIONAL_ID_REQUIRED);
        }
        let touched = &self.touched;
        errors.retain_fields(|field| touched.contains(field));
        self.errors = errors;
    }

    // -- Navigation ---------------------------------------------------------

    /// Move to the next step if the current step's guard passes.
    ///
    /// The confirmation step is left through [`submit`](Self::submit), not
    /// through this method.
    pub fn advance(&mut self) -> Result<AdvanceOutcome, WizardError> {
        if self.submitting {
            return Err(WizardError::SubmissionInProgress);
        }

        match self.step {
            WizardStep::Start => Ok(self.move_to(WizardStep::Details)),
            WizardStep::Details => {
                if let Err(reason) = self.policy.check_application(&self.data) {
                    return Ok(AdvanceOutcome::Blocked(StepBlock::Ineligible(reason)));
                }
                if let Err(errors) = validate_customer_details(&self.data) {
                    self.touched.extend(fields::DETAILS);
                    self.refresh_errors();
                    return Ok(AdvanceOutcome::Blocked(StepBlock::InvalidFields(errors)));
                }
                Ok(self.move_to(WizardStep::Documents))
            }
            WizardStep::Documents => {
                if self.data.national_id.is_none() {
                    self.touched.insert(fields::NATIONAL_ID);
                    self.refresh_errors();
                    return Ok(AdvanceOutcome::Blocked(StepBlock::MissingDocument {
                        field: fields::NATIONAL_ID,
                        message: NATIONAL_ID_REQUIRED,
                    }));
                }
                Ok(self.move_to(WizardStep::Confirmation))
            }
            WizardStep::Confirmation => Err(WizardError::SubmissionRequired),
            WizardStep::Status => Err(WizardError::AlreadySubmitted),
        }
    }

    /// Go back one step. Entered data is kept.
    pub fn retreat(&mut self) -> Result<WizardStep, WizardError> {
        if self.submitting {
            return Err(WizardError::SubmissionInProgress);
        }
        let previous = self.step.previous().ok_or(WizardError::AtFirstStep)?;
        self.step = previous;
        self.notice = None;
        Ok(previous)
    }

    /// Start over after a submission.
    pub fn reset(&mut self) -> Result<(), WizardError> {
        if self.step != WizardStep::Status {
            return Err(WizardError::NotSubmitted);
        }
        *self = Self::new(self.policy);
        Ok(())
    }

    fn move_to(&mut self, step: WizardStep) -> AdvanceOutcome {
        self.step = step;
        self.notice = None;
        AdvanceOutcome::Advanced(step)
    }

    // -- Submission ---------------------------------------------------------

    /// Check the full submission invariant: valid details, eligibility, and
    /// a national id.
    pub fn check_submittable(&self) -> Result<(), StepBlock> {
        self.policy
            .check_application(&self.data)
            .map_err(StepBlock::Ineligible)?;
        validate_customer_details(&self.data).map_err(StepBlock::InvalidFields)?;
        if self.data.national_id.is_none() {
            return Err(StepBlock::MissingDocument {
                field: fields::NATIONAL_ID,
                message: NATIONAL_ID_REQUIRED,
            });
        }
        Ok(())
    }

    /// Lock the wizard for a gateway call and return the record to send.
    pub fn begin_submission(&mut self) -> Result<ApplicationData, WizardError> {
        if self.submitting {
            return Err(WizardError::SubmissionInProgress);
        }
        if self.step != WizardStep::Confirmation {
            return Err(WizardError::NotAtConfirmation);
        }
        self.check_submittable().map_err(|block| {
            WizardError::NotSubmittable(match block {
                StepBlock::InvalidFields(errors) => errors.to_string(),
                StepBlock::Ineligible(reason) => reason.rejection_message().to_string(),
                StepBlock::MissingDocument { message, .. } => message.to_string(),
            })
        })?;

        self.submitting = true;
        self.notice = None;
        Ok(self.data.clone())
    }

    /// Record the gateway's answer and unlock the wizard.
    ///
    /// On success the wizard moves to the status step; on failure it stays
    /// on confirmation with a generic notice and the data untouched.
    pub fn finish_submission<E: std::error::Error>(
        &mut self,
        result: Result<SubmissionReceipt, E>,
    ) -> Result<SubmissionOutcome, WizardError> {
        if !self.submitting {
            return Err(WizardError::NoSubmissionInProgress);
        }
        self.submitting = false;

        match result {
            Ok(receipt) => {
                self.reference_id = Some(receipt.reference_id.clone());
                self.move_to(WizardStep::Status);
                Ok(SubmissionOutcome::Submitted(receipt))
            }
            Err(err) => {
                self.notice = Some(SUBMISSION_FAILED_NOTICE);
                Ok(SubmissionOutcome::Failed {
                    notice: SUBMISSION_FAILED_NOTICE,
                    error: err.to_string(),
                })
            }
        }
    }

    /// Release the lock taken by [`begin_submission`](Self::begin_submission)
    /// when no gateway answer will arrive. The wizard stays on confirmation
    /// with the failure notice set.
    pub fn abort_submission(&mut self) -> Result<(), WizardError> {
        if !self.submitting {
            return Err(WizardError::NoSubmissionInProgress);
        }
        self.submitting = false;
        self.notice = Some(SUBMISSION_FAILED_NOTICE);
        Ok(())
    }

    /// Send the application through `gateway`.
    ///
    /// Dropping the returned future before the gateway answers aborts the
    /// submission, leaving the wizard ready for a retry.
    pub async fn submit<G: SubmissionGateway>(
        &mut self,
        gateway: &G,
    ) -> Result<SubmissionOutcome, WizardError> {
        let data = self.begin_submission()?;
        let mut pending = PendingSubmission { wizard: self };
        let result = gateway.submit(&data).await;
        pending.wizard.finish_submission(result)
    }
}

/// Aborts an unfinished submission when dropped.
struct PendingSubmission<'a> {
    wizard: &'a mut Wizard,
}

impl Drop for PendingSubmission<'_> {
    fn drop(&mut self) {
        if self.wizard.submitting {
            let _ = self.wizard.abort_submission();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
