//! Business eligibility for a credit card.
//!
//! A record can pass field validation and still be ineligible: students and
//! unemployed applicants are never eligible, and employed applicants need a
//! monthly salary at or above the configured floor. The wizard shows these
//! as advisory notices; the gateway enforces them again on submission.

use serde::Serialize;

use crate::application::{format_amount, parse_amount, ApplicationData, EmploymentType};
use crate::validation::fields;

/// Minimum monthly salary when nothing else is configured.
pub const DEFAULT_MIN_MONTHLY_SALARY: f64 = 10_000.0;

/// Why an applicant cannot proceed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Ineligibility {
    /// Student or unemployed.
    NotEmployed { employment_type: EmploymentType },
    /// Employed, but the declared salary is under the floor.
    SalaryBelowMinimum { salary: f64, minimum: f64 },
}

impl Ineligibility {
    /// Field the notice is attached to.
    pub fn field(&self) -> &'static str {
        match self {
            Self::NotEmployed { .. } => fields::EMPLOYMENT_TYPE,
            Self::SalaryBelowMinimum { .. } => fields::SALARY,
        }
    }

    /// Short heading for the applicant-facing notice.
    pub fn title(&self) -> &'static str {
        match self {
            Self::NotEmployed { .. } => "Not Eligible",
            Self::SalaryBelowMinimum { .. } => "Salary Requirement Not Met",
        }
    }

    /// Applicant-facing explanation.
    pub fn advisory(&self) -> String {
        match self {
            Self::NotEmployed { .. } => "Sorry, credit cards can only be issued to employed \
                 individuals with a minimum salary requirement."
                .to_string(),
            Self::SalaryBelowMinimum { minimum, .. } => format!(
                "Sorry, a minimum monthly salary of {} is required for credit card eligibility.",
                format_amount(*minimum)
            ),
        }
    }

    /// Message returned by the gateway when it rejects a submission.
    pub fn rejection_message(&self) -> &'static str {
        match self {
            Self::NotEmployed { .. } => "Not eligible for credit card application",
            Self::SalaryBelowMinimum { .. } => "Minimum salary requirement not met",
        }
    }
}

/// Eligibility thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EligibilityPolicy {
    /// Inclusive monthly salary floor, currency-agnostic.
    pub min_monthly_salary: f64,
}

impl Default for EligibilityPolicy {
    fn default() -> Self {
        Self {
            min_monthly_salary: DEFAULT_MIN_MONTHLY_SALARY,
        }
    }
}

impl EligibilityPolicy {
    pub fn new(min_monthly_salary: f64) -> Self {
        Self { min_monthly_salary }
    }

    /// Check an employment type and raw salary.
    ///
    /// A salary that is blank, unparseable or not positive is left to field
    /// validation and does not make the applicant ineligible here.
    pub fn check(
        &self,
        employment_type: Option<EmploymentType>,
        salary: &str,
    ) -> Result<(), Ineligibility> {
        let Some(employment_type) = employment_type else {
            return Ok(());
        };

        if !employment_type.is_employed() {
            return Err(Ineligibility::NotEmployed { employment_type });
        }

        match parse_amount(salary) {
            Some(amount) if amount > 0.0 && amount < self.min_monthly_salary => {
                Err(Ineligibility::SalaryBelowMinimum {
                    salary: amount,
                    minimum: self.min_monthly_salary,
                })
            }
            _ => Ok(()),
        }
    }

    /// Check the applicant record.
    pub fn check_application(&self, data: &ApplicationData) -> Result<(), Ineligibility> {
        self.check(data.employment_type, &data.salary)
    }

    /// Whether the applicant is employed with a salary at or above the floor.
    ///
    /// Stronger than [`check`](Self::check): the salary must actually parse.
    pub fn meets_salary_floor(&self, data: &ApplicationData) -> bool {
        data.is_employed()
            && data
                .salary_amount()
                .is_some_and(|amount| amount >= self.min_monthly_salary)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
