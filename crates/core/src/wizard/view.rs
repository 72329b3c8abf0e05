//! Per-step view models.
//!
//! [`Wizard::view`] turns the machine's state into what a front end needs to
//! draw the current step: field values with their visible errors, advisory
//! notices, which buttons are enabled. Rendering itself is out of scope.

use serde::Serialize;

use super::{Wizard, WizardStep, NATIONAL_ID_REQUIRED};
use crate::application::{format_amount, EmploymentType, UploadedFile};
use crate::eligibility::Ineligibility;
use crate::validation::{fields, FieldSource};

/// Text on the submit button while a submission is in flight.
pub const SUBMITTING_LABEL: &str = "Submitting...";

/// Text on the submit button otherwise.
pub const SUBMIT_LABEL: &str = "Submit Application";

/// Everything needed to draw the current step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum StepView {
    Start(StartView),
    Details(DetailsView),
    Documents(DocumentsView),
    Confirmation(ConfirmationView),
    Status(StatusView),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartView {
    pub requirements: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmploymentOption {
    pub value: EmploymentType,
    pub label: &'static str,
}

/// An eligibility notice: a heading and an explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub title: &'static str,
    pub message: String,
}

impl From<&Ineligibility> for Notice {
    fn from(reason: &Ineligibility) -> Self {
        Self {
            title: reason.title(),
            message: reason.advisory(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailsView {
    /// Visible inputs; company and salary appear only for employed types.
    pub fields: Vec<FieldView>,
    pub employment_options: Vec<EmploymentOption>,
    pub notice: Option<Notice>,
    /// Disabled while an eligibility notice is shown.
    pub can_continue: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentSlot {
    pub field: &'static str,
    pub label: &'static str,
    pub required: bool,
    pub file: Option<UploadedFile>,
    pub size_label: Option<String>,
    pub error: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentsView {
    /// Present only for employed applicants who meet the salary floor.
    pub salary_certificate: Option<DocumentSlot>,
    pub national_id: DocumentSlot,
    pub can_continue: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmationView {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub employment: &'static str,
    pub company_name: Option<String>,
    pub monthly_salary: Option<String>,
    pub salary_certificate: Option<String>,
    pub national_id: String,
    pub submit_label: &'static str,
    pub can_submit: bool,
    pub can_go_back: bool,
    pub notice: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusView {
    pub reference_id: String,
    pub message: &'static str,
}

const FIELD_LABELS: [(&str, &str); 7] = [
    (fields::FIRST_NAME, "First Name"),
    (fields::LAST_NAME, "Last Name"),
    (fields::EMAIL, "Email Address"),
    (fields::PHONE, "Phone Number"),
    (fields::EMPLOYMENT_TYPE, "Employment Type"),
    (fields::COMPANY_NAME, "Company Name"),
    (fields::SALARY, "Monthly Salary"),
];

impl Wizard {
    /// View model for the current step.
    pub fn view(&self) -> StepView {
        match self.step {
            WizardStep::Start => StepView::Start(self.start_view()),
            WizardStep::Details => StepView::Details(self.details_view()),
            WizardStep::Documents => StepView::Documents(self.documents_view()),
            WizardStep::Confirmation => {
                StepView::Confirmation(self.confirmation_view())
            }
            WizardStep::Status => StepView::Status(StatusView {
                reference_id: self.reference_id.clone().unwrap_or_default(),
                message: "Thank you for applying. Your application is now under review.",
            }),
        }
    }

    fn start_view(&self) -> StartView {
        StartView {
            requirements: vec![
                "Must be employed (Self-employed or Salaried)".to_string(),
                format!(
                    "Minimum monthly salary: {}",
                    format_amount(self.policy.min_monthly_salary)
                ),
                "Valid mobile number (05XXXXXXXX)".to_string(),
                "Salary certificate & National ID".to_string(),
            ],
        }
    }

    fn details_view(&self) -> DetailsView {
        let employed = self.data.is_employed();
        let fields = FIELD_LABELS
            .into_iter()
            .filter(|(name, _)| {
                employed || !matches!(*name, fields::COMPANY_NAME | fields::SALARY)
            })
            .map(|(name, label)| FieldView {
                name,
                label,
                value: self.data.field_value(name).to_string(),
                error: self.errors.get(name).map(str::to_string),
            })
            .collect();

        let notice = self
            .policy
            .check_application(&self.data)
            .err()
            .map(|reason| Notice::from(&reason));

        DetailsView {
            fields,
            employment_options: EmploymentType::ALL
                .into_iter()
                .map(|value| EmploymentOption {
                    value,
                    label: value.label(),
                })
                .collect(),
            can_continue: notice.is_none(),
            notice,
        }
    }

    fn documents_view(&self) -> DocumentsView {
        let salary_certificate = self
            .policy
            .meets_salary_floor(&self.data)
            .then(|| {
                document_slot(
                    fields::SALARY_CERTIFICATE,
                    "Salary Certificate",
                    false,
                    self.data.salary_certificate.as_ref(),
                )
            });

        let mut national_id = document_slot(
            fields::NATIONAL_ID,
            "National ID",
            true,
            self.data.national_id.as_ref(),
        );
        if national_id.file.is_none() {
            national_id.error = Some(NATIONAL_ID_REQUIRED);
        }

        DocumentsView {
            salary_certificate,
            can_continue: national_id.file.is_some(),
            national_id,
        }
    }

    fn confirmation_view(&self) -> ConfirmationView {
        let employed = self.data.is_employed();
        ConfirmationView {
            full_name: self.data.full_name(),
            email: self.data.email.clone(),
            phone: self.data.phone.clone(),
            employment: self
                .data
                .employment_type
                .map_or("Not specified", EmploymentType::label),
            company_name: employed.then(|| self.data.company_name.clone()),
            monthly_salary: if employed {
                self.data.salary_amount().map(format_amount)
            } else {
                None
            },
            salary_certificate: self
                .data
                .salary_certificate
                .as_ref()
                .map(|f| f.name.clone()),
            national_id: self
                .data
                .national_id
                .as_ref()
                .map_or_else(|| "Not uploaded".to_string(), |f| f.name.clone()),
            submit_label: if self.submitting {
                SUBMITTING_LABEL
            } else {
                SUBMIT_LABEL
            },
            can_submit: !self.submitting,
            can_go_back: !self.submitting,
            notice: self.notice,
        }
    }
}

fn document_slot(
    field: &'static str,
    label: &'static str,
    required: bool,
    file: Option<&UploadedFile>,
) -> DocumentSlot {
    DocumentSlot {
        field,
        label,
        required,
        size_label: file.map(UploadedFile::size_label),
        file: file.cloned(),
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::application::ApplicationPatch;

    fn at_details() -> Wizard {
        let mut wizard = Wizard::default();
        wizard.advance().unwrap();
        wizard
    }

    fn employed(salary: &str) -> ApplicationPatch {
        ApplicationPatch {
            first_name: Some("Ana".into()),
            last_name: Some("Ortiz".into()),
            email: Some("ana@x.com".into()),
            phone: Some("0501234567".into()),
            employment_type: Some(Some(EmploymentType::Salaried)),
            company_name: Some("Acme".into()),
            salary: Some(salary.into()),
            ..Default::default()
        }
    }

    #[test]
    fn start_lists_the_configured_salary_floor() {
        let view = Wizard::default().view();
        assert_matches!(view, StepView::Start(ref start) => {
            assert!(start.requirements.iter().any(|r| r.contains("10,000")));
        });
    }

    #[test]
    fn details_hide_employer_fields_until_employed() {
        let mut wizard = at_details();
        assert_matches!(wizard.view(), StepView::Details(ref view) => {
            assert_eq!(view.fields.len(), 5);
            assert_eq!(view.employment_options.len(), 4);
            assert!(view.can_continue);
        });

        wizard.update(employed("15000")).unwrap();
        assert_matches!(wizard.view(), StepView::Details(ref view) => {
            let names: Vec<&str> = view.fields.iter().map(|f| f.name).collect();
            assert!(names.contains(&"companyName"));
            assert!(names.contains(&"salary"));
        });
    }

    #[test]
    fn details_show_eligibility_notice_and_disable_continue() {
        let mut wizard = at_details();
        wizard.update(employed("5000")).unwrap();

        assert_matches!(wizard.view(), StepView::Details(ref view) => {
            let notice = view.notice.as_ref().expect("notice");
            assert_eq!(notice.title, "Salary Requirement Not Met");
            assert!(!view.can_continue);
        });

        wizard
            .update(ApplicationPatch {
                employment_type: Some(Some(EmploymentType::Student)),
                ..Default::default()
            })
            .unwrap();
        assert_matches!(wizard.view(), StepView::Details(ref view) => {
            assert_eq!(view.notice.as_ref().map(|n| n.title), Some("Not Eligible"));
        });
    }

    #[test]
    fn documents_offer_salary_certificate_only_above_floor() {
        let mut wizard = at_details();
        wizard.update(employed("15000")).unwrap();
        wizard.advance().unwrap();

        assert_matches!(wizard.view(), StepView::Documents(ref view) => {
            assert!(view.salary_certificate.is_some());
            assert_eq!(view.national_id.error, Some(NATIONAL_ID_REQUIRED));
            assert!(!view.can_continue);
        });

        wizard
            .update(ApplicationPatch {
                national_id: Some(Some(UploadedFile::new("id.pdf", 2048, "application/pdf"))),
                ..Default::default()
            })
            .unwrap();
        assert_matches!(wizard.view(), StepView::Documents(ref view) => {
            assert_eq!(view.national_id.size_label.as_deref(), Some("2.0 KB"));
            assert!(view.can_continue);
        });
    }

    #[test]
    fn confirmation_summarises_the_application() {
        let mut wizard = at_details();
        wizard.update(employed("15000")).unwrap();
        wizard.advance().unwrap();
        wizard
            .update(ApplicationPatch {
                national_id: Some(Some(UploadedFile::new("id.pdf", 100, "application/pdf"))),
                ..Default::default()
            })
            .unwrap();
        wizard.advance().unwrap();

        assert_matches!(wizard.view(), StepView::Confirmation(ref view) => {
            assert_eq!(view.full_name, "Ana Ortiz");
            assert_eq!(view.employment, "Salaried Employee");
            assert_eq!(view.monthly_salary.as_deref(), Some("15,000"));
            assert_eq!(view.salary_certificate, None);
            assert_eq!(view.national_id, "id.pdf");
            assert_eq!(view.submit_label, SUBMIT_LABEL);
        });

        wizard.begin_submission().unwrap();
        assert_matches!(wizard.view(), StepView::Confirmation(ref view) => {
            assert_eq!(view.submit_label, SUBMITTING_LABEL);
            assert!(!view.can_go_back);
            assert!(!view.can_submit);
        });
    }
}
