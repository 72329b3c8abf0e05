//! Applicant data model shared by the wizard, the gateway and storage.
//!
//! [`ApplicationData`] is the record the wizard accumulates across steps.
//! Field names serialize in camelCase because that is the shape the HTTP
//! gateway accepts.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Employment type
// ---------------------------------------------------------------------------

/// Employment situation declared by the applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentType {
    SelfEmployed,
    Salaried,
    Student,
    Unemployed,
}

impl EmploymentType {
    /// Every employment type, in the order offered to the applicant.
    pub const ALL: [EmploymentType; 4] = [
        Self::Salaried,
        Self::SelfEmployed,
        Self::Student,
        Self::Unemployed,
    ];

    /// Parse an employment type from its wire/database form.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "self_employed" => Ok(Self::SelfEmployed),
            "salaried" => Ok(Self::Salaried),
            "student" => Ok(Self::Student),
            "unemployed" => Ok(Self::Unemployed),
            _ => Err(CoreError::Validation(format!(
                "Invalid employment type '{s}'. Must be one of: \
                 self_employed, salaried, student, unemployed"
            ))),
        }
    }

    /// Convert to the wire/database string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SelfEmployed => "self_employed",
            Self::Salaried => "salaried",
            Self::Student => "student",
            Self::Unemployed => "unemployed",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::SelfEmployed => "Self Employed",
            Self::Salaried => "Salaried Employee",
            Self::Student => "Student",
            Self::Unemployed => "Unemployed",
        }
    }

    /// Whether this type carries an employer and a salary.
    pub fn is_employed(self) -> bool {
        matches!(self, Self::SelfEmployed | Self::Salaried)
    }
}

// ---------------------------------------------------------------------------
// Application status
// ---------------------------------------------------------------------------

/// Review status of a stored submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    UnderReview,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "under_review" => Ok(Self::UnderReview),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(CoreError::Validation(format!(
                "Invalid application status '{s}'. Must be one of: under_review, approved, rejected"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UnderReview => "under_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

// ---------------------------------------------------------------------------
// Document metadata
// ---------------------------------------------------------------------------

/// Metadata of a file the applicant selected. No content is carried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub size: u64,
    #[serde(rename = "type")]
    pub mime_type: String,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, size: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime_type: mime_type.into(),
        }
    }

    /// Size rendered as `B`, `KB` or `MB` with one decimal for the latter two.
    pub fn size_label(&self) -> String {
        format_file_size(self.size)
    }
}

/// Format a byte count for display.
pub fn format_file_size(bytes: u64) -> String {
    const KIB: u64 = 1024;
    const MIB: u64 = 1024 * 1024;

    if bytes < KIB {
        format!("{bytes} B")
    } else if bytes < MIB {
        format!("{:.1} KB", bytes as f64 / KIB as f64)
    } else {
        format!("{:.1} MB", bytes as f64 / MIB as f64)
    }
}

// ---------------------------------------------------------------------------
// Application data
// ---------------------------------------------------------------------------

/// Everything the applicant enters across the wizard.
///
/// `company_name` and `salary` are kept as entered (strings) so partially
/// typed values survive navigation; validation decides whether they parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationData {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub employment_type: Option<EmploymentType>,
    pub company_name: String,
    pub salary: String,
    pub salary_certificate: Option<UploadedFile>,
    pub national_id: Option<UploadedFile>,
}

impl ApplicationData {
    /// Whether the declared employment type is salaried or self-employed.
    pub fn is_employed(&self) -> bool {
        self.employment_type.is_some_and(EmploymentType::is_employed)
    }

    /// Salary parsed as a number, if it parses to a finite value.
    pub fn salary_amount(&self) -> Option<f64> {
        parse_amount(&self.salary)
    }

    /// First and last name joined for display.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Parse a user-entered monetary amount. Surrounding whitespace is ignored.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Format an amount with thousands separators, dropping a zero fraction.
pub fn format_amount(amount: f64) -> String {
    let rounded = (amount * 100.0).round() / 100.0;
    let whole = rounded.trunc().abs() as u64;
    let cents = ((rounded.abs() - whole as f64) * 100.0).round() as u64;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded < 0.0 { "-" } else { "" };
    if cents == 0 {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{cents:02}")
    }
}

// ---------------------------------------------------------------------------
// Partial updates
// ---------------------------------------------------------------------------

/// A partial update to [`ApplicationData`]; `None` leaves a field alone.
///
/// Document fields are doubly optional: `Some(None)` removes a selected file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApplicationPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub employment_type: Option<Option<EmploymentType>>,
    pub company_name: Option<String>,
    pub salary: Option<String>,
    pub salary_certificate: Option<Option<UploadedFile>>,
    pub national_id: Option<Option<UploadedFile>>,
}

impl ApplicationPatch {
    /// Apply the patch, returning the camelCase names of the fields it set.
    ///
    /// Selecting an employment type clears company name and salary unless
    /// the same patch provides them.
    pub fn apply_to(self, data: &mut ApplicationData) -> Vec<&'static str> {
        use crate::validation::fields;

        let mut changed = Vec::new();

        if let Some(v) = self.first_name {
            data.first_name = v;
            changed.push(fields::FIRST_NAME);
        }
        if let Some(v) = self.last_name {
            data.last_name = v;
            changed.push(fields::LAST_NAME);
        }
        if let Some(v) = self.email {
            data.email = v;
            changed.push(fields::EMAIL);
        }
        if let Some(v) = self.phone {
            data.phone = v;
            changed.push(fields::PHONE);
        }
        if let Some(v) = self.employment_type {
            data.employment_type = v;
            data.company_name.clear();
            data.salary.clear();
            changed.push(fields::EMPLOYMENT_TYPE);
        }
        if let Some(v) = self.company_name {
            data.company_name = v;
            changed.push(fields::COMPANY_NAME);
        }
        if let Some(v) = self.salary {
            data.salary = v;
            changed.push(fields::SALARY);
        }
        if let Some(v) = self.salary_certificate {
            data.salary_certificate = v;
            changed.push(fields::SALARY_CERTIFICATE);
        }
        if let Some(v) = self.national_id {
            data.national_id = v;
            changed.push(fields::NATIONAL_ID);
        }

        changed
    }

    /// Whether the patch touches any field at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- EmploymentType --

    #[test]
    fn employment_type_from_str_valid() {
        for kind in EmploymentType::ALL {
            assert_eq!(EmploymentType::from_str_db(kind.as_str()).unwrap(), kind);
        }
    }

    #[test]
    fn employment_type_from_str_invalid() {
        assert!(EmploymentType::from_str_db("").is_err());
        assert!(EmploymentType::from_str_db("Salaried").is_err());
        assert!(EmploymentType::from_str_db("contractor").is_err());
    }

    #[test]
    fn only_salaried_and_self_employed_are_employed() {
        assert!(EmploymentType::Salaried.is_employed());
        assert!(EmploymentType::SelfEmployed.is_employed());
        assert!(!EmploymentType::Student.is_employed());
        assert!(!EmploymentType::Unemployed.is_employed());
    }

    // -- ApplicationStatus --

    #[test]
    fn status_from_str_invalid() {
        assert!(ApplicationStatus::from_str_db("pending").is_err());
        assert_eq!(
            ApplicationStatus::from_str_db("under_review").unwrap(),
            ApplicationStatus::UnderReview
        );
    }

    // -- Serialization --

    #[test]
    fn application_data_uses_camel_case_wire_names() {
        let data = ApplicationData {
            first_name: "Ana".into(),
            employment_type: Some(EmploymentType::SelfEmployed),
            national_id: Some(UploadedFile::new("id.pdf", 100, "application/pdf")),
            ..Default::default()
        };
        let json = serde_json::to_value(&data).unwrap();

        assert_eq!(json["firstName"], "Ana");
        assert_eq!(json["employmentType"], "self_employed");
        assert_eq!(json["nationalId"]["type"], "application/pdf");
        assert!(json["salaryCertificate"].is_null());
    }

    #[test]
    fn application_data_deserializes_partial_objects() {
        let data: ApplicationData =
            serde_json::from_str(r#"{"firstName":"Ana","salary":"15000"}"#).unwrap();
        assert_eq!(data.first_name, "Ana");
        assert_eq!(data.salary_amount(), Some(15000.0));
        assert_eq!(data.employment_type, None);
    }

    // -- Amounts and sizes --

    #[test]
    fn parse_amount_handles_whitespace_and_garbage() {
        assert_eq!(parse_amount(" 12500 "), Some(12500.0));
        assert_eq!(parse_amount("1e4"), Some(10000.0));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("   "), None);
        assert_eq!(parse_amount("ten"), None);
        assert_eq!(parse_amount("inf"), None);
    }

    #[test]
    fn format_amount_groups_thousands() {
        assert_eq!(format_amount(0.0), "0");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(10000.0), "10,000");
        assert_eq!(format_amount(1234567.5), "1,234,567.50");
    }

    #[test]
    fn file_size_labels() {
        assert_eq!(format_file_size(512), "512 B");
        assert_eq!(format_file_size(2048), "2.0 KB");
        assert_eq!(format_file_size(3 * 1024 * 1024 / 2), "1.5 MB");
    }

    // -- ApplicationPatch --

    #[test]
    fn selecting_employment_type_clears_employer_fields() {
        let mut data = ApplicationData {
            employment_type: Some(EmploymentType::Salaried),
            company_name: "Acme".into(),
            salary: "15000".into(),
            ..Default::default()
        };

        let changed = ApplicationPatch {
            employment_type: Some(Some(EmploymentType::SelfEmployed)),
            ..Default::default()
        }
        .apply_to(&mut data);

        assert_eq!(changed, vec!["employmentType"]);
        assert!(data.company_name.is_empty());
        assert!(data.salary.is_empty());
    }

    #[test]
    fn patch_can_set_employer_fields_with_employment_type() {
        let mut data = ApplicationData::default();
        ApplicationPatch {
            employment_type: Some(Some(EmploymentType::Salaried)),
            company_name: Some("Acme".into()),
            salary: Some("15000".into()),
            ..Default::default()
        }
        .apply_to(&mut data);

        assert_eq!(data.company_name, "Acme");
        assert_eq!(data.salary, "15000");
    }

    #[test]
    fn patch_can_remove_a_document() {
        let mut data = ApplicationData {
            national_id: Some(UploadedFile::new("id.pdf", 100, "application/pdf")),
            ..Default::default()
        };
        ApplicationPatch {
            national_id: Some(None),
            ..Default::default()
        }
        .apply_to(&mut data);
        assert!(data.national_id.is_none());
    }

    #[test]
    fn empty_patch_is_empty() {
        assert!(ApplicationPatch::default().is_empty());
        assert!(!ApplicationPatch {
            phone: Some(String::new()),
            ..Default::default()
        }
        .is_empty());
    }
}
