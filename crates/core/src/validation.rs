//! Field validation for applicant details.
//!
//! Rules are declared as ordered tables: a base table that always applies
//! and a table selected by the declared employment type. Evaluation keeps
//! only the first failing message per field. Whether an otherwise valid
//! applicant may proceed is a separate question answered by
//! [`crate::eligibility`].

use std::fmt;
use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::application::{parse_amount, ApplicationData, EmploymentType};

// ---------------------------------------------------------------------------
// Field names
// ---------------------------------------------------------------------------

/// Wire names of the applicant fields; errors are keyed by these.
pub mod fields {
    pub const FIRST_NAME: &str = "firstName";
    pub const LAST_NAME: &str = "lastName";
    pub const EMAIL: &str = "email";
    pub const PHONE: &str = "phone";
    pub const EMPLOYMENT_TYPE: &str = "employmentType";
    pub const COMPANY_NAME: &str = "companyName";
    pub const SALARY: &str = "salary";
    pub const SALARY_CERTIFICATE: &str = "salaryCertificate";
    pub const NATIONAL_ID: &str = "nationalId";

    /// Fields collected on the details step, in display order.
    pub const DETAILS: [&str; 7] = [
        FIRST_NAME,
        LAST_NAME,
        EMAIL,
        PHONE,
        EMPLOYMENT_TYPE,
        COMPANY_NAME,
        SALARY,
    ];

    /// Fields a submission must carry before anything else is checked.
    pub const REQUIRED_FOR_SUBMISSION: [&str; 5] =
        [FIRST_NAME, LAST_NAME, EMAIL, PHONE, EMPLOYMENT_TYPE];
}

/// Local mobile format: `05` followed by eight digits.
pub const PHONE_PATTERN: &str = r"^05\d{8}$";

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_PATTERN).expect("valid regex"));

/// Stricter address shape: dot-separated local atoms and a dotted domain
/// ending in an alphabetic label of at least two letters.
pub const EMAIL_SHAPE_PATTERN: &str =
    r"^[A-Za-z0-9_'+-]+(?:\.[A-Za-z0-9_'+-]+)*@(?:[A-Za-z0-9][A-Za-z0-9-]*\.)+[A-Za-z]{2,}$";

static EMAIL_SHAPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_SHAPE_PATTERN).expect("valid regex"));

const EMPLOYMENT_VALUES: &[&str] = &["self_employed", "salaried", "student", "unemployed"];

// ---------------------------------------------------------------------------
// Field errors
// ---------------------------------------------------------------------------

/// Field name to message, in the order failures were found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(IndexMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field` unless the field already has one.
    ///
    /// Returns `true` if the message was recorded.
    pub fn insert_first(&mut self, field: &str, message: impl Into<String>) -> bool {
        if self.0.contains_key(field) {
            return false;
        }
        self.0.insert(field.to_string(), message.into());
        true
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.0.shift_remove(field)
    }

    /// Drop every error whose field fails `keep`.
    pub fn retain_fields(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.0.retain(|field, _| keep(field.as_str()));
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Field sources
// ---------------------------------------------------------------------------

/// Anything that can hand out raw values for the validated fields.
///
/// Absent values read as the empty string so that "missing" and "blank"
/// fail the same required-rule.
pub trait FieldSource {
    fn field_value(&self, field: &str) -> &str;
}

impl FieldSource for ApplicationData {
    fn field_value(&self, field: &str) -> &str {
        match field {
            fields::FIRST_NAME => &self.first_name,
            fields::LAST_NAME => &self.last_name,
            fields::EMAIL => &self.email,
            fields::PHONE => &self.phone,
            fields::EMPLOYMENT_TYPE => self.employment_type.map_or("", EmploymentType::as_str),
            fields::COMPANY_NAME => &self.company_name,
            fields::SALARY => &self.salary,
            _ => "",
        }
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
enum Check {
    /// Non-empty, whitespace counts.
    Required,
    /// Non-empty after trimming.
    NotBlank,
    MinChars(usize),
    Email,
    Pattern(&'static LazyLock<Regex>),
    OneOf(&'static [&'static str]),
    PositiveAmount,
}

impl Check {
    fn passes(self, value: &str) -> bool {
        match self {
            Check::Required => !value.is_empty(),
            Check::NotBlank => !value.trim().is_empty(),
            Check::MinChars(min) => value.chars().count() >= min,
            Check::Email => value.validate_email(),
            Check::Pattern(re) => re.is_match(value),
            Check::OneOf(allowed) => allowed.contains(&value),
            Check::PositiveAmount => parse_amount(value).is_some_and(|v| v > 0.0),
        }
    }
}

/// One check on one field, with the message shown when it fails.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    check: Check,
    pub message: &'static str,
}

impl FieldRule {
    const fn new(field: &'static str, check: Check, message: &'static str) -> Self {
        Self {
            field,
            check,
            message,
        }
    }
}

static BASE_RULES: &[FieldRule] = &[
    FieldRule::new(fields::FIRST_NAME, Check::Required, "First name is required"),
    FieldRule::new(
        fields::FIRST_NAME,
        Check::MinChars(2),
        "First name must be at least 2 characters",
    ),
    FieldRule::new(fields::LAST_NAME, Check::Required, "Last name is required"),
    FieldRule::new(
        fields::LAST_NAME,
        Check::MinChars(2),
        "Last name must be at least 2 characters",
    ),
    FieldRule::new(fields::EMAIL, Check::Required, "Email is required"),
    FieldRule::new(fields::EMAIL, Check::Email, "Please enter a valid email address"),
    FieldRule::new(
        fields::EMAIL,
        Check::Pattern(&EMAIL_SHAPE_RE),
        "Please enter a valid email address",
    ),
    FieldRule::new(fields::PHONE, Check::Required, "Phone number is required"),
    FieldRule::new(
        fields::PHONE,
        Check::Pattern(&PHONE_RE),
        "Phone must be in the format 05XXXXXXXX",
    ),
    FieldRule::new(
        fields::EMPLOYMENT_TYPE,
        Check::OneOf(EMPLOYMENT_VALUES),
        "Please select an employment type",
    ),
];

static EMPLOYED_RULES: &[FieldRule] = &[
    FieldRule::new(
        fields::COMPANY_NAME,
        Check::NotBlank,
        "Company name is required for employed individuals",
    ),
    FieldRule::new(
        fields::SALARY,
        Check::NotBlank,
        "Salary is required for employed individuals",
    ),
    FieldRule::new(
        fields::SALARY,
        Check::PositiveAmount,
        "Please enter a valid salary amount",
    ),
];

/// Rules that apply on top of the base table for a given employment value.
fn conditional_rules(employment_type: &str) -> &'static [FieldRule] {
    match EmploymentType::from_str_db(employment_type) {
        Ok(kind) if kind.is_employed() => EMPLOYED_RULES,
        _ => &[],
    }
}

/// Every rule that applies to `source`, in evaluation order.
pub fn rules_for(source: &impl FieldSource) -> impl Iterator<Item = &'static FieldRule> {
    BASE_RULES
        .iter()
        .chain(conditional_rules(source.field_value(fields::EMPLOYMENT_TYPE)))
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Validate the applicant details.
///
/// Returns every failing field with the first message that applied to it.
pub fn validate_customer_details(source: &impl FieldSource) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    for rule in rules_for(source) {
        if errors.contains(rule.field) {
            continue;
        }
        if !rule.check.passes(source.field_value(rule.field)) {
            errors.insert_first(rule.field, rule.message);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Names of required submission fields that are absent or empty.
pub fn missing_required_fields(source: &impl FieldSource) -> Vec<&'static str> {
    fields::REQUIRED_FOR_SUBMISSION
        .into_iter()
        .filter(|field| source.field_value(field).trim().is_empty())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
