use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier assigned to an applicant when it is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicantId(pub String);

impl ApplicantId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApplicantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Editable text attributes of an applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ApplicantField {
    FirstName,
    LastName,
    Mobile,
    Email,
}

impl ApplicantField {
    /// Every field in form order.
    pub const ALL: [ApplicantField; 4] = [
        ApplicantField::FirstName,
        ApplicantField::LastName,
        ApplicantField::Mobile,
        ApplicantField::Email,
    ];

    /// Human facing label shown next to the input.
    pub const fn label(self) -> &'static str {
        match self {
            ApplicantField::FirstName => "First name",
            ApplicantField::LastName => "Last name",
            ApplicantField::Mobile => "Mobile number",
            ApplicantField::Email => "Email",
        }
    }

    /// Payload key, matching the serialized applicant record.
    pub const fn key(self) -> &'static str {
        match self {
            ApplicantField::FirstName => "firstName",
            ApplicantField::LastName => "lastName",
            ApplicantField::Mobile => "mobile",
            ApplicantField::Email => "email",
        }
    }
}

impl fmt::Display for ApplicantField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown applicant field '{0}' (expected first-name, last-name, mobile, or email)")]
pub struct UnknownFieldError(pub String);

impl FromStr for ApplicantField {
    type Err = UnknownFieldError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized: String = raw
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "firstname" | "first" => Ok(ApplicantField::FirstName),
            "lastname" | "last" => Ok(ApplicantField::LastName),
            "mobile" | "mobilenumber" | "phone" => Ok(ApplicantField::Mobile),
            "email" => Ok(ApplicantField::Email),
            _ => Err(UnknownFieldError(raw.trim().to_string())),
        }
    }
}

/// Read access to the four editable values, shared by stored applicants and drafts.
pub trait FieldValues {
    fn value(&self, field: ApplicantField) -> &str;
}

/// Field values without identity or primary designation, e.g. from an import file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicantDraft {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub email: String,
}

impl FieldValues for ApplicantDraft {
    fn value(&self, field: ApplicantField) -> &str {
        match field {
            ApplicantField::FirstName => &self.first_name,
            ApplicantField::LastName => &self.last_name,
            ApplicantField::Mobile => &self.mobile,
            ApplicantField::Email => &self.email,
        }
    }
}

/// One applicant record as held by the collection and handed to the submission sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Applicant {
    pub id: ApplicantId,
    pub first_name: String,
    pub last_name: String,
    pub mobile: String,
    pub email: String,
    pub is_primary: bool,
}

impl Applicant {
    /// Blank record with a freshly generated id.
    pub fn blank(is_primary: bool) -> Self {
        Self {
            id: ApplicantId::generate(),
            first_name: String::new(),
            last_name: String::new(),
            mobile: String::new(),
            email: String::new(),
            is_primary,
        }
    }

    pub fn from_draft(draft: ApplicantDraft, is_primary: bool) -> Self {
        let ApplicantDraft {
            first_name,
            last_name,
            mobile,
            email,
        } = draft;

        Self {
            id: ApplicantId::generate(),
            first_name,
            last_name,
            mobile,
            email,
            is_primary,
        }
    }

    pub(crate) fn set_value(&mut self, field: ApplicantField, value: String) {
        let slot = match field {
            ApplicantField::FirstName => &mut self.first_name,
            ApplicantField::LastName => &mut self.last_name,
            ApplicantField::Mobile => &mut self.mobile,
            ApplicantField::Email => &mut self.email,
        };
        *slot = value;
    }
}

impl FieldValues for Applicant {
    fn value(&self, field: ApplicantField) -> &str {
        match field {
            ApplicantField::FirstName => &self.first_name,
            ApplicantField::LastName => &self.last_name,
            ApplicantField::Mobile => &self.mobile,
            ApplicantField::Email => &self.email,
        }
    }
}
