mod rules;

use std::collections::BTreeMap;

use serde::ser::{Serialize, Serializer};

use super::domain::{ApplicantField, FieldValues};

/// Field-level failure; `Display` yields the message shown under the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("{} is required", .0.label())]
    Required(ApplicantField),
    #[error("Invalid email address")]
    InvalidEmail,
    #[error("Mobile number must be {} digits", rules::MOBILE_DIGITS)]
    InvalidMobile,
}

/// Errors for one applicant, keyed by field. Fields that passed are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<ApplicantField, FieldError>);

impl FieldErrors {
    pub fn get(&self, field: ApplicantField) -> Option<&FieldError> {
        self.0.get(&field)
    }

    /// Message for a field, or `None` when it passed.
    pub fn message(&self, field: ApplicantField) -> Option<String> {
        self.get(field).map(ToString::to_string)
    }

    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Failing fields in form order.
    pub fn iter(&self) -> impl Iterator<Item = (ApplicantField, &FieldError)> {
        self.0.iter().map(|(field, error)| (*field, error))
    }
}

impl Serialize for FieldErrors {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(
            self.0
                .iter()
                .map(|(field, error)| (field.key(), error.to_string())),
        )
    }
}

/// Runs every field rule against the current values. Pure; never mutates the record.
pub fn validate_applicant<T>(record: &T) -> FieldErrors
where
    T: FieldValues + ?Sized,
{
    let errors = ApplicantField::ALL
        .into_iter()
        .filter_map(|field| rules::check_field(record, field).map(|error| (field, error)))
        .collect();

    FieldErrors(errors)
}
