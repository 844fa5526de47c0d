use once_cell::sync::Lazy;
use regex::Regex;

use super::super::domain::{ApplicantField, FieldValues};
use super::FieldError;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+$").expect("email regex"));

pub(crate) const MOBILE_DIGITS: usize = 10;

pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub(crate) fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

pub(crate) fn is_valid_mobile(value: &str) -> bool {
    value.len() == MOBILE_DIGITS && value.bytes().all(|byte| byte.is_ascii_digit())
}

/// First failing rule for a single field, if any.
pub(crate) fn check_field<T>(record: &T, field: ApplicantField) -> Option<FieldError>
where
    T: FieldValues + ?Sized,
{
    let value = record.value(field);
    if is_blank(value) {
        return Some(FieldError::Required(field));
    }

    match field {
        ApplicantField::FirstName | ApplicantField::LastName => None,
        ApplicantField::Email if !is_valid_email(value) => Some(FieldError::InvalidEmail),
        ApplicantField::Mobile if !is_valid_mobile(value) => Some(FieldError::InvalidMobile),
        ApplicantField::Email | ApplicantField::Mobile => None,
    }
}
