use super::common::*;
use crate::forms::applicants::domain::{Applicant, ApplicantField};
use crate::forms::applicants::validation::{validate_applicant, FieldError};

#[test]
fn missing_first_name_is_the_only_error() {
    let errors = validate_applicant(&draft("", "Doe", "1234567890", "a@b.com"));

    assert_eq!(
        errors.message(ApplicantField::FirstName).as_deref(),
        Some("First name is required")
    );
    assert!(errors.get(ApplicantField::LastName).is_none());
    assert!(errors.get(ApplicantField::Mobile).is_none());
    assert!(errors.get(ApplicantField::Email).is_none());
    assert_eq!(errors.len(), 1);
}

#[test]
fn malformed_email_is_reported() {
    let mut values = jane_doe();
    values.email = "not-an-email".to_string();

    let errors = validate_applicant(&values);

    assert_eq!(errors.get(ApplicantField::Email), Some(&FieldError::InvalidEmail));
    assert_eq!(
        errors.message(ApplicantField::Email).as_deref(),
        Some("Invalid email address")
    );
    assert_eq!(errors.len(), 1);
}

#[test]
fn undotted_and_repeated_at_emails_are_accepted() {
    for email in ["jane@doe", "user@localhost", "a@@b.com"] {
        let errors = validate_applicant(&draft("Jane", "Doe", "1234567890", email));
        assert!(errors.is_valid(), "{email} should be accepted");
    }

    let errors = validate_applicant(&draft("Jane", "Doe", "1234567890", "jane @doe"));
    assert_eq!(errors.get(ApplicantField::Email), Some(&FieldError::InvalidEmail));
}

#[test]
fn short_mobile_is_reported() {
    let mut values = jane_doe();
    values.mobile = "12345".to_string();

    let errors = validate_applicant(&values);

    assert_eq!(
        errors.message(ApplicantField::Mobile).as_deref(),
        Some("Mobile number must be 10 digits")
    );
    assert_eq!(errors.len(), 1);
}

#[test]
fn complete_applicant_has_no_errors() {
    let errors = validate_applicant(&jane_doe());

    assert!(errors.is_valid());
    for field in ApplicantField::ALL {
        assert!(errors.get(field).is_none(), "{field} should pass");
    }
}

#[test]
fn blank_applicant_reports_required_for_every_field() {
    let errors = validate_applicant(&Applicant::blank(true));

    let messages: Vec<String> = errors.iter().map(|(_, error)| error.to_string()).collect();
    assert_eq!(
        messages,
        vec![
            "First name is required",
            "Last name is required",
            "Mobile number is required",
            "Email is required",
        ]
    );
}

#[test]
fn whitespace_only_values_count_as_blank() {
    let errors = validate_applicant(&draft("  ", "\t", " ", "   "));

    assert_eq!(
        errors.get(ApplicantField::Email),
        Some(&FieldError::Required(ApplicantField::Email))
    );
    assert_eq!(
        errors.get(ApplicantField::Mobile),
        Some(&FieldError::Required(ApplicantField::Mobile))
    );
    assert_eq!(errors.len(), 4);
}

#[test]
fn required_rule_wins_over_format_rule() {
    let errors = validate_applicant(&draft("Jane", "Doe", "", ""));

    assert_eq!(
        errors.message(ApplicantField::Mobile).as_deref(),
        Some("Mobile number is required")
    );
    assert_eq!(
        errors.message(ApplicantField::Email).as_deref(),
        Some("Email is required")
    );
}

#[test]
fn validation_does_not_mutate_the_record() {
    let applicant = Applicant::from_draft(draft("", "Doe", "12", "x"), true);
    let before = applicant.clone();

    let errors = validate_applicant(&applicant);

    assert_eq!(errors.len(), 3);
    assert_eq!(applicant, before);
}

#[test]
fn errors_serialize_as_field_message_map() {
    let errors = validate_applicant(&draft("Jane", "", "12345", "jane@doe.com"));

    let payload = serde_json::to_value(&errors).expect("errors serialize");

    assert_eq!(
        payload,
        serde_json::json!({
            "lastName": "Last name is required",
            "mobile": "Mobile number must be 10 digits",
        })
    );
}
