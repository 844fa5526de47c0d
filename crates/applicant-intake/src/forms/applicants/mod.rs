//! Multi-applicant intake form: the applicant collection, the per-field validator, the
//! presentation session that tracks touched fields, and the submit flow.

pub mod collection;
pub mod domain;
pub mod session;
pub mod submission;
pub mod validation;

#[cfg(test)]
mod tests;

pub use collection::{ApplicantCollection, CollectionError};
pub use domain::{
    Applicant, ApplicantDraft, ApplicantField, ApplicantId, FieldValues, UnknownFieldError,
};
pub use session::{FieldState, FormSession};
pub use submission::{
    ApplicantRejection, SinkError, Submission, SubmissionError, SubmissionService,
    SubmissionSink, SubmitOutcome, SUCCESS_NOTIFICATION,
};
pub use validation::{validate_applicant, FieldError, FieldErrors};
