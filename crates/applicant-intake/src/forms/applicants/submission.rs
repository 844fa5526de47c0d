use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use super::domain::{Applicant, ApplicantId};
use super::session::FormSession;
use super::validation::FieldErrors;

/// Message shown to the user once a submission has been handed off.
pub const SUCCESS_NOTIFICATION: &str = "Form submitted! Check the console for applicant data";

/// Payload delivered to the sink: the full applicant list at the time of submit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub submitted_at: DateTime<Utc>,
    pub applicants: Vec<Applicant>,
}

impl Submission {
    pub fn primary(&self) -> Option<&Applicant> {
        self.applicants.iter().find(|applicant| applicant.is_primary)
    }
}

/// Outbound hook receiving accepted submissions (console log, test recorder, ...).
pub trait SubmissionSink: Send + Sync {
    fn deliver(&self, submission: &Submission) -> Result<(), SinkError>;
}

/// Sink dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("submission sink unavailable: {0}")]
    Transport(String),
    #[error("failed to encode submission: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Validation failures for one applicant, positioned as the form shows them (1-based).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicantRejection {
    pub applicant_id: ApplicantId,
    pub position: usize,
    pub errors: FieldErrors,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    Accepted(Submission),
    Rejected(Vec<ApplicantRejection>),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted(_))
    }

    pub fn notification(&self) -> Option<&'static str> {
        match self {
            SubmitOutcome::Accepted(_) => Some(SUCCESS_NOTIFICATION),
            SubmitOutcome::Rejected(_) => None,
        }
    }
}

/// Error raised by the submission service.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error(transparent)]
    Sink(#[from] SinkError),
}

/// Validate-then-deliver flow behind the submit action.
pub struct SubmissionService<S: ?Sized> {
    sink: Arc<S>,
}

impl<S> SubmissionService<S>
where
    S: SubmissionSink + ?Sized,
{
    pub fn new(sink: Arc<S>) -> Self {
        Self { sink }
    }

    /// Validates every applicant and, only when all pass, delivers the payload exactly once.
    ///
    /// Applicant data is never modified; a rejected submit only updates the visible errors.
    pub fn submit(&self, session: &mut FormSession) -> Result<SubmitOutcome, SubmissionError> {
        let rejections: Vec<ApplicantRejection> = session
            .validate_all()
            .into_iter()
            .enumerate()
            .filter(|(_, (_, errors))| !errors.is_valid())
            .map(|(index, (applicant_id, errors))| ApplicantRejection {
                applicant_id,
                position: index + 1,
                errors,
            })
            .collect();

        if !rejections.is_empty() {
            warn!(
                invalid_applicants = rejections.len(),
                total = session.applicants().len(),
                "submission blocked by validation errors"
            );
            return Ok(SubmitOutcome::Rejected(rejections));
        }

        let submission = Submission {
            submitted_at: Utc::now(),
            applicants: session.applicants().to_vec(),
        };
        self.sink.deliver(&submission)?;

        info!(
            applicants = submission.applicants.len(),
            primary = ?submission.primary().map(|applicant| &applicant.id),
            "application submitted"
        );
        Ok(SubmitOutcome::Accepted(submission))
    }
}
