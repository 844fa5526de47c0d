use std::sync::{Arc, Mutex};

use crate::forms::applicants::domain::{ApplicantDraft, ApplicantField, ApplicantId};
use crate::forms::applicants::session::FormSession;
use crate::forms::applicants::submission::{
    SinkError, Submission, SubmissionService, SubmissionSink,
};

pub(super) fn draft(first: &str, last: &str, mobile: &str, email: &str) -> ApplicantDraft {
    ApplicantDraft {
        first_name: first.to_string(),
        last_name: last.to_string(),
        mobile: mobile.to_string(),
        email: email.to_string(),
    }
}

pub(super) fn jane_doe() -> ApplicantDraft {
    draft("Jane", "Doe", "1234567890", "jane@doe.com")
}

pub(super) fn fill(session: &mut FormSession, id: &ApplicantId, values: &ApplicantDraft) {
    for (field, value) in [
        (ApplicantField::FirstName, &values.first_name),
        (ApplicantField::LastName, &values.last_name),
        (ApplicantField::Mobile, &values.mobile),
        (ApplicantField::Email, &values.email),
    ] {
        session
            .update_field(id, field, value.clone())
            .expect("applicant exists");
    }
}

pub(super) fn first_id(session: &FormSession) -> ApplicantId {
    session
        .collection()
        .id_at(0)
        .cloned()
        .expect("session always has an applicant")
}

#[derive(Default, Clone)]
pub(super) struct RecordingSink {
    deliveries: Arc<Mutex<Vec<Submission>>>,
}

impl RecordingSink {
    pub(super) fn deliveries(&self) -> Vec<Submission> {
        self.deliveries.lock().expect("sink mutex poisoned").clone()
    }
}

impl SubmissionSink for RecordingSink {
    fn deliver(&self, submission: &Submission) -> Result<(), SinkError> {
        self.deliveries
            .lock()
            .expect("sink mutex poisoned")
            .push(submission.clone());
        Ok(())
    }
}

pub(super) struct OfflineSink;

impl SubmissionSink for OfflineSink {
    fn deliver(&self, _submission: &Submission) -> Result<(), SinkError> {
        Err(SinkError::Transport("console closed".to_string()))
    }
}

pub(super) fn build_service() -> (SubmissionService<RecordingSink>, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    (SubmissionService::new(sink.clone()), sink)
}
