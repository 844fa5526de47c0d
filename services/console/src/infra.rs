use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use applicant_intake::config::OutputFormat;
use applicant_intake::error::AppError;
use applicant_intake::forms::applicants::{
    ApplicantCollection, ApplicantDraft, FormSession, SinkError, Submission, SubmissionSink,
};
use applicant_intake::forms::ColorScheme;
use serde::Deserialize;
use tracing::info;

/// Writes accepted submissions to a console stream, mirroring a `console.log` of the payload.
pub(crate) struct ConsoleSink<W> {
    format: OutputFormat,
    out: Mutex<W>,
}

impl ConsoleSink<io::Stdout> {
    pub(crate) fn stdout(format: OutputFormat) -> Self {
        Self::new(io::stdout(), format)
    }
}

impl<W> ConsoleSink<W> {
    pub(crate) fn new(out: W, format: OutputFormat) -> Self {
        Self {
            format,
            out: Mutex::new(out),
        }
    }
}

impl<W> SubmissionSink for ConsoleSink<W>
where
    W: Write + Send,
{
    fn deliver(&self, submission: &Submission) -> Result<(), SinkError> {
        let payload = match self.format {
            OutputFormat::Pretty => serde_json::to_string_pretty(&submission.applicants)?,
            OutputFormat::Compact => serde_json::to_string(&submission.applicants)?,
        };

        let mut out = self
            .out
            .lock()
            .map_err(|_| SinkError::Transport("console writer poisoned".to_string()))?;
        writeln!(out, "Form submitted: {payload}")
            .and_then(|_| out.flush())
            .map_err(|err| SinkError::Transport(err.to_string()))?;

        info!(applicants = submission.applicants.len(), "submission written to console");
        Ok(())
    }
}

#[cfg(test)]
impl ConsoleSink<Vec<u8>> {
    pub(crate) fn text(&self) -> String {
        let out = self.out.lock().expect("console mutex poisoned");
        String::from_utf8_lossy(&out).into_owned()
    }
}

/// Import record: the draft fields plus an optional primary flag.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImportedApplicant {
    #[serde(flatten)]
    pub(crate) draft: ApplicantDraft,
    #[serde(default)]
    pub(crate) is_primary: bool,
}

/// Builds a session from imported records; the first flagged record becomes primary,
/// falling back to the first record.
pub(crate) fn session_from_imports(
    imports: Vec<ImportedApplicant>,
    color_scheme: ColorScheme,
) -> Result<FormSession, AppError> {
    let primary_index = imports.iter().position(|record| record.is_primary);
    let drafts = imports.into_iter().map(|record| record.draft).collect();
    let mut collection = ApplicantCollection::from_drafts(drafts)?;

    if let Some(index) = primary_index {
        if let Some(id) = collection.id_at(index).cloned() {
            collection.set_primary(&id)?;
        }
    }

    Ok(FormSession::from_collection(collection, color_scheme))
}

pub(crate) fn load_session(path: &Path, color_scheme: ColorScheme) -> Result<FormSession, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let imports: Vec<ImportedApplicant> = serde_json::from_str(&raw)?;
    info!(path = %path.display(), applicants = imports.len(), "applicants imported");
    session_from_imports(imports, color_scheme)
}

pub(crate) fn parse_color_scheme(raw: &str) -> Result<ColorScheme, String> {
    ColorScheme::parse(raw).ok_or_else(|| format!("'{raw}' is not a color scheme (light or dark)"))
}
