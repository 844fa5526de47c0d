use std::io::{self, Cursor};
use std::sync::Arc;

use applicant_intake::config::AppConfig;
use applicant_intake::error::AppError;
use applicant_intake::forms::applicants::{FormSession, SubmissionService};

use crate::infra::ConsoleSink;
use crate::shell::{Shell, ShellSummary};

/// Household walk-through: a rejected submit, corrections, a primary change, then a clean submit.
pub(crate) const DEMO_SCRIPT: &str = "\
# lead applicant, with a short mobile number
set 1 first-name Jane
set 1 last-name Doe
set 1 mobile 12345
set 1 email jane@doe.com
# co-applicant left incomplete
add
set 2 first-name John
set 2 email john-at-doe
submit
# fix the highlighted fields
set 1 mobile 1234567890
set 2 last-name Doe
set 2 mobile 0987654321
set 2 email john@doe.com
primary 2
theme
show
submit
";

pub(crate) fn run_demo(config: &AppConfig) -> Result<ShellSummary, AppError> {
    let sink = Arc::new(ConsoleSink::stdout(config.form.output));
    let service = SubmissionService::new(sink);
    let session = FormSession::new(config.form.color_scheme);

    let stdout = io::stdout();
    let mut shell = Shell::new(session, &service, stdout.lock()).echo(true);
    shell.run(Cursor::new(DEMO_SCRIPT))
}
