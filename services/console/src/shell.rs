use std::io::{BufRead, Write};

use applicant_intake::error::AppError;
use applicant_intake::forms::applicants::{
    ApplicantField, ApplicantId, ApplicantRejection, FieldValues, FormSession,
    SubmissionService, SubmissionSink, SubmitOutcome, SUCCESS_NOTIFICATION,
};
use chrono::Local;
use tracing::debug;

use crate::commands::{parse_line, FormCommand, HELP};

/// How a shell run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ShellSummary {
    pub(crate) submitted: usize,
    pub(crate) rejected: usize,
}

/// Drives a form session from line-oriented input and renders it to `out`.
pub(crate) struct Shell<'a, S: ?Sized, W> {
    session: FormSession,
    service: &'a SubmissionService<S>,
    out: W,
    echo: bool,
    prompt: bool,
}

enum Flow {
    Continue,
    Stop,
}

impl<'a, S, W> Shell<'a, S, W>
where
    S: SubmissionSink + ?Sized,
    W: Write,
{
    pub(crate) fn new(session: FormSession, service: &'a SubmissionService<S>, out: W) -> Self {
        Self {
            session,
            service,
            out,
            echo: false,
            prompt: false,
        }
    }

    /// Print each command before its result, for scripted runs.
    pub(crate) fn echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Print a prompt before reading each line, for interactive runs.
    pub(crate) fn prompt(mut self, prompt: bool) -> Self {
        self.prompt = prompt;
        self
    }

    #[cfg(test)]
    pub(crate) fn session(&self) -> &FormSession {
        &self.session
    }

    #[cfg(test)]
    pub(crate) fn into_output(self) -> W {
        self.out
    }

    pub(crate) fn run<R: BufRead>(&mut self, input: R) -> Result<ShellSummary, AppError> {
        let mut summary = ShellSummary {
            submitted: 0,
            rejected: 0,
        };

        self.render_form()?;
        let mut lines = input.lines();
        loop {
            if self.prompt {
                write!(self.out, "> ")?;
                self.out.flush()?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;

            let command = match parse_line(&line) {
                Ok(Some(command)) => {
                    self.echo_line(&line)?;
                    command
                }
                Ok(None) => continue,
                Err(err) => {
                    self.echo_line(&line)?;
                    writeln!(self.out, "error: {err}")?;
                    continue;
                }
            };
            debug!(?command, "form command");

            if let Flow::Stop = self.apply(command, &mut summary)? {
                break;
            }
        }

        Ok(summary)
    }

    fn apply(&mut self, command: FormCommand, summary: &mut ShellSummary) -> Result<Flow, AppError> {
        match command {
            FormCommand::Add => {
                self.session.add_applicant();
                let count = self.session.applicants().len();
                writeln!(self.out, "Added applicant {count}")?;
            }
            FormCommand::Remove(position) => {
                if !self.session.can_delete() {
                    writeln!(
                        self.out,
                        "At least one applicant is required; applicant {position} cannot be removed"
                    )?;
                    return Ok(Flow::Continue);
                }
                if let Some(id) = self.resolve(position)? {
                    self.session.delete_applicant(&id)?;
                    writeln!(self.out, "Removed applicant {position}")?;
                    self.render_form()?;
                }
            }
            FormCommand::Set {
                position,
                field,
                value,
            } => {
                if let Some(id) = self.resolve(position)? {
                    self.session.update_field(&id, field, value)?;
                }
            }
            FormCommand::Primary(position) => {
                if !self.session.can_change_primary() {
                    writeln!(self.out, "At least one applicant must be primary")?;
                    return Ok(Flow::Continue);
                }
                if let Some(id) = self.resolve(position)? {
                    self.session.set_primary(&id)?;
                    writeln!(self.out, "Applicant {position} is now the primary applicant")?;
                }
            }
            FormCommand::Theme => {
                let scheme = self.session.toggle_color_scheme();
                writeln!(self.out, "Color scheme: {scheme}")?;
            }
            FormCommand::Show => self.render_form()?,
            FormCommand::Submit => match self.service.submit(&mut self.session)? {
                SubmitOutcome::Accepted(submission) => {
                    summary.submitted += 1;
                    let at = submission.submitted_at.with_timezone(&Local);
                    writeln!(
                        self.out,
                        "{SUCCESS_NOTIFICATION} ({})",
                        at.format("%H:%M:%S")
                    )?;
                }
                SubmitOutcome::Rejected(rejections) => {
                    summary.rejected += 1;
                    self.render_rejections(&rejections)?;
                }
            },
            FormCommand::Help => writeln!(self.out, "{HELP}")?,
            FormCommand::Quit => return Ok(Flow::Stop),
        }

        Ok(Flow::Continue)
    }

    fn echo_line(&mut self, line: &str) -> Result<(), AppError> {
        if self.echo {
            writeln!(self.out, "> {}", line.trim())?;
        }
        Ok(())
    }

    fn resolve(&mut self, position: usize) -> Result<Option<ApplicantId>, AppError> {
        let id = self.session.collection().id_at(position - 1).cloned();
        if id.is_none() {
            writeln!(
                self.out,
                "There is no applicant {position} (the form has {})",
                self.session.applicants().len()
            )?;
        }
        Ok(id)
    }

    fn render_form(&mut self) -> Result<(), AppError> {
        writeln!(
            self.out,
            "Applicant Details [{}]",
            self.session.color_scheme()
        )?;

        let can_delete = self.session.can_delete();
        for (index, applicant) in self.session.applicants().iter().enumerate() {
            let mut header = format!("Applicant {}", index + 1);
            if applicant.is_primary {
                header.push_str(" (primary)");
            }
            if can_delete {
                header.push_str(&format!(" [remove {}]", index + 1));
            }
            writeln!(self.out, "{header}")?;

            for field in ApplicantField::ALL {
                let label = format!("{}*:", field.label());
                writeln!(self.out, "  {:<14} {}", label, applicant.value(field))?;
                if let Some(message) = self.session.visible_error(&applicant.id, field) {
                    writeln!(self.out, "  {:<14} ! {message}", "")?;
                }
            }
        }

        Ok(())
    }

    fn render_rejections(&mut self, rejections: &[ApplicantRejection]) -> Result<(), AppError> {
        writeln!(self.out, "Please fix the highlighted fields:")?;
        for rejection in rejections {
            for (field, error) in rejection.errors.iter() {
                writeln!(
                    self.out,
                    "  Applicant {} {}: {error}",
                    rejection.position,
                    field.label()
                )?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::ConsoleSink;
    use applicant_intake::config::OutputFormat;
    use std::io::Cursor;
    use std::sync::Arc;

    fn run_script(script: &str) -> (ShellSummary, FormSession, String, String) {
        let sink = Arc::new(ConsoleSink::new(Vec::new(), OutputFormat::Compact));
        let service = SubmissionService::new(sink.clone());
        let mut shell = Shell::new(FormSession::default(), &service, Vec::new()).echo(true);

        let summary = shell.run(Cursor::new(script)).expect("script runs");
        let session = shell.session().clone();
        let output = String::from_utf8(shell.into_output()).expect("utf8 output");
        (summary, session, output, sink.text())
    }

    #[test]
    fn invalid_submit_renders_errors_without_delivery() {
        let (summary, _, output, console) = run_script("set 1 first-name Jane\nsubmit\n");

        assert_eq!(summary.rejected, 1);
        assert_eq!(summary.submitted, 0);
        assert!(output.contains("Applicant 1 Last name: Last name is required"));
        assert!(output.contains("Applicant 1 Email: Email is required"));
        assert!(console.is_empty());
    }

    #[test]
    fn valid_submit_delivers_once_and_notifies() {
        let script = "\
set 1 first-name Jane
set 1 last-name Doe
set 1 mobile 1234567890
set 1 email jane@doe.com
add
set 2 first-name John
set 2 last-name Roe
set 2 mobile 0987654321
set 2 email john@roe.com
primary 2
submit
";
        let (summary, session, output, console) = run_script(script);

        assert_eq!(summary.submitted, 1);
        assert!(output.contains("Form submitted! Check the console for applicant data"));
        assert_eq!(console.lines().count(), 1);
        assert!(console.contains(r#""firstName":"John""#));
        assert!(session.applicants()[1].is_primary);
    }

    #[test]
    fn removing_only_applicant_is_refused() {
        let (_, session, output, _) = run_script("remove 1\n");

        assert!(output.contains("At least one applicant is required"));
        assert_eq!(session.applicants().len(), 1);
    }

    #[test]
    fn sole_primary_cannot_be_reassigned() {
        let (_, session, output, _) = run_script("primary 1\n");

        assert!(output.contains("At least one applicant must be primary"));
        assert!(session.applicants()[0].is_primary);
    }

    #[test]
    fn out_of_range_positions_and_bad_lines_do_not_stop_the_session() {
        let (_, session, output, _) = run_script("set 3 email a@b.com\nfrobnicate\nadd\nquit\nadd\n");

        assert!(output.contains("There is no applicant 3"));
        assert!(output.contains("error: unknown command 'frobnicate'"));
        assert_eq!(session.applicants().len(), 2);
    }

    #[test]
    fn echoed_scripts_show_the_rejected_line_before_its_error() {
        let (_, _, output, _) = run_script("# comment\nfrobnicate now\nshow\n");

        assert!(output.contains("> frobnicate now\nerror: unknown command 'frobnicate'"));
        assert!(!output.contains("> # comment"));
        assert!(output.contains("> show\nApplicant Details [light]"));
    }

    #[test]
    fn removing_primary_promotes_next_applicant() {
        let (_, session, output, _) = run_script("add\nset 2 first-name John\nremove 1\n");

        assert!(output.contains("Removed applicant 1"));
        assert_eq!(session.applicants().len(), 1);
        assert_eq!(session.applicants()[0].first_name, "John");
        assert!(session.applicants()[0].is_primary);
    }

    #[test]
    fn theme_toggle_reports_new_scheme() {
        let (_, _, output, _) = run_script("theme\nshow\n");

        assert!(output.contains("Color scheme: dark"));
        assert!(output.contains("Applicant Details [dark]"));
    }
}
