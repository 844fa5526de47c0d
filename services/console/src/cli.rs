use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::Arc;

use applicant_intake::config::AppConfig;
use applicant_intake::error::AppError;
use applicant_intake::forms::applicants::{
    FormSession, SubmissionService, SubmitOutcome, SUCCESS_NOTIFICATION,
};
use applicant_intake::forms::ColorScheme;
use applicant_intake::telemetry;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::demo::run_demo;
use crate::infra::{load_session, parse_color_scheme, ConsoleSink};
use crate::shell::Shell;

#[derive(Parser, Debug)]
#[command(
    name = "Applicant Intake",
    about = "Collect, validate, and submit applicant details from the terminal",
    version
)]
struct Cli {
    /// Override the configured color scheme (light or dark)
    #[arg(long, global = true, value_parser = parse_color_scheme)]
    color_scheme: Option<ColorScheme>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fill in the form interactively (default command)
    Fill,
    /// Replay a file of form commands, echoing each one
    Replay(ReplayArgs),
    /// Validate and submit applicants from a JSON file
    Check(CheckArgs),
    /// Walk through a scripted household application
    Demo,
}

#[derive(Args, Debug)]
struct ReplayArgs {
    /// File with one form command per line
    #[arg(long)]
    script: PathBuf,
}

#[derive(Args, Debug)]
struct CheckArgs {
    /// JSON array of applicants (firstName, lastName, mobile, email, isPrimary)
    #[arg(long)]
    input: PathBuf,
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;

    if let Some(scheme) = cli.color_scheme {
        config.form.color_scheme = scheme;
    }

    telemetry::init(&config.telemetry)?;
    info!(?config.environment, scheme = %config.form.color_scheme, "applicant intake ready");

    match cli.command.unwrap_or(Command::Fill) {
        Command::Fill => run_fill(&config),
        Command::Replay(args) => run_replay(&config, args),
        Command::Check(args) => run_check(&config, args),
        Command::Demo => run_demo(&config).map(|_| ()),
    }
}

fn run_fill(config: &AppConfig) -> Result<(), AppError> {
    let service = SubmissionService::new(Arc::new(ConsoleSink::stdout(config.form.output)));
    let session = FormSession::new(config.form.color_scheme);
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();

    let stdout = io::stdout();
    let mut shell = Shell::new(session, &service, stdout.lock()).prompt(interactive);
    let summary = shell.run(stdin.lock())?;
    info!(submitted = summary.submitted, rejected = summary.rejected, "form session closed");
    Ok(())
}

fn run_replay(config: &AppConfig, args: ReplayArgs) -> Result<(), AppError> {
    let script = std::fs::File::open(&args.script)?;
    let service = SubmissionService::new(Arc::new(ConsoleSink::stdout(config.form.output)));
    let session = FormSession::new(config.form.color_scheme);

    let stdout = io::stdout();
    let mut shell = Shell::new(session, &service, stdout.lock()).echo(true);
    let summary = shell.run(io::BufReader::new(script))?;
    info!(
        script = %args.script.display(),
        submitted = summary.submitted,
        rejected = summary.rejected,
        "script replayed"
    );
    Ok(())
}

fn run_check(config: &AppConfig, args: CheckArgs) -> Result<(), AppError> {
    let mut session = load_session(&args.input, config.form.color_scheme)?;
    let service = SubmissionService::new(Arc::new(ConsoleSink::stdout(config.form.output)));

    match service.submit(&mut session)? {
        SubmitOutcome::Accepted(_) => {
            println!("{SUCCESS_NOTIFICATION}");
            Ok(())
        }
        SubmitOutcome::Rejected(rejections) => {
            for rejection in &rejections {
                let errors = serde_json::to_string(&rejection.errors)?;
                println!("Applicant {}: {errors}", rejection.position);
            }
            Err(AppError::Rejected {
                invalid_applicants: rejections.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_tree_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_to_fill_without_subcommand() {
        let cli = Cli::try_parse_from(["applicant-intake"]).expect("parses");
        assert!(cli.command.is_none());
        assert!(cli.color_scheme.is_none());
    }

    #[test]
    fn parses_check_with_global_scheme_override() {
        let cli = Cli::try_parse_from([
            "applicant-intake",
            "check",
            "--input",
            "household.json",
            "--color-scheme",
            "dark",
        ])
        .expect("parses");

        assert_eq!(cli.color_scheme, Some(ColorScheme::Dark));
        match cli.command {
            Some(Command::Check(args)) => assert_eq!(args.input, PathBuf::from("household.json")),
            other => panic!("expected check command, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_color_scheme() {
        let result = Cli::try_parse_from(["applicant-intake", "--color-scheme", "sepia", "demo"]);
        assert!(result.is_err());
    }
}
