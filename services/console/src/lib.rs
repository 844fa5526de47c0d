mod cli;
mod commands;
mod demo;
mod infra;
mod shell;

use applicant_intake::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
