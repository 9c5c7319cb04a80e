mod cli;
mod commands;

use aeroplan_earnings::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
