mod catalog;
mod cli;
mod documents;
mod employees;
mod field;
mod infra;
mod reports;

use legajos::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
