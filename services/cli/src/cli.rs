use crate::catalog::{run_doc_types, DocTypeCommand};
use crate::documents::{run_documents, DocumentCommand};
use crate::employees::{run_employees, EmployeeCommand};
use crate::field::{run_services, run_visits, ServiceCommand, VisitCommand};
use crate::infra::Workspace;
use crate::reports::{run_audit, run_dashboard, run_probation, AuditArgs, ProbationCommand};
use clap::{Args, Parser, Subcommand};
use legajos::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "legajos",
    about = "Employee files, document compliance and probation tracking for the cleaning staff",
    version
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Default)]
pub(crate) struct GlobalArgs {
    /// Directory holding the persisted collections (overrides APP_DATA_DIR)
    #[arg(long, global = true)]
    pub(crate) data_dir: Option<PathBuf>,
    /// Directory for generated reports (overrides APP_EXPORT_DIR)
    #[arg(long, global = true)]
    pub(crate) export_dir: Option<PathBuf>,
    /// Print results as JSON instead of text
    #[arg(long, global = true)]
    pub(crate) json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage the employee roster
    Employees {
        #[command(subcommand)]
        command: EmployeeCommand,
    },
    /// Upload, remove and export employee documents
    Documents {
        #[command(subcommand)]
        command: DocumentCommand,
    },
    /// Configure the document type catalog
    #[command(name = "doc-types")]
    DocTypes {
        #[command(subcommand)]
        command: DocTypeCommand,
    },
    /// Record and review supervisor visits
    Visits {
        #[command(subcommand)]
        command: VisitCommand,
    },
    /// Browse client services
    Services {
        #[command(subcommand)]
        command: ServiceCommand,
    },
    /// Probation-period report
    Probation {
        #[command(subcommand)]
        command: ProbationCommand,
    },
    /// Headline numbers for the active roster
    Dashboard,
    /// Show the audit log, newest first
    Audit(AuditArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let mut workspace = Workspace::open(cli.global)?;

    match cli.command {
        Command::Employees { command } => run_employees(&mut workspace, command),
        Command::Documents { command } => run_documents(&mut workspace, command),
        Command::DocTypes { command } => run_doc_types(&mut workspace, command),
        Command::Visits { command } => run_visits(&mut workspace, command),
        Command::Services { command } => run_services(&workspace, command),
        Command::Probation { command } => run_probation(&workspace, command),
        Command::Dashboard => run_dashboard(&workspace),
        Command::Audit(args) => run_audit(&workspace, args),
    }
}
