use clap::Subcommand;
use legajos::error::AppError;
use legajos::workflows::field::{ServiceId, SupervisorId};

use crate::infra::{print_json, Workspace};

#[derive(Subcommand, Debug)]
pub(crate) enum VisitCommand {
    /// Record a supervisor's visit to a service
    Record {
        #[arg(long = "servicio")]
        service: u64,
        #[arg(long)]
        supervisor: u64,
        /// Supplies the site needs
        #[arg(long = "insumos")]
        supplies: String,
    },
    /// Supervisors, or one supervisor's services with their visit status
    List {
        #[arg(long)]
        supervisor: Option<u64>,
        /// Filter services by name
        #[arg(long, default_value = "")]
        search: String,
    },
}

#[derive(Subcommand, Debug)]
pub(crate) enum ServiceCommand {
    /// Find services by name
    Search {
        #[arg(default_value = "")]
        term: String,
    },
}

pub(crate) fn run_visits(workspace: &mut Workspace, command: VisitCommand) -> Result<(), AppError> {
    match command {
        VisitCommand::Record {
            service,
            supervisor,
            supplies,
        } => {
            let visit =
                workspace
                    .field
                    .record_visit(ServiceId(service), SupervisorId(supervisor), &supplies)?;
            println!(
                "Visit to {} by {} recorded at {}",
                workspace.service_label(Some(visit.service_id)),
                workspace.supervisor_label(Some(visit.supervisor_id)),
                visit.timestamp.format("%Y-%m-%d %H:%M")
            );
        }
        VisitCommand::List {
            supervisor: Some(supervisor),
            search,
        } => {
            let board = workspace
                .field
                .supervisor_board(SupervisorId(supervisor), &search)?;
            if workspace.json {
                return print_json(&board);
            }
            println!("{}", workspace.supervisor_label(Some(SupervisorId(supervisor))));
            for status in &board {
                match &status.visit {
                    Some(visit) => println!(
                        "- [{}] {} ✔ Visitado {} | {}",
                        status.service.id,
                        status.service.name,
                        visit.timestamp.format("%Y-%m-%d"),
                        visit.supplies
                    ),
                    None => println!("- [{}] {}", status.service.id, status.service.name),
                }
            }
        }
        VisitCommand::List {
            supervisor: None, ..
        } => {
            let supervisors = workspace.field.supervisors();
            if workspace.json {
                return print_json(&supervisors);
            }
            for supervisor in supervisors {
                println!(
                    "- [{}] {} | {} visits",
                    supervisor.id,
                    supervisor.full_name(),
                    workspace.field.visit_log().visits_for(supervisor.id).count()
                );
            }
        }
    }

    Ok(())
}

pub(crate) fn run_services(workspace: &Workspace, command: ServiceCommand) -> Result<(), AppError> {
    match command {
        ServiceCommand::Search { term } => {
            let services = workspace.field.search_services(&term);
            if workspace.json {
                return print_json(&services);
            }
            if services.is_empty() {
                println!("No services match '{}'.", term.trim());
            }
            for service in services {
                let visited = if workspace.field.visit_log().is_visited(service.id) {
                    " ✔"
                } else {
                    ""
                };
                println!(
                    "- [{}] {} | {}{}",
                    service.id, service.name, service.address, visited
                );
            }
        }
    }

    Ok(())
}
