use chrono::NaiveDate;
use clap::{Args, Subcommand};
use legajos::error::AppError;
use legajos::workflows::field::{ServiceId, SupervisorId};
use legajos::workflows::personnel::{
    EmployeeDraft, EmployeeId, EmployeeProfile, EmployeeStatus, RosterEntry, RosterQuery,
    Semaphore,
};
use legajos::workflows::spreadsheet::EmployeeImporter;
use std::path::PathBuf;

use crate::infra::{confirmation_notice, print_json, require_text, Workspace};

#[derive(Subcommand, Debug)]
pub(crate) enum EmployeeCommand {
    /// List employees with their semáforo
    List(ListArgs),
    /// Register a new employee
    Add(EmployeeArgs),
    /// Replace an employee's data (probation end is recomputed)
    Edit {
        id: u64,
        #[command(flatten)]
        fields: EmployeeArgs,
    },
    /// Terminate an employee (status becomes Baja)
    Terminate {
        id: u64,
        /// Reason recorded with the termination
        #[arg(long)]
        reason: String,
        /// Apply the termination
        #[arg(long)]
        confirm: bool,
    },
    /// Show an employee's document checklist and history
    Show { id: u64 },
    /// Bulk insert employees from a .xlsx or .csv sheet
    Import { file: PathBuf },
}

#[derive(Args, Debug)]
pub(crate) struct ListArgs {
    /// Free-text search over name, DNI, legajo and CUIL
    #[arg(long)]
    search: Option<String>,
    /// Activo, Baja or Pendiente
    #[arg(long)]
    status: Option<EmployeeStatus>,
    /// Completo, Atención or Crítico
    #[arg(long = "semaforo")]
    semaphore: Option<Semaphore>,
}

#[derive(Args, Debug)]
pub(crate) struct EmployeeArgs {
    #[arg(long)]
    legajo: String,
    #[arg(long = "nombre")]
    first_name: String,
    #[arg(long = "apellido")]
    last_name: String,
    #[arg(long)]
    dni: String,
    #[arg(long)]
    cuil: String,
    /// Hire date (YYYY-MM-DD)
    #[arg(long = "fecha-ingreso", value_parser = crate::infra::parse_date)]
    hire_date: NaiveDate,
    #[arg(long = "servicio")]
    service: Option<u64>,
    #[arg(long = "supervisor")]
    supervisor: Option<u64>,
}

impl EmployeeArgs {
    fn into_draft(self) -> Result<EmployeeDraft, AppError> {
        Ok(EmployeeDraft {
            legajo: require_text("legajo", &self.legajo)?,
            first_name: require_text("nombre", &self.first_name)?,
            last_name: require_text("apellido", &self.last_name)?,
            dni: require_text("dni", &self.dni)?,
            cuil: require_text("cuil", &self.cuil)?,
            hire_date: self.hire_date,
            service_id: self.service.map(ServiceId),
            supervisor_id: self.supervisor.map(SupervisorId),
        })
    }
}

pub(crate) fn run_employees(
    workspace: &mut Workspace,
    command: EmployeeCommand,
) -> Result<(), AppError> {
    match command {
        EmployeeCommand::List(args) => {
            let query = RosterQuery {
                search: args.search,
                status: args.status,
            };
            let roster = workspace.personnel.roster(&query, args.semaphore);
            if workspace.json {
                return print_json(&roster);
            }
            render_roster(workspace, &roster);
        }
        EmployeeCommand::Add(fields) => {
            let employee = workspace.personnel.create_employee(fields.into_draft()?)?;
            println!(
                "Created {} ({}) with id {}; probation ends {}",
                employee.display_name(),
                employee.legajo,
                employee.id,
                employee.probation_end
            );
        }
        EmployeeCommand::Edit { id, fields } => {
            let employee = workspace
                .personnel
                .update_employee(EmployeeId(id), fields.into_draft()?)?;
            println!(
                "Updated {} ({}); probation ends {}",
                employee.display_name(),
                employee.legajo,
                employee.probation_end
            );
        }
        EmployeeCommand::Terminate {
            id,
            reason,
            confirm,
        } => {
            let employee = workspace.personnel.employee(EmployeeId(id))?;
            if !confirm {
                confirmation_notice(&format!(
                    "Terminating {} ({})",
                    employee.display_name(),
                    employee.legajo
                ));
                return Ok(());
            }
            let employee = workspace
                .personnel
                .terminate_employee(EmployeeId(id), &reason)?;
            println!(
                "{} ({}) terminated on {}",
                employee.display_name(),
                employee.legajo,
                employee
                    .termination_date
                    .map(|date| date.to_string())
                    .unwrap_or_default()
            );
        }
        EmployeeCommand::Show { id } => {
            let profile = workspace.personnel.profile(EmployeeId(id))?;
            if workspace.json {
                return print_json(&profile);
            }
            render_profile(workspace, &profile);
        }
        EmployeeCommand::Import { file } => {
            let rows = EmployeeImporter::from_path(&file)?;
            let total = rows.len();
            let outcome = workspace.personnel.import_employees(rows)?;
            println!(
                "Imported {} of {} rows from {}",
                outcome.inserted_count(),
                total,
                file.display()
            );
            if !outcome.skipped.is_empty() {
                println!("Skipped existing legajos: {}", outcome.skipped.join(", "));
            }
        }
    }

    Ok(())
}

fn render_roster(workspace: &Workspace, roster: &[RosterEntry]) {
    if roster.is_empty() {
        println!("No employees match the filters.");
        return;
    }

    println!("{} employees", roster.len());
    for entry in roster {
        let employee = &entry.employee;
        println!(
            "- [{}] {} {} | legajo {} | DNI {} | {} | {}",
            employee.id,
            entry.semaphore.color(),
            employee.display_name(),
            employee.legajo,
            employee.dni,
            employee.status,
            workspace.service_label(employee.service_id)
        );
    }
}

fn render_profile(workspace: &Workspace, profile: &EmployeeProfile) {
    let employee = &profile.employee;
    println!("{} ({})", employee.display_name(), employee.legajo);
    println!("Semáforo: {}", profile.semaphore);
    println!("Estado: {}", employee.status);
    println!("DNI {} | CUIL {}", employee.dni, employee.cuil);
    println!(
        "Ingreso {} | Fin de prueba {}",
        employee.hire_date, employee.probation_end
    );
    println!(
        "Servicio: {} | Supervisor: {}",
        workspace.service_label(employee.service_id),
        workspace.supervisor_label(employee.supervisor_id)
    );
    if let (Some(date), Some(reason)) = (employee.termination_date, &employee.termination_reason) {
        println!("Baja {}: {}", date, reason);
    }

    let checklist = &profile.checklist;
    println!(
        "\nDocumentos ({} faltantes, {} vencidos, {} por vencer)",
        checklist.missing, checklist.expired, checklist.expiring_soon
    );
    for entry in &checklist.entries {
        let mandatory = if entry.mandatory { "*" } else { " " };
        let detail = match (&entry.file_name, entry.expires_on, entry.document_id) {
            (Some(file), Some(expires), Some(id)) => format!(" [{id}] {file}, vence {expires}"),
            (Some(file), None, Some(id)) => format!(" [{id}] {file}"),
            _ => String::new(),
        };
        println!(
            "{mandatory} {}: {}{}",
            entry.document_type, entry.status_label, detail
        );
    }
    for orphan in &profile.orphaned_documents {
        println!(
            "  {} [{}] {}",
            orphan.document_type, orphan.document_id, orphan.file_name
        );
    }

    if !profile.history.is_empty() {
        println!("\nHistorial");
        for entry in &profile.history {
            println!(
                "- {} {} {}",
                entry.timestamp.format("%Y-%m-%d %H:%M"),
                entry.action.label(),
                entry.detail
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct Form {
        #[command(flatten)]
        fields: EmployeeArgs,
    }

    fn parse(extra: &[&str]) -> Result<Form, clap::Error> {
        let mut args = vec![
            "legajos",
            "--legajo",
            "L-7",
            "--nombre",
            "Rosa",
            "--apellido",
            "Suárez",
            "--dni",
            "30111222",
            "--fecha-ingreso",
            "2025-01-15",
        ];
        args.extend_from_slice(extra);
        Form::try_parse_from(args)
    }

    #[test]
    fn cuil_flag_is_required() {
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn blank_cuil_is_rejected() {
        let form = parse(&["--cuil", "   "]).expect("arguments parse");
        assert!(matches!(
            form.fields.into_draft(),
            Err(AppError::Usage(message)) if message == "cuil must not be empty"
        ));
    }

    #[test]
    fn complete_form_builds_a_trimmed_draft() {
        let form = parse(&["--cuil", " 27-30111222-4 ", "--servicio", "3"]).expect("arguments parse");
        let draft = form.fields.into_draft().expect("draft");
        assert_eq!(draft.cuil, "27-30111222-4");
        assert_eq!(draft.service_id, Some(ServiceId(3)));
        assert!(draft.supervisor_id.is_none());
    }
}
