use clap::{Args, Subcommand};
use legajos::error::AppError;
use legajos::workflows::personnel::AuditEntry;
use legajos::workflows::probation::{DashboardMetrics, ProbationReport};
use legajos::workflows::spreadsheet::{ReportExporter, ReportFormat};

use crate::infra::{print_json, Workspace};

#[derive(Subcommand, Debug)]
pub(crate) enum ProbationCommand {
    /// Active employees by probation end, exported as a spreadsheet
    Report(ProbationReportArgs),
}

#[derive(Args, Debug)]
pub(crate) struct ProbationReportArgs {
    /// xlsx or csv
    #[arg(long, default_value = "xlsx")]
    format: ReportFormat,
    /// Print the report without writing a file
    #[arg(long)]
    no_export: bool,
    /// Days before the probation end that count as "Próximo a Vencer"
    #[arg(long)]
    alert_days: Option<u32>,
}

#[derive(Args, Debug)]
pub(crate) struct AuditArgs {
    /// Number of entries to show
    #[arg(long, default_value_t = 20)]
    limit: usize,
    /// Only entries for this employee id
    #[arg(long)]
    employee: Option<u64>,
}

pub(crate) fn run_probation(workspace: &Workspace, command: ProbationCommand) -> Result<(), AppError> {
    let ProbationCommand::Report(args) = command;
    let alert_days = args
        .alert_days
        .unwrap_or(workspace.config.reporting.probation_alert_days);
    let report = ProbationReport::build(
        workspace.personnel.registry().employees(),
        workspace.field.services(),
        workspace.personnel.today(),
        alert_days,
    );

    if workspace.json {
        print_json(&report.summary())?;
    } else {
        render_probation(&report);
    }

    if !args.no_export {
        let path =
            ReportExporter::export(&report, &workspace.config.reporting.export_dir, args.format)?;
        if !workspace.json {
            println!("\nReport written to {}", path.display());
        }
    }

    Ok(())
}

fn render_probation(report: &ProbationReport) {
    let summary = report.summary();
    println!(
        "Período de prueba al {} (alerta {} días)",
        summary.generated_on, summary.alert_days
    );
    for entry in &summary.counts {
        println!("- {}: {}", entry.status_label, entry.count);
    }

    if report.rows.is_empty() {
        println!("\nNo active employees.");
        return;
    }

    println!();
    for row in &report.rows {
        println!(
            "- {} {}, {} | {} | ingreso {} | fin {} | {} días | {}",
            row.legajo,
            row.last_name,
            row.first_name,
            row.service,
            row.hire_date,
            row.probation_end,
            row.days_remaining,
            row.status_label
        );
    }
}

pub(crate) fn run_dashboard(workspace: &Workspace) -> Result<(), AppError> {
    let metrics = DashboardMetrics::compute(
        &workspace.personnel,
        workspace.config.reporting.probation_alert_days,
    );
    let view = metrics.to_view();
    if workspace.json {
        return print_json(&view);
    }

    println!("Dashboard al {}", view.generated_on);
    println!("- Personal activo: {}", view.active_employees);
    println!("- Legajos críticos: {}", view.critical_files);
    println!(
        "- Vtos. prueba ({}d): {}",
        view.alert_days, view.expiring_probations
    );
    println!("- Docs obligatorios faltantes: {}", view.missing_mandatory_documents);

    if !view.upcoming.is_empty() {
        println!("\nVencimientos próximos");
        for upcoming in &view.upcoming {
            println!(
                "- {} ({}) {} | {} días",
                upcoming.display_name,
                upcoming.legajo,
                upcoming.probation_end,
                upcoming.days_remaining
            );
        }
    }

    Ok(())
}

pub(crate) fn run_audit(workspace: &Workspace, args: AuditArgs) -> Result<(), AppError> {
    let entries: Vec<&AuditEntry> = workspace
        .personnel
        .audit_log()
        .entries()
        .iter()
        .filter(|entry| {
            args.employee
                .map_or(true, |employee| entry.entity_id == Some(employee))
        })
        .take(args.limit)
        .collect();

    if workspace.json {
        return print_json(&entries);
    }
    if entries.is_empty() {
        println!("Audit log is empty.");
    }
    for entry in entries {
        println!(
            "- {} {} {} {} | {}",
            entry.timestamp.format("%Y-%m-%d %H:%M"),
            entry.action.label(),
            entry.entity.label(),
            entry
                .entity_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string()),
            entry.detail
        );
    }

    Ok(())
}
