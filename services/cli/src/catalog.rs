use clap::Subcommand;
use legajos::error::AppError;
use legajos::workflows::personnel::{DocumentTypeChanges, DocumentTypeId};

use crate::infra::{confirmation_notice, print_json, Workspace};

#[derive(Subcommand, Debug)]
pub(crate) enum DocTypeCommand {
    /// List configured document types
    List,
    /// Add a document type (optional, no expiration, 30-day alert)
    Add { name: String },
    /// Remove a document type; uploaded documents are kept
    Remove {
        id: u64,
        /// Apply the removal
        #[arg(long)]
        confirm: bool,
    },
    /// Change a document type's settings
    Set {
        id: u64,
        #[arg(long)]
        mandatory: Option<bool>,
        #[arg(long = "requires-expiration")]
        requires_expiration: Option<bool>,
        #[arg(long = "alert-days")]
        alert_days: Option<u32>,
    },
}

pub(crate) fn run_doc_types(
    workspace: &mut Workspace,
    command: DocTypeCommand,
) -> Result<(), AppError> {
    match command {
        DocTypeCommand::List => {
            let types = workspace.personnel.catalog().types();
            if workspace.json {
                return print_json(&types);
            }
            for document_type in types {
                let expiration = if document_type.requires_expiration {
                    format!("vence, alerta {} días", document_type.alert_days)
                } else {
                    "sin vencimiento".to_string()
                };
                println!(
                    "- [{}] {} | {} | {}",
                    document_type.id,
                    document_type.name,
                    if document_type.mandatory {
                        "obligatorio"
                    } else {
                        "opcional"
                    },
                    expiration
                );
            }
        }
        DocTypeCommand::Add { name } => {
            let document_type = workspace.personnel.add_document_type(&name)?;
            println!("Added {} with id {}", document_type.name, document_type.id);
        }
        DocTypeCommand::Remove { id, confirm } => {
            let id = DocumentTypeId(id);
            let document_type = workspace.personnel.document_type(id)?;
            if !confirm {
                confirmation_notice(&format!("Removing document type {}", document_type.name));
                return Ok(());
            }
            let removed = workspace.personnel.remove_document_type(id)?;
            println!("Removed document type {}", removed.name);
        }
        DocTypeCommand::Set {
            id,
            mandatory,
            requires_expiration,
            alert_days,
        } => {
            let changes = DocumentTypeChanges {
                mandatory,
                requires_expiration,
                alert_days,
            };
            if changes == DocumentTypeChanges::default() {
                return Err(AppError::Usage(
                    "nothing to change: pass --mandatory, --requires-expiration or --alert-days"
                        .to_string(),
                ));
            }
            let document_type = workspace
                .personnel
                .configure_document_type(DocumentTypeId(id), changes)?;
            println!(
                "{}: mandatory={} requires_expiration={} alert_days={}",
                document_type.name,
                document_type.mandatory,
                document_type.requires_expiration,
                document_type.alert_days
            );
        }
    }

    Ok(())
}
