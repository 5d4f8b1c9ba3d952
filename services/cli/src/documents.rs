use chrono::NaiveDate;
use clap::Subcommand;
use legajos::error::AppError;
use legajos::workflows::personnel::{
    DocumentError, DocumentId, DocumentTypeId, DocumentUpload, EmployeeId,
};
use std::path::PathBuf;

use crate::infra::{confirmation_notice, Workspace};

#[derive(Subcommand, Debug)]
pub(crate) enum DocumentCommand {
    /// Attach a file to an employee for a document type
    Upload {
        employee: u64,
        doc_type: u64,
        file: PathBuf,
        /// Expiration date (YYYY-MM-DD), required for types that expire
        #[arg(long, value_parser = crate::infra::parse_date)]
        expires: Option<NaiveDate>,
    },
    /// Permanently remove an uploaded document
    Delete {
        id: u64,
        /// Apply the deletion
        #[arg(long)]
        confirm: bool,
    },
    /// Write a stored document's content to disk
    Export {
        id: u64,
        #[arg(long)]
        out: PathBuf,
    },
}

pub(crate) fn run_documents(
    workspace: &mut Workspace,
    command: DocumentCommand,
) -> Result<(), AppError> {
    match command {
        DocumentCommand::Upload {
            employee,
            doc_type,
            file,
            expires,
        } => {
            let bytes = std::fs::read(&file)?;
            let file_name = file
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or_default()
                .to_string();
            let document = workspace.personnel.upload_document(DocumentUpload {
                employee_id: EmployeeId(employee),
                document_type_id: DocumentTypeId(doc_type),
                file_name,
                bytes,
                expires_on: expires,
            })?;
            let type_name = workspace
                .personnel
                .document_type(document.document_type_id)?
                .name
                .clone();
            match document.expires_on {
                Some(expires_on) => println!(
                    "Stored {} as document {} ({}), expires {}",
                    document.file_name, document.id, type_name, expires_on
                ),
                None => println!(
                    "Stored {} as document {} ({})",
                    document.file_name, document.id, type_name
                ),
            }
        }
        DocumentCommand::Delete { id, confirm } => {
            let id = DocumentId(id);
            let document = workspace
                .personnel
                .documents()
                .get(id)
                .ok_or(DocumentError::NotFound(id))?;
            if !confirm {
                confirmation_notice(&format!("Deleting {} (document {})", document.file_name, id));
                return Ok(());
            }
            let removed = workspace.personnel.delete_document(id)?;
            println!("Deleted {} (document {})", removed.file_name, removed.id);
        }
        DocumentCommand::Export { id, out } => {
            let id = DocumentId(id);
            let document = workspace
                .personnel
                .documents()
                .get(id)
                .ok_or(DocumentError::NotFound(id))?;
            let bytes = document.decode_content()?;
            std::fs::write(&out, &bytes)?;
            println!(
                "Wrote {} ({} bytes, {:?}) to {}",
                document.file_name,
                bytes.len(),
                document.content_kind(),
                out.display()
            );
        }
    }

    Ok(())
}
