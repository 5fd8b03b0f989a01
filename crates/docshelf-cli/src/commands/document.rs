//! Document management commands.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use docshelf_core::error::AppError;
use docshelf_core::ordering::MoveDirection;
use docshelf_core::types::{DocumentId, GroupId};
use docshelf_entity::document::Document;
use docshelf_service::Shelf;

use crate::output::{self, OutputFormat};

/// Arguments for document commands
#[derive(Debug, Args)]
pub struct DocumentArgs {
    /// Document subcommand
    #[command(subcommand)]
    pub command: DocumentCommand,
}

/// Document subcommands
#[derive(Debug, Subcommand)]
pub enum DocumentCommand {
    /// List documents, grouped and in display order
    List {
        /// Only this group
        #[arg(short, long)]
        group: Option<GroupId>,
    },
    /// Upload a file into a group
    Upload {
        /// Target group ID
        group: GroupId,
        /// File to upload
        path: PathBuf,
    },
    /// Download a document
    Download {
        /// Document ID
        id: DocumentId,
        /// Output path (defaults to the original filename)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the public URL of a document
    View {
        /// Document ID
        id: DocumentId,
    },
    /// Move a document one position up within its group
    Up {
        /// Document ID
        id: DocumentId,
    },
    /// Move a document one position down within its group
    Down {
        /// Document ID
        id: DocumentId,
    },
    /// Delete a document and its stored file (admin)
    Delete {
        /// Document ID
        id: DocumentId,
    },
    /// Rewrite document positions in a group to 1..n (admin)
    Renumber {
        /// Group ID
        group: GroupId,
    },
}

/// Document display row
#[derive(Debug, Serialize, Tabled)]
struct DocumentRow {
    /// Position within its group
    #[tabled(rename = "#")]
    position: usize,
    /// Document ID
    id: String,
    /// Owning group
    group: String,
    /// Original filename
    name: String,
    /// Icon category
    kind: String,
    /// Human readable size
    size: String,
    /// Stored display order
    display_order: i32,
}

fn rows(group_name: &str, documents: &[Document]) -> Vec<DocumentRow> {
    documents
        .iter()
        .enumerate()
        .map(|(i, d)| DocumentRow {
            position: i + 1,
            id: d.id.to_string(),
            group: group_name.to_string(),
            name: d.name.clone(),
            kind: d.category().to_string(),
            size: d.formatted_size(),
            display_order: d.display_order,
        })
        .collect()
}

/// Execute document commands
pub async fn execute(
    args: &DocumentArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let shelf = super::open_shelf(config_path).await?;

    let show_group = match &args.command {
        DocumentCommand::List { group } => *group,
        DocumentCommand::Upload { group, path } => {
            let document = upload(&shelf, *group, path).await?;
            Some(document.group_id)
        }
        DocumentCommand::Download { id, output: target } => {
            let file = shelf
                .download(*id)
                .await
                .ok_or_else(|| AppError::internal("Download failed"))?;
            let target = target
                .clone()
                .unwrap_or_else(|| PathBuf::from(&file.file_name));
            tokio::fs::write(&target, &file.data).await?;
            output::print_success(&format!(
                "Saved {} ({}) to {}",
                file.file_name,
                file.content_type,
                target.display()
            ));
            return Ok(());
        }
        DocumentCommand::View { id } => {
            let link = shelf
                .view(*id)
                .await
                .ok_or_else(|| AppError::internal("Could not resolve the document URL"))?;
            match format {
                OutputFormat::Json => output::print_item(&link, format),
                OutputFormat::Table => {
                    output::print_kv("URL", &link.url);
                    output::print_kv("Kind", link.category.as_str());
                    output::print_kv("Opens inline", if link.viewable { "yes" } else { "no" });
                }
            }
            return Ok(());
        }
        DocumentCommand::Up { id } => move_document(&shelf, *id, MoveDirection::Up).await,
        DocumentCommand::Down { id } => move_document(&shelf, *id, MoveDirection::Down).await,
        DocumentCommand::Delete { id } => {
            let group = group_of(&shelf, *id).await;
            super::login_admin(&shelf).await?;
            super::ensure(shelf.delete_document(*id).await, "Document was not deleted")?;
            group
        }
        DocumentCommand::Renumber { group } => {
            super::login_admin(&shelf).await?;
            super::ensure(
                shelf.renumber_documents(*group).await,
                "Document order was not repaired",
            )?;
            Some(*group)
        }
    };

    let mut table = Vec::new();
    for group in shelf.groups().await {
        if show_group.is_some_and(|id| id != group.id) {
            continue;
        }
        table.extend(rows(&group.name, &shelf.documents_in(group.id).await));
    }
    output::print_list(&table, format);
    Ok(())
}

async fn upload(shelf: &Shelf, group: GroupId, path: &Path) -> Result<Document, AppError> {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| AppError::validation(format!("Not a file path: {}", path.display())))?
        .to_string();
    let data = tokio::fs::read(path).await?;

    shelf
        .upload(group, &file_name, None, Bytes::from(data))
        .await
        .ok_or_else(|| AppError::internal("Upload failed"))
}

async fn move_document(shelf: &Shelf, id: DocumentId, direction: MoveDirection) -> Option<GroupId> {
    let group = group_of(shelf, id).await;
    if !shelf.move_document(id, direction).await {
        println!("Nothing moved.");
    }
    group
}

async fn group_of(shelf: &Shelf, id: DocumentId) -> Option<GroupId> {
    shelf
        .documents()
        .await
        .iter()
        .find(|d| d.id == id)
        .map(|d| d.group_id)
}
