//! Group management commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use docshelf_core::error::AppError;
use docshelf_core::ordering::MoveDirection;
use docshelf_core::types::GroupId;
use docshelf_entity::group::Group;

use crate::output::{self, OutputFormat};

/// Arguments for group commands
#[derive(Debug, Args)]
pub struct GroupArgs {
    /// Group subcommand
    #[command(subcommand)]
    pub command: GroupCommand,
}

/// Group subcommands
#[derive(Debug, Subcommand)]
pub enum GroupCommand {
    /// List groups in display order
    List,
    /// Create a group at the end of the list
    Create {
        /// Group name
        name: String,
    },
    /// Move a group one position up
    Up {
        /// Group ID
        id: GroupId,
    },
    /// Move a group one position down
    Down {
        /// Group ID
        id: GroupId,
    },
    /// Delete an empty group (admin)
    Delete {
        /// Group ID
        id: GroupId,
    },
    /// Rewrite group positions to 1..n (admin)
    Renumber,
}

/// Group display row
#[derive(Debug, Serialize, Tabled)]
struct GroupRow {
    /// Position in the list
    #[tabled(rename = "#")]
    position: usize,
    /// Group ID
    id: String,
    /// Name
    name: String,
    /// Stored display order
    display_order: i32,
    /// Created at
    created_at: String,
}

fn rows(groups: &[Group]) -> Vec<GroupRow> {
    groups
        .iter()
        .enumerate()
        .map(|(i, g)| GroupRow {
            position: i + 1,
            id: g.id.to_string(),
            name: g.name.clone(),
            display_order: g.display_order,
            created_at: g.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        })
        .collect()
}

/// Execute group commands
pub async fn execute(
    args: &GroupArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let shelf = super::open_shelf(config_path).await?;

    match &args.command {
        GroupCommand::List => {}
        GroupCommand::Create { name } => {
            let created = shelf.create_group(name).await;
            super::ensure(created.is_some(), "Group was not created")?;
        }
        GroupCommand::Up { id } => {
            if !shelf.move_group(*id, MoveDirection::Up).await {
                println!("Nothing moved.");
            }
        }
        GroupCommand::Down { id } => {
            if !shelf.move_group(*id, MoveDirection::Down).await {
                println!("Nothing moved.");
            }
        }
        GroupCommand::Delete { id } => {
            super::login_admin(&shelf).await?;
            super::ensure(shelf.delete_group(*id).await, "Group was not deleted")?;
        }
        GroupCommand::Renumber => {
            super::login_admin(&shelf).await?;
            super::ensure(shelf.renumber_groups().await, "Group order was not repaired")?;
        }
    }

    output::print_list(&rows(&shelf.groups().await), format);
    Ok(())
}
