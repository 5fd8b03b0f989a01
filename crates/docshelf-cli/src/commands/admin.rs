//! Admin credential helpers.

use clap::{Args, Subcommand};

use docshelf_auth::PasswordHasher;
use docshelf_core::error::AppError;

use crate::output;

/// Arguments for admin commands
#[derive(Debug, Args)]
pub struct AdminArgs {
    /// Admin subcommand
    #[command(subcommand)]
    pub command: AdminCommand,
}

/// Admin subcommands
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Prompt for a password and print its Argon2 hash for `auth.admin_password_hash`
    HashPassword,
}

/// Execute admin commands
pub fn execute(args: &AdminArgs) -> Result<(), AppError> {
    match &args.command {
        AdminCommand::HashPassword => {
            let password = dialoguer::Password::new()
                .with_prompt("Admin password")
                .with_confirmation("Confirm password", "Passwords do not match")
                .interact()
                .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

            if password.is_empty() {
                return Err(AppError::validation("Password cannot be empty"));
            }

            let hash = PasswordHasher::new().hash_password(&password)?;
            output::print_success("Password hashed. Set it as auth.admin_password_hash:");
            println!("{hash}");
        }
    }
    Ok(())
}
