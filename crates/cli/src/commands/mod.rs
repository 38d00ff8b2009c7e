//! Command implementations.

pub mod auth;
pub mod dashboard;
pub mod flyers;
pub mod products;

use std::io::Write;

use thiserror::Error;

use flyercraft_client::error::OperationError;
use flyercraft_client::sync::Confirmation;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// The backend rejected the operation; the message is display-ready.
    #[error("{0}")]
    Operation(#[from] OperationError),

    /// The command needs a signed-in session.
    #[error("not signed in; run `flyercraft login` first")]
    NotSignedIn,

    /// The referenced entity is not in the collection.
    #[error("no {kind} with id {id}")]
    NotFound { kind: &'static str, id: String },

    /// Reading the confirmation prompt failed.
    #[error("failed to read confirmation: {0}")]
    Io(#[from] std::io::Error),
}

/// Ask the user to confirm a destructive action.
///
/// Anything other than an explicit `y`/`yes` is a refusal.
pub fn confirm(prompt: &str) -> Result<Confirmation, std::io::Error> {
    print!("{prompt} [y/N] ");
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;

    Ok(match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" => Confirmation::Confirmed,
        _ => Confirmation::Cancelled,
    })
}
