//! Command implementations.
//!
//! Each command opens a [`Panel`] over the on-disk stores named by the
//! configuration and drives one panel operation through the terminal UI.

pub mod cart;
pub mod catalog;
pub mod session;

use catalog_panel::Panel;
use catalog_panel::PanelError;
use catalog_panel::api::CatalogClient;
use catalog_panel::config::{ConfigError, PanelConfig};
use catalog_panel::storage::StorageError;
use thiserror::Error;

use crate::ui::TerminalUi;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A panel operation failed.
    #[error(transparent)]
    Panel(#[from] PanelError),

    /// Writing command output failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),

    /// Token argument was blank.
    #[error("Token must not be empty")]
    EmptyToken,

    /// The session belongs to a non-admin account.
    #[error("Admin access required")]
    AdminRequired,
}

impl From<StorageError> for CommandError {
    fn from(err: StorageError) -> Self {
        Self::Panel(PanelError::from(err))
    }
}

/// Open a panel drawing to the terminal.
fn open_panel(
    config: &PanelConfig,
    assume_yes: bool,
) -> Result<Panel<CatalogClient, TerminalUi>, CommandError> {
    Ok(Panel::from_config(config, TerminalUi::stdout(assume_yes))?)
}
