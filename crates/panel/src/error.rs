//! Unified error handling with Sentry integration.
//!
//! Provides a unified `PanelError` type returned by every [`crate::Panel`]
//! operation. By the time one is returned the user has already been told
//! (alert or login redirect); callers only need to log it or exit.

use thiserror::Error;

use crate::api::ApiError;
use crate::catalog::PreviewError;
use crate::config::ConfigError;
use crate::gate::GateError;
use crate::storage::StorageError;

/// Application-level error type for the panel.
#[derive(Debug, Error)]
pub enum PanelError {
    /// Local storage operation failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Backend request failed or was rejected.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Session is missing, expired or was refused.
    #[error("Access error: {0}")]
    Gate(#[from] GateError),

    /// Chosen image could not be read.
    #[error("Image error: {0}")]
    Preview(#[from] PreviewError),

    /// Configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl PanelError {
    /// Whether recovering requires logging in again.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(self, Self::Gate(_))
    }
}

/// Result type alias for `PanelError`.
pub type Result<T> = std::result::Result<T, PanelError>;

/// Log an operation failure and capture it to Sentry.
///
/// Authorization failures are expected and only logged.
pub fn report(error: &PanelError, action: &str) {
    if error.requires_login() {
        tracing::info!(error = %error, action, "Login required");
        return;
    }

    let event_id = sentry::capture_error(error);
    tracing::error!(
        error = %error,
        action,
        sentry_event_id = %event_id,
        "Operation failed"
    );
}

/// Add a breadcrumb for user actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of user actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added to cart", Some(&[("product_id", "42")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
