//! Panel configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CATALOG_API_URL` - Backend base URL (default: `http://localhost:5000`)
//! - `CATALOG_DATA_DIR` - Device-scoped storage directory
//!   (default: `$HOME/.catalog-panel`, or `./.catalog-panel` without `HOME`)
//! - `CATALOG_SESSION_DIR` - Session-scoped storage directory
//!   (default: `$XDG_RUNTIME_DIR/catalog-panel`, or `<data dir>/session`)
//! - `CATALOG_FALLBACK_IMAGE` - Image shown for products without a usable image
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default backend address.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Default product card image when none is available.
pub const DEFAULT_FALLBACK_IMAGE: &str = "https://via.placeholder.com/300x200?text=Sem+Imagem";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Panel application configuration.
#[derive(Debug, Clone)]
pub struct PanelConfig {
    /// Backend REST API base URL
    pub api_url: Url,
    /// Directory for device-scoped state (token, login time, role, cart)
    pub data_dir: PathBuf,
    /// Directory for session-scoped state (token, role)
    pub session_dir: PathBuf,
    /// Image used on product cards when the product has none
    pub fallback_image_url: String,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl PanelConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the API URL does not parse or
    /// is not an http(s) URL.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_url = parse_api_url(
            &lookup("CATALOG_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        )?;

        let data_dir = lookup("CATALOG_DATA_DIR").map_or_else(
            || {
                lookup("HOME").map_or_else(
                    || PathBuf::from(".catalog-panel"),
                    |home| PathBuf::from(home).join(".catalog-panel"),
                )
            },
            PathBuf::from,
        );

        let session_dir = lookup("CATALOG_SESSION_DIR").map_or_else(
            || {
                lookup("XDG_RUNTIME_DIR")
                    .filter(|dir| !dir.is_empty())
                    .map_or_else(
                        || data_dir.join("session"),
                        |dir| PathBuf::from(dir).join("catalog-panel"),
                    )
            },
            PathBuf::from,
        );

        Ok(Self {
            api_url,
            data_dir,
            session_dir,
            fallback_image_url: lookup("CATALOG_FALLBACK_IMAGE")
                .unwrap_or_else(|| DEFAULT_FALLBACK_IMAGE.to_string()),
            sentry_dsn: lookup("SENTRY_DSN").filter(|dsn| !dsn.is_empty()),
            sentry_environment: lookup("SENTRY_ENVIRONMENT"),
        })
    }
}

/// Parse and validate the backend base URL.
fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| ConfigError::InvalidEnvVar("CATALOG_API_URL".to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "CATALOG_API_URL".to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    Ok(url)
}
