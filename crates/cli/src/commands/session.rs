//! Session commands.
//!
//! # Usage
//!
//! ```bash
//! catalog-cli session set-token <TOKEN>
//! catalog-cli session status
//! catalog-cli logout
//! ```

use std::io::Write;

use catalog_panel::config::PanelConfig;
use catalog_panel::session::SESSION_TTL;
use secrecy::SecretString;

use super::{CommandError, open_panel};

/// Store `token` as a fresh login.
pub fn set_token(config: &PanelConfig, token: &str) -> Result<(), CommandError> {
    let token = token.trim().to_owned();
    if token.is_empty() {
        return Err(CommandError::EmptyToken);
    }

    let panel = open_panel(config, false)?;
    panel.session().set_token(&SecretString::from(token))?;
    tracing::info!("Session token stored");
    Ok(())
}

/// Print whether a token is stored, its age, and the cached role.
pub fn status(config: &PanelConfig) -> Result<(), CommandError> {
    let panel = open_panel(config, false)?;
    let session = panel.session();
    let mut out = std::io::stdout().lock();

    if session.get_token()?.is_none() {
        writeln!(out, "Not logged in")?;
        return Ok(());
    }

    match session.login_time()? {
        Some(login) => writeln!(out, "Logged in at {}", login.to_rfc3339())?,
        None => writeln!(out, "Login time unknown")?,
    }

    if session.is_token_expired()? {
        writeln!(
            out,
            "Session expired (lifetime {}h)",
            SESSION_TTL.num_hours()
        )?;
    } else {
        writeln!(out, "Session active")?;
    }

    match session.cached_role()? {
        Some(role) => writeln!(out, "Role: {role}")?,
        None => writeln!(out, "Role: not checked yet")?,
    }
    Ok(())
}

/// Clear every session key.
pub fn logout(config: &PanelConfig) -> Result<(), CommandError> {
    let mut panel = open_panel(config, false)?;
    panel.logout()?;
    Ok(())
}
