//! Access gate.
//!
//! Validates the stored session against the backend before any other
//! interaction and decides which view to show. This is advisory only: it does
//! not stop other operations from being invoked, and the backend must enforce
//! authorization on its own.

use thiserror::Error;
use tracing::instrument;

use catalog_panel_core::Role;

use crate::api::{ApiError, CatalogApi};
use crate::session::SessionManager;
use crate::storage::StorageError;

/// Which of the two panels is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelView {
    /// Catalog management list and product form.
    Admin,
    /// Shopping grid and cart.
    User,
}

impl From<Role> for PanelView {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => Self::Admin,
            Role::User => Self::User,
        }
    }
}

/// Reasons the gate sends the user back to the login view.
#[derive(Debug, Error)]
pub enum GateError {
    /// No token stored, or the login is older than the session lifetime.
    #[error("Login required")]
    LoginRequired,

    /// The backend refused the token.
    #[error("Session rejected by backend (status {status})")]
    Rejected { status: u16 },

    /// The status check failed before a verdict was reached.
    #[error("Session check failed: {0}")]
    Unreachable(ApiError),

    /// Local session state could not be read or written.
    #[error("Session storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Validates the session and picks the view.
#[derive(Debug)]
pub struct AccessGate<'a, A> {
    api: &'a A,
    session: &'a SessionManager,
}

impl<'a, A: CatalogApi> AccessGate<'a, A> {
    /// Create a gate over `api` and `session`.
    #[must_use]
    pub const fn new(api: &'a A, session: &'a SessionManager) -> Self {
        Self { api, session }
    }

    /// Check the session with the backend and cache the returned role.
    ///
    /// A missing or expired token fails without touching storage. Any
    /// failure after the backend was contacted clears the session first.
    ///
    /// # Errors
    ///
    /// Every error means "navigate to login".
    #[instrument(skip(self))]
    pub async fn check_admin_status(&self) -> Result<PanelView, GateError> {
        let Some(token) = self.session.get_token()? else {
            tracing::info!("No session token, login required");
            return Err(GateError::LoginRequired);
        };

        if self.session.is_token_expired()? {
            tracing::info!("Session expired, login required");
            return Err(GateError::LoginRequired);
        }

        let account = match self.api.me(&token).await {
            Ok(account) => account,
            Err(err) => {
                self.session.clear_token()?;
                return Err(match err.status() {
                    Some(status) => {
                        tracing::warn!(status, "Session rejected by backend");
                        GateError::Rejected { status }
                    }
                    None => {
                        tracing::error!(error = %err, "Failed to verify session");
                        GateError::Unreachable(err)
                    }
                });
            }
        };

        self.session.cache_role(account.status)?;
        tracing::info!(role = %account.status, "Session verified");

        Ok(PanelView::from(account.status))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeDelta, Utc};
    use secrecy::SecretString;

    use super::*;
    use crate::session::keys;
    use crate::storage::{Scope, Storage};
    use crate::testing::FakeApi;

    fn logged_in() -> SessionManager {
        let session = SessionManager::new(Storage::in_memory());
        session
            .set_token(&SecretString::from("good".to_string()))
            .unwrap();
        session
    }

    #[tokio::test]
    async fn test_admin_status_shows_admin_view() {
        let api = FakeApi::new().with_role(Role::Admin);
        let session = logged_in();

        let view = AccessGate::new(&api, &session).check_admin_status().await.unwrap();

        assert_eq!(view, PanelView::Admin);
        assert_eq!(session.cached_role().unwrap(), Some(Role::Admin));
        assert_eq!(api.calls(), vec!["GET /me".to_string()]);
        assert_eq!(api.tokens_seen(), vec!["good".to_string()]);
    }

    #[tokio::test]
    async fn test_user_status_shows_user_view() {
        let api = FakeApi::new().with_role(Role::User);
        let session = logged_in();

        let view = AccessGate::new(&api, &session).check_admin_status().await.unwrap();

        assert_eq!(view, PanelView::User);
        assert_eq!(session.cached_role().unwrap(), Some(Role::User));
    }

    #[tokio::test]
    async fn test_null_status_reply_shows_user_view_and_keeps_session() {
        let account: crate::api::AccountStatus =
            serde_json::from_str(r#"{"id":5,"status":null}"#).unwrap();
        let api = FakeApi::new().with_role(account.status);
        let session = logged_in();

        let view = AccessGate::new(&api, &session).check_admin_status().await.unwrap();

        assert_eq!(view, PanelView::User);
        assert!(session.get_token().unwrap().is_some());
        assert_eq!(session.cached_role().unwrap(), Some(Role::User));
    }

    #[tokio::test]
    async fn test_missing_token_skips_backend() {
        let api = FakeApi::new();
        let session = SessionManager::new(Storage::in_memory());

        let err = AccessGate::new(&api, &session).check_admin_status().await.unwrap_err();

        assert!(matches!(err, GateError::LoginRequired));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_expired_token_skips_backend_and_keeps_storage() {
        let api = FakeApi::new();
        let storage = Storage::in_memory();
        let session = SessionManager::new(storage.clone());
        session
            .set_token_at(
                &SecretString::from("old".to_string()),
                Utc::now() - TimeDelta::hours(25),
            )
            .unwrap();

        let err = AccessGate::new(&api, &session).check_admin_status().await.unwrap_err();

        assert!(matches!(err, GateError::LoginRequired));
        assert!(api.calls().is_empty());
        assert!(storage.get(Scope::Device, keys::TOKEN).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_rejected_token_clears_session_regardless_of_cached_role() {
        let api = FakeApi::new().with_me_status(401);
        let session = logged_in();
        session.cache_role(Role::Admin).unwrap();

        let err = AccessGate::new(&api, &session).check_admin_status().await.unwrap_err();

        assert!(matches!(err, GateError::Rejected { status: 401 }));
        assert!(session.get_token().unwrap().is_none());
        assert!(session.cached_role().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unreachable_backend_clears_session() {
        let api = FakeApi::new().unreachable();
        let session = logged_in();

        let err = AccessGate::new(&api, &session).check_admin_status().await.unwrap_err();

        assert!(matches!(err, GateError::Unreachable(_)));
        assert!(session.get_token().unwrap().is_none());
    }
}
