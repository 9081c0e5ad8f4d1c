//! Session token management.
//!
//! The token lives in both storage scopes so that a new session can pick it
//! up from the device scope; the login time is only kept in the device scope
//! and drives expiry. The role returned by the backend is cached alongside
//! for view selection.

use chrono::{DateTime, TimeDelta, Utc};
use secrecy::{ExposeSecret, SecretString};
use tracing::instrument;

use catalog_panel_core::Role;

use crate::storage::{Scope, Storage, StorageError};

/// How long a login stays valid.
pub const SESSION_TTL: TimeDelta = TimeDelta::hours(24);

/// Storage keys for session data.
pub mod keys {
    /// Bearer token, in both scopes.
    pub const TOKEN: &str = "token";

    /// Login time in epoch milliseconds, device scope only.
    pub const LOGIN_TIME: &str = "loginTime";

    /// Cached account status code, in both scopes.
    pub const USER_STATUS: &str = "userStatus";
}

/// Reads and writes the session held in [`Storage`].
#[derive(Debug, Clone)]
pub struct SessionManager {
    storage: Storage,
}

impl SessionManager {
    /// Create a session manager over `storage`.
    #[must_use]
    pub const fn new(storage: Storage) -> Self {
        Self { storage }
    }

    /// Current token, preferring the session scope.
    ///
    /// Blank values count as absent.
    ///
    /// # Errors
    ///
    /// Returns error if storage cannot be read.
    pub fn get_token(&self) -> Result<Option<SecretString>, StorageError> {
        let session = self.storage.get(Scope::Session, keys::TOKEN)?;
        let token = match session.filter(|t| !t.is_empty()) {
            Some(token) => Some(token),
            None => self
                .storage
                .get(Scope::Device, keys::TOKEN)?
                .filter(|t| !t.is_empty()),
        };
        Ok(token.map(SecretString::from))
    }

    /// Store `token` in both scopes and stamp the login time as now.
    ///
    /// # Errors
    ///
    /// Returns error if storage cannot be written.
    pub fn set_token(&self, token: &SecretString) -> Result<(), StorageError> {
        self.set_token_at(token, Utc::now())
    }

    /// Store `token` in both scopes with an explicit login time.
    ///
    /// # Errors
    ///
    /// Returns error if storage cannot be written.
    #[instrument(skip(self, token))]
    pub fn set_token_at(
        &self,
        token: &SecretString,
        login_time: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        self.storage.set_both(keys::TOKEN, token.expose_secret())?;
        self.storage.set(
            Scope::Device,
            keys::LOGIN_TIME,
            &login_time.timestamp_millis().to_string(),
        )?;
        tracing::debug!("Session token stored");
        Ok(())
    }

    /// Remove token, login time and cached role from both scopes.
    ///
    /// # Errors
    ///
    /// Returns error if storage cannot be written.
    #[instrument(skip(self))]
    pub fn clear_token(&self) -> Result<(), StorageError> {
        self.storage.remove_both(keys::TOKEN)?;
        self.storage.remove_both(keys::LOGIN_TIME)?;
        self.storage.remove_both(keys::USER_STATUS)?;
        tracing::debug!("Session cleared");
        Ok(())
    }

    /// Recorded login time, if any.
    ///
    /// # Errors
    ///
    /// Returns error if storage cannot be read.
    pub fn login_time(&self) -> Result<Option<DateTime<Utc>>, StorageError> {
        let raw = self.storage.get(Scope::Device, keys::LOGIN_TIME)?;
        Ok(raw
            .and_then(|millis| millis.trim().parse::<i64>().ok())
            .and_then(DateTime::from_timestamp_millis))
    }

    /// Whether the session has expired as of now.
    ///
    /// # Errors
    ///
    /// Returns error if storage cannot be read.
    pub fn is_token_expired(&self) -> Result<bool, StorageError> {
        self.is_token_expired_at(Utc::now())
    }

    /// Whether the session has expired as of `now`.
    ///
    /// True when no login time is recorded or at least [`SESSION_TTL`] has
    /// elapsed since it.
    ///
    /// # Errors
    ///
    /// Returns error if storage cannot be read.
    pub fn is_token_expired_at(&self, now: DateTime<Utc>) -> Result<bool, StorageError> {
        Ok(self
            .login_time()?
            .is_none_or(|login| now.signed_duration_since(login) >= SESSION_TTL))
    }

    /// Cache the role reported by the backend in both scopes.
    ///
    /// # Errors
    ///
    /// Returns error if storage cannot be written.
    pub fn cache_role(&self, role: Role) -> Result<(), StorageError> {
        self.storage
            .set_both(keys::USER_STATUS, &role.status_code().to_string())
    }

    /// Cached role, preferring the session scope.
    ///
    /// Returns `None` when nothing usable is cached.
    ///
    /// # Errors
    ///
    /// Returns error if storage cannot be read.
    pub fn cached_role(&self) -> Result<Option<Role>, StorageError> {
        Ok(self
            .storage
            .get_preferred(keys::USER_STATUS)?
            .and_then(|raw| raw.parse::<Role>().ok()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn manager() -> (SessionManager, Storage) {
        let storage = Storage::in_memory();
        (SessionManager::new(storage.clone()), storage)
    }

    fn token(s: &str) -> SecretString {
        SecretString::from(s.to_string())
    }

    fn exposed(t: Option<SecretString>) -> Option<String> {
        t.map(|t| t.expose_secret().to_string())
    }

    #[test]
    fn test_set_then_get_returns_same_token() {
        let (session, storage) = manager();
        session.set_token(&token("abc.def")).unwrap();

        assert_eq!(exposed(session.get_token().unwrap()).as_deref(), Some("abc.def"));
        assert_eq!(
            storage.get(Scope::Session, keys::TOKEN).unwrap().as_deref(),
            Some("abc.def")
        );
        assert_eq!(
            storage.get(Scope::Device, keys::TOKEN).unwrap().as_deref(),
            Some("abc.def")
        );
        assert!(storage.get(Scope::Session, keys::LOGIN_TIME).unwrap().is_none());
        assert!(!session.is_token_expired().unwrap());
    }

    #[test]
    fn test_get_token_falls_back_to_device_scope() {
        let (session, storage) = manager();
        assert!(session.get_token().unwrap().is_none());

        storage.set(Scope::Device, keys::TOKEN, "device-token").unwrap();
        assert_eq!(exposed(session.get_token().unwrap()).as_deref(), Some("device-token"));

        storage.set(Scope::Session, keys::TOKEN, "").unwrap();
        assert_eq!(exposed(session.get_token().unwrap()).as_deref(), Some("device-token"));

        storage.set(Scope::Session, keys::TOKEN, "session-token").unwrap();
        assert_eq!(exposed(session.get_token().unwrap()).as_deref(), Some("session-token"));
    }

    #[test]
    fn test_clear_token_removes_everything() {
        let (session, storage) = manager();
        session.set_token(&token("t")).unwrap();
        session.cache_role(Role::Admin).unwrap();

        session.clear_token().unwrap();
        session.clear_token().unwrap();

        assert!(session.get_token().unwrap().is_none());
        assert!(session.is_token_expired().unwrap());
        assert!(session.cached_role().unwrap().is_none());
        for scope in [Scope::Session, Scope::Device] {
            for key in [keys::TOKEN, keys::LOGIN_TIME, keys::USER_STATUS] {
                assert!(storage.get(scope, key).unwrap().is_none());
            }
        }
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let (session, _) = manager();
        let login = DateTime::from_timestamp_millis(1_700_000_000_000).unwrap();
        session.set_token_at(&token("t"), login).unwrap();

        let just_before = login + SESSION_TTL - TimeDelta::milliseconds(1);
        assert!(!session.is_token_expired_at(just_before).unwrap());
        assert!(session.is_token_expired_at(login + SESSION_TTL).unwrap());
        assert!(
            session
                .is_token_expired_at(login + SESSION_TTL + TimeDelta::hours(1))
                .unwrap()
        );
    }

    #[test]
    fn test_missing_or_garbage_login_time_is_expired() {
        let (session, storage) = manager();
        storage.set_both(keys::TOKEN, "t").unwrap();
        assert!(session.is_token_expired().unwrap());

        storage.set(Scope::Device, keys::LOGIN_TIME, "yesterday").unwrap();
        assert!(session.is_token_expired().unwrap());
    }

    #[test]
    fn test_cached_role_prefers_session_scope() {
        let (session, storage) = manager();
        assert!(session.cached_role().unwrap().is_none());

        session.cache_role(Role::Admin).unwrap();
        assert_eq!(session.cached_role().unwrap(), Some(Role::Admin));
        assert_eq!(
            storage.get(Scope::Device, keys::USER_STATUS).unwrap().as_deref(),
            Some("2")
        );

        storage.set(Scope::Session, keys::USER_STATUS, "1").unwrap();
        assert_eq!(session.cached_role().unwrap(), Some(Role::User));
    }
}
