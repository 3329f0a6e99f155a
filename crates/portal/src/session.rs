//! Merchant session handling.
//!
//! The admin surface carries exactly one authenticated merchant identity at a
//! time. It is restored from a persisted blob at startup, replaced by a
//! successful login, and destroyed by logout. The storage medium sits behind
//! [`SessionStore`]; the core only relies on load/save/clear semantics.

use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use returnwiz_core::{Email, TenantId};

use crate::api::PortalApi;
use crate::api::types::LoginRequest;
use crate::error::PortalError;

/// User-facing message for missing login fields.
const LOGIN_FIELDS_REQUIRED: &str = "Email and password are required.";

/// The authenticated merchant identity.
///
/// This is also the persisted blob, field for field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    /// The merchant's tenant.
    pub tenant_id: TenantId,
    /// Merchant display name.
    pub name: String,
    /// Merchant login email.
    pub email: Email,
}

/// Errors from the session storage medium.
#[derive(Debug, Error)]
pub enum SessionStoreError {
    /// Reading or writing the blob failed.
    #[error("session storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted blob could not be decoded.
    #[error("session blob is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Persistence for the session blob.
///
/// Implementations must make `clear` idempotent: clearing an absent blob is
/// not an error.
pub trait SessionStore: Send + Sync {
    /// Load the persisted session, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be read or the blob is corrupt.
    fn load(&self) -> Result<Option<Session>, SessionStoreError>;

    /// Persist the session, replacing any previous blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be written.
    fn save(&self, session: &Session) -> Result<(), SessionStoreError>;

    /// Remove the persisted blob.
    ///
    /// # Errors
    ///
    /// Returns an error if the medium cannot be written.
    fn clear(&self) -> Result<(), SessionStoreError>;
}

/// A session store that keeps the blob in memory only.
///
/// The default when no session file is configured; sessions then last for
/// one process lifetime, which is also exactly what tests want.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Mutex<Option<Session>>,
}

impl MemoryStore {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemoryStore {
    fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        Ok(self.slot.lock().map_or(None, |slot| slot.clone()))
    }

    fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(session.clone());
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
        Ok(())
    }
}

/// A session store backed by a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store at the given path. The file is created on first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SessionStore for JsonFileStore {
    fn load(&self) -> Result<Option<Session>, SessionStoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(serde_json::from_str(&contents)?))
    }

    fn save(&self, session: &Session) -> Result<(), SessionStoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string(session)?;
        std::fs::write(&self.path, contents)?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionStoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Holds the current merchant session for the admin surface.
pub struct SessionContext<S> {
    store: S,
    current: Option<Session>,
}

impl<S: SessionStore> SessionContext<S> {
    /// Restore the session from persisted state. Called once at startup.
    ///
    /// A missing or unreadable blob just means no session; a corrupt blob is
    /// logged and treated the same way.
    pub fn restore(store: S) -> Self {
        let current = match store.load() {
            Ok(session) => session,
            Err(err) => {
                warn!(error = %err, "could not restore session, starting logged out");
                None
            }
        };
        Self { store, current }
    }

    /// The current session, if a merchant is logged in.
    #[must_use]
    pub const fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// Whether a merchant is logged in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Authenticate a merchant and make the resulting session current.
    ///
    /// Success persists the session. Failure leaves any existing session
    /// untouched and exposes nothing beyond invalid credentials.
    ///
    /// # Errors
    ///
    /// `Validation` if either field is empty (no network call is made),
    /// `Auth` if the backend rejects the credentials, `SessionStore` if the
    /// new session cannot be persisted.
    pub async fn login<A: PortalApi + ?Sized>(
        &mut self,
        api: &A,
        email: &str,
        password: &str,
    ) -> Result<&Session, PortalError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(PortalError::Validation(LOGIN_FIELDS_REQUIRED.to_string()));
        }

        let request = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };

        let response = self.api_login(api, &request).await?;
        let session = Session {
            tenant_id: response.tenant_id,
            name: response.name,
            email: response.email,
        };

        self.store.save(&session)?;
        info!(tenant_id = %session.tenant_id, "merchant logged in");
        self.current = Some(session);
        // current was just set
        self.current.as_ref().ok_or(PortalError::Auth)
    }

    async fn api_login<A: PortalApi + ?Sized>(
        &self,
        api: &A,
        request: &LoginRequest,
    ) -> Result<crate::api::types::LoginResponse, PortalError> {
        api.login(request).await.map_err(|err| {
            tracing::debug!(error = %err, "login rejected");
            PortalError::Auth
        })
    }

    /// Log out: clear the persisted blob and the current session.
    /// Idempotent if no session exists.
    pub fn logout(&mut self) {
        if let Err(err) = self.store.clear() {
            // The in-memory session is still cleared; the stale blob will be
            // overwritten by the next login
            warn!(error = %err, "could not clear persisted session");
        }
        if self.current.take().is_some() {
            info!("merchant logged out");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::Ordering;

    use crate::api::ApiError;
    use crate::api::stub::StubPortalApi;
    use crate::api::types::LoginResponse;

    use super::*;

    fn login_response() -> LoginResponse {
        LoginResponse {
            message: "ok".to_string(),
            tenant_id: TenantId::new("t-1"),
            name: "Acme".to_string(),
            email: Email::parse("a@acme.dk").unwrap(),
        }
    }

    fn rejected() -> ApiError {
        ApiError::Status {
            status: 401,
            detail: Some("user does not exist".to_string()),
        }
    }

    #[tokio::test]
    async fn login_success_sets_and_persists_session() {
        let api = Arc::new(StubPortalApi::new());
        api.login_results
            .lock()
            .unwrap()
            .push_back(Ok(login_response()));
        let store = MemoryStore::new();
        let mut context = SessionContext::restore(store);

        let session = context.login(api.as_ref(), "a@acme.dk", "x").await.unwrap();
        assert_eq!(session.tenant_id, TenantId::new("t-1"));
        assert!(context.is_authenticated());

        // The blob survives a restart
        let persisted = context.store.load().unwrap().unwrap();
        assert_eq!(persisted.name, "Acme");
    }

    #[tokio::test]
    async fn login_failure_is_generic_and_keeps_existing_session() {
        let api = Arc::new(StubPortalApi::new());
        api.login_results
            .lock()
            .unwrap()
            .push_back(Ok(login_response()));
        api.login_results.lock().unwrap().push_back(Err(rejected()));
        let mut context = SessionContext::restore(MemoryStore::new());

        context.login(api.as_ref(), "a@acme.dk", "x").await.unwrap();
        let err = context
            .login(api.as_ref(), "b@other.dk", "wrong")
            .await
            .unwrap_err();

        // Backend detail must not leak
        assert!(matches!(err, PortalError::Auth));
        assert_eq!(err.to_string(), "Invalid credentials.");
        // Existing session untouched
        assert_eq!(context.current().unwrap().name, "Acme");
    }

    #[tokio::test]
    async fn login_with_empty_fields_skips_network() {
        let api = Arc::new(StubPortalApi::new());
        let mut context = SessionContext::restore(MemoryStore::new());

        let err = context.login(api.as_ref(), "", "x").await.unwrap_err();
        assert!(matches!(err, PortalError::Validation(_)));
        assert_eq!(api.login_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn logout_is_idempotent() {
        let api = Arc::new(StubPortalApi::new());
        api.login_results
            .lock()
            .unwrap()
            .push_back(Ok(login_response()));
        let mut context = SessionContext::restore(MemoryStore::new());
        context.login(api.as_ref(), "a@acme.dk", "x").await.unwrap();

        context.logout();
        assert!(!context.is_authenticated());
        assert!(context.store.load().unwrap().is_none());

        // Second logout with no session is fine
        context.logout();
        assert!(!context.is_authenticated());
    }

    #[test]
    fn restore_round_trips_through_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let store = JsonFileStore::new(&path);
        let session = Session {
            tenant_id: TenantId::new("t-1"),
            name: "Acme".to_string(),
            email: Email::parse("a@acme.dk").unwrap(),
        };
        store.save(&session).unwrap();

        let context = SessionContext::restore(JsonFileStore::new(&path));
        assert_eq!(context.current().unwrap(), &session);
    }

    #[test]
    fn restore_with_missing_file_starts_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let context = SessionContext::restore(JsonFileStore::new(dir.path().join("none.json")));
        assert!(!context.is_authenticated());
    }

    #[test]
    fn restore_with_corrupt_blob_starts_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let context = SessionContext::restore(JsonFileStore::new(&path));
        assert!(!context.is_authenticated());
    }

    #[test]
    fn file_store_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("session.json"));
        store.clear().unwrap();
        store.clear().unwrap();
    }
}
