//! Authenticated session domain model and its process-wide store.
//!
//! A [`Session`] is created by a successful login or registration and held
//! until it is explicitly cleared (logout). Controllers read the bearer
//! token from the [`SessionStore`] for every ask/humanize request.

use std::sync::{Arc, RwLock};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Profile data returned alongside the token.
///
/// Only the commonly used fields are typed; anything else the server sends
/// is preserved in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    /// Name to greet the user with.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .unwrap_or("user")
    }
}

/// The token/user pair from a successful login or registration.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque bearer credential
    pub token: String,
    #[serde(default)]
    pub user: UserProfile,
}

// Keep the token out of debug output.
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .finish()
    }
}

static GLOBAL_STORE: Lazy<Arc<SessionStore>> = Lazy::new(|| Arc::new(SessionStore::new()));

/// Holder for the current session with an explicit set/clear lifecycle.
#[derive(Debug, Default)]
pub struct SessionStore {
    inner: RwLock<Option<Session>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the process-wide store.
    pub fn global() -> Arc<SessionStore> {
        Arc::clone(&GLOBAL_STORE)
    }

    pub fn set(&self, session: Session) {
        tracing::info!(user = %session.user.display_name(), "Session established");
        *self.write_guard() = Some(session);
    }

    pub fn clear(&self) {
        if self.write_guard().take().is_some() {
            tracing::info!("Session cleared");
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.read_guard().clone()
    }

    pub fn token(&self) -> Option<String> {
        self.read_guard().as_ref().map(|session| session.token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.read_guard().is_some()
    }

    fn read_guard(&self) -> std::sync::RwLockReadGuard<'_, Option<Session>> {
        // A poisoned lock still holds a valid Option<Session>.
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_guard(&self) -> std::sync::RwLockWriteGuard<'_, Option<Session>> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
