//! Login and registration view-model.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::api::ComparisonApi;
use crate::error::{CompareError, Result};
use crate::notify::{Notification, Notifier};
use crate::session::{Session, SessionStore};

/// Credentials entered on the login/register screens.
#[derive(Clone, Default)]
pub struct AuthForm {
    pub email: String,
    pub password: String,
    /// Only used by registration
    pub name: String,
}

impl AuthForm {
    pub fn login(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            name: String::new(),
        }
    }

    pub fn register(
        email: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            name: name.into(),
        }
    }

    fn missing_field(&self, needs_name: bool) -> Option<&'static str> {
        if self.email.trim().is_empty() {
            Some("email")
        } else if self.password.is_empty() {
            Some("password")
        } else if needs_name && self.name.trim().is_empty() {
            Some("name")
        } else {
            None
        }
    }
}

impl std::fmt::Debug for AuthForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthForm")
            .field("email", &self.email)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Drives the login/register forms and stores the resulting session.
pub struct AuthController {
    api: Arc<dyn ComparisonApi>,
    sessions: Arc<SessionStore>,
    notifier: Arc<dyn Notifier>,
    loading: AtomicBool,
}

/// Clears the loading flag when the request settles, whatever the outcome.
struct LoadingGuard<'a>(&'a AtomicBool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl AuthController {
    pub fn new(
        api: Arc<dyn ComparisonApi>,
        sessions: Arc<SessionStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            sessions,
            notifier,
            loading: AtomicBool::new(false),
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub fn is_authenticated(&self) -> bool {
        self.sessions.is_authenticated()
    }

    pub async fn login(&self, form: &AuthForm) -> Result<Session> {
        if let Some(field) = form.missing_field(false) {
            return Err(self.reject(field));
        }
        let _guard = self.begin()?;

        match self.api.login(&form.email, &form.password).await {
            Ok(session) => {
                self.sessions.set(session.clone());
                Ok(session)
            }
            Err(err) => {
                tracing::warn!(email = %form.email, error = %err, "Login failed");
                self.notifier.notify(Notification::login_failed());
                Err(err)
            }
        }
    }

    pub async fn register(&self, form: &AuthForm) -> Result<Session> {
        if let Some(field) = form.missing_field(true) {
            return Err(self.reject(field));
        }
        let _guard = self.begin()?;

        match self
            .api
            .register(&form.email, &form.password, &form.name)
            .await
        {
            Ok(session) => {
                self.sessions.set(session.clone());
                Ok(session)
            }
            Err(err) => {
                tracing::warn!(email = %form.email, error = %err, "Registration failed");
                self.notifier.notify(Notification::register_failed());
                Err(err)
            }
        }
    }

    pub fn logout(&self) {
        self.sessions.clear();
    }

    fn begin(&self) -> Result<LoadingGuard<'_>> {
        if self.loading.swap(true, Ordering::SeqCst) {
            return Err(CompareError::auth("Another sign-in request is in progress"));
        }
        Ok(LoadingGuard(&self.loading))
    }

    fn reject(&self, field: &str) -> CompareError {
        let message = format!("The {field} field is required");
        self.notifier.notify(Notification::error(message.clone()));
        CompareError::auth(message)
    }
}
