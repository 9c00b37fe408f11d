//! Session context shared by every consumer of the auth state.
//!
//! The context publishes a `Session` through a `watch` channel so front ends
//! can react to changes. It bootstraps once: the cached user is shown
//! optimistically, then the stored token is verified. A rejected token clears
//! local credentials; an unreachable server leaves the cached session in place.
//! Public operations return `Result<_, SessionFailure>` and never panic on
//! backend or network errors.

use crate::{
    api::NormalizedResponse,
    auth::{
        client::AuthService,
        types::{Credentials, RegistrationData, Session, SessionFailure, UserRecord},
    },
    errors::StoreError,
    storage::{TOKEN_KEY, USER_KEY},
};
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tokio::sync::watch;
use tracing::{debug, info, warn};

#[derive(Clone)]
pub struct SessionContext {
    service: AuthService,
    state: Arc<watch::Sender<Session>>,
    bootstrapped: Arc<AtomicBool>,
}

impl SessionContext {
    /// Builds a context in the bootstrapping state. Call `bootstrap` once the
    /// application is ready, or use `start`.
    #[must_use]
    pub fn new(service: AuthService) -> Self {
        let (state, _) = watch::channel(Session::bootstrapping());
        Self {
            service,
            state: Arc::new(state),
            bootstrapped: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Builds a context and runs the bootstrap check.
    pub async fn start(service: AuthService) -> Self {
        let context = Self::new(service);
        context.bootstrap().await;
        context
    }

    #[must_use]
    pub fn service(&self) -> &AuthService {
        &self.service
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn user(&self) -> Option<UserRecord> {
        self.state.borrow().user.clone()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// Restores the session from storage. Runs at most once per context;
    /// `is_loading` is cleared on every exit path.
    pub async fn bootstrap(&self) {
        if self.bootstrapped.swap(true, Ordering::SeqCst) {
            debug!("session bootstrap already ran");
            return;
        }
        let _loading = FinishLoading { state: &self.state };

        let store = self.service.store();
        if !store.has_token() {
            debug!("no stored token, starting signed out");
            return;
        }

        if let Some(cached) = store.get(USER_KEY).as_deref().and_then(UserRecord::from_cached) {
            self.set_user(Some(cached));
        }

        match self.service.verify_token().await {
            Ok(response) if response.is_success() => {
                match UserRecord::from_user_field(response.data.as_ref()) {
                    Some(user) => {
                        self.remember(&user);
                        self.set_user(Some(user));
                        info!("stored session verified");
                    }
                    None => debug!("token verified without a user payload, keeping cached user"),
                }
            }
            Ok(response) => {
                info!("stored token rejected: {}", response.message);
                self.invalidate();
            }
            Err(err) if err.is_unauthorized() => {
                info!("stored token rejected: {err}");
                self.invalidate();
            }
            Err(err) if err.is_network() => {
                debug!("token verification unreachable, keeping cached session");
            }
            Err(err) => {
                warn!("token verification failed, keeping cached session: {err}");
            }
        }
    }

    /// Signs in and caches the returned user record.
    /// # Errors
    /// Returns `SessionFailure` with a display message; session state is unchanged.
    pub async fn login(&self, credentials: &Credentials) -> Result<UserRecord, SessionFailure> {
        let previous_token = self.service.store().token();
        let response = self.service.login(credentials).await?;
        ensure_success(&response, "Login failed.")?;

        let user = match (UserRecord::from_user_field(response.data.as_ref()), response.token()) {
            (Some(user), Some(_)) => user,
            (None, _) => {
                self.restore_token(previous_token.as_deref());
                return Err(SessionFailure::new(
                    "Login response did not include a user profile.",
                ));
            }
            (Some(_), None) => {
                return Err(SessionFailure::new(
                    "Login response did not include a session token.",
                ));
            }
        };

        self.remember(&user);
        self.set_user(Some(user.clone()));
        Ok(user)
    }

    /// Signs out. Local state is cleared even when the server cannot be reached.
    pub async fn logout(&self) {
        if let Err(err) = self.service.logout().await {
            warn!("logout request failed, local session cleared anyway: {err}");
        }
        self.set_user(None);
    }

    /// Refreshes the user record from the backend.
    /// # Errors
    /// Returns `SessionFailure` with a display message; session state is unchanged.
    pub async fn get_profile(&self) -> Result<UserRecord, SessionFailure> {
        let response = self.service.get_profile().await?;
        ensure_success(&response, "Could not load profile.")?;
        let user = UserRecord::from_payload(response.data.as_ref())
            .ok_or_else(|| SessionFailure::new("Profile response did not include a user."))?;

        self.remember(&user);
        self.set_user(Some(user.clone()));
        Ok(user)
    }

    /// Creates an account and returns the backend's confirmation message.
    /// Registration does not sign the caller in.
    /// # Errors
    /// Returns `SessionFailure` with a display message and any field errors.
    pub async fn register(&self, data: &RegistrationData) -> Result<String, SessionFailure> {
        let response = self.service.register(data).await?;
        ensure_success(&response, "Registration failed.")?;
        Ok(response.message)
    }

    fn set_user(&self, user: Option<UserRecord>) {
        self.state.send_modify(|session| session.user = user);
    }

    /// Writes the last-known user record; a storage failure only costs the cache.
    fn remember(&self, user: &UserRecord) {
        let result = user
            .to_cached()
            .map_err(StoreError::from)
            .and_then(|raw| self.service.store().set(USER_KEY, &raw));
        if let Err(err) = result {
            warn!("Failed to cache user record: {err}");
        }
    }

    /// Puts back the token that was stored before a rejected login.
    fn restore_token(&self, previous: Option<&str>) {
        let store = self.service.store();
        let result = match previous {
            Some(token) => store.set(TOKEN_KEY, token),
            None => store.remove(TOKEN_KEY),
        };
        if let Err(err) = result {
            warn!("Failed to restore the previous token: {err}");
        }
    }

    fn invalidate(&self) {
        if let Err(err) = self.service.clear_auth_data() {
            warn!("Failed to clear rejected credentials: {err}");
        }
        self.set_user(None);
    }
}

/// Turns a 2xx envelope with status `fail` into a display-ready failure.
fn ensure_success(response: &NormalizedResponse, fallback: &str) -> Result<(), SessionFailure> {
    if response.is_success() {
        Ok(())
    } else {
        Err(SessionFailure::from_response(
            &response.message,
            response.errors.as_deref(),
            fallback,
        ))
    }
}

/// Marks bootstrap finished when dropped.
struct FinishLoading<'a> {
    state: &'a watch::Sender<Session>,
}

impl Drop for FinishLoading<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|session| session.is_loading = false);
    }
}
