//! Client wrappers for the registry auth endpoints. The service owns the
//! read/write contract with the credential store: login persists the token,
//! logout wipes token and cached user, registration never touches storage.

use crate::{
    api::{ApiClient, Method, NormalizedResponse},
    auth::types::{Credentials, RegistrationData, SCIENTIST_ROLE},
    errors::{AppError, FieldErrors, StoreError},
    storage::{CredentialStore, TOKEN_KEY, USER_KEY},
};
use secrecy::ExposeSecret;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const REGISTER_PATH: &str = "/auth/register";
pub const LOGIN_PATH: &str = "/auth/login";
pub const LOGOUT_PATH: &str = "/auth/logout";
pub const PROFILE_PATH: &str = "/auth/profile";
pub const VERIFY_TOKEN_PATH: &str = "/auth/verify-token";

#[derive(Clone)]
pub struct AuthService {
    api: ApiClient,
}

impl AuthService {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn CredentialStore> {
        self.api.store()
    }

    /// Creates a scientist account. The response is returned verbatim and the
    /// caller stays signed out.
    /// # Errors
    /// Returns `AppError::Api` when the backend rejects the request or cannot be reached.
    pub async fn register(&self, data: &RegistrationData) -> Result<NormalizedResponse, AppError> {
        let body = json!({
            "name": data.name,
            "email": data.email,
            "phone": data.mobile,
            "password": data.password.expose_secret(),
            "role": SCIENTIST_ROLE,
            "organizationId": data.organization_id,
        });

        let response = self.api.request(REGISTER_PATH, Method::POST, Some(&body)).await?;
        debug!(success = response.is_success(), "registration completed");
        Ok(response)
    }

    /// Signs in and persists the bearer token when the backend issues one.
    /// The user record is left for the session context to cache.
    /// # Errors
    /// Returns `AppError::Validation` when no identifier is provided, `AppError::Api`
    /// for backend or network failures, and `AppError::Store` if the token cannot be saved.
    pub async fn login(&self, credentials: &Credentials) -> Result<NormalizedResponse, AppError> {
        let Some(identifier) = credentials.login_identifier() else {
            let mut fields = FieldErrors::default();
            fields.push("identifier", "Email, phone or organization ID is required.");
            return Err(AppError::Validation(fields));
        };

        let body = json!({
            "identifier": identifier,
            "password": credentials.password.expose_secret(),
        });

        let response = self.api.request(LOGIN_PATH, Method::POST, Some(&body)).await?;
        if response.is_success() {
            if let Some(token) = response.token() {
                self.store().set(TOKEN_KEY, token)?;
                info!("login succeeded, token stored");
            } else {
                warn!("login succeeded without a token in the response");
            }
        }
        Ok(response)
    }

    /// Signs out on the server and always clears local credentials, even when
    /// the request fails. The request failure is still returned.
    /// # Errors
    /// Returns `AppError::Api` when the backend rejects the call or cannot be reached.
    pub async fn logout(&self) -> Result<NormalizedResponse, AppError> {
        let _cleanup = ClearOnDrop {
            store: self.store().as_ref(),
        };
        let response = self.api.request(LOGOUT_PATH, Method::POST, None).await?;
        Ok(response)
    }

    /// # Errors
    /// Returns `AppError::Api` when the backend rejects the call or cannot be reached.
    pub async fn get_profile(&self) -> Result<NormalizedResponse, AppError> {
        Ok(self.api.request(PROFILE_PATH, Method::GET, None).await?)
    }

    /// # Errors
    /// Returns `AppError::Api` when the token is rejected or the backend cannot be reached.
    pub async fn verify_token(&self) -> Result<NormalizedResponse, AppError> {
        Ok(self.api.request(VERIFY_TOKEN_PATH, Method::GET, None).await?)
    }

    /// Token presence only; the cached user record does not count.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.store().has_token()
    }

    /// Removes token and cached user. Safe to call repeatedly.
    /// # Errors
    /// Returns the first `StoreError` hit; both keys are attempted regardless.
    pub fn clear_auth_data(&self) -> Result<(), StoreError> {
        clear_credentials(self.store().as_ref())
    }
}

fn clear_credentials(store: &dyn CredentialStore) -> Result<(), StoreError> {
    let token = store.remove(TOKEN_KEY);
    let user = store.remove(USER_KEY);
    token.and(user)
}

/// Wipes local credentials when dropped, so logout cleanup runs on every exit path.
struct ClearOnDrop<'a> {
    store: &'a dyn CredentialStore,
}

impl Drop for ClearOnDrop<'_> {
    fn drop(&mut self) {
        match clear_credentials(self.store) {
            Ok(()) => debug!("local credentials cleared"),
            Err(err) => warn!("Failed to clear local credentials: {err}"),
        }
    }
}
