use crate::{
    api::ApiClient,
    auth::{AuthService, SessionContext},
    config::ClientConfig,
    storage::FileStore,
};
use anyhow::Result;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub config: ClientConfig,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Auth service backed by the configured credential file.
    /// # Errors
    /// Returns an error if the API base URL is invalid.
    pub fn auth_service(&self) -> Result<AuthService> {
        let store = Arc::new(FileStore::new(&self.config.store_path));
        let api = ApiClient::new(&self.config, store)?;
        Ok(AuthService::new(api))
    }

    /// Session context that has already run its bootstrap check.
    /// # Errors
    /// Returns an error if the API base URL is invalid.
    pub async fn session(&self) -> Result<SessionContext> {
        Ok(SessionContext::start(self.auth_service()?).await)
    }
}
