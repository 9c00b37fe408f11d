//! # Scireg
//!
//! Client-side authentication core for the scientist registry. It signs
//! scientists up and in against the registry auth API, keeps the bearer token
//! and the last-known profile in a local credential store, and exposes a
//! session context that restores the session once at start-up.
//!
//! ## Layers
//!
//! 1. **Storage** (`storage`): two string keys, `token` and `user`.
//! 2. **Request helper** (`api`): one JSON request per call, bearer token
//!    attached when stored, every failure normalized into `ApiError`
//!    (status `0` when the server could not be reached).
//! 3. **Auth service** (`auth::client`): register, login, logout, profile and
//!    token verification, plus the storage contract around them.
//! 4. **Session context** (`auth::state`): observable session state and the
//!    bootstrap sequence.
//!
//! The `scireg` binary (`cli`) drives these layers from the command line.

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod errors;
pub mod storage;

pub use api::{ApiClient, NormalizedResponse, ResponseStatus};
pub use auth::{AuthService, SessionContext};
pub use config::ClientConfig;
pub use errors::{ApiError, AppError, FieldErrors, StoreError};
pub use storage::{CredentialStore, FileStore, MemoryStore};

pub static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

pub const GIT_COMMIT_HASH: &str = env!("SCIREG_GIT_SHA");
