//! Auth feature module: the auth service wrapping the registry endpoints, the
//! session context with its one-time bootstrap, and the client-side form
//! validation that runs before any request is made. This module handles
//! passwords and bearer tokens and must not log them.
//!
//! Flow Overview: Sign-up validates the form and posts the registration; the
//! user stays signed out. Sign-in posts the identifier and password, stores
//! the returned token and caches the user record. On start the context shows
//! the cached user and verifies the token; logout always wipes local state.

pub mod client;
pub mod forms;
pub mod identifier;
pub mod state;
pub mod types;

pub use client::AuthService;
pub use forms::{SignInForm, SignUpForm};
pub use identifier::{classify, IdentifierKind};
pub use state::SessionContext;
pub use types::{Credentials, RegistrationData, Session, SessionFailure, UserRecord};
