//! Request and session types for the auth flows. Credentials carry passwords
//! wrapped in `SecretString`; they must never be logged.

use crate::errors::{AppError, FieldErrors};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Role assigned to every account created through this client.
pub const SCIENTIST_ROLE: &str = "scientist";

/// Profile record owned by the backend. Cached and redisplayed as-is.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct UserRecord(Value);

impl UserRecord {
    /// Wraps a JSON object; other JSON values are not user records.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        value.is_object().then_some(Self(value))
    }

    /// Parses the serialized record kept in the credential store.
    #[must_use]
    pub fn from_cached(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok().and_then(Self::from_value)
    }

    /// Reads `data.user` only. Login and token verification replies carry
    /// other fields next to the user, so the payload itself never counts.
    #[must_use]
    pub fn from_user_field(data: Option<&Value>) -> Option<Self> {
        Self::from_value(data?.get("user")?.clone())
    }

    /// Picks the record out of a profile payload: `data.user` when present,
    /// otherwise the payload object itself, since the profile endpoint may
    /// reply with the bare record.
    #[must_use]
    pub fn from_payload(data: Option<&Value>) -> Option<Self> {
        let data = data?;
        match data.get("user") {
            Some(user) => Self::from_value(user.clone()),
            None => Self::from_value(data.clone()),
        }
    }

    /// # Errors
    /// Returns an error if the record cannot be serialized.
    pub fn to_cached(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.0)
    }

    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    #[must_use]
    pub fn field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.field("name")
    }

    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.field("email")
    }
}

/// Login input. The identifier may be an email, a phone number or an org id;
/// `email` is the fallback used by callers that only collect an email.
#[derive(Debug, Default)]
pub struct Credentials {
    pub identifier: Option<String>,
    pub email: Option<String>,
    pub password: SecretString,
}

impl Credentials {
    #[must_use]
    pub fn new(identifier: impl Into<String>, password: SecretString) -> Self {
        Self {
            identifier: Some(identifier.into()),
            email: None,
            password,
        }
    }

    /// Explicit identifier, falling back to the email.
    #[must_use]
    pub fn login_identifier(&self) -> Option<&str> {
        [self.identifier.as_deref(), self.email.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|value| !value.is_empty())
    }
}

/// Sign-up input using client field names; `mobile` is sent as `phone`.
#[derive(Debug, Default)]
pub struct RegistrationData {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub organization_id: String,
    pub password: SecretString,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub user: Option<UserRecord>,
    pub is_loading: bool,
}

impl Session {
    #[must_use]
    pub fn bootstrapping() -> Self {
        Self {
            user: None,
            is_loading: true,
        }
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Failure returned by session operations, ready for display.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct SessionFailure {
    pub message: String,
    pub field_errors: FieldErrors,
}

impl SessionFailure {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field_errors: FieldErrors::default(),
        }
    }

    /// Failure built from a 2xx envelope whose status is `fail`.
    #[must_use]
    pub fn from_response(message: &str, errors: Option<&[Value]>, fallback: &str) -> Self {
        let message = message.trim();
        Self {
            message: if message.is_empty() {
                fallback.to_string()
            } else {
                message.to_string()
            },
            field_errors: errors.map(FieldErrors::from_backend).unwrap_or_default(),
        }
    }
}

impl From<AppError> for SessionFailure {
    fn from(err: AppError) -> Self {
        let field_errors = err.field_errors();
        let message = match &err {
            AppError::Validation(_) => "Please correct the highlighted fields.".to_string(),
            AppError::Api(api) if api.is_network() => {
                "Unable to reach the server. Please try again.".to_string()
            }
            _ => err.to_string(),
        };
        Self {
            message,
            field_errors,
        }
    }
}
