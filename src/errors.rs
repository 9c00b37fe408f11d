//! Error types shared by the request helper, the auth service and the session
//! context. Network failures are folded into `ApiError` with status `0` so
//! callers can tell "server unreachable" apart from a real HTTP error code.

use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Status used by `ApiError` when the server could not be reached or replied
/// with something that is not a JSON envelope.
pub const NETWORK_ERROR_STATUS: u16 = 0;

/// Failure returned by the request helper.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{message}")]
pub struct ApiError {
    pub status: u16,
    pub message: String,
    pub errors: Option<Vec<Value>>,
}

impl ApiError {
    #[must_use]
    pub fn new(status: u16, message: impl Into<String>, errors: Option<Vec<Value>>) -> Self {
        Self {
            status,
            message: message.into(),
            errors,
        }
    }

    /// Transport failure or malformed response body.
    #[must_use]
    pub fn network() -> Self {
        Self::new(NETWORK_ERROR_STATUS, "network error", None)
    }

    #[must_use]
    pub fn is_network(&self) -> bool {
        self.status == NETWORK_ERROR_STATUS
    }

    /// True when the backend explicitly rejected the caller's credentials.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status, 401 | 403)
    }

    /// Per-field messages carried in the backend `errors` list.
    #[must_use]
    pub fn field_errors(&self) -> FieldErrors {
        self.errors
            .as_deref()
            .map(FieldErrors::from_backend)
            .unwrap_or_default()
    }
}

/// Persistent credential storage failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Validation failed: {0}")]
    Validation(FieldErrors),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Config error: {0}")]
    Config(String),
}

impl AppError {
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Api(err) if err.is_network())
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api(err) if err.is_unauthorized())
    }

    /// Field-level messages for form display, empty when the error is not tied to fields.
    #[must_use]
    pub fn field_errors(&self) -> FieldErrors {
        match self {
            Self::Api(err) => err.field_errors(),
            Self::Validation(fields) => fields.clone(),
            Self::Store(_) | Self::Config(_) => FieldErrors::default(),
        }
    }
}

impl From<FieldErrors> for AppError {
    fn from(fields: FieldErrors) -> Self {
        Self::Validation(fields)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Ordered field -> message list used for client-side validation and for
/// structured backend errors.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// First message recorded for `field`.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Reads `{ field | path | param, message | msg }` entries from a backend
    /// `errors` list. Entries without both a field name and a message are skipped.
    #[must_use]
    pub fn from_backend(entries: &[Value]) -> Self {
        let mut fields = Self::default();
        for entry in entries {
            let field = ["field", "path", "param"]
                .iter()
                .find_map(|key| entry.get(key).and_then(Value::as_str));
            let message = ["message", "msg"]
                .iter()
                .find_map(|key| entry.get(key).and_then(Value::as_str));
            if let (Some(field), Some(message)) = (field, message) {
                fields.push(field, message);
            }
        }
        fields
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                formatter.write_str("; ")?;
            }
            write!(formatter, "{}: {}", error.field, error.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}
