use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    #[serde(alias = "error")]
    Fail,
}

/// Uniform envelope every auth endpoint replies with.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NormalizedResponse {
    pub status: ResponseStatus,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<Value>>,
}

impl NormalizedResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }

    /// Field of the `data` payload, if the payload is an object carrying it.
    #[must_use]
    pub fn data_field(&self, key: &str) -> Option<&Value> {
        self.data.as_ref().and_then(|data| data.get(key))
    }

    /// Bearer token carried by a login response.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.data_field("token")
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
    }
}
