//! Structural check of a Google service-account key.

use serde_json::{Map, Value};

use crate::domain::errors::KeyValidationError;

/// Fields every service-account key JSON carries
pub const REQUIRED_KEY_FIELDS: [&str; 4] = ["type", "project_id", "private_key", "client_email"];

const SERVICE_ACCOUNT_TYPE: &str = "service_account";

/// Non-secret facts read from a validated service-account key.
///
/// The private key itself is only checked for presence and never copied out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceAccountKey {
    /// Project the service account was created in
    pub project_id: Option<String>,

    /// Service account email
    pub client_email: Option<String>,
}

impl ServiceAccountKey {
    /// Validate that `raw` looks like a service-account key.
    pub fn parse(raw: &str) -> Result<Self, KeyValidationError> {
        let value: Value =
            serde_json::from_str(raw).map_err(|e| KeyValidationError::NotJson(e.to_string()))?;
        let object = value.as_object().ok_or(KeyValidationError::NotAnObject)?;

        if let Some(missing) = REQUIRED_KEY_FIELDS
            .iter()
            .find(|field| !object.contains_key(**field))
        {
            return Err(KeyValidationError::MissingField(missing));
        }

        match object.get("type").and_then(Value::as_str) {
            Some(SERVICE_ACCOUNT_TYPE) => {}
            Some(other) => return Err(KeyValidationError::WrongType(other.to_string())),
            None => return Err(KeyValidationError::WrongType(object["type"].to_string())),
        }

        Ok(Self {
            project_id: string_field(object, "project_id"),
            client_email: string_field(object, "client_email"),
        })
    }

    /// Whether the key was issued for a different project than `expected`.
    pub fn project_mismatch(&self, expected: &str) -> bool {
        self.project_id
            .as_deref()
            .is_some_and(|project| !expected.is_empty() && project != expected)
    }
}

fn string_field(object: &Map<String, Value>, name: &str) -> Option<String> {
    object.get(name).and_then(Value::as_str).map(str::to_owned)
}
