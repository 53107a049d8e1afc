//! The uniform response envelope used by the command endpoints.
//!
//! Exactly one of `data`/`error` is populated, gated by `success`. Clients
//! branch on the flag, never on HTTP status, for logical failures.

use crate::error::BotError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}

impl Envelope {
    pub fn ok(data: Value) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    pub fn err(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ErrorDetail {
                code: code.into(),
                message: message.into(),
                details: None,
            }),
        }
    }

    pub fn err_with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: Value,
    ) -> Self {
        let mut env = Self::err(code, message);
        if let Some(err) = env.error.as_mut() {
            err.details = Some(details);
        }
        env
    }

    /// Logical failure envelope carrying a domain error's code and message.
    pub fn from_error(err: &BotError) -> Self {
        Self::err(err.code(), err.to_string())
    }

    /// Check the data/error exclusivity invariant.
    pub fn is_consistent(&self) -> bool {
        if self.success {
            self.data.is_some() && self.error.is_none()
        } else {
            self.data.is_none() && self.error.is_some()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_envelope() {
        let env = Envelope::ok(json!({"response": "hi"}));
        assert!(env.success);
        assert!(env.is_consistent());
    }

    #[test]
    fn test_err_envelope() {
        let env = Envelope::err("COMMAND_FAILED", "model unavailable");
        assert!(!env.success);
        assert!(env.is_consistent());
        assert_eq!(env.error.unwrap().code, "COMMAND_FAILED");
    }

    #[test]
    fn test_from_error() {
        let env = Envelope::from_error(&BotError::EmptyCommand);
        assert!(!env.success);
        let err = env.error.unwrap();
        assert_eq!(err.code, "EMPTY_COMMAND");
        assert!(!err.message.is_empty());
    }

    #[test]
    fn test_absent_fields_not_serialized() {
        let json = serde_json::to_string(&Envelope::ok(json!(1))).unwrap();
        assert!(!json.contains("error"));
        let json = serde_json::to_string(&Envelope::err("X", "y")).unwrap();
        assert!(!json.contains("data"));
    }

    #[test]
    fn test_details_attached() {
        let env = Envelope::err_with_details("X", "y", json!({"command": "add"}));
        assert_eq!(env.error.unwrap().details.unwrap()["command"], "add");
    }
}
