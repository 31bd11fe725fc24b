//! Internal request and response types for the AnkiConnect protocol.

use serde::{Deserialize, Serialize};

/// The AnkiConnect API version this client speaks.
pub(crate) const API_VERSION: u8 = 6;

/// The request format expected by AnkiConnect.
#[derive(Debug, Serialize)]
pub(crate) struct AnkiRequest<'a, T> {
    /// The action to perform.
    pub action: &'a str,
    /// The API version (always 6).
    pub version: u8,
    /// Optional parameters for the action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<T>,
}

impl<'a, T> AnkiRequest<'a, T> {
    /// Create a new request with parameters.
    pub fn new(action: &'a str, params: T) -> Self {
        Self::with_optional_params(action, Some(params))
    }

    /// Create a request whose parameters may be absent.
    pub fn with_optional_params(action: &'a str, params: Option<T>) -> Self {
        Self {
            action,
            version: API_VERSION,
            params,
        }
    }

    /// Create a new request without parameters.
    pub fn without_params(action: &'a str) -> AnkiRequest<'a, ()> {
        AnkiRequest {
            action,
            version: API_VERSION,
            params: None,
        }
    }
}

/// The response format returned by AnkiConnect.
#[derive(Debug, Deserialize)]
pub(crate) struct AnkiResponse<T> {
    /// The result of the action, if successful.
    pub result: Option<T>,
    /// The error message, if the action failed.
    pub error: Option<String>,
}

impl<T> AnkiResponse<T> {
    /// The error message, ignoring `null` and empty strings.
    pub fn error_message(&mut self) -> Option<String> {
        self.error.take().filter(|e| !e.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_without_params_omits_the_field() {
        let request = AnkiRequest::<()>::without_params("deckNames");
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body, json!({"action": "deckNames", "version": 6}));
    }

    #[test]
    fn request_with_params_nests_them() {
        let request = AnkiRequest::new("createDeck", json!({"deck": "print-jlpt"}));
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(
            body,
            json!({"action": "createDeck", "version": 6, "params": {"deck": "print-jlpt"}})
        );
    }

    #[test]
    fn response_with_missing_keys_parses() {
        let response: AnkiResponse<i64> = serde_json::from_str("{}").unwrap();
        assert!(response.result.is_none());
        assert!(response.error.is_none());
    }

    #[test]
    fn empty_error_string_is_not_an_error() {
        let mut response: AnkiResponse<i64> =
            serde_json::from_str(r#"{"result": 7, "error": ""}"#).unwrap();
        assert_eq!(response.error_message(), None);
        assert_eq!(response.result, Some(7));
    }
}
