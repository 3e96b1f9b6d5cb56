use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;
use trust_store_core::authorization::{authorization_header, is_authorized, AuthorizerResponse};

/// Only the headers of an HTTP API authorizer event matter here.
#[derive(Debug, Default, Deserialize)]
struct AuthorizerEvent {
    #[serde(default)]
    headers: HashMap<String, String>,
}

/// Malformed events are denied rather than surfaced as errors.
pub fn handle_authorizer_event(event: Value, secret_token: &str) -> AuthorizerResponse {
    let event: AuthorizerEvent = match serde_json::from_value(event) {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(
                component = "authorizer",
                event = "malformed_event",
                error = %error,
            );
            AuthorizerEvent::default()
        }
    };

    let presented = authorization_header(&event.headers);
    let authorized = is_authorized(presented, secret_token);
    tracing::info!(
        component = "authorizer",
        event = "authorization_checked",
        header_present = presented.is_some(),
        authorized,
    );

    AuthorizerResponse {
        is_authorized: authorized,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn authorizes_matching_header() {
        let response = handle_authorizer_event(
            json!({
                "type": "REQUEST",
                "routeArn": "arn:aws:execute-api:eu-west-1:123456789012:api/$default/GET/",
                "headers": {"authorization": "s3cret", "host": "api.example"},
            }),
            "s3cret",
        );
        assert!(response.is_authorized);
    }

    #[test]
    fn denies_wrong_or_missing_header() {
        let wrong =
            handle_authorizer_event(json!({"headers": {"authorization": "nope"}}), "s3cret");
        assert!(!wrong.is_authorized);

        let missing = handle_authorizer_event(json!({"headers": {}}), "s3cret");
        assert!(!missing.is_authorized);

        let no_headers = handle_authorizer_event(json!({"type": "REQUEST"}), "s3cret");
        assert!(!no_headers.is_authorized);
    }

    #[test]
    fn denies_malformed_event() {
        let response = handle_authorizer_event(json!({"headers": ["authorization"]}), "s3cret");
        assert!(!response.is_authorized);
    }

    #[test]
    fn unconfigured_secret_denies_empty_header() {
        let response = handle_authorizer_event(json!({"headers": {"authorization": ""}}), "");
        assert!(!response.is_authorized);
    }
}
