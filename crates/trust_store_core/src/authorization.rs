use std::collections::HashMap;

use serde::{Deserialize, Serialize};

pub const AUTHORIZATION_HEADER: &str = "authorization";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorizerResponse {
    #[serde(rename = "isAuthorized")]
    pub is_authorized: bool,
}

/// An empty secret never authorizes, so an unconfigured deployment denies all callers.
pub fn is_authorized(presented: Option<&str>, secret: &str) -> bool {
    match presented {
        Some(value) => !secret.is_empty() && value == secret,
        None => false,
    }
}

/// Header names arrive lower-cased from HTTP APIs but not from every client.
pub fn authorization_header(headers: &HashMap<String, String>) -> Option<&str> {
    headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(AUTHORIZATION_HEADER))
        .map(|(_, value)| value.as_str())
}
