use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    #[serde(rename = "isBase64Encoded")]
    pub is_base64_encoded: bool,
    pub body: String,
}

pub fn handle_echo_event(event: Value) -> Result<ApiGatewayResponse, serde_json::Error> {
    let body = serde_json::to_string(&event)?;
    Ok(ApiGatewayResponse {
        status_code: 200,
        headers: json!({"Content-Type": "application/json"}),
        is_base64_encoded: false,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echoes_payload_as_json_body() {
        let event = json!({"rawPath": "/hello", "headers": {"host": "api.example"}});
        let response = handle_echo_event(event.clone()).expect("echo should serialize");

        assert_eq!(response.status_code, 200);
        assert!(!response.is_base64_encoded);
        assert_eq!(response.headers["Content-Type"], "application/json");
        let body: Value = serde_json::from_str(&response.body).expect("body should be json");
        assert_eq!(body, event);
    }

    #[test]
    fn serializes_api_gateway_field_names() {
        let response = handle_echo_event(Value::Null).expect("echo should serialize");
        let wire = serde_json::to_value(&response).expect("response should serialize");

        assert_eq!(wire["statusCode"], 200);
        assert_eq!(wire["isBase64Encoded"], false);
        assert_eq!(wire["body"], "null");
    }
}
