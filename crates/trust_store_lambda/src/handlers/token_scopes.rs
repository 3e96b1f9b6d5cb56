use serde::Deserialize;
use serde_json::Value;
use trust_store_core::token_scopes::{client_scopes, TokenGenerationResponse};

#[derive(Debug, thiserror::Error)]
pub enum TokenScopesError {
    #[error("invalid pre token generation event: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("pre token generation event must be a JSON object")]
    NotAnObject,
    #[error("pre token generation event has no callerContext.clientId")]
    MissingClientId,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PreTokenGenerationEvent {
    #[serde(default)]
    caller_context: Option<CallerContext>,
    #[serde(default)]
    request: Option<PreTokenGenerationRequest>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CallerContext {
    #[serde(default)]
    client_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PreTokenGenerationRequest {
    #[serde(default)]
    group_configuration: Option<GroupConfiguration>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GroupConfiguration {
    #[serde(default)]
    groups_to_override: Option<Vec<String>>,
}

/// Returns the trigger event with `response` replaced by the scope override.
///
/// A user in no group gets an empty scope claim.
pub fn handle_token_scopes_event(mut event: Value) -> Result<Value, TokenScopesError> {
    if !event.is_object() {
        return Err(TokenScopesError::NotAnObject);
    }
    let parsed = PreTokenGenerationEvent::deserialize(&event)?;
    let client_id = parsed
        .caller_context
        .and_then(|context| context.client_id)
        .filter(|client_id| !client_id.is_empty())
        .ok_or(TokenScopesError::MissingClientId)?;
    let groups = parsed
        .request
        .and_then(|request| request.group_configuration)
        .and_then(|configuration| configuration.groups_to_override)
        .unwrap_or_default();

    let scope = client_scopes(&groups, &client_id);
    tracing::info!(
        component = "token_scopes",
        event = "scopes_overridden",
        client_id = %client_id,
        groups = groups.len(),
    );

    event["response"] = serde_json::to_value(TokenGenerationResponse::with_scopes(scope))?;
    Ok(event)
}
