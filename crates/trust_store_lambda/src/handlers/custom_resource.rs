use serde_json::Value;
use trust_store_core::contract::{
    CustomResourceEvent, LifecycleRequest, Operation, TrustStoreProperties,
};

use crate::adapters::callback::CallbackNotifier;
use crate::adapters::object_store::ArtifactStore;
use crate::handlers::guard::DeadlineGuard;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    pub remaining_millis: i64,
    /// Echoed to the orchestrator as the physical resource id.
    pub log_stream_name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("invalid custom resource event: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("custom resource event has an empty ResponseURL")]
    MissingResponseUrl,
}

/// Errors are returned only when the event gives no callback URL to report to;
/// every other failure is reported through the notification.
pub async fn handle_custom_resource_event<S, N>(
    payload: Value,
    invocation: &InvocationContext,
    guard: &DeadlineGuard<S, N>,
) -> Result<(), EventError>
where
    S: ArtifactStore + Send + Sync + 'static,
    N: CallbackNotifier,
{
    let event: CustomResourceEvent = serde_json::from_value(payload)?;
    if event.response_url.trim().is_empty() {
        return Err(EventError::MissingResponseUrl);
    }

    tracing::info!(
        component = "custom_resource",
        event = "invocation_received",
        request_type = event.request_type.as_deref().unwrap_or(""),
        request_id = %event.request_id,
        logical_resource_id = %event.logical_resource_id,
        remaining_ms = invocation.remaining_millis,
    );

    let writes_artifact = event
        .request_type
        .as_deref()
        .map(Operation::parse)
        .is_some_and(Operation::writes_artifact);

    // Only writes read the properties, so a bad bag must not fail a Delete.
    let properties = match TrustStoreProperties::from_value(&event.resource_properties) {
        Ok(properties) => properties,
        Err(error) if writes_artifact => {
            let request = LifecycleRequest::from_event(
                &event,
                TrustStoreProperties::default(),
                &invocation.log_stream_name,
            );
            guard.reject(&request, &error).await;
            return Ok(());
        }
        Err(error) => {
            tracing::warn!(
                component = "custom_resource",
                event = "properties_ignored",
                request_id = %event.request_id,
                error = %error,
            );
            TrustStoreProperties::default()
        }
    };

    let request = LifecycleRequest::from_event(&event, properties, &invocation.log_stream_name);
    guard.run(&request, invocation.remaining_millis).await;

    Ok(())
}
