use std::sync::Arc;

use chrono::Utc;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use trust_store_core::deadline::remaining_millis;
use trust_store_lambda::adapters::callback::HttpCallbackNotifier;
use trust_store_lambda::adapters::s3_store::S3ArtifactStore;
use trust_store_lambda::config::HandlerConfig;
use trust_store_lambda::handlers::custom_resource::{
    handle_custom_resource_event, InvocationContext,
};
use trust_store_lambda::handlers::dispatcher::LifecycleDispatcher;
use trust_store_lambda::handlers::guard::DeadlineGuard;
use trust_store_lambda::logging::init_logging;

type TrustStoreGuard = DeadlineGuard<S3ArtifactStore, HttpCallbackNotifier>;

async fn handle_request(guard: &TrustStoreGuard, event: LambdaEvent<Value>) -> Result<(), Error> {
    let invocation = InvocationContext {
        remaining_millis: remaining_millis(event.context.deadline, Utc::now().timestamp_millis()),
        log_stream_name: event.context.env_config.log_stream.clone(),
    };

    handle_custom_resource_event(event.payload, &invocation, guard).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging();

    let config = HandlerConfig::from_env()?;
    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let store = Arc::new(S3ArtifactStore::new(aws_sdk_s3::Client::new(&aws_config)));
    let notifier = HttpCallbackNotifier::new(config.callback_timeout)?;
    let guard = DeadlineGuard::new(
        LifecycleDispatcher::new(store),
        notifier,
        config.safety_margin,
    );

    let shared_guard = &guard;
    lambda_runtime::run(service_fn(move |event| handle_request(shared_guard, event))).await
}
