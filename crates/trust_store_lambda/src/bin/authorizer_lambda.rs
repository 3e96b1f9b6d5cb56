use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use trust_store_core::authorization::AuthorizerResponse;
use trust_store_lambda::config::AuthorizerConfig;
use trust_store_lambda::handlers::authorizer::handle_authorizer_event;
use trust_store_lambda::logging::init_logging;

async fn handle_request(
    config: &AuthorizerConfig,
    event: LambdaEvent<Value>,
) -> Result<AuthorizerResponse, Error> {
    Ok(handle_authorizer_event(event.payload, &config.secret_token))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging();

    let config = AuthorizerConfig::from_env();
    if config.secret_token.is_empty() {
        tracing::warn!(
            component = "authorizer",
            event = "secret_unconfigured",
            "AUTHORIZER_SECRET_TOKEN is not set; every request will be denied"
        );
    }

    let shared_config = &config;
    lambda_runtime::run(service_fn(move |event| handle_request(shared_config, event))).await
}
