use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use trust_store_lambda::handlers::token_scopes::handle_token_scopes_event;
use trust_store_lambda::logging::init_logging;

async fn handle_request(event: LambdaEvent<Value>) -> Result<Value, Error> {
    Ok(handle_token_scopes_event(event.payload)?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging();
    lambda_runtime::run(service_fn(handle_request)).await
}
