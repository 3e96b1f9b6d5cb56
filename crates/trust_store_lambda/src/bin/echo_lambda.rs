use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use trust_store_lambda::handlers::echo::{handle_echo_event, ApiGatewayResponse};
use trust_store_lambda::logging::init_logging;

async fn handle_request(event: LambdaEvent<Value>) -> Result<ApiGatewayResponse, Error> {
    handle_echo_event(event.payload)
        .map_err(|error| Error::from(format!("failed to serialize echo body: {error}")))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_logging();
    lambda_runtime::run(service_fn(handle_request)).await
}
