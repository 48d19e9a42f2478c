use lambda_runtime::{run, service_fn, tracing, Error};
mod config;
mod error;
mod http_handler;
mod item;
mod store;
use config::Config;
use http_handler::function_handler;
use store::DynamoItemStore;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let config = Config::from_env()?;
    let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let client = aws_sdk_dynamodb::Client::new(&sdk_config);
    tracing::info!(table = %config.table_name, "items function starting");
    let store = DynamoItemStore::new(client, config.table_name);

    run(service_fn(|event| function_handler(&store, event))).await
}
