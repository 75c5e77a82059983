use anyhow::{Context, Result};
use builder_api::Client;
use clap::Args;
use serde_json::Value;

use crate::output::{print_json, OutputFormat};

#[derive(Args)]
pub struct ExecuteAsyncArgs {
    /// Tree to execute
    pub tree_id: String,

    /// Deployed release of the tree, e.g. production
    pub release_id: String,

    /// Execution parameter as KEY=VALUE (VALUE parsed as JSON when possible)
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = super::parse_param)]
    pub params: Vec<(String, Value)>,
}

pub async fn run(args: &ExecuteAsyncArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let parameters = super::to_parameters(&args.params);
    let token = client
        .add_async_execution(&args.tree_id, &args.release_id, &parameters)
        .await
        .with_context(|| {
            format!(
                "queueing execution of tree '{}' release '{}'",
                args.tree_id, args.release_id
            )
        })?;

    match format {
        OutputFormat::Table => println!("{}", token),
        OutputFormat::Json => print_json(&serde_json::json!({ "request_id": token })),
    }

    Ok(())
}
