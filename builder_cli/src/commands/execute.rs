use anyhow::{Context, Result};
use builder_api::Client;
use clap::Args;
use serde_json::Value;

use crate::output::{print_json, print_response_table, OutputFormat};

#[derive(Args)]
pub struct ExecuteArgs {
    /// Tree to execute
    pub tree_id: String,

    /// Deployed release of the tree, e.g. production
    pub release_id: String,

    /// Execution parameter as KEY=VALUE (VALUE parsed as JSON when possible)
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = super::parse_param)]
    pub params: Vec<(String, Value)>,
}

pub async fn run(args: &ExecuteArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let parameters = super::to_parameters(&args.params);
    let response = client
        .add_execution(&args.tree_id, &args.release_id, &parameters)
        .await
        .with_context(|| {
            format!(
                "executing tree '{}' release '{}'",
                args.tree_id, args.release_id
            )
        })?;

    match format {
        OutputFormat::Table => print_response_table(&response),
        OutputFormat::Json => print_json(&response),
    }

    Ok(())
}
