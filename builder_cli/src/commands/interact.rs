use anyhow::{Context, Result};
use builder_api::Client;
use clap::Args;
use serde_json::Value;

use crate::output::{print_json, print_response_table, OutputFormat};

#[derive(Args)]
pub struct InteractArgs {
    /// Session to send the interaction into
    pub session_id: String,

    /// Interaction type understood by the tree
    #[arg(value_name = "TYPE")]
    pub interaction_type: String,

    /// Interaction parameter as KEY=VALUE (VALUE parsed as JSON when possible)
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = super::parse_param)]
    pub params: Vec<(String, Value)>,
}

pub async fn run(args: &InteractArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let parameters = super::to_parameters(&args.params);
    let response = client
        .add_interaction(&args.session_id, &args.interaction_type, &parameters)
        .await
        .with_context(|| format!("interacting with session '{}'", args.session_id))?;

    match format {
        OutputFormat::Table => print_response_table(&response),
        OutputFormat::Json => print_json(&response),
    }

    Ok(())
}
