use anyhow::{Context, Result};
use builder_api::Client;
use clap::Args;

use crate::output::{print_json, print_response_table, OutputFormat};

#[derive(Args)]
pub struct SessionArgs {
    /// Execution session to look up
    pub session_id: String,
}

pub async fn run(args: &SessionArgs, client: &Client, format: &OutputFormat) -> Result<()> {
    let response = client
        .get_session_information(&args.session_id)
        .await
        .with_context(|| format!("fetching session '{}'", args.session_id))?;

    match format {
        OutputFormat::Table => print_response_table(&response),
        OutputFormat::Json => print_json(&response),
    }

    Ok(())
}
