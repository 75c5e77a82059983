mod commands;
mod output;

use anyhow::Result;
use builder_api::Client;
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "builder")]
#[command(about = "Execute decision trees on the Builder API")]
struct Cli {
    /// Tenant-scoped API key
    #[arg(long, env = "BUILDER_API_KEY", hide_env_values = true)]
    api_key: String,

    /// Tenant the trees belong to
    #[arg(long, env = "BUILDER_TENANT_ID")]
    tenant_id: String,

    /// Base URL override, e.g. a local stand-in for the production API
    #[arg(long, env = "BUILDER_API_URL")]
    api_url: Option<String>,

    /// Output format: table or json
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a tree release and wait for the evaluation result
    Execute(commands::execute::ExecuteArgs),
    /// Queue a tree release execution and print its tracking token
    ExecuteAsync(commands::execute_async::ExecuteAsyncArgs),
    /// Send a follow-up interaction into a running session
    Interact(commands::interact::InteractArgs),
    /// Fetch the current state of an execution session
    Session(commands::session::SessionArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("builder=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Table,
    };

    let client = match &cli.api_url {
        Some(url) => Client::with_base_url(url, cli.api_key.clone(), cli.tenant_id.clone())?,
        None => Client::new(cli.api_key.clone(), cli.tenant_id.clone())?,
    };

    match &cli.command {
        Commands::Execute(args) => commands::execute::run(args, &client, &format).await?,
        Commands::ExecuteAsync(args) => {
            commands::execute_async::run(args, &client, &format).await?
        }
        Commands::Interact(args) => commands::interact::run(args, &client, &format).await?,
        Commands::Session(args) => commands::session::run(args, &client, &format).await?,
    }

    Ok(())
}
