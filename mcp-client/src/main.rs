use anyhow::Result;
use clap::{Parser, Subcommand};
use partdex_mcp::{ClientConfig, McpClient, ToolRegistry};
use std::time::Duration;
use tracing::info;

/// Command-line front end for the partdex catalog tool server.
#[derive(Parser)]
#[command(name = "partdex-mcp", version, about)]
struct Cli {
    /// MCP endpoint of the catalog backend
    #[arg(
        long,
        env = "PARTDEX_MCP_URL",
        default_value = "http://127.0.0.1:8000/mcp"
    )]
    endpoint: reqwest::Url,

    /// Connection-establishment timeout in seconds
    #[arg(long, env = "PARTDEX_CONNECT_TIMEOUT_SECS", default_value_t = 10)]
    connect_timeout: u64,

    /// Per-call timeout in seconds
    #[arg(long, env = "PARTDEX_CALL_TIMEOUT_SECS", default_value_t = 20)]
    call_timeout: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the tools the client can invoke
    Tools,
    /// Invoke a tool with a raw JSON input object
    Call {
        name: String,
        /// Tool input as a JSON object
        #[arg(long, default_value = "{}")]
        input: String,
    },
    /// List every component in the catalog
    List,
    /// Search components by name or model
    Search { query: String },
    /// Get full details for one component by id
    Get { component_id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // The registry is static; listing it needs no session.
    if let Command::Tools = cli.command {
        for tool in ToolRegistry::catalog().list() {
            println!("{}", tool.name);
            println!("  {}", tool.description);
        }
        return Ok(());
    }

    let config = ClientConfig::new(cli.endpoint.clone())
        .with_connect_timeout(Duration::from_secs(cli.connect_timeout))
        .with_call_timeout(Duration::from_secs(cli.call_timeout));

    info!("connecting to MCP endpoint at {}", cli.endpoint);
    let client = McpClient::connect(config).await?;

    let output = match cli.command {
        Command::Tools => unreachable!("handled before connecting"),
        Command::Call { name, input } => {
            let input = serde_json::from_str(&input)?;
            client.invoke(&name, input).await?
        }
        Command::List => client.list_components().await?,
        Command::Search { query } => client.search_components(&query).await?,
        Command::Get { component_id } => client.get_component(&component_id).await?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
