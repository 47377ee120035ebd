use anyhow::Result;
use tokio::io::BufReader;
use tracing::info;

use profile_optimizer::config::Config;
use profile_optimizer::logging;
use profile_optimizer::mcp::McpServer;
use profile_optimizer::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // stdout is the protocol channel; logs must go to stderr
    logging::init(&config.rust_log, std::io::stderr);

    info!("Starting Profile Optimizer MCP server (stdio)");

    let server = McpServer::new(AppState::from_config(config));
    server
        .serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await
}
