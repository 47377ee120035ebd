use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use profile_optimizer::config::Config;
use profile_optimizer::logging;
use profile_optimizer::routes::build_router;
use profile_optimizer::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    logging::init(&config.rust_log, std::io::stdout);

    info!("Starting Profile Optimizer API v{}", env!("CARGO_PKG_VERSION"));

    // Role tables and the optional generative client are built once, read-only afterwards
    let state = AppState::from_config(config.clone());
    info!(
        "Role catalog loaded ({} roles)",
        state.catalog.profiles().len()
    );

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
