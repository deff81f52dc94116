use spaces_backend::{AppState, config::Config, connect_store, init_tracing, routes};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    init_tracing(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    if config.allowed_origin().is_none() {
        tracing::warn!("ALLOWED_ORIGIN is not configured, every /spaces request will fail");
    }

    // Store handle, built once and shared by every request
    let store = connect_store(&config).await?;

    let addr: SocketAddr = config.server_address().parse()?;
    let state = Arc::new(AppState::new(config, store)?);
    let app = routes::create_router(state);

    // Start server
    tracing::info!("Server running at http://{}", addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down");
}
