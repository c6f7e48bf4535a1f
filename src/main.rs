use glpi_adapter::app::{app, AppState};
use glpi_adapter::services::DirectoryService;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up GLPI_URL, USER_TOKEN, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = glpi_adapter::config::config();
    tracing::info!("Starting GLPI adapter in {:?} mode against {}", config.environment, config.upstream.base_url);

    if config.upstream.accept_invalid_certs && glpi_adapter::is_production!() {
        tracing::warn!("GLPI_ACCEPT_INVALID_CERTS is enabled in production");
    }

    let directory = DirectoryService::from_config(config)
        .unwrap_or_else(|e| panic!("invalid upstream configuration: {}", e));

    let app = app(AppState::new(directory), config.server.enable_cors);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("GLPI adapter listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}
