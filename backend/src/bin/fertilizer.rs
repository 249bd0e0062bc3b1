//! Agri Advisor fertilizer recommendation service

use agri::{config::ServiceKind, routes, server, telemetry, Config, FertilizerState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::load(ServiceKind::Fertilizer)?;

    telemetry::init(&config.log, "agri=debug,tower_http=debug");

    tracing::info!("Starting Agri Advisor fertilizer service");
    tracing::info!("Environment: {}", config.environment);

    let state = FertilizerState::from_config(&config)?;
    let app = server::create_app(routes::fertilizer_routes(), state, &config.cors);

    server::serve(app, &config).await
}
