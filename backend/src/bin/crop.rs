//! Agri Advisor crop recommendation service

use agri::{config::ServiceKind, routes, server, telemetry, Config, CropState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::load(ServiceKind::Crop)?;

    telemetry::init(&config.log, "agri=debug,tower_http=debug");

    tracing::info!("Starting Agri Advisor crop service");
    tracing::info!("Environment: {}", config.environment);

    let state = CropState::from_config(&config)?;
    let app = server::create_app(routes::crop_routes(), state, &config.cors);

    server::serve(app, &config).await
}
