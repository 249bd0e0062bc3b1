//! Agri Advisor chat service
//!
//! Serves the chat page and answers farming questions in English or Telugu.

use agri::{config::ServiceKind, routes, server, telemetry, ChatState, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::load(ServiceKind::Chat)?;

    telemetry::init(&config.log, "agri=debug,tower_http=debug");

    tracing::info!("Starting Agri Advisor chat service");
    tracing::info!("Environment: {}", config.environment);

    let state = ChatState::from_config(&config)?;
    let app = server::create_app(
        routes::chat_routes(&config.chat.static_dir),
        state,
        &config.cors,
    );

    server::serve(app, &config).await
}
