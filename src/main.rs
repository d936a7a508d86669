use roomrelay::{
    app::build_router, config::ServerConfig, room::InMemoryRoomRepository,
    session::InMemorySessionRepository, shared::AppState, websockets::InMemoryConnectionManager,
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "roomrelay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    info!(?config, "Starting room relay server");

    // All state is in memory and lost on restart
    let app_state = AppState::new(
        Arc::new(InMemoryRoomRepository::new()),
        Arc::new(InMemorySessionRepository::new()),
        Arc::new(InMemoryConnectionManager::new()),
    );

    let app = build_router(app_state, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!("Server running on http://localhost:{}", config.port);
    axum::serve(listener, app).await
}
