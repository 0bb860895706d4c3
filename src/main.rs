use cloudcycle::{config, routes, state};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = config::AppConfig::from_env().expect("invalid configuration");
    tracing::info!(
        storage_dir = %config.storage_dir.display(),
        login_delay = ?config.login_delay,
        "configuration loaded"
    );

    // Rehydrate the session before the router can make any guard decision.
    let state = state::AppState::from_config(&config);

    let app = routes::app(state);
    let listener = tokio::net::TcpListener::bind((config.bind_addr, config.port))
        .await
        .expect("failed to bind");

    tracing::info!(port = config.port, "cloudcycle listening");
    axum::serve(listener, app).await.expect("server failed");
}
