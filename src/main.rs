use scribble_api::store::Store;
use scribble_api::{app, config, AppState};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up SCRIBBLE_JWT_SECRET etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = config::config();
    tracing::info!("starting scribble-api in {:?} mode", config.environment);

    if config.security.jwt_secret.is_empty() {
        tracing::warn!("SCRIBBLE_JWT_SECRET is not set; auth endpoints will fail until it is");
    }

    let store = match Store::open(&config.storage.data_file) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("failed to open data file {}: {}", config.storage.data_file, e);
            std::process::exit(1);
        }
    };

    let state = AppState::new(store);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 Glow Scribble API listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.expect("server");
}
