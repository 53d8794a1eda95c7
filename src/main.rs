use std::sync::Arc;

use focusflow_api::identity::firebase::FirebaseAuth;
use focusflow_api::store::firestore::FirestoreStore;
use focusflow_api::{app, AppState};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up FIREBASE_PROJECT_ID etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = focusflow_api::config::config();
    tracing::info!("Starting FocusFlow API in {:?} mode", config.environment);

    let state = AppState::new(
        Arc::new(FirebaseAuth::new(&config.identity)),
        Arc::new(FirestoreStore::new(&config.store)),
    );

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 FocusFlow API listening on http://{}", bind_addr);

    axum::serve(listener, app(state)).await.expect("server");
}
