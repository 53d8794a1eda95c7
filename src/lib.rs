use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod handlers;
pub mod identity;
pub mod middleware;
pub mod models;
pub mod state;
pub mod store;

pub use state::AppState;

/// Build the FocusFlow router around the injected collaborator handles.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    use handlers::{auth, public};

    Router::new()
        .route("/", get(public::root))
        .route("/api/test", get(public::api_test))
        .route("/api/auth/register", post(auth::register))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use handlers::{auth, projects, tasks};

    Router::new()
        .route("/api/protected", get(auth::protected))
        .route("/api/projects", post(projects::create).get(projects::list))
        .route(
            "/api/projects/:id/tasks",
            get(tasks::list).post(tasks::create),
        )
        .layer(from_fn_with_state(state, middleware::require_auth))
}
