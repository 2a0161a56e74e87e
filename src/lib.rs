pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod store;

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::middleware as axum_middleware;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::middleware::require_auth;
use crate::store::{Repository, Store};

/// Shared application state: the repository over the flat-file store.
#[derive(Clone)]
pub struct AppState {
    pub repo: Repository,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            repo: Repository::new(Arc::new(store)),
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_routes())
        .merge(entry_routes())
        .merge(todo_routes())
        .merge(habit_routes())
        // Global middleware
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    use handlers::protected::profile;
    use handlers::public::auth;

    let protected = Router::new()
        .route("/api/auth/profile", put(profile::update))
        .route_layer(axum_middleware::from_fn(require_auth));

    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .merge(protected)
}

fn entry_routes() -> Router<AppState> {
    use handlers::protected::entries;

    Router::new()
        .route("/api/entries", get(entries::list).post(entries::create))
        .route("/api/entries/:id", delete(entries::remove))
        .route_layer(axum_middleware::from_fn(require_auth))
}

fn todo_routes() -> Router<AppState> {
    use handlers::protected::todos;

    Router::new()
        .route("/api/todos", get(todos::list).post(todos::create))
        .route("/api/todos/:id", put(todos::update).delete(todos::remove))
        .route_layer(axum_middleware::from_fn(require_auth))
}

fn habit_routes() -> Router<AppState> {
    use handlers::protected::habits;

    Router::new()
        .route("/api/habits", get(habits::list).post(habits::create))
        .route("/api/habits/:id/checkin", put(habits::checkin))
        .route("/api/habits/:id", delete(habits::remove))
        .route_layer(axum_middleware::from_fn(require_auth))
}

fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = config::config()
        .server
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "success",
        "data": {
            "name": "Glow Scribble API",
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": {
                "auth": "/api/auth/register, /api/auth/login (public), /api/auth/profile",
                "entries": "/api/entries[/:id]",
                "todos": "/api/todos[/:id]",
                "habits": "/api/habits[/:id][/checkin]",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.repo.store().health_check() {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "message": "success",
                "data": { "status": "ok", "timestamp": now }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "error": "data file unavailable",
                "data": { "status": "degraded", "timestamp": now, "detail": e.to_string() }
            })),
        ),
    }
}
