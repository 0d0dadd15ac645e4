//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::kernel::ServerDeps;
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{buddies, feedback, health_handler, matches, notifications, suggestions};

/// Shared application state
#[derive(Clone)]
pub struct AxumAppState {
    pub deps: Arc<ServerDeps>,
    /// Include provider failure causes in 500 responses (non-production only)
    pub expose_error_details: bool,
}

impl AxumAppState {
    pub fn new(deps: ServerDeps, expose_error_details: bool) -> Self {
        Self {
            deps: Arc::new(deps),
            expose_error_details,
        }
    }
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    if allowed_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}

/// Build the Axum application router
///
/// An empty `allowed_origins` list allows any origin.
pub fn build_app(state: AxumAppState, allowed_origins: &[String]) -> Router {
    let jwt_service = state.deps.jwt_service.clone();

    let api = Router::new()
        .route("/matches", post(matches::create).get(matches::list))
        .route("/matches/:id", get(matches::get_one))
        .route("/matches/:id/respond", patch(matches::respond))
        .route("/matches/:id/complete", patch(matches::complete))
        .route("/buddies", get(buddies::directory))
        .route("/buddies/dashboard", get(buddies::dashboard))
        .route("/buddies/:user_id/capacity", get(buddies::capacity))
        .route("/ai/suggestions", post(suggestions::suggest))
        .route("/ai/status", get(suggestions::status))
        .route("/ai/cache/clear", post(suggestions::clear_cache))
        .route("/feedback", post(feedback::submit))
        .route("/feedback/stats", get(feedback::stats))
        .route("/notifications", get(notifications::list))
        .route("/notifications/:id/read", patch(notifications::mark_read));

    Router::new()
        .nest("/api", api)
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service.clone(), req, next)
        }))
        .layer(Extension(state))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
}
