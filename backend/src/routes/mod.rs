//! Route definitions for the WanderWords API
//!
//! Assembles the per-resource routers and the middleware stack. The decode
//! middleware sits once in front of the whole API: it never rejects, so
//! public routes are unaffected, and guards stacked on individual routes
//! make the access decisions.

use crate::auth;
use crate::state::AppState;
use axum::{
    http::{header, Method},
    middleware,
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod blogs;
mod health;
mod messages;
mod users;

#[cfg(test)]
mod auth_tests;
#[cfg(test)]
mod blogs_tests;
#[cfg(test)]
mod messages_tests;

pub use blogs::blog_routes;
pub use messages::message_routes;
pub use users::user_routes;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .nest("/users", users::user_routes())
        .nest("/blogs", blogs::blog_routes())
        .nest("/messages", messages::message_routes())
        // Decode middleware: attaches the identity, never rejects
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::authenticate,
        ))
        // Apply middleware layers
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
