//! HTTP route definitions
//!
//! The API is GraphQL at /graphql. Health probes live beside it.

pub mod graphql;
pub mod health;

use axum::Router;

use crate::AppState;

/// All routes, before state and layers are applied
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(graphql::router())
        .merge(health::router())
}
