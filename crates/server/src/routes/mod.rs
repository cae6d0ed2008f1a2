//! HTTP route handlers.

pub mod health;
pub mod metrics;
pub mod player;

use axum::Router;
use axum::middleware;

use crate::middleware::track_metrics;
use crate::state::AppState;

/// Assemble every route, with the player API nested under the configured prefix.
pub fn app(state: AppState) -> Router {
    let players = player::router();
    let api = if state.api_prefix().is_empty() {
        players
    } else {
        Router::new().nest(state.api_prefix(), players)
    };

    Router::new()
        .merge(api)
        .merge(health::router())
        .merge(metrics::router())
        .layer(middleware::from_fn_with_state(state.clone(), track_metrics))
        .with_state(state)
}
