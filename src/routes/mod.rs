use axum::Router;

use crate::Config;

mod dashboard;
mod health;

// ---

pub fn router(config: Config) -> Router {
    // ---
    Router::new()
        .merge(dashboard::router())
        .merge(health::router())
        .with_state(config)
}
