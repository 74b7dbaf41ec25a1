use std::sync::Arc;

use axum::Router;

use crate::{
    api::{guessing_game::game_routes, health::health_routes},
    models::app_state::AppState,
};

pub mod content_client;
pub mod guessing_game;
pub mod health;
pub mod validation;

pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/health", health_routes(state.clone()))
        .nest("/games", game_routes(state))
}
