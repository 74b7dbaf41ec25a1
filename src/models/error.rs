use axum::{http::StatusCode, response::IntoResponse};
use thiserror::Error;
use tracing::{error, warn};

use crate::service::{question_builder::BuildError, session_store::StoreError};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Api error: {1}")]
    Api(StatusCode, String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Failed to build game: {0}")]
    Build(#[from] BuildError),

    #[error("Session store error: {0}")]
    Store(#[from] StoreError),

    #[error("Invalid configuration: {0}")]
    Config(#[from] config::ConfigError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ServerError::Api(sc, msg) => {
                warn!("Api error: {} - {}", sc, msg);
                (sc, msg)
            }
            ServerError::NotFound(e) => {
                warn!("Entity not found: {}", e);
                (StatusCode::NOT_FOUND, e)
            }
            ServerError::Reqwest(e) => {
                error!("Failed to send request: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    String::from("Failed to access third party"),
                )
            }
            ServerError::Build(BuildError::Content(e)) => {
                error!("Game build aborted by content failure: {}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    String::from("Content service unavailable"),
                )
            }
            ServerError::Build(BuildError::NoQuestions) => {
                error!("Game build produced no questions");
                (
                    StatusCode::BAD_GATEWAY,
                    String::from("Not enough content to build a game"),
                )
            }
            ServerError::Store(e) => {
                error!("Session store error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, String::new())
            }
            ServerError::Config(e) => {
                error!("Invalid configuration: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, String::new())
            }
        }
        .into_response()
    }
}
