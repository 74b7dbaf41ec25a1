use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::models::content::{CharacterSummary, Hint, MovieSummary};

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Api error: {0} - {1}")]
    ApiError(StatusCode, String),
}

/// Hints keyed by the url id of the movie or character they describe.
pub type HintMap = HashMap<String, Vec<Hint>>;

/// Batch access to the content API backing the guessing game.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn random_movies_except(
        &self,
        exclude_ids: &[i64],
        count: usize,
    ) -> Result<Vec<MovieSummary>, ContentError>;

    async fn random_characters_except(
        &self,
        exclude_ids: &[i64],
        count: usize,
    ) -> Result<Vec<CharacterSummary>, ContentError>;

    async fn batch_hints_for_movies(&self, url_ids: &[String]) -> Result<HintMap, ContentError>;

    async fn batch_hints_for_characters(&self, url_ids: &[String])
    -> Result<HintMap, ContentError>;

    async fn health_check(&self) -> Result<(), ContentError>;
}
