use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::error;

use crate::{
    models::content::{CharacterSummary, MovieSummary},
    service::content_source::{ContentError, ContentSource, HintMap},
};

/// Client for the Disney content API serving random movies, characters and
/// their hints.
#[derive(Debug, Clone)]
pub struct ContentClient {
    domain: String,
    client: Client,
}

impl ContentClient {
    pub fn new(domain: impl Into<String>, client: Client) -> Self {
        let domain = domain.into();
        Self { domain, client }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        uri: &str,
        query: &[(&str, String)],
    ) -> Result<T, ContentError> {
        let url = format!("{}/{}", self.domain, uri);
        let response = self.client.get(&url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or("No response body".into());
            error!("Content request to {} failed: {} - {}", uri, status, body);
            return Err(ContentError::ApiError(status, body));
        }

        Ok(response.json::<T>().await?)
    }

    async fn random_except<T: DeserializeOwned>(
        &self,
        uri: &str,
        exclude_ids: &[i64],
        count: usize,
    ) -> Result<Vec<T>, ContentError> {
        let mut query = vec![("count", count.to_string())];
        if !exclude_ids.is_empty() {
            query.push(("exclude_ids", join(exclude_ids)));
        }

        self.get_json(uri, &query).await
    }

    async fn batch_hints(&self, uri: &str, url_ids: &[String]) -> Result<HintMap, ContentError> {
        self.get_json(uri, &[("urlIds", url_ids.join(","))]).await
    }
}

fn join(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<String>>()
        .join(",")
}

#[async_trait]
impl ContentSource for ContentClient {
    async fn random_movies_except(
        &self,
        exclude_ids: &[i64],
        count: usize,
    ) -> Result<Vec<MovieSummary>, ContentError> {
        self.random_except("movies/random-except", exclude_ids, count)
            .await
    }

    async fn random_characters_except(
        &self,
        exclude_ids: &[i64],
        count: usize,
    ) -> Result<Vec<CharacterSummary>, ContentError> {
        self.random_except("characters/random-except", exclude_ids, count)
            .await
    }

    async fn batch_hints_for_movies(&self, url_ids: &[String]) -> Result<HintMap, ContentError> {
        self.batch_hints("movie-hints/batch", url_ids).await
    }

    async fn batch_hints_for_characters(
        &self,
        url_ids: &[String],
    ) -> Result<HintMap, ContentError> {
        self.batch_hints("character-hints/batch", url_ids).await
    }

    async fn health_check(&self) -> Result<(), ContentError> {
        let response = self
            .client
            .get(format!("{}/health", self.domain))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ContentError::ApiError(
                StatusCode::SERVICE_UNAVAILABLE,
                "Failed to reach content service".into(),
            ));
        }

        Ok(())
    }
}
