use std::{sync::Arc, time::Duration};

use reqwest::Client;

use crate::{
    api::content_client::ContentClient,
    config::app_config::AppConfig,
    models::error::ServerError,
    service::{
        content_source::ContentSource,
        session_store::{MemorySessionStore, SessionStore},
    },
};

#[derive(Clone)]
pub struct AppState {
    content: Arc<dyn ContentSource>,
    sessions: Arc<dyn SessionStore>,
}

impl AppState {
    pub fn new(content: Arc<dyn ContentSource>, sessions: Arc<dyn SessionStore>) -> Arc<Self> {
        Arc::new(Self { content, sessions })
    }

    /// Wires the HTTP content client and the in-memory session store. Must be
    /// called inside a tokio runtime, the store spawns its cleanup task.
    pub fn from_config(config: &AppConfig) -> Result<Arc<Self>, ServerError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.content.request_timeout_secs))
            .build()?;
        let content = ContentClient::new(&config.content.api_domain, client);

        let mut sessions = MemorySessionStore::from_retention(config.session.retention()?);
        sessions.spawn_cleanup(config.session.cleanup_interval()?);

        Ok(Self::new(Arc::new(content), Arc::new(sessions)))
    }

    pub fn get_content(&self) -> &Arc<dyn ContentSource> {
        &self.content
    }

    pub fn get_sessions(&self) -> &Arc<dyn SessionStore> {
        &self.sessions
    }
}
