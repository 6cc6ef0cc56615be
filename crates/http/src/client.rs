//! REST client for the tutorials collection.
//!
//! Every operation is a single request against one base endpoint and
//! resolves exactly once. No state is cached between calls and nothing is
//! retried.

use std::time::Duration;

use async_trait::async_trait;
use tutorials_kernel::settings::ApiSettings;
use tutorials_kernel::{Tutorial, TutorialId, TutorialPayload};

/// Backend-defined acknowledgement body for update and delete calls.
pub type Ack = serde_json::Value;

/// Errors from the tutorials REST layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, undecodable body).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend returned a non-2xx status code.
    #[error("tutorials API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The body does not describe persisted tutorials.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ClientError {
    /// Status code of a backend rejection, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Request(e) => e.status().map(|s| s.as_u16()),
            ClientError::InvalidResponse(_) => None,
        }
    }
}

/// Operations the view-models need from the tutorials backend.
#[async_trait]
pub trait TutorialApi: Send + Sync {
    /// `GET base`
    async fn get_all(&self) -> Result<Vec<Tutorial>, ClientError>;

    /// `GET base/{id}`
    async fn get(&self, id: &TutorialId) -> Result<Tutorial, ClientError>;

    /// `POST base` with `{title, description, published}`.
    async fn create(&self, payload: &TutorialPayload) -> Result<Tutorial, ClientError>;

    /// `PUT base/{id}` with the full record.
    async fn update(&self, id: &TutorialId, tutorial: &Tutorial) -> Result<Ack, ClientError>;

    /// `DELETE base/{id}`
    async fn delete(&self, id: &TutorialId) -> Result<Ack, ClientError>;

    /// `DELETE base`
    async fn delete_all(&self) -> Result<Ack, ClientError>;

    /// `GET base?title={title}`
    async fn find_by_title(&self, title: &str) -> Result<Vec<Tutorial>, ClientError>;
}

/// HTTP client bound to a single tutorials endpoint,
/// e.g. `http://localhost:8080/api/tutorials`.
#[derive(Debug, Clone)]
pub struct TutorialClient {
    client: reqwest::Client,
    base_url: String,
}

impl TutorialClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    /// Build a client from configuration. A timeout is only applied when one is configured.
    pub fn from_settings(settings: &ApiSettings) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout_ms) = settings.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(timeout_ms));
        }
        Ok(Self::with_client(builder.build()?, settings.endpoint.clone()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn item_url(&self, id: &TutorialId) -> String {
        format!("{}/{}", self.base_url, id)
    }

    // ---- private helpers ----

    /// Returns the response unchanged on a success status, or an
    /// [`ClientError::Api`] carrying the status and body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_record(response: reqwest::Response) -> Result<Tutorial, ClientError> {
        let response = Self::ensure_success(response).await?;
        let tutorial = response.json::<Tutorial>().await?;
        ensure_persisted(&tutorial)?;
        Ok(tutorial)
    }

    /// An empty success body (e.g. `204 No Content`) is an empty collection.
    async fn parse_records(response: reqwest::Response) -> Result<Vec<Tutorial>, ClientError> {
        let response = Self::ensure_success(response).await?;
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let tutorials: Vec<Tutorial> = serde_json::from_str(&text)
            .map_err(|e| ClientError::InvalidResponse(format!("undecodable tutorials: {e}")))?;
        for tutorial in &tutorials {
            ensure_persisted(tutorial)?;
        }
        Ok(tutorials)
    }

    /// Acks are backend-defined: empty bodies become `null` and non-JSON
    /// bodies are kept as a string.
    async fn parse_ack(response: reqwest::Response) -> Result<Ack, ClientError> {
        let response = Self::ensure_success(response).await?;
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Ack::Null);
        }
        Ok(serde_json::from_str(&text).unwrap_or(Ack::String(text)))
    }
}

fn ensure_persisted(tutorial: &Tutorial) -> Result<(), ClientError> {
    if tutorial.is_draft() {
        return Err(ClientError::InvalidResponse(format!(
            "tutorial '{}' has no id",
            tutorial.title
        )));
    }
    Ok(())
}

#[async_trait]
impl TutorialApi for TutorialClient {
    async fn get_all(&self) -> Result<Vec<Tutorial>, ClientError> {
        tracing::debug!(url = %self.base_url, "GET tutorials");
        let response = self.client.get(&self.base_url).send().await?;
        Self::parse_records(response).await
    }

    async fn get(&self, id: &TutorialId) -> Result<Tutorial, ClientError> {
        let url = self.item_url(id);
        tracing::debug!(%url, "GET tutorial");
        let response = self.client.get(url).send().await?;
        Self::parse_record(response).await
    }

    async fn create(&self, payload: &TutorialPayload) -> Result<Tutorial, ClientError> {
        tracing::debug!(url = %self.base_url, title = %payload.title, "POST tutorial");
        let response = self.client.post(&self.base_url).json(payload).send().await?;
        Self::parse_record(response).await
    }

    async fn update(&self, id: &TutorialId, tutorial: &Tutorial) -> Result<Ack, ClientError> {
        let url = self.item_url(id);
        tracing::debug!(%url, "PUT tutorial");
        let response = self.client.put(url).json(tutorial).send().await?;
        Self::parse_ack(response).await
    }

    async fn delete(&self, id: &TutorialId) -> Result<Ack, ClientError> {
        let url = self.item_url(id);
        tracing::debug!(%url, "DELETE tutorial");
        let response = self.client.delete(url).send().await?;
        Self::parse_ack(response).await
    }

    async fn delete_all(&self) -> Result<Ack, ClientError> {
        tracing::debug!(url = %self.base_url, "DELETE tutorials");
        let response = self.client.delete(&self.base_url).send().await?;
        Self::parse_ack(response).await
    }

    async fn find_by_title(&self, title: &str) -> Result<Vec<Tutorial>, ClientError> {
        tracing::debug!(url = %self.base_url, title, "GET tutorials by title");
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("title", title)])
            .send()
            .await?;
        Self::parse_records(response).await
    }
}
