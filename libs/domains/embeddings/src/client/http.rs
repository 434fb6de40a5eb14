use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};

use super::{EmbedRequest, EmbedResponse, EmbeddingClient, ModelInfo};
use crate::config::EmbeddingConfig;
use crate::error::{EmbeddingError, EmbeddingResult};

/// Client for the `prepare-and-embed` model service.
///
/// - `POST {base_url}/prepare-and-embed` with an [`EmbedRequest`] body
/// - `GET {base_url}/model-info`
///
/// Anything but `200 OK` is an error carrying the status and body text.
#[derive(Debug, Clone)]
pub struct HttpEmbeddingClient {
    client: Client,
    base_url: String,
}

impl HttpEmbeddingClient {
    pub fn new(config: &EmbeddingConfig) -> EmbeddingResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| EmbeddingError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn ensure_ok(response: reqwest::Response) -> EmbeddingResult<reqwest::Response> {
        let status = response.status();
        if status == StatusCode::OK {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(EmbeddingError::Service(format!(
            "unexpected status {}: {}",
            status, body
        )))
    }
}

#[async_trait]
impl EmbeddingClient for HttpEmbeddingClient {
    #[instrument(skip(self, request), fields(base_url = %self.base_url))]
    async fn prepare_and_embed(&self, request: EmbedRequest) -> EmbeddingResult<EmbedResponse> {
        let response = self
            .client
            .post(self.url("prepare-and-embed"))
            .json(&request)
            .send()
            .await?;

        let body: EmbedResponse = Self::ensure_ok(response).await?.json().await?;

        debug!(
            dimensions = body.dimensions,
            prepared_text_len = body.prepared_text.len(),
            "embedding generated"
        );
        Ok(body)
    }

    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn model_info(&self) -> EmbeddingResult<ModelInfo> {
        let response = self.client.get(self.url("model-info")).send().await?;

        Ok(Self::ensure_ok(response).await?.json().await?)
    }
}
