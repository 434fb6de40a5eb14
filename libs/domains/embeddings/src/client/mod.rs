mod disabled;
mod http;

pub use disabled::DisabledEmbeddingClient;
pub use http::HttpEmbeddingClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::config::EmbeddingConfig;
use crate::error::EmbeddingResult;

/// Descriptive fields the model service turns into text and then a vector.
///
/// Every field is optional and omitted from the JSON body when unset. No
/// validation happens here: an empty request is sent as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EmbedRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-form buyer requirements, forwarded as-is
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirement: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rooms: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl EmbedRequest {
    /// Request seeded with the free-text fields. Empty strings are left unset
    /// so they are omitted from the body.
    pub fn from_text(title: &str, description: &str) -> Self {
        Self {
            title: non_empty(title),
            description: non_empty(description),
            ..Self::default()
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.trim().is_empty()).then(|| value.to_string())
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EmbedResponse {
    pub embedding: Vec<f64>,
    pub dimensions: usize,
    /// Text the service actually embedded, useful when debugging matches
    #[serde(default)]
    pub prepared_text: String,
}

impl EmbedResponse {
    /// Narrows to the storage precision of a pgvector column.
    pub fn to_f32(&self) -> Vec<f32> {
        self.embedding.iter().map(|v| *v as f32).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ModelInfo {
    pub model: String,
    pub dimensions: usize,
}

/// Converts entity descriptions into vectors.
///
/// One call is one network round trip bounded by the configured timeout.
/// Nothing is retried here.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingClient: Send + Sync {
    async fn prepare_and_embed(&self, request: EmbedRequest) -> EmbeddingResult<EmbedResponse>;

    async fn model_info(&self) -> EmbeddingResult<ModelInfo>;
}

/// Picks the HTTP client or the disabled one according to `config.enabled`.
pub fn build_client(config: &EmbeddingConfig) -> EmbeddingResult<Arc<dyn EmbeddingClient>> {
    if config.enabled {
        Ok(Arc::new(HttpEmbeddingClient::new(config)?))
    } else {
        tracing::warn!(
            dimensions = config.dimensions,
            "embedding service disabled, new entities get zero vectors"
        );
        Ok(Arc::new(DisabledEmbeddingClient::new(config.dimensions)))
    }
}
