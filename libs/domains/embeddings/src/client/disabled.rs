use async_trait::async_trait;

use super::{EmbedRequest, EmbedResponse, EmbeddingClient, ModelInfo};
use crate::error::EmbeddingResult;

/// Stand-in used when `ML_ENABLE=false`.
///
/// Returns a zero vector of the configured size for every request without
/// touching the network. Zero vectors carry no meaning for ranking.
#[derive(Debug, Clone)]
pub struct DisabledEmbeddingClient {
    dimensions: usize,
}

impl DisabledEmbeddingClient {
    pub const MODEL_NAME: &'static str = "disabled";

    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }
}

#[async_trait]
impl EmbeddingClient for DisabledEmbeddingClient {
    async fn prepare_and_embed(&self, _request: EmbedRequest) -> EmbeddingResult<EmbedResponse> {
        Ok(EmbedResponse {
            embedding: vec![0.0; self.dimensions],
            dimensions: self.dimensions,
            prepared_text: String::new(),
        })
    }

    async fn model_info(&self) -> EmbeddingResult<ModelInfo> {
        Ok(ModelInfo {
            model: Self::MODEL_NAME.to_string(),
            dimensions: self.dimensions,
        })
    }
}
