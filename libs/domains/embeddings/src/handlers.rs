use axum::{Json, Router, extract::State, routing::get};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::client::{EmbeddingClient, ModelInfo};
use crate::error::EmbeddingResult;

#[derive(OpenApi)]
#[openapi(
    paths(model_info),
    components(schemas(ModelInfo)),
    tags((name = "embeddings", description = "Embedding model introspection"))
)]
pub struct ApiDoc;

pub fn router(client: Arc<dyn EmbeddingClient>) -> Router {
    Router::new()
        .route("/model-info", get(model_info))
        .with_state(client)
}

/// Model currently used to embed leads and properties
#[utoipa::path(
    get,
    path = "/model-info",
    tag = "embeddings",
    responses(
        (status = 200, description = "Model name and vector size", body = ModelInfo),
        (status = 503, description = "Model service unreachable", body = axum_helpers::ErrorResponse)
    )
)]
async fn model_info(
    State(client): State<Arc<dyn EmbeddingClient>>,
) -> EmbeddingResult<Json<ModelInfo>> {
    Ok(Json(client.model_info().await?))
}
