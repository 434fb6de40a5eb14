//! Background attachment of embeddings to newly created rows.
//!
//! Creation paths hand an [`EmbeddingJob`] to [`EmbeddingUpdater::spawn`] and
//! return right away. The job runs on its own tokio task, detached from the
//! request, and either stores a vector or logs why it could not. Failures are
//! never retried: the row simply stays without an embedding.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

use crate::client::{EmbedRequest, EmbeddingClient};
use crate::error::EmbeddingResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Lead,
    Property,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Lead => "lead",
            EntityKind::Property => "property",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the task needs: the row to update and the model request
/// rebuilt from the row's fields at creation time.
#[derive(Debug, Clone)]
pub struct EmbeddingJob {
    pub kind: EntityKind,
    pub id: Uuid,
    pub request: EmbedRequest,
}

impl EmbeddingJob {
    pub fn new(kind: EntityKind, id: Uuid, request: EmbedRequest) -> Self {
        Self { kind, id, request }
    }
}

/// Where generated vectors are written. Implemented per entity table.
///
/// A write replaces any previous vector for the row.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EmbeddingSink: Send + Sync {
    async fn store_embedding(&self, id: Uuid, embedding: Vec<f32>) -> EmbeddingResult<()>;
}

/// Spawns embedding jobs against a shared [`EmbeddingClient`].
#[derive(Clone)]
pub struct EmbeddingUpdater {
    client: Arc<dyn EmbeddingClient>,
}

impl EmbeddingUpdater {
    pub fn new(client: Arc<dyn EmbeddingClient>) -> Self {
        Self { client }
    }

    /// Runs `job` on a detached task.
    ///
    /// The handle is only for tests and shutdown hooks; dropping it does not
    /// cancel the task. The task never panics on job failure.
    pub fn spawn(&self, sink: Arc<dyn EmbeddingSink>, job: EmbeddingJob) -> JoinHandle<()> {
        let client = Arc::clone(&self.client);
        let span = info_span!("embedding_job", entity = job.kind.as_str(), entity_id = %job.id);

        tokio::spawn(
            async move {
                let (kind, id) = (job.kind, job.id);
                match run_job(client.as_ref(), sink.as_ref(), job).await {
                    Ok(dimensions) => {
                        info!(%kind, entity_id = %id, dimensions, "embedding generated and stored")
                    }
                    Err(e) => {
                        error!(%kind, entity_id = %id, error = %e, "failed to generate embedding")
                    }
                }
            }
            .instrument(span),
        )
    }
}

/// Embed, narrow to `f32`, store. Returns the stored dimension.
pub async fn run_job(
    client: &dyn EmbeddingClient,
    sink: &dyn EmbeddingSink,
    job: EmbeddingJob,
) -> EmbeddingResult<usize> {
    let response = client.prepare_and_embed(job.request).await?;
    let embedding = response.to_f32();
    let dimensions = embedding.len();

    sink.store_embedding(job.id, embedding).await?;

    Ok(dimensions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{EmbedResponse, MockEmbeddingClient};
    use crate::error::EmbeddingError;
    use mockall::predicate;

    fn job(id: Uuid) -> EmbeddingJob {
        EmbeddingJob::new(
            EntityKind::Lead,
            id,
            EmbedRequest::from_text("3 rooms downtown", "quiet street"),
        )
    }

    #[tokio::test]
    async fn test_stores_narrowed_vector() {
        let id = Uuid::now_v7();
        let mut client = MockEmbeddingClient::new();
        client
            .expect_prepare_and_embed()
            .withf(|req| req.title.as_deref() == Some("3 rooms downtown"))
            .times(1)
            .returning(|_| {
                Ok(EmbedResponse {
                    embedding: vec![0.5, 0.25, 0.125],
                    dimensions: 3,
                    prepared_text: "3 rooms downtown. quiet street".into(),
                })
            });

        let mut sink = MockEmbeddingSink::new();
        sink.expect_store_embedding()
            .with(predicate::eq(id), predicate::eq(vec![0.5_f32, 0.25, 0.125]))
            .times(1)
            .returning(|_, _| Ok(()));

        let dims = run_job(&client, &sink, job(id)).await.unwrap();
        assert_eq!(dims, 3);
    }

    #[tokio::test]
    async fn test_service_failure_skips_store() {
        let mut client = MockEmbeddingClient::new();
        client
            .expect_prepare_and_embed()
            .returning(|_| Err(EmbeddingError::Service("unexpected status 502".into())));

        let mut sink = MockEmbeddingSink::new();
        sink.expect_store_embedding().never();

        let err = run_job(&client, &sink, job(Uuid::now_v7())).await.unwrap_err();
        assert!(matches!(err, EmbeddingError::Service(_)));
    }

    #[tokio::test]
    async fn test_spawned_job_swallows_failures() {
        let mut client = MockEmbeddingClient::new();
        client.expect_prepare_and_embed().returning(|_| {
            Ok(EmbedResponse {
                embedding: vec![1.0],
                dimensions: 1,
                prepared_text: String::new(),
            })
        });

        let mut sink = MockEmbeddingSink::new();
        sink.expect_store_embedding()
            .times(1)
            .returning(|id, _| Err(EmbeddingError::Storage(format!("row {id} not found"))));

        let updater = EmbeddingUpdater::new(Arc::new(client));
        let handle = updater.spawn(Arc::new(sink), job(Uuid::now_v7()));

        assert!(handle.await.is_ok());
    }

    #[tokio::test]
    async fn test_concurrent_jobs_are_independent() {
        let mut client = MockEmbeddingClient::new();
        client.expect_prepare_and_embed().times(8).returning(|_| {
            Ok(EmbedResponse {
                embedding: vec![0.0; 4],
                dimensions: 4,
                prepared_text: String::new(),
            })
        });

        let mut sink = MockEmbeddingSink::new();
        sink.expect_store_embedding()
            .times(8)
            .withf(|_, v| v.len() == 4)
            .returning(|_, _| Ok(()));

        let updater = EmbeddingUpdater::new(Arc::new(client));
        let sink: Arc<dyn EmbeddingSink> = Arc::new(sink);
        let handles: Vec<_> = (0..8)
            .map(|_| updater.spawn(Arc::clone(&sink), job(Uuid::now_v7())))
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }
    }
}
