use domain_embeddings::{EmbeddingJob, EmbeddingUpdater, EntityKind};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{LeadError, LeadResult};
use crate::models::{CreateLead, Lead, LeadFilter, UpdateLead};
use crate::repository::{LeadEmbeddingSink, LeadRepository};

/// Service layer for Lead business logic
pub struct LeadService<R: LeadRepository> {
    repository: Arc<R>,
    updater: EmbeddingUpdater,
}

impl<R: LeadRepository> Clone for LeadService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            updater: self.updater.clone(),
        }
    }
}

impl<R: LeadRepository + 'static> LeadService<R> {
    pub fn new(repository: R, updater: EmbeddingUpdater) -> Self {
        Self::with_shared(Arc::new(repository), updater)
    }

    /// Service over a repository that other services also hold.
    pub fn with_shared(repository: Arc<R>, updater: EmbeddingUpdater) -> Self {
        Self {
            repository,
            updater,
        }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Persist a lead and queue its embedding.
    ///
    /// Returns as soon as the row exists; the vector is attached later by a
    /// detached task and may never appear if the model service fails.
    #[instrument(skip(self, input), fields(op = "lead.create"))]
    pub async fn create_lead(&self, input: CreateLead) -> LeadResult<Lead> {
        input
            .validate()
            .map_err(|e| LeadError::Validation(e.to_string()))?;

        let lead = self.repository.create(input).await?;
        tracing::info!(lead_id = %lead.id, "lead created");

        let sink = Arc::new(LeadEmbeddingSink::new(Arc::clone(&self.repository)));
        let job = EmbeddingJob::new(EntityKind::Lead, lead.id, lead.embed_request());
        self.updater.spawn(sink, job);

        Ok(lead)
    }

    pub async fn get_lead(&self, id: Uuid) -> LeadResult<Lead> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(LeadError::NotFound(id))
    }

    /// Apply a partial update and return the stored result. Does not re-embed.
    #[instrument(skip(self, input), fields(op = "lead.update", lead_id = %id))]
    pub async fn update_lead(&self, id: Uuid, input: UpdateLead) -> LeadResult<Lead> {
        input
            .validate()
            .map_err(|e| LeadError::Validation(e.to_string()))?;

        if input.is_empty() {
            return Err(LeadError::Validation("no fields to update".to_string()));
        }

        self.repository.update(id, input).await?;
        self.get_lead(id).await
    }

    pub async fn list_leads(&self, filter: LeadFilter) -> LeadResult<Vec<Lead>> {
        self.repository.list(filter).await
    }
}
