use domain_embeddings::{EmbeddingJob, EmbeddingUpdater, EntityKind};
use domain_leads::LeadRepository;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{PropertyError, PropertyResult};
use crate::matching;
use crate::models::{
    CreateProperty, MatchRequest, MatchedProperty, Property, PropertyFilter, UpdateProperty,
};
use crate::repository::{PropertyEmbeddingSink, PropertyRepository};

/// Service layer for properties and lead-to-property matching
pub struct PropertyService<R: PropertyRepository, L: LeadRepository> {
    repository: Arc<R>,
    leads: Arc<L>,
    updater: EmbeddingUpdater,
}

impl<R: PropertyRepository, L: LeadRepository> Clone for PropertyService<R, L> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            leads: Arc::clone(&self.leads),
            updater: self.updater.clone(),
        }
    }
}

impl<R: PropertyRepository + 'static, L: LeadRepository + 'static> PropertyService<R, L> {
    pub fn new(repository: R, leads: Arc<L>, updater: EmbeddingUpdater) -> Self {
        Self {
            repository: Arc::new(repository),
            leads,
            updater,
        }
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Persist a property and queue its embedding. See
    /// [`domain_leads::LeadService::create_lead`] for the timing contract.
    #[instrument(skip(self, input), fields(op = "property.create"))]
    pub async fn create_property(&self, input: CreateProperty) -> PropertyResult<Property> {
        input
            .validate()
            .map_err(|e| PropertyError::Validation(e.to_string()))?;

        let property = self.repository.create(input).await?;
        tracing::info!(property_id = %property.id, "property created");

        let sink = Arc::new(PropertyEmbeddingSink::new(Arc::clone(&self.repository)));
        let job = EmbeddingJob::new(EntityKind::Property, property.id, property.embed_request());
        self.updater.spawn(sink, job);

        Ok(property)
    }

    pub async fn get_property(&self, id: Uuid) -> PropertyResult<Property> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(PropertyError::NotFound(id))
    }

    /// Apply a partial update and return the stored result. Does not re-embed.
    #[instrument(skip(self, input), fields(op = "property.update", property_id = %id))]
    pub async fn update_property(
        &self,
        id: Uuid,
        input: UpdateProperty,
    ) -> PropertyResult<Property> {
        input
            .validate()
            .map_err(|e| PropertyError::Validation(e.to_string()))?;

        if input.is_empty() {
            return Err(PropertyError::Validation("no fields to update".to_string()));
        }

        self.repository.update(id, input).await?;
        self.get_property(id).await
    }

    pub async fn list_properties(&self, filter: PropertyFilter) -> PropertyResult<Vec<Property>> {
        self.repository.list(filter).await
    }

    /// Properties most similar to the lead's embedding.
    ///
    /// Fails with `LeadNotFound` for an unknown lead and `MissingEmbedding`
    /// when its vector has not been generated; no search runs in either case.
    #[instrument(skip(self, request), fields(op = "property.match", lead_id = %lead_id))]
    pub async fn match_properties(
        &self,
        lead_id: Uuid,
        request: MatchRequest,
    ) -> PropertyResult<Vec<MatchedProperty>> {
        let lead = self
            .leads
            .get_by_id(lead_id)
            .await?
            .ok_or(PropertyError::LeadNotFound(lead_id))?;

        let embedding = match lead.embedding {
            Some(embedding) if !embedding.is_empty() => embedding,
            _ => {
                tracing::warn!(%lead_id, "lead has no embedding");
                return Err(PropertyError::MissingEmbedding(lead_id));
            }
        };

        let limit = matching::effective_limit(request.limit);
        let matches = self
            .repository
            .match_properties(embedding, request.filter, limit)
            .await?;

        tracing::info!(%lead_id, limit, matches = matches.len(), "matched properties");
        Ok(matches)
    }
}
