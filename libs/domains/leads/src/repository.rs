use async_trait::async_trait;
use domain_embeddings::{EmbeddingError, EmbeddingResult, EmbeddingSink};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{LeadError, LeadResult};
use crate::models::{CreateLead, Lead, LeadFilter, UpdateLead};

/// Repository trait for Lead persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeadRepository: Send + Sync {
    /// Insert a new lead without an embedding
    async fn create(&self, input: CreateLead) -> LeadResult<Lead>;

    async fn get_by_id(&self, id: Uuid) -> LeadResult<Option<Lead>>;

    /// Apply a non-empty partial update; `NotFound` when no row matched
    async fn update(&self, id: Uuid, input: UpdateLead) -> LeadResult<()>;

    /// Filtered page, newest first
    async fn list(&self, filter: LeadFilter) -> LeadResult<Vec<Lead>>;

    /// Overwrite the stored vector; `NotFound` when no row matched
    async fn update_embedding(&self, id: Uuid, embedding: Vec<f32>) -> LeadResult<()>;
}

/// In-memory implementation of LeadRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryLeadRepository {
    leads: Arc<RwLock<HashMap<Uuid, Lead>>>,
}

impl InMemoryLeadRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LeadRepository for InMemoryLeadRepository {
    async fn create(&self, input: CreateLead) -> LeadResult<Lead> {
        let lead = Lead::new(input);
        self.leads.write().await.insert(lead.id, lead.clone());

        tracing::info!(lead_id = %lead.id, "Created lead");
        Ok(lead)
    }

    async fn get_by_id(&self, id: Uuid) -> LeadResult<Option<Lead>> {
        Ok(self.leads.read().await.get(&id).cloned())
    }

    async fn update(&self, id: Uuid, input: UpdateLead) -> LeadResult<()> {
        if input.is_empty() {
            return Err(LeadError::Validation("no fields to update".to_string()));
        }

        let mut leads = self.leads.write().await;
        let lead = leads.get_mut(&id).ok_or(LeadError::NotFound(id))?;
        lead.apply_update(input);
        Ok(())
    }

    async fn list(&self, filter: LeadFilter) -> LeadResult<Vec<Lead>> {
        let leads = self.leads.read().await;
        let pager = filter.pager();

        let mut result: Vec<Lead> = leads
            .values()
            .filter(|l| filter.matches(l))
            .cloned()
            .collect();

        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(result
            .into_iter()
            .skip(pager.offset() as usize)
            .take(pager.limit() as usize)
            .collect())
    }

    async fn update_embedding(&self, id: Uuid, embedding: Vec<f32>) -> LeadResult<()> {
        let mut leads = self.leads.write().await;
        let lead = leads.get_mut(&id).ok_or(LeadError::NotFound(id))?;
        lead.embedding = Some(embedding);
        lead.updated_at = chrono::Utc::now();
        Ok(())
    }
}

/// Lets the embedding updater write vectors through any [`LeadRepository`].
pub struct LeadEmbeddingSink<R: LeadRepository> {
    repository: Arc<R>,
}

impl<R: LeadRepository> LeadEmbeddingSink<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: LeadRepository> EmbeddingSink for LeadEmbeddingSink<R> {
    async fn store_embedding(&self, id: Uuid, embedding: Vec<f32>) -> EmbeddingResult<()> {
        self.repository
            .update_embedding(id, embedding)
            .await
            .map_err(|e| EmbeddingError::Storage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LeadStatus;

    fn create_input(title: &str, creator: Uuid) -> CreateLead {
        CreateLead {
            title: title.to_string(),
            description: String::new(),
            requirement: String::new(),
            contact_name: "Sam".to_string(),
            contact_phone: "+10000000001".to_string(),
            contact_email: Some("sam@example.com".to_string()),
            owner_user_id: None,
            created_user_id: creator,
        }
    }

    #[tokio::test]
    async fn test_update_requires_fields() {
        let repo = InMemoryLeadRepository::new();
        let lead = repo.create(create_input("A", Uuid::new_v4())).await.unwrap();

        let err = repo.update(lead.id, UpdateLead::default()).await.unwrap_err();
        assert!(matches!(err, LeadError::Validation(msg) if msg == "no fields to update"));
    }

    #[tokio::test]
    async fn test_update_missing_lead() {
        let repo = InMemoryLeadRepository::new();
        let id = Uuid::new_v4();
        let input = UpdateLead {
            status: Some(LeadStatus::Published),
            ..Default::default()
        };

        let err = repo.update(id, input).await.unwrap_err();
        assert!(matches!(err, LeadError::NotFound(found) if found == id));
    }

    #[tokio::test]
    async fn test_update_embedding_overwrites() {
        let repo = InMemoryLeadRepository::new();
        let lead = repo.create(create_input("A", Uuid::new_v4())).await.unwrap();

        repo.update_embedding(lead.id, vec![1.0, 0.0]).await.unwrap();
        repo.update_embedding(lead.id, vec![0.0, 1.0]).await.unwrap();

        let stored = repo.get_by_id(lead.id).await.unwrap().unwrap();
        assert_eq!(stored.embedding, Some(vec![0.0, 1.0]));
    }

    #[tokio::test]
    async fn test_update_embedding_missing_lead() {
        let repo = InMemoryLeadRepository::new();
        let err = repo
            .update_embedding(Uuid::new_v4(), vec![0.5])
            .await
            .unwrap_err();
        assert!(matches!(err, LeadError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_filters_and_pages() {
        let repo = InMemoryLeadRepository::new();
        let creator = Uuid::new_v4();
        for i in 0..3 {
            repo.create(create_input(&format!("mine {i}"), creator))
                .await
                .unwrap();
        }
        repo.create(create_input("other", Uuid::new_v4())).await.unwrap();

        let mine = repo
            .list(LeadFilter {
                created_user_id: Some(creator),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(mine.len(), 3);

        let second_page = repo
            .list(LeadFilter {
                created_user_id: Some(creator),
                page: Some(2),
                per_page: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(second_page.len(), 1);
    }

    #[tokio::test]
    async fn test_sink_maps_missing_row_to_storage_error() {
        let sink = LeadEmbeddingSink::new(Arc::new(InMemoryLeadRepository::new()));
        let err = sink
            .store_embedding(Uuid::new_v4(), vec![0.1])
            .await
            .unwrap_err();
        assert!(matches!(err, EmbeddingError::Storage(_)));
    }
}
