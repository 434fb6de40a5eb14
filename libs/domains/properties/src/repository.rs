use async_trait::async_trait;
use domain_embeddings::{EmbeddingError, EmbeddingResult, EmbeddingSink};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{PropertyError, PropertyResult};
use crate::matching;
use crate::models::{
    CreateProperty, MatchFilter, MatchedProperty, Property, PropertyFilter, UpdateProperty,
};

/// Repository trait for Property persistence and similarity search
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PropertyRepository: Send + Sync {
    async fn create(&self, input: CreateProperty) -> PropertyResult<Property>;

    async fn get_by_id(&self, id: Uuid) -> PropertyResult<Option<Property>>;

    /// Apply a non-empty partial update; `NotFound` when no row matched
    async fn update(&self, id: Uuid, input: UpdateProperty) -> PropertyResult<()>;

    /// Filtered page, newest first
    async fn list(&self, filter: PropertyFilter) -> PropertyResult<Vec<Property>>;

    /// Overwrite the stored vector; `NotFound` when no row matched
    async fn update_embedding(&self, id: Uuid, embedding: Vec<f32>) -> PropertyResult<()>;

    /// Up to `limit` embedded properties passing `filter`, most similar first
    async fn match_properties(
        &self,
        embedding: Vec<f32>,
        filter: MatchFilter,
        limit: u64,
    ) -> PropertyResult<Vec<MatchedProperty>>;
}

/// In-memory implementation of PropertyRepository (for development/testing)
///
/// Rows are kept in insertion order, which is the tie-break order for
/// equally similar matches.
#[derive(Debug, Default, Clone)]
pub struct InMemoryPropertyRepository {
    properties: Arc<RwLock<Vec<Property>>>,
}

impl InMemoryPropertyRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PropertyRepository for InMemoryPropertyRepository {
    async fn create(&self, input: CreateProperty) -> PropertyResult<Property> {
        let property = Property::new(input);
        self.properties.write().await.push(property.clone());

        tracing::info!(property_id = %property.id, "Created property");
        Ok(property)
    }

    async fn get_by_id(&self, id: Uuid) -> PropertyResult<Option<Property>> {
        let properties = self.properties.read().await;
        Ok(properties.iter().find(|p| p.id == id).cloned())
    }

    async fn update(&self, id: Uuid, input: UpdateProperty) -> PropertyResult<()> {
        if input.is_empty() {
            return Err(PropertyError::Validation("no fields to update".to_string()));
        }

        let mut properties = self.properties.write().await;
        let property = properties
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(PropertyError::NotFound(id))?;
        property.apply_update(input);
        Ok(())
    }

    async fn list(&self, filter: PropertyFilter) -> PropertyResult<Vec<Property>> {
        let properties = self.properties.read().await;
        let pager = filter.pager();

        let mut result: Vec<Property> = properties
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();

        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(result
            .into_iter()
            .skip(pager.offset() as usize)
            .take(pager.limit() as usize)
            .collect())
    }

    async fn update_embedding(&self, id: Uuid, embedding: Vec<f32>) -> PropertyResult<()> {
        let mut properties = self.properties.write().await;
        let property = properties
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(PropertyError::NotFound(id))?;
        property.embedding = Some(embedding);
        property.updated_at = chrono::Utc::now();
        Ok(())
    }

    async fn match_properties(
        &self,
        embedding: Vec<f32>,
        filter: MatchFilter,
        limit: u64,
    ) -> PropertyResult<Vec<MatchedProperty>> {
        let properties = self.properties.read().await;
        matching::rank(&embedding, properties.iter(), &filter, limit)
    }
}

/// Lets the embedding updater write vectors through any [`PropertyRepository`].
pub struct PropertyEmbeddingSink<R: PropertyRepository> {
    repository: Arc<R>,
}

impl<R: PropertyRepository> PropertyEmbeddingSink<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<R: PropertyRepository> EmbeddingSink for PropertyEmbeddingSink<R> {
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
    use crate::models::{PropertyStatus, PropertyType};

    fn create_input(price: i64) -> CreateProperty {
        CreateProperty {
            title: format!("Listing at {price}"),
            description: String::new(),
            address: "3 High St".to_string(),
            property_type: PropertyType::House,
            area: Some(120.0),
            price: Some(price),
            rooms: Some(4),
            owner_user_id: None,
            created_user_id: Uuid::new_v4(),
        }
    }

    #[tokio::test]
    async fn test_update_and_refetch() {
        let repo = InMemoryPropertyRepository::new();
        let property = repo.create(create_input(100)).await.unwrap();

        repo.update(
            property.id,
            UpdateProperty {
                status: Some(PropertyStatus::Sold),
                price: Some(90),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let stored = repo.get_by_id(property.id).await.unwrap().unwrap();
        assert_eq!(stored.status, PropertyStatus::Sold);
        assert_eq!(stored.price, Some(90));
        assert_eq!(stored.rooms, Some(4));
    }

    #[tokio::test]
    async fn test_update_requires_fields() {
        let repo = InMemoryPropertyRepository::new();
        let property = repo.create(create_input(100)).await.unwrap();

        let err = repo
            .update(property.id, UpdateProperty::default())
            .await
            .unwrap_err();
        assert!(matches!(err, PropertyError::Validation(_)));
    }

    #[tokio::test]
    async fn test_match_only_sees_embedded_rows() {
        let repo = InMemoryPropertyRepository::new();
        let embedded = repo.create(create_input(100)).await.unwrap();
        repo.create(create_input(200)).await.unwrap();
        repo.update_embedding(embedded.id, vec![1.0, 0.0])
            .await
            .unwrap();

        let matches = repo
            .match_properties(vec![1.0, 0.0], MatchFilter::default(), 10)
            .await
            .unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].property.id, embedded.id);
    }

    #[tokio::test]
    async fn test_list_by_price_range() {
        let repo = InMemoryPropertyRepository::new();
        for price in [100, 200, 300] {
            repo.create(create_input(price)).await.unwrap();
        }

        let result = repo
            .list(PropertyFilter {
                min_price: Some(150),
                max_price: Some(250),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].price, Some(200));
    }

    #[tokio::test]
    async fn test_sink_writes_through_repository() {
        let repo = Arc::new(InMemoryPropertyRepository::new());
        let property = repo.create(create_input(100)).await.unwrap();
        let sink = PropertyEmbeddingSink::new(Arc::clone(&repo));

        sink.store_embedding(property.id, vec![0.25; 3])
            .await
            .unwrap();

        let stored = repo.get_by_id(property.id).await.unwrap().unwrap();
        assert_eq!(stored.embedding, Some(vec![0.25; 3]));
    }
}
