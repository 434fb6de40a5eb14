use async_trait::async_trait;
use chrono::Utc;
use database::BaseRepository;
use domain_embeddings::encode_vector;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{PropertyError, PropertyResult},
    matching::{self, MatchRow},
    models::{CreateProperty, MatchFilter, MatchedProperty, Property, PropertyFilter, UpdateProperty},
    repository::PropertyRepository,
};

/// PostgreSQL implementation of PropertyRepository; similarity search uses
/// pgvector's `<=>` cosine distance operator.
#[derive(Clone)]
pub struct PgPropertyRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgPropertyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

fn db_error(e: sea_orm::DbErr) -> PropertyError {
    PropertyError::Storage(format!("Database error: {}", e))
}

/// SET list for a partial update; `None` when no field is present.
fn update_model(input: UpdateProperty) -> Option<entity::ActiveModel> {
    if input.is_empty() {
        return None;
    }

    let mut model = entity::ActiveModel {
        updated_at: Set(Utc::now().into()),
        ..Default::default()
    };

    if let Some(title) = input.title {
        model.title = Set(title);
    }
    if let Some(description) = input.description {
        model.description = Set(description);
    }
    if let Some(address) = input.address {
        model.address = Set(address);
    }
    if let Some(property_type) = input.property_type {
        model.property_type = Set(property_type);
    }
    if input.area.is_some() {
        model.area = Set(input.area);
    }
    if input.price.is_some() {
        model.price = Set(input.price);
    }
    if input.rooms.is_some() {
        model.rooms = Set(input.rooms);
    }
    if let Some(status) = input.status {
        model.status = Set(status);
    }
    if let Some(owner) = input.owner_user_id {
        model.owner_user_id = Set(owner);
    }

    Some(model)
}

fn list_condition(filter: &PropertyFilter) -> Condition {
    matching::filter_condition(&filter.attributes())
        .add_option(filter.owner_user_id.map(|id| entity::Column::OwnerUserId.eq(id)))
        .add_option(filter.created_user_id.map(|id| entity::Column::CreatedUserId.eq(id)))
}

#[async_trait]
impl PropertyRepository for PgPropertyRepository {
    async fn create(&self, input: CreateProperty) -> PropertyResult<Property> {
        let property = Property::new(input);
        let id = property.id;

        self.base
            .insert(entity::ActiveModel::from(property))
            .await
            .map_err(db_error)?;

        tracing::info!(property_id = %id, "Created property");

        // Read back so timestamps carry the stored precision
        self.get_by_id(id)
            .await?
            .ok_or_else(|| PropertyError::Storage("Failed to create property".to_string()))
    }

    async fn get_by_id(&self, id: Uuid) -> PropertyResult<Option<Property>> {
        let model = self.base.find_by_id(id).await.map_err(db_error)?;
        Ok(model.map(Property::from))
    }

    async fn update(&self, id: Uuid, input: UpdateProperty) -> PropertyResult<()> {
        let model = update_model(input)
            .ok_or_else(|| PropertyError::Validation("no fields to update".to_string()))?;

        let rows = self
            .base
            .update_where(model, entity::Column::Id.eq(id))
            .await
            .map_err(db_error)?;

        if rows == 0 {
            return Err(PropertyError::NotFound(id));
        }

        tracing::info!(property_id = %id, "Updated property");
        Ok(())
    }

    async fn list(&self, filter: PropertyFilter) -> PropertyResult<Vec<Property>> {
        let pager = filter.pager();

        let models = entity::Entity::find()
            .filter(list_condition(&filter))
            .order_by_desc(entity::Column::CreatedAt)
            .limit(pager.limit())
            .offset(pager.offset())
            .all(self.base.db())
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Property::from).collect())
    }

    async fn update_embedding(&self, id: Uuid, embedding: Vec<f32>) -> PropertyResult<()> {
        let model = entity::ActiveModel {
            embedding: Set(Some(encode_vector(&embedding))),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };

        let rows = self
            .base
            .update_where(model, entity::Column::Id.eq(id))
            .await
            .map_err(db_error)?;

        if rows == 0 {
            return Err(PropertyError::NotFound(id));
        }

        tracing::debug!(property_id = %id, dimensions = embedding.len(), "Stored property embedding");
        Ok(())
    }

    async fn match_properties(
        &self,
        embedding: Vec<f32>,
        filter: MatchFilter,
        limit: u64,
    ) -> PropertyResult<Vec<MatchedProperty>> {
        let rows = matching::match_query(&embedding, &filter, limit)
            .into_model::<MatchRow>()
            .all(self.base.db())
            .await
            .map_err(db_error)?;

        Ok(rows.into_iter().map(MatchedProperty::from).collect())
    }
}
