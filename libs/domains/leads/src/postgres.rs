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
    error::{LeadError, LeadResult},
    models::{CreateLead, Lead, LeadFilter, UpdateLead},
    repository::LeadRepository,
};

/// PostgreSQL implementation of LeadRepository
#[derive(Clone)]
pub struct PgLeadRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgLeadRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

fn db_error(e: sea_orm::DbErr) -> LeadError {
    LeadError::Storage(format!("Database error: {}", e))
}

/// SET list for a partial update; `None` when no field is present.
fn update_model(input: UpdateLead) -> Option<entity::ActiveModel> {
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
    if let Some(requirement) = input.requirement {
        model.requirement = Set(requirement);
    }
    if let Some(status) = input.status {
        model.status = Set(status);
    }
    if let Some(owner) = input.owner_user_id {
        model.owner_user_id = Set(owner);
    }

    Some(model)
}

fn embedding_model(embedding: &[f32]) -> entity::ActiveModel {
    entity::ActiveModel {
        embedding: Set(Some(encode_vector(embedding))),
        updated_at: Set(Utc::now().into()),
        ..Default::default()
    }
}

fn list_condition(filter: &LeadFilter) -> Condition {
    Condition::all()
        .add_option(filter.status.map(|s| entity::Column::Status.eq(s.to_string())))
        .add_option(filter.owner_user_id.map(|id| entity::Column::OwnerUserId.eq(id)))
        .add_option(filter.created_user_id.map(|id| entity::Column::CreatedUserId.eq(id)))
}

#[async_trait]
impl LeadRepository for PgLeadRepository {
    async fn create(&self, input: CreateLead) -> LeadResult<Lead> {
        let lead = Lead::new(input);
        let id = lead.id;

        self.base
            .insert(entity::ActiveModel::from(lead))
            .await
            .map_err(db_error)?;

        tracing::info!(lead_id = %id, "Created lead");

        // Read back so timestamps carry the stored precision
        self.get_by_id(id)
            .await?
            .ok_or_else(|| LeadError::Storage("Failed to create lead".to_string()))
    }

    async fn get_by_id(&self, id: Uuid) -> LeadResult<Option<Lead>> {
        let model = self.base.find_by_id(id).await.map_err(db_error)?;
        Ok(model.map(Lead::from))
    }

    async fn update(&self, id: Uuid, input: UpdateLead) -> LeadResult<()> {
        let model = update_model(input)
            .ok_or_else(|| LeadError::Validation("no fields to update".to_string()))?;

        let rows = self
            .base
            .update_where(model, entity::Column::Id.eq(id))
            .await
            .map_err(db_error)?;

        if rows == 0 {
            return Err(LeadError::NotFound(id));
        }

        tracing::info!(lead_id = %id, "Updated lead");
        Ok(())
    }

    async fn list(&self, filter: LeadFilter) -> LeadResult<Vec<Lead>> {
        let pager = filter.pager();

        let models = entity::Entity::find()
            .filter(list_condition(&filter))
            .order_by_desc(entity::Column::CreatedAt)
            .limit(pager.limit())
            .offset(pager.offset())
            .all(self.base.db())
            .await
            .map_err(db_error)?;

        Ok(models.into_iter().map(Lead::from).collect())
    }

    async fn update_embedding(&self, id: Uuid, embedding: Vec<f32>) -> LeadResult<()> {
        let model = embedding_model(&embedding);

        let rows = self
            .base
            .update_where(model, entity::Column::Id.eq(id))
            .await
            .map_err(db_error)?;

        if rows == 0 {
            return Err(LeadError::NotFound(id));
        }

        tracing::debug!(lead_id = %id, dimensions = embedding.len(), "Stored lead embedding");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LeadStatus;
    use sea_orm::{DbBackend, MockDatabase, MockExecResult, QueryTrait};

    #[test]
    fn test_update_sets_only_present_fields() {
        let model = update_model(UpdateLead {
            title: Some("Renamed".to_string()),
            status: Some(LeadStatus::Published),
            ..Default::default()
        })
        .unwrap();

        let sql = entity::Entity::update_many()
            .set(model)
            .filter(entity::Column::Id.eq(Uuid::nil()))
            .build(DbBackend::Postgres)
            .to_string();

        assert!(sql.starts_with(r#"UPDATE "leads" SET"#), "{sql}");
        assert!(sql.contains(r#""title" = 'Renamed'"#), "{sql}");
        assert!(sql.contains(r#""status" = 'PUBLISHED'"#), "{sql}");
        assert!(sql.contains(r#""updated_at" = "#), "{sql}");
        assert!(!sql.contains(r#""description""#), "{sql}");
        assert!(!sql.contains(r#""embedding""#), "{sql}");
    }

    #[test]
    fn test_empty_update_has_no_set_list() {
        assert!(update_model(UpdateLead::default()).is_none());
    }

    #[test]
    fn test_list_condition_joins_filters() {
        let owner = Uuid::nil();
        let sql = entity::Entity::find()
            .filter(list_condition(&LeadFilter {
                status: Some(LeadStatus::New),
                owner_user_id: Some(owner),
                ..Default::default()
            }))
            .build(DbBackend::Postgres)
            .to_string();

        assert!(
            sql.contains(r#""leads"."status" = 'NEW' AND "leads"."owner_user_id" = '00000000-0000-0000-0000-000000000000'"#),
            "{sql}"
        );
        assert!(!sql.contains("created_user_id\" ="), "{sql}");
    }

    #[tokio::test]
    async fn test_update_unknown_lead_is_not_found() {
        let db = MockDatabase::new(DbBackend::Postgres)
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            }])
            .into_connection();
        let repo = PgLeadRepository::new(db);

        let id = Uuid::new_v4();
        let err = repo
            .update(
                id,
                UpdateLead {
                    title: Some("x".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, LeadError::NotFound(missing) if missing == id));
    }

    #[tokio::test]
    async fn test_empty_update_is_rejected_before_the_database() {
        let db = MockDatabase::new(DbBackend::Postgres).into_connection();
        let repo = PgLeadRepository::new(db);

        let err = repo
            .update(Uuid::new_v4(), UpdateLead::default())
            .await
            .unwrap_err();
        assert!(matches!(err, LeadError::Validation(_)));
    }

    #[test]
    fn test_embedding_update_casts_to_vector() {
        let sql = entity::Entity::update_many()
            .set(embedding_model(&[0.5, 1.0]))
            .filter(entity::Column::Id.eq(Uuid::nil()))
            .build(DbBackend::Postgres)
            .to_string();

        assert!(sql.contains("'[0.5,1]' AS vector)"), "{sql}");
        assert!(!sql.contains(r#""title""#), "{sql}");
    }
}
