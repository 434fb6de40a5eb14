use domain_embeddings::decode_vector;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::{Lead, LeadStatus};

/// Sea-ORM Entity for the leads table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "leads")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text")]
    pub requirement: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub contact_email: Option<String>,
    pub status: LeadStatus,
    pub owner_user_id: Uuid,
    pub created_user_id: Uuid,
    /// pgvector column, read and written through its text form `[a,b,...]`
    #[sea_orm(column_type = "Text", select_as = "text", save_as = "vector")]
    pub embedding: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Lead {
    fn from(model: Model) -> Self {
        let embedding = match model.embedding.as_deref() {
            None | Some("") => None,
            Some(text) => match decode_vector(text) {
                Ok(vector) => Some(vector),
                Err(e) => {
                    tracing::warn!(lead_id = %model.id, error = %e, "failed to parse embedding");
                    None
                }
            },
        };

        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            requirement: model.requirement,
            contact_name: model.contact_name,
            contact_phone: model.contact_phone,
            contact_email: model.contact_email,
            status: model.status,
            owner_user_id: model.owner_user_id,
            created_user_id: model.created_user_id,
            embedding,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

// The embedding is left unset; it is written by the background job only.
impl From<Lead> for ActiveModel {
    fn from(lead: Lead) -> Self {
        ActiveModel {
            id: Set(lead.id),
            title: Set(lead.title),
            description: Set(lead.description),
            requirement: Set(lead.requirement),
            contact_name: Set(lead.contact_name),
            contact_phone: Set(lead.contact_phone),
            contact_email: Set(lead.contact_email),
            status: Set(lead.status),
            owner_user_id: Set(lead.owner_user_id),
            created_user_id: Set(lead.created_user_id),
            created_at: Set(lead.created_at.into()),
            updated_at: Set(lead.updated_at.into()),
            ..Default::default()
        }
    }
}
