use domain_embeddings::decode_vector;
use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;

use crate::models::{Property, PropertyStatus, PropertyType};

/// Sea-ORM Entity for the properties table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "properties")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub address: String,
    pub property_type: PropertyType,
    pub area: Option<f64>,
    pub price: Option<i64>,
    pub rooms: Option<i32>,
    pub status: PropertyStatus,
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

impl From<Model> for Property {
    fn from(model: Model) -> Self {
        let embedding = match model.embedding.as_deref() {
            None | Some("") => None,
            Some(text) => match decode_vector(text) {
                Ok(vector) => Some(vector),
                Err(e) => {
                    tracing::warn!(property_id = %model.id, error = %e, "failed to parse embedding");
                    None
                }
            },
        };

        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            address: model.address,
            property_type: model.property_type,
            area: model.area,
            price: model.price,
            rooms: model.rooms,
            status: model.status,
            owner_user_id: model.owner_user_id,
            created_user_id: model.created_user_id,
            embedding,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<Property> for ActiveModel {
    fn from(property: Property) -> Self {
        ActiveModel {
            id: Set(property.id),
            title: Set(property.title),
            description: Set(property.description),
            address: Set(property.address),
            property_type: Set(property.property_type),
            area: Set(property.area),
            price: Set(property.price),
            rooms: Set(property.rooms),
            status: Set(property.status),
            owner_user_id: Set(property.owner_user_id),
            created_user_id: Set(property.created_user_id),
            created_at: Set(property.created_at.into()),
            updated_at: Set(property.updated_at.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateProperty;
    use sea_orm::{DbBackend, QueryTrait};

    #[test]
    fn test_insert_leaves_embedding_out() {
        let property = Property::new(CreateProperty {
            title: "Cottage".to_string(),
            description: String::new(),
            address: "9 Hill Rd".to_string(),
            property_type: PropertyType::House,
            area: Some(80.0),
            price: Some(120),
            rooms: None,
            owner_user_id: None,
            created_user_id: Uuid::new_v4(),
        });

        let sql = Entity::insert(ActiveModel::from(property))
            .build(DbBackend::Postgres)
            .to_string();

        assert!(sql.starts_with(r#"INSERT INTO "properties""#), "{sql}");
        assert!(sql.contains("'HOUSE'"), "{sql}");
        assert!(!sql.contains("embedding"), "{sql}");
    }

    #[test]
    fn test_model_into_property() {
        let now = chrono::Utc::now().into();
        let property: Property = Model {
            id: Uuid::now_v7(),
            title: "Plot".to_string(),
            description: String::new(),
            address: "Field 3".to_string(),
            property_type: PropertyType::Land,
            area: None,
            price: Some(10),
            rooms: None,
            status: PropertyStatus::Sold,
            owner_user_id: Uuid::new_v4(),
            created_user_id: Uuid::new_v4(),
            embedding: Some("[1,0,0]".to_string()),
            created_at: now,
            updated_at: now,
        }
        .into();

        assert_eq!(property.property_type, PropertyType::Land);
        assert_eq!(property.status, PropertyStatus::Sold);
        assert_eq!(property.embedding, Some(vec![1.0, 0.0, 0.0]));
    }
}
