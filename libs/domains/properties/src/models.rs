use chrono::{DateTime, Utc};
use database::Pager;
use domain_embeddings::EmbedRequest;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyType {
    #[sea_orm(string_value = "APARTMENT")]
    Apartment,
    #[sea_orm(string_value = "HOUSE")]
    House,
    #[sea_orm(string_value = "COMMERCIAL")]
    Commercial,
    #[sea_orm(string_value = "LAND")]
    Land,
}

/// Lifecycle of a listing
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyStatus {
    /// Visible to its creator only
    #[default]
    #[sea_orm(string_value = "NEW")]
    New,
    #[sea_orm(string_value = "PUBLISHED")]
    Published,
    #[sea_orm(string_value = "SOLD")]
    Sold,
    /// Removed by an administrator
    #[sea_orm(string_value = "DELETED")]
    Deleted,
}

/// A seller listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Property {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub address: String,
    pub property_type: PropertyType,
    /// Square metres
    pub area: Option<f64>,
    pub price: Option<i64>,
    pub rooms: Option<i32>,
    pub status: PropertyStatus,
    pub owner_user_id: Uuid,
    pub created_user_id: Uuid,
    #[serde(skip)]
    pub embedding: Option<Vec<f32>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProperty {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(length(min = 1, max = 512))]
    pub address: String,
    pub property_type: PropertyType,
    #[validate(range(min = 0.0))]
    pub area: Option<f64>,
    #[validate(range(min = 0))]
    pub price: Option<i64>,
    #[validate(range(min = 0))]
    pub rooms: Option<i32>,
    /// Defaults to `created_user_id`
    pub owner_user_id: Option<Uuid>,
    pub created_user_id: Uuid,
}

/// Partial update. At least one field must be present.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProperty {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(length(min = 1, max = 512))]
    pub address: Option<String>,
    pub property_type: Option<PropertyType>,
    #[validate(range(min = 0.0))]
    pub area: Option<f64>,
    #[validate(range(min = 0))]
    pub price: Option<i64>,
    #[validate(range(min = 0))]
    pub rooms: Option<i32>,
    pub status: Option<PropertyStatus>,
    pub owner_user_id: Option<Uuid>,
}

impl UpdateProperty {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.address.is_none()
            && self.property_type.is_none()
            && self.area.is_none()
            && self.price.is_none()
            && self.rooms.is_none()
            && self.status.is_none()
            && self.owner_user_id.is_none()
    }
}

/// Attribute constraints shared by listing and matching.
///
/// Every field is optional; set fields are combined with AND and bounds are
/// inclusive. A bound on price or rooms excludes rows where that value is
/// unknown.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Validate, ToSchema)]
pub struct MatchFilter {
    pub status: Option<PropertyStatus>,
    pub property_type: Option<PropertyType>,
    #[validate(range(min = 0))]
    pub min_price: Option<i64>,
    #[validate(range(min = 0))]
    pub max_price: Option<i64>,
    #[validate(range(min = 0))]
    pub min_rooms: Option<i32>,
    #[validate(range(min = 0))]
    pub max_rooms: Option<i32>,
}

impl MatchFilter {
    pub fn matches(&self, property: &Property) -> bool {
        let at_least = |bound: Option<i64>, value: Option<i64>| match bound {
            None => true,
            Some(b) => value.is_some_and(|v| v >= b),
        };
        let at_most = |bound: Option<i64>, value: Option<i64>| match bound {
            None => true,
            Some(b) => value.is_some_and(|v| v <= b),
        };
        let rooms = property.rooms.map(i64::from);

        self.status.is_none_or(|s| property.status == s)
            && self.property_type.is_none_or(|t| property.property_type == t)
            && at_least(self.min_price, property.price)
            && at_most(self.max_price, property.price)
            && at_least(self.min_rooms.map(i64::from), rooms)
            && at_most(self.max_rooms.map(i64::from), rooms)
    }
}

/// Query filters for listing properties
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PropertyFilter {
    pub status: Option<PropertyStatus>,
    pub property_type: Option<PropertyType>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub min_rooms: Option<i32>,
    pub max_rooms: Option<i32>,
    pub owner_user_id: Option<Uuid>,
    pub created_user_id: Option<Uuid>,
    /// 1-based page number
    pub page: Option<u64>,
    /// Defaults to 25, capped at 10000
    pub per_page: Option<u64>,
}

impl PropertyFilter {
    pub fn pager(&self) -> Pager {
        Pager::new(self.page, self.per_page)
    }

    /// The attribute part of this filter.
    pub fn attributes(&self) -> MatchFilter {
        MatchFilter {
            status: self.status,
            property_type: self.property_type,
            min_price: self.min_price,
            max_price: self.max_price,
            min_rooms: self.min_rooms,
            max_rooms: self.max_rooms,
        }
    }

    pub fn matches(&self, property: &Property) -> bool {
        self.attributes().matches(property)
            && self.owner_user_id.is_none_or(|id| property.owner_user_id == id)
            && self.created_user_id.is_none_or(|id| property.created_user_id == id)
    }
}

/// Body of a match request
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct MatchRequest {
    #[serde(default)]
    #[validate(nested)]
    pub filter: MatchFilter,
    /// Values of zero or less fall back to 10; larger values are capped at 100
    pub limit: Option<i64>,
}

/// A candidate property with its cosine similarity to the lead.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MatchedProperty {
    pub property: Property,
    /// `1 - cosine distance`; 1.0 is identical direction
    pub similarity: f64,
}

impl Property {
    pub fn new(input: CreateProperty) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title: input.title,
            description: input.description,
            address: input.address,
            property_type: input.property_type,
            area: input.area,
            price: input.price,
            rooms: input.rooms,
            status: PropertyStatus::New,
            owner_user_id: input.owner_user_id.unwrap_or(input.created_user_id),
            created_user_id: input.created_user_id,
            embedding: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: UpdateProperty) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(address) = update.address {
            self.address = address;
        }
        if let Some(property_type) = update.property_type {
            self.property_type = property_type;
        }
        if update.area.is_some() {
            self.area = update.area;
        }
        if update.price.is_some() {
            self.price = update.price;
        }
        if update.rooms.is_some() {
            self.rooms = update.rooms;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(owner) = update.owner_user_id {
            self.owner_user_id = owner;
        }
        self.updated_at = Utc::now();
    }

    /// Model request describing this listing.
    pub fn embed_request(&self) -> EmbedRequest {
        EmbedRequest {
            price: self.price,
            rooms: self.rooms,
            area: self.area,
            address: (!self.address.trim().is_empty()).then(|| self.address.clone()),
            ..EmbedRequest::from_text(&self.title, &self.description)
        }
    }
}
