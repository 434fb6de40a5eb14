use chrono::{DateTime, Utc};
use database::Pager;
use domain_embeddings::EmbedRequest;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Lifecycle of a lead on the exchange
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
pub enum LeadStatus {
    /// Visible to its creator only
    #[default]
    #[sea_orm(string_value = "NEW")]
    New,
    /// Listed for everyone
    #[sea_orm(string_value = "PUBLISHED")]
    Published,
    #[sea_orm(string_value = "PURCHASED")]
    Purchased,
    /// Removed by an administrator
    #[sea_orm(string_value = "DELETED")]
    Deleted,
}

/// A buyer request: what someone is looking for and how to reach them.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Lead {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Raw JSON document with search preferences, e.g. `{"roomNumber": 3}`
    pub requirement: String,
    pub contact_name: String,
    pub contact_phone: String,
    pub contact_email: Option<String>,
    pub status: LeadStatus,
    pub owner_user_id: Uuid,
    pub created_user_id: Uuid,
    /// Filled in asynchronously after creation
    #[serde(skip)]
    pub embedding: Option<Vec<f32>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DTO for creating a new lead
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateLead {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirement: String,
    #[validate(length(min = 1, max = 255))]
    pub contact_name: String,
    #[validate(length(min = 1, max = 32))]
    pub contact_phone: String,
    #[validate(email)]
    pub contact_email: Option<String>,
    /// Defaults to `created_user_id`
    pub owner_user_id: Option<Uuid>,
    pub created_user_id: Uuid,
}

/// Partial update. At least one field must be present.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateLead {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub description: Option<String>,
    pub requirement: Option<String>,
    pub status: Option<LeadStatus>,
    pub owner_user_id: Option<Uuid>,
}

impl UpdateLead {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.requirement.is_none()
            && self.status.is_none()
            && self.owner_user_id.is_none()
    }
}

/// Query filters for listing leads
#[derive(Debug, Clone, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeadFilter {
    pub status: Option<LeadStatus>,
    pub owner_user_id: Option<Uuid>,
    pub created_user_id: Option<Uuid>,
    /// 1-based page number
    pub page: Option<u64>,
    /// Defaults to 25, capped at 10000
    pub per_page: Option<u64>,
}

impl LeadFilter {
    pub fn pager(&self) -> Pager {
        Pager::new(self.page, self.per_page)
    }

    pub fn matches(&self, lead: &Lead) -> bool {
        self.status.is_none_or(|s| lead.status == s)
            && self.owner_user_id.is_none_or(|id| lead.owner_user_id == id)
            && self.created_user_id.is_none_or(|id| lead.created_user_id == id)
    }
}

/// Structured hints pulled out of a lead's requirement document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequirementHints {
    pub fields: Option<Map<String, Value>>,
    pub price: Option<i64>,
    pub district: Option<String>,
    pub rooms: Option<i32>,
    pub area: Option<f64>,
}

impl RequirementHints {
    /// Reads `price`, `district`, `roomNumber` and `area` from a JSON object.
    ///
    /// An empty document yields no hints. Anything that is not a JSON object
    /// is logged and also yields no hints; keys of the wrong type are ignored.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::default();
        }

        let fields = match serde_json::from_str::<Map<String, Value>>(raw) {
            Ok(fields) => fields,
            Err(e) => {
                tracing::warn!(error = %e, "failed to parse requirement JSON");
                return Self::default();
            }
        };

        Self {
            price: fields.get("price").and_then(Value::as_f64).map(|p| p as i64),
            district: fields
                .get("district")
                .and_then(Value::as_str)
                .map(str::to_string),
            rooms: fields
                .get("roomNumber")
                .and_then(Value::as_f64)
                .map(|r| r as i32),
            area: fields.get("area").and_then(Value::as_f64),
            fields: Some(fields),
        }
    }
}

impl Lead {
    pub fn new(input: CreateLead) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title: input.title,
            description: input.description,
            requirement: input.requirement,
            contact_name: input.contact_name,
            contact_phone: input.contact_phone,
            contact_email: input.contact_email.filter(|e| !e.is_empty()),
            status: LeadStatus::New,
            owner_user_id: input.owner_user_id.unwrap_or(input.created_user_id),
            created_user_id: input.created_user_id,
            embedding: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply_update(&mut self, update: UpdateLead) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(requirement) = update.requirement {
            self.requirement = requirement;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(owner) = update.owner_user_id {
            self.owner_user_id = owner;
        }
        self.updated_at = Utc::now();
    }

    /// Model request describing this lead.
    pub fn embed_request(&self) -> EmbedRequest {
        let hints = RequirementHints::parse(&self.requirement);
        EmbedRequest {
            requirement: hints.fields,
            price: hints.price,
            district: hints.district,
            rooms: hints.rooms,
            area: hints.area,
            ..EmbedRequest::from_text(&self.title, &self.description)
        }
    }

    /// True once the background job has stored a non-empty vector.
    pub fn has_embedding(&self) -> bool {
        self.embedding.as_ref().is_some_and(|v| !v.is_empty())
    }
}
