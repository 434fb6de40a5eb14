use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{ErrorResponse, UuidPath, ValidatedJson};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::LeadResult;
use crate::models::{CreateLead, Lead, LeadFilter, LeadStatus, UpdateLead};
use crate::repository::LeadRepository;
use crate::service::LeadService;

pub const TAG: &str = "leads";

/// OpenAPI documentation for Leads API
#[derive(OpenApi)]
#[openapi(
    paths(list_leads, create_lead, get_lead, update_lead),
    components(schemas(Lead, LeadStatus, CreateLead, UpdateLead, ErrorResponse)),
    tags((name = TAG, description = "Buyer requests"))
)]
pub struct ApiDoc;

pub fn router<R: LeadRepository + 'static>(service: LeadService<R>) -> Router {
    Router::new()
        .route("/", get(list_leads::<R>).post(create_lead::<R>))
        .route("/{id}", get(get_lead::<R>).patch(update_lead::<R>))
        .with_state(Arc::new(service))
}

/// List leads with optional filters
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(LeadFilter),
    responses(
        (status = 200, description = "Page of leads", body = Vec<Lead>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn list_leads<R: LeadRepository + 'static>(
    State(service): State<Arc<LeadService<R>>>,
    Query(filter): Query<LeadFilter>,
) -> LeadResult<Json<Vec<Lead>>> {
    Ok(Json(service.list_leads(filter).await?))
}

/// Create a lead. Its embedding is generated in the background.
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateLead,
    responses(
        (status = 201, description = "Lead created", body = Lead),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn create_lead<R: LeadRepository + 'static>(
    State(service): State<Arc<LeadService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateLead>,
) -> LeadResult<impl IntoResponse> {
    let lead = service.create_lead(input).await?;
    Ok((StatusCode::CREATED, Json(lead)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Lead ID")),
    responses(
        (status = 200, description = "Lead found", body = Lead),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "No such lead", body = ErrorResponse)
    )
)]
async fn get_lead<R: LeadRepository + 'static>(
    State(service): State<Arc<LeadService<R>>>,
    UuidPath(id): UuidPath,
) -> LeadResult<Json<Lead>> {
    Ok(Json(service.get_lead(id).await?))
}

/// Partially update a lead
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Lead ID")),
    request_body = UpdateLead,
    responses(
        (status = 200, description = "Updated lead", body = Lead),
        (status = 400, description = "Invalid input or no fields to update", body = ErrorResponse),
        (status = 404, description = "No such lead", body = ErrorResponse)
    )
)]
async fn update_lead<R: LeadRepository + 'static>(
    State(service): State<Arc<LeadService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateLead>,
) -> LeadResult<Json<Lead>> {
    Ok(Json(service.update_lead(id, input).await?))
}
