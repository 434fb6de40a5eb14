use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_helpers::{ErrorResponse, UuidPath, ValidatedJson};
use domain_leads::LeadRepository;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::PropertyResult;
use crate::models::{
    CreateProperty, MatchFilter, MatchRequest, MatchedProperty, Property, PropertyFilter,
    PropertyStatus, PropertyType, UpdateProperty,
};
use crate::repository::PropertyRepository;
use crate::service::PropertyService;

pub const TAG: &str = "properties";

/// OpenAPI documentation for Properties API
#[derive(OpenApi)]
#[openapi(
    paths(list_properties, create_property, get_property, update_property, match_properties),
    components(schemas(
        Property,
        PropertyType,
        PropertyStatus,
        CreateProperty,
        UpdateProperty,
        MatchFilter,
        MatchRequest,
        MatchedProperty,
        ErrorResponse
    )),
    tags((name = TAG, description = "Seller listings and lead matching"))
)]
pub struct ApiDoc;

pub fn router<R, L>(service: PropertyService<R, L>) -> Router
where
    R: PropertyRepository + 'static,
    L: LeadRepository + 'static,
{
    Router::new()
        .route("/", get(list_properties::<R, L>).post(create_property::<R, L>))
        .route("/{id}", get(get_property::<R, L>).patch(update_property::<R, L>))
        .route("/match/{lead_id}", post(match_properties::<R, L>))
        .with_state(Arc::new(service))
}

type ServiceState<R, L> = State<Arc<PropertyService<R, L>>>;

/// List properties with optional filters
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    params(PropertyFilter),
    responses(
        (status = 200, description = "Page of properties", body = Vec<Property>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn list_properties<R: PropertyRepository + 'static, L: LeadRepository + 'static>(
    State(service): ServiceState<R, L>,
    Query(filter): Query<PropertyFilter>,
) -> PropertyResult<Json<Vec<Property>>> {
    Ok(Json(service.list_properties(filter).await?))
}

/// Create a property. Its embedding is generated in the background.
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateProperty,
    responses(
        (status = 201, description = "Property created", body = Property),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
async fn create_property<R: PropertyRepository + 'static, L: LeadRepository + 'static>(
    State(service): ServiceState<R, L>,
    ValidatedJson(input): ValidatedJson<CreateProperty>,
) -> PropertyResult<impl IntoResponse> {
    let property = service.create_property(input).await?;
    Ok((StatusCode::CREATED, Json(property)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Property ID")),
    responses(
        (status = 200, description = "Property found", body = Property),
        (status = 400, description = "Malformed ID", body = ErrorResponse),
        (status = 404, description = "No such property", body = ErrorResponse)
    )
)]
async fn get_property<R: PropertyRepository + 'static, L: LeadRepository + 'static>(
    State(service): ServiceState<R, L>,
    UuidPath(id): UuidPath,
) -> PropertyResult<Json<Property>> {
    Ok(Json(service.get_property(id).await?))
}

/// Partially update a property
#[utoipa::path(
    patch,
    path = "/{id}",
    tag = TAG,
    params(("id" = Uuid, Path, description = "Property ID")),
    request_body = UpdateProperty,
    responses(
        (status = 200, description = "Updated property", body = Property),
        (status = 400, description = "Invalid input or no fields to update", body = ErrorResponse),
        (status = 404, description = "No such property", body = ErrorResponse)
    )
)]
async fn update_property<R: PropertyRepository + 'static, L: LeadRepository + 'static>(
    State(service): ServiceState<R, L>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProperty>,
) -> PropertyResult<Json<Property>> {
    Ok(Json(service.update_property(id, input).await?))
}

/// Rank properties by similarity to a lead
#[utoipa::path(
    post,
    path = "/match/{lead_id}",
    tag = TAG,
    params(("lead_id" = Uuid, Path, description = "Lead to match against")),
    request_body = MatchRequest,
    responses(
        (status = 200, description = "Matches, most similar first", body = Vec<MatchedProperty>),
        (status = 400, description = "Invalid filter", body = ErrorResponse),
        (status = 404, description = "No such lead", body = ErrorResponse),
        (status = 422, description = "Lead has no embedding yet", body = ErrorResponse)
    )
)]
async fn match_properties<R: PropertyRepository + 'static, L: LeadRepository + 'static>(
    State(service): ServiceState<R, L>,
    UuidPath(lead_id): UuidPath,
    ValidatedJson(request): ValidatedJson<MatchRequest>,
) -> PropertyResult<Json<Vec<MatchedProperty>>> {
    Ok(Json(service.match_properties(lead_id, request).await?))
}
