use axum::Router;
use domain_leads::PgLeadRepository;
use domain_properties::{PgPropertyRepository, PropertyService, handlers};
use std::sync::Arc;

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgPropertyRepository::new(state.db.clone());
    let leads = Arc::new(PgLeadRepository::new(state.db.clone()));
    handlers::router(PropertyService::new(
        repository,
        leads,
        state.updater.clone(),
    ))
}
