use axum::Router;
use domain_leads::{LeadService, PgLeadRepository, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgLeadRepository::new(state.db.clone());
    handlers::router(LeadService::new(repository, state.updater.clone()))
}
