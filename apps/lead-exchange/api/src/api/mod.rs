use axum::Router;

pub mod health;
pub mod leads;
pub mod properties;

/// API routes without the `/api` prefix; `create_router` adds it.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new()
        .nest("/leads", leads::router(state))
        .nest("/properties", properties::router(state))
        .nest(
            "/embeddings",
            domain_embeddings::handlers::router(state.embeddings.clone()),
        )
}

/// `/ready`, backed by a real database ping.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
