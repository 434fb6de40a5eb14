//! Properties Domain
//!
//! Seller listings and the matching engine. A match takes a lead's embedding,
//! keeps embedded properties passing an attribute filter and returns them by
//! descending cosine similarity.
//!
//! ```text
//! POST /match/{lead_id}
//!   └─► PropertyService::match_properties
//!         ├─► LeadRepository::get_by_id      (404 / 422 without a vector)
//!         ├─► matching::effective_limit      (<=0 → 10, capped at 100)
//!         └─► PropertyRepository::match_properties
//!               ├─ Postgres: matching::match_query (`<=>` ORDER BY … LIMIT)
//!               └─ in-memory: matching::rank
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod matching;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{PropertyError, PropertyResult};
pub use matching::{DEFAULT_MATCH_LIMIT, MAX_MATCH_LIMIT, effective_limit};
pub use models::{
    CreateProperty, MatchFilter, MatchRequest, MatchedProperty, Property, PropertyFilter,
    PropertyStatus, PropertyType, UpdateProperty,
};
pub use postgres::PgPropertyRepository;
pub use repository::{InMemoryPropertyRepository, PropertyEmbeddingSink, PropertyRepository};
pub use service::PropertyService;
