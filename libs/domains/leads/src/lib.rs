//! Leads Domain
//!
//! Buyer requests on the exchange. Creating a lead stores the row and hands
//! an embedding job to [`domain_embeddings::EmbeddingUpdater`]; the vector is
//! later used to match the lead against properties.
//!
//! ```text
//! handlers ─► LeadService ─► LeadRepository (in-memory | Postgres)
//!                  │
//!                  └─► EmbeddingUpdater::spawn ─► LeadEmbeddingSink
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_embeddings::{DisabledEmbeddingClient, EmbeddingUpdater};
//! use domain_leads::{InMemoryLeadRepository, LeadService, handlers};
//! use std::sync::Arc;
//!
//! let updater = EmbeddingUpdater::new(Arc::new(DisabledEmbeddingClient::new(384)));
//! let service = LeadService::new(InMemoryLeadRepository::new(), updater);
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{LeadError, LeadResult};
pub use models::{CreateLead, Lead, LeadFilter, LeadStatus, RequirementHints, UpdateLead};
pub use postgres::PgLeadRepository;
pub use repository::{InMemoryLeadRepository, LeadEmbeddingSink, LeadRepository};
pub use service::LeadService;
