//! Embedding generation for leads and properties.
//!
//! ```text
//! create lead/property ──► EmbeddingUpdater::spawn ──► tokio task
//!                                                        │
//!                               EmbeddingClient::prepare_and_embed
//!                                                        │
//!                                 f64 → f32, codec::encode_vector
//!                                                        │
//!                                 EmbeddingSink::store_embedding
//! ```
//!
//! - [`codec`]: text form of a vector as stored in a pgvector column
//! - [`client`]: remote model service adapter, plus a disabled variant
//! - [`updater`]: fire-and-forget task attaching a vector to a new row
//! - [`similarity`]: cosine similarity for in-memory ranking

pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod handlers;
pub mod similarity;
pub mod updater;

pub use client::{
    DisabledEmbeddingClient, EmbedRequest, EmbedResponse, EmbeddingClient, HttpEmbeddingClient,
    ModelInfo, build_client,
};
pub use codec::{decode_vector, encode_vector};
pub use config::EmbeddingConfig;
pub use error::{EmbeddingError, EmbeddingResult, VectorParseError};
pub use similarity::cosine_similarity;
pub use updater::{EmbeddingJob, EmbeddingSink, EmbeddingUpdater, EntityKind};
