pub use sea_orm_migration::prelude::*;

mod m20251101_000000_bootstrap;
mod m20251101_000001_create_leads;
mod m20251101_000002_create_properties;

/// Size of the `embedding` columns. Must match the model service output.
pub const EMBEDDING_DIMENSIONS: usize = 384;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251101_000000_bootstrap::Migration),
            Box::new(m20251101_000001_create_leads::Migration),
            Box::new(m20251101_000002_create_properties::Migration),
        ]
    }
}
