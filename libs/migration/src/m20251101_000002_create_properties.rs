use sea_orm_migration::{prelude::*, schema::*};

use crate::EMBEDDING_DIMENSIONS;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Properties::Table)
                    .if_not_exists()
                    .col(pk_uuid(Properties::Id))
                    .col(string(Properties::Title))
                    .col(text(Properties::Description).default(""))
                    .col(string(Properties::Address))
                    .col(string(Properties::PropertyType))
                    .col(double_null(Properties::Area))
                    .col(big_integer_null(Properties::Price))
                    .col(integer_null(Properties::Rooms))
                    .col(string(Properties::Status).default("NEW"))
                    .col(uuid(Properties::OwnerUserId))
                    .col(uuid(Properties::CreatedUserId))
                    .col(
                        timestamp_with_time_zone(Properties::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Properties::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        let db = manager.get_connection();

        db.execute_unprepared(
            "ALTER TABLE properties ADD CONSTRAINT properties_property_type_check CHECK (property_type IN ('APARTMENT', 'HOUSE', 'COMMERCIAL', 'LAND'))",
        )
        .await?;

        db.execute_unprepared(
            "ALTER TABLE properties ADD CONSTRAINT properties_status_check CHECK (status IN ('NEW', 'PUBLISHED', 'SOLD', 'DELETED'))",
        )
        .await?;

        db.execute_unprepared(&format!(
            "ALTER TABLE properties ADD COLUMN embedding vector({EMBEDDING_DIMENSIONS})"
        ))
        .await?;

        db.execute_unprepared(
            "CREATE INDEX idx_properties_embedding ON properties USING hnsw (embedding vector_cosine_ops)",
        )
        .await?;

        for (name, column) in [
            ("idx_properties_status", Properties::Status),
            ("idx_properties_property_type", Properties::PropertyType),
            ("idx_properties_price", Properties::Price),
            ("idx_properties_owner_user_id", Properties::OwnerUserId),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Properties::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        db.execute_unprepared(
            r#"
            CREATE TRIGGER properties_touch_updated_at
                BEFORE UPDATE ON properties
                FOR EACH ROW
                EXECUTE FUNCTION util.touch_updated_at()
            "#,
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TRIGGER IF EXISTS properties_touch_updated_at ON properties")
            .await?;

        manager
            .drop_table(Table::drop().table(Properties::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Properties {
    Table,
    Id,
    Title,
    Description,
    Address,
    PropertyType,
    Area,
    Price,
    Rooms,
    Status,
    OwnerUserId,
    CreatedUserId,
    CreatedAt,
    UpdatedAt,
}
