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
                    .table(Leads::Table)
                    .if_not_exists()
                    .col(pk_uuid(Leads::Id))
                    .col(string(Leads::Title))
                    .col(text(Leads::Description).default(""))
                    .col(text(Leads::Requirement).default(""))
                    .col(string(Leads::ContactName))
                    .col(string(Leads::ContactPhone))
                    .col(string_null(Leads::ContactEmail))
                    .col(string(Leads::Status).default("NEW"))
                    .col(uuid(Leads::OwnerUserId))
                    .col(uuid(Leads::CreatedUserId))
                    .col(
                        timestamp_with_time_zone(Leads::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Leads::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        let db = manager.get_connection();

        db.execute_unprepared(
            "ALTER TABLE leads ADD CONSTRAINT leads_status_check CHECK (status IN ('NEW', 'PUBLISHED', 'PURCHASED', 'DELETED'))",
        )
        .await?;

        db.execute_unprepared(&format!(
            "ALTER TABLE leads ADD COLUMN embedding vector({EMBEDDING_DIMENSIONS})"
        ))
        .await?;

        db.execute_unprepared(
            "CREATE INDEX idx_leads_embedding ON leads USING hnsw (embedding vector_cosine_ops)",
        )
        .await?;

        for (name, column) in [
            ("idx_leads_status", Leads::Status),
            ("idx_leads_owner_user_id", Leads::OwnerUserId),
            ("idx_leads_created_user_id", Leads::CreatedUserId),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Leads::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        db.execute_unprepared(
            r#"
            CREATE TRIGGER leads_touch_updated_at
                BEFORE UPDATE ON leads
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
            .execute_unprepared("DROP TRIGGER IF EXISTS leads_touch_updated_at ON leads")
            .await?;

        manager
            .drop_table(Table::drop().table(Leads::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Leads {
    Table,
    Id,
    Title,
    Description,
    Requirement,
    ContactName,
    ContactPhone,
    ContactEmail,
    Status,
    OwnerUserId,
    CreatedUserId,
    CreatedAt,
    UpdatedAt,
}
