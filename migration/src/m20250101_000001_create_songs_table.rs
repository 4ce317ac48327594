use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Songs::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Songs::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Songs::Title).string().not_null())
                    .col(ColumnDef::new(Songs::Artist).string().not_null())
                    .col(ColumnDef::new(Songs::Lyrics).text().not_null())
                    // Tokenized title/artist/lyrics as JSON, written once at ingestion
                    .col(ColumnDef::new(Songs::MaskedLyrics).text().not_null())
                    .col(ColumnDef::new(Songs::Metadata).text().not_null())
                    .col(
                        ColumnDef::new(Songs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Songs::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Songs {
    Table,
    Id,
    Title,
    Artist,
    Lyrics,
    MaskedLyrics,
    Metadata,
    CreatedAt,
}
