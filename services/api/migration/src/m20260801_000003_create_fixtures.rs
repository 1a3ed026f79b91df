use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Fixtures::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Fixtures::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Fixtures::HomeTeamId).uuid().not_null())
                    .col(ColumnDef::new(Fixtures::AwayTeamId).uuid().not_null())
                    .col(
                        ColumnDef::new(Fixtures::Date)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Fixtures::Location).string().not_null())
                    .col(ColumnDef::new(Fixtures::Status).string().not_null())
                    .col(ColumnDef::new(Fixtures::HomeScore).integer())
                    .col(ColumnDef::new(Fixtures::AwayScore).integer())
                    .col(
                        ColumnDef::new(Fixtures::UniqueLink)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Fixtures::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Fixtures::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Fixtures::Table, Fixtures::HomeTeamId)
                            .to(Teams::Table, Teams::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Fixtures::Table, Fixtures::AwayTeamId)
                            .to(Teams::Table, Teams::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Closes the create/update duplicate-check race at the storage layer.
        manager
            .create_index(
                Index::create()
                    .table(Fixtures::Table)
                    .col(Fixtures::HomeTeamId)
                    .col(Fixtures::AwayTeamId)
                    .col(Fixtures::Date)
                    .unique()
                    .name("uq_fixtures_home_away_date")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Fixtures::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Fixtures {
    Table,
    Id,
    HomeTeamId,
    AwayTeamId,
    Date,
    Location,
    Status,
    HomeScore,
    AwayScore,
    UniqueLink,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Teams {
    Table,
    Id,
}
