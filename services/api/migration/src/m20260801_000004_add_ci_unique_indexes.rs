use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Case-insensitive uniqueness is enforced with functional indexes on
/// `lower(...)`. Plain `unique_key` on the columns only covers exact-case
/// duplicates; these indexes make "Alpha" vs "alpha" collide at the storage
/// layer as well, so the service-level check-then-insert has no race window.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS uq_users_username_ci ON users (lower(username))",
        )
        .await?;
        db.execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS uq_users_email_ci ON users (lower(email))",
        )
        .await?;
        db.execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS uq_teams_name_ci ON teams (lower(name))",
        )
        .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared("DROP INDEX IF EXISTS uq_teams_name_ci")
            .await?;
        db.execute_unprepared("DROP INDEX IF EXISTS uq_users_email_ci")
            .await?;
        db.execute_unprepared("DROP INDEX IF EXISTS uq_users_username_ci")
            .await?;
        Ok(())
    }
}
