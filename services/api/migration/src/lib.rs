use sea_orm_migration::prelude::*;

mod m20260801_000001_create_users;
mod m20260801_000002_create_teams;
mod m20260801_000003_create_fixtures;
mod m20260801_000004_add_ci_unique_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260801_000001_create_users::Migration),
            Box::new(m20260801_000002_create_teams::Migration),
            Box::new(m20260801_000003_create_fixtures::Migration),
            Box::new(m20260801_000004_add_ci_unique_indexes::Migration),
        ]
    }
}
