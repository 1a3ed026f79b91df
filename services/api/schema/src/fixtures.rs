use sea_orm::entity::prelude::*;

/// Scheduled or completed match between two teams.
///
/// `(home_team_id, away_team_id, date)` carries a composite unique index
/// (see migration), so two concurrent creates of the same pairing cannot
/// both land. `unique_link` is derived from the row id at creation.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "fixtures")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub date: chrono::DateTime<chrono::Utc>,
    pub location: String,
    pub status: String,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    #[sea_orm(unique)]
    pub unique_link: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::teams::Entity",
        from = "Column::HomeTeamId",
        to = "super::teams::Column::Id"
    )]
    HomeTeam,
    #[sea_orm(
        belongs_to = "super::teams::Entity",
        from = "Column::AwayTeamId",
        to = "super::teams::Column::Id"
    )]
    AwayTeam,
}

impl ActiveModelBehavior for ActiveModel {}
