use std::collections::HashMap;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    Order, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr,
};
use uuid::Uuid;

use matchday_api_schema::{fixtures, teams, users};
use matchday_domain::fixture::FixtureStatus;
use matchday_domain::pagination::{PageRequest, Sort};
use matchday_domain::user::Role;

use crate::domain::repository::{FixtureRepository, TeamRepository, UserRepository};
use crate::domain::types::{
    Fixture, FixtureFilter, FixtureSortBy, FixtureUpdate, FixtureWithTeams, Team, TeamFilter,
    TeamPatch, TeamSortBy, User,
};
use crate::error::ApiError;

fn sea_order(order: Sort) -> Order {
    match order {
        Sort::Asc => Order::Asc,
        Sort::Desc => Order::Desc,
    }
}

/// Case-insensitive substring pattern for ILIKE, with LIKE metacharacters
/// escaped so user input is matched literally.
fn contains_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_email_ci(&self, email: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(Expr::expr(Func::lower(Expr::col(users::Column::Email))).eq(email.to_lowercase()))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_username_ci(&self, username: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(users::Column::Username)))
                    .eq(username.to_lowercase()),
            )
            .one(&self.db)
            .await
            .context("find user by username")?;
        model.map(user_from_model).transpose()
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        users::ActiveModel {
            id: Set(user.id),
            username: Set(user.username.clone()),
            email: Set(user.email.clone()),
            password_hash: Set(user.password_hash.clone()),
            role: Set(user.role.as_str().to_owned()),
            created_at: Set(user.created_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| match e.sql_err() {
            // A racing registration lands on the unique index; report it the
            // same as the pre-insert check would have.
            Some(SqlErr::UniqueConstraintViolation(msg)) if msg.contains("email") => {
                ApiError::EmailTaken
            }
            Some(SqlErr::UniqueConstraintViolation(_)) => ApiError::UsernameTaken,
            _ => ApiError::Internal(anyhow::Error::new(e).context("create user")),
        })?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> Result<User, ApiError> {
    let role = Role::from_str(&model.role)
        .ok_or_else(|| ApiError::Internal(anyhow::anyhow!("unknown user role {:?}", model.role)))?;
    Ok(User {
        id: model.id,
        username: model.username,
        email: model.email,
        password_hash: model.password_hash,
        role,
        created_at: model.created_at,
    })
}

// ── Team repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTeamRepository {
    pub db: DatabaseConnection,
}

impl TeamRepository for DbTeamRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Team>, ApiError> {
        let model = teams::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find team by id")?;
        Ok(model.map(team_from_model))
    }

    async fn find_by_name_ci(&self, name: &str) -> Result<Option<Team>, ApiError> {
        let model = teams::Entity::find()
            .filter(Expr::expr(Func::lower(Expr::col(teams::Column::Name))).eq(name.to_lowercase()))
            .one(&self.db)
            .await
            .context("find team by name")?;
        Ok(model.map(team_from_model))
    }

    async fn find_by_name_contains(&self, term: &str) -> Result<Option<Team>, ApiError> {
        let model = teams::Entity::find()
            .filter(Expr::col(teams::Column::Name).ilike(contains_pattern(term)))
            .one(&self.db)
            .await
            .context("find team by name substring")?;
        Ok(model.map(team_from_model))
    }

    async fn create(&self, team: &Team) -> Result<(), ApiError> {
        teams::ActiveModel {
            id: Set(team.id),
            name: Set(team.name.clone()),
            country: Set(team.country.clone()),
            created_at: Set(team.created_at),
            updated_at: Set(team.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => ApiError::TeamExists,
            _ => ApiError::Internal(anyhow::Error::new(e).context("create team")),
        })?;
        Ok(())
    }

    async fn update(&self, id: Uuid, patch: &TeamPatch) -> Result<(), ApiError> {
        let mut am = teams::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(name) = &patch.name {
            am.name = Set(name.clone());
        }
        if let Some(country) = &patch.country {
            am.country = Set(country.clone());
        }
        am.updated_at = Set(Utc::now());
        am.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotFound(_) => ApiError::TeamNotFound,
            e if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                ApiError::TeamExists
            }
            e => ApiError::Internal(anyhow::Error::new(e).context("update team")),
        })?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        teams::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete team")?;
        Ok(())
    }

    async fn search(
        &self,
        filter: &TeamFilter,
        sort_by: TeamSortBy,
        order: Sort,
        page: PageRequest,
    ) -> Result<(Vec<Team>, u64), ApiError> {
        let mut query = teams::Entity::find();
        if let Some(name) = &filter.name {
            query = query.filter(Expr::col(teams::Column::Name).ilike(contains_pattern(name)));
        }
        if let Some(country) = &filter.country {
            query =
                query.filter(Expr::col(teams::Column::Country).ilike(contains_pattern(country)));
        }

        // Total is counted against the filter, not derived from the page.
        let total = query.clone().count(&self.db).await.context("count teams")?;

        let column = match sort_by {
            TeamSortBy::Name => teams::Column::Name,
            TeamSortBy::Country => teams::Column::Country,
            TeamSortBy::CreatedAt => teams::Column::CreatedAt,
        };
        let models = query
            .order_by(column, sea_order(order))
            .offset(page.offset())
            .limit(page.limit)
            .all(&self.db)
            .await
            .context("search teams")?;

        Ok((models.into_iter().map(team_from_model).collect(), total))
    }
}

fn team_from_model(model: teams::Model) -> Team {
    Team {
        id: model.id,
        name: model.name,
        country: model.country,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Fixture repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbFixtureRepository {
    pub db: DatabaseConnection,
}

impl FixtureRepository for DbFixtureRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Fixture>, ApiError> {
        let model = fixtures::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find fixture by id")?;
        model.map(fixture_from_model).transpose()
    }

    async fn find_with_teams(&self, id: Uuid) -> Result<Option<FixtureWithTeams>, ApiError> {
        let Some(fixture) = self.find_by_id(id).await? else {
            return Ok(None);
        };
        let teams_by_id = self
            .load_teams(&[fixture.home_team_id, fixture.away_team_id])
            .await?;
        Ok(Some(denormalize(fixture, &teams_by_id)?))
    }

    async fn find_by_opponents_and_date(
        &self,
        home_team_id: Uuid,
        away_team_id: Uuid,
        date: DateTime<Utc>,
    ) -> Result<Option<Fixture>, ApiError> {
        let model = fixtures::Entity::find()
            .filter(fixtures::Column::HomeTeamId.eq(home_team_id))
            .filter(fixtures::Column::AwayTeamId.eq(away_team_id))
            .filter(fixtures::Column::Date.eq(date))
            .one(&self.db)
            .await
            .context("find fixture by opponents and date")?;
        model.map(fixture_from_model).transpose()
    }

    async fn create(&self, fixture: &Fixture) -> Result<(), ApiError> {
        fixtures::ActiveModel {
            id: Set(fixture.id),
            home_team_id: Set(fixture.home_team_id),
            away_team_id: Set(fixture.away_team_id),
            date: Set(fixture.date),
            location: Set(fixture.location.clone()),
            status: Set(fixture.status.as_str().to_owned()),
            home_score: Set(fixture.home_score),
            away_score: Set(fixture.away_score),
            unique_link: Set(fixture.unique_link.clone()),
            created_at: Set(fixture.created_at),
            updated_at: Set(fixture.updated_at),
        }
        .insert(&self.db)
        .await
        .map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => ApiError::FixtureExists,
            _ => ApiError::Internal(anyhow::Error::new(e).context("create fixture")),
        })?;
        Ok(())
    }

    async fn update(&self, id: Uuid, update: &FixtureUpdate) -> Result<(), ApiError> {
        let mut am = fixtures::ActiveModel {
            id: Set(id),
            home_team_id: Set(update.home_team_id),
            away_team_id: Set(update.away_team_id),
            date: Set(update.date),
            location: Set(update.location.clone()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        };
        if let Some(status) = update.status {
            am.status = Set(status.as_str().to_owned());
        }
        if let Some(home_score) = update.home_score {
            am.home_score = Set(Some(home_score));
        }
        if let Some(away_score) = update.away_score {
            am.away_score = Set(Some(away_score));
        }
        am.update(&self.db).await.map_err(|e| match e {
            DbErr::RecordNotFound(_) => ApiError::FixtureNotFound,
            e if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                ApiError::FixtureExists
            }
            e => ApiError::Internal(anyhow::Error::new(e).context("update fixture")),
        })?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        fixtures::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete fixture")?;
        Ok(())
    }

    async fn search(
        &self,
        filter: &FixtureFilter,
        sort_by: FixtureSortBy,
        order: Sort,
        page: PageRequest,
    ) -> Result<(Vec<FixtureWithTeams>, u64), ApiError> {
        let mut query = fixtures::Entity::find();
        if let Some(home_team_id) = filter.home_team_id {
            query = query.filter(fixtures::Column::HomeTeamId.eq(home_team_id));
        }
        if let Some(away_team_id) = filter.away_team_id {
            query = query.filter(fixtures::Column::AwayTeamId.eq(away_team_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(fixtures::Column::Status.eq(status.as_str()));
        }
        if let Some(from) = filter.date_from {
            query = query.filter(fixtures::Column::Date.gte(from));
        }
        if let Some(to) = filter.date_to {
            query = query.filter(fixtures::Column::Date.lte(to));
        }

        let total = query
            .clone()
            .count(&self.db)
            .await
            .context("count fixtures")?;

        let column = match sort_by {
            FixtureSortBy::Date => fixtures::Column::Date,
            FixtureSortBy::Status => fixtures::Column::Status,
            FixtureSortBy::Location => fixtures::Column::Location,
            FixtureSortBy::CreatedAt => fixtures::Column::CreatedAt,
        };
        let models = query
            .order_by(column, sea_order(order))
            .offset(page.offset())
            .limit(page.limit)
            .all(&self.db)
            .await
            .context("search fixtures")?;

        let fixtures_page = models
            .into_iter()
            .map(fixture_from_model)
            .collect::<Result<Vec<_>, _>>()?;

        let team_ids: Vec<Uuid> = fixtures_page
            .iter()
            .flat_map(|f| [f.home_team_id, f.away_team_id])
            .collect();
        let teams_by_id = self.load_teams(&team_ids).await?;

        let items = fixtures_page
            .into_iter()
            .map(|f| denormalize(f, &teams_by_id))
            .collect::<Result<Vec<_>, _>>()?;
        Ok((items, total))
    }
}

impl DbFixtureRepository {
    async fn load_teams(&self, ids: &[Uuid]) -> Result<HashMap<Uuid, Team>, ApiError> {
        let mut ids = ids.to_vec();
        ids.sort_unstable();
        ids.dedup();
        let models = teams::Entity::find()
            .filter(teams::Column::Id.is_in(ids))
            .all(&self.db)
            .await
            .context("load fixture teams")?;
        Ok(models
            .into_iter()
            .map(|m| (m.id, team_from_model(m)))
            .collect())
    }
}

fn denormalize(
    fixture: Fixture,
    teams_by_id: &HashMap<Uuid, Team>,
) -> Result<FixtureWithTeams, ApiError> {
    let home_team = teams_by_id
        .get(&fixture.home_team_id)
        .cloned()
        .ok_or_else(|| {
            ApiError::Internal(anyhow::anyhow!(
                "fixture {} references missing home team",
                fixture.id
            ))
        })?;
    let away_team = teams_by_id
        .get(&fixture.away_team_id)
        .cloned()
        .ok_or_else(|| {
            ApiError::Internal(anyhow::anyhow!(
                "fixture {} references missing away team",
                fixture.id
            ))
        })?;
    Ok(FixtureWithTeams {
        fixture,
        home_team,
        away_team,
    })
}

fn fixture_from_model(model: fixtures::Model) -> Result<Fixture, ApiError> {
    let status = FixtureStatus::from_str(&model.status).ok_or_else(|| {
        ApiError::Internal(anyhow::anyhow!("unknown fixture status {:?}", model.status))
    })?;
    Ok(Fixture {
        id: model.id,
        home_team_id: model.home_team_id,
        away_team_id: model.away_team_id,
        date: model.date,
        location: model.location,
        status,
        home_score: model.home_score,
        away_score: model.away_score,
        unique_link: model.unique_link,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
