use chrono::{DateTime, Utc};
use uuid::Uuid;

use matchday_domain::fixture::FixtureStatus;
use matchday_domain::pagination::{PageInfo, PageRequest, Paginated, Sort};

use crate::domain::repository::{FixtureRepository, TeamRepository};
use crate::domain::types::{
    Fixture, FixtureFilter, FixtureSortBy, FixtureUpdate, FixtureWithTeams, Team,
};
use crate::error::ApiError;

// ── CreateFixture ────────────────────────────────────────────────────────────

/// Fixture write payload. Opponents are referenced by team name and resolved
/// to identities before any uniqueness check runs.
pub struct FixtureInput {
    pub home_team: String,
    pub away_team: String,
    pub date: DateTime<Utc>,
    pub location: String,
    pub status: Option<FixtureStatus>,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
}

pub struct CreateFixtureUseCase<F: FixtureRepository, T: TeamRepository> {
    pub fixtures: F,
    pub teams: T,
}

impl<F: FixtureRepository, T: TeamRepository> CreateFixtureUseCase<F, T> {
    pub async fn execute(&self, input: FixtureInput) -> Result<FixtureWithTeams, ApiError> {
        let (home_team, away_team) =
            resolve_opponents(&self.teams, &input.home_team, &input.away_team).await?;

        if self
            .fixtures
            .find_by_opponents_and_date(home_team.id, away_team.id, input.date)
            .await?
            .is_some()
        {
            return Err(ApiError::FixtureExists);
        }

        let id = Uuid::now_v7();
        let now = Utc::now();
        let fixture = Fixture {
            id,
            home_team_id: home_team.id,
            away_team_id: away_team.id,
            date: input.date,
            location: input.location,
            status: input.status.unwrap_or_default(),
            home_score: input.home_score,
            away_score: input.away_score,
            // The link embeds the fixture's own id, so it is derived only
            // after the id is allocated.
            unique_link: Fixture::link_for(id),
            created_at: now,
            updated_at: now,
        };
        self.fixtures.create(&fixture).await?;

        Ok(FixtureWithTeams {
            fixture,
            home_team,
            away_team,
        })
    }
}

/// Resolve both opponents by name, naming the missing side on failure. Home
/// resolves first, so a fixture missing both teams reports the home side.
async fn resolve_opponents<T: TeamRepository>(
    teams: &T,
    home_name: &str,
    away_name: &str,
) -> Result<(Team, Team), ApiError> {
    let home_team = teams
        .find_by_name_ci(home_name)
        .await?
        .ok_or(ApiError::HomeTeamNotFound)?;
    let away_team = teams
        .find_by_name_ci(away_name)
        .await?
        .ok_or(ApiError::AwayTeamNotFound)?;
    Ok((home_team, away_team))
}

// ── GetFixture ───────────────────────────────────────────────────────────────

pub struct GetFixtureUseCase<F: FixtureRepository> {
    pub fixtures: F,
}

impl<F: FixtureRepository> GetFixtureUseCase<F> {
    pub async fn execute(&self, id: Uuid) -> Result<FixtureWithTeams, ApiError> {
        self.fixtures
            .find_with_teams(id)
            .await?
            .ok_or(ApiError::FixtureNotFound)
    }
}

// ── UpdateFixture ────────────────────────────────────────────────────────────

pub struct UpdateFixtureUseCase<F: FixtureRepository, T: TeamRepository> {
    pub fixtures: F,
    pub teams: T,
}

impl<F: FixtureRepository, T: TeamRepository> UpdateFixtureUseCase<F, T> {
    pub async fn execute(
        &self,
        id: Uuid,
        input: FixtureInput,
    ) -> Result<FixtureWithTeams, ApiError> {
        let existing = self
            .fixtures
            .find_by_id(id)
            .await?
            .ok_or(ApiError::FixtureNotFound)?;

        let (home_team, away_team) =
            resolve_opponents(&self.teams, &input.home_team, &input.away_team).await?;

        // Duplicate recheck only when the resolved pairing changes; a
        // same-opponents update (date shift, score entry) skips it and lets
        // the unique index hold the line.
        let opponents_changed =
            home_team.id != existing.home_team_id || away_team.id != existing.away_team_id;
        if opponents_changed {
            let other = self
                .fixtures
                .find_by_opponents_and_date(home_team.id, away_team.id, input.date)
                .await?;
            if other.is_some_and(|f| f.id != id) {
                return Err(ApiError::FixtureExists);
            }
        }

        self.fixtures
            .update(
                id,
                &FixtureUpdate {
                    home_team_id: home_team.id,
                    away_team_id: away_team.id,
                    date: input.date,
                    location: input.location,
                    status: input.status,
                    home_score: input.home_score,
                    away_score: input.away_score,
                },
            )
            .await?;

        self.fixtures
            .find_with_teams(id)
            .await?
            .ok_or(ApiError::FixtureNotFound)
    }
}

// ── RemoveFixture ────────────────────────────────────────────────────────────

pub struct RemoveFixtureUseCase<F: FixtureRepository> {
    pub fixtures: F,
}

impl<F: FixtureRepository> RemoveFixtureUseCase<F> {
    pub async fn execute(&self, id: Uuid) -> Result<(), ApiError> {
        // No existence check: removing an absent fixture is a no-op.
        self.fixtures.delete(id).await
    }
}

// ── SearchFixtures ───────────────────────────────────────────────────────────

pub struct SearchFixturesInput {
    pub home_team_name: Option<String>,
    pub away_team_name: Option<String>,
    pub status: Option<FixtureStatus>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub sort_by: FixtureSortBy,
    pub order: Sort,
    pub page: PageRequest,
}

pub struct SearchFixturesUseCase<F: FixtureRepository, T: TeamRepository> {
    pub fixtures: F,
    pub teams: T,
}

impl<F: FixtureRepository, T: TeamRepository> SearchFixturesUseCase<F, T> {
    pub async fn execute(
        &self,
        input: SearchFixturesInput,
    ) -> Result<Paginated<FixtureWithTeams>, ApiError> {
        let home_team_id = self.resolve_filter(input.home_team_name.as_deref()).await?;
        let away_team_id = self.resolve_filter(input.away_team_name.as_deref()).await?;

        let filter = FixtureFilter {
            home_team_id,
            away_team_id,
            status: input.status,
            date_from: input.date_from,
            date_to: input.date_to,
        };
        let (items, total) = self
            .fixtures
            .search(&filter, input.sort_by, input.order, input.page)
            .await?;
        Ok(Paginated {
            items,
            pagination: PageInfo::new(total, input.page),
        })
    }

    /// Resolve a team-name query parameter to an id filter. The name matches
    /// as a case-insensitive substring, like the other string filters. An
    /// unmatched name becomes the nil UUID, which matches no fixture; it
    /// never silently widens into an unfiltered search.
    async fn resolve_filter(&self, name: Option<&str>) -> Result<Option<Uuid>, ApiError> {
        match name {
            None => Ok(None),
            Some(name) => Ok(Some(
                self.teams
                    .find_by_name_contains(name)
                    .await?
                    .map(|t| t.id)
                    .unwrap_or(Uuid::nil()),
            )),
        }
    }
}
