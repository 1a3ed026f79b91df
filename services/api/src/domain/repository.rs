#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use matchday_domain::pagination::{PageRequest, Sort};

use crate::domain::types::{
    Fixture, FixtureFilter, FixtureSortBy, FixtureUpdate, FixtureWithTeams, SessionRecord, Team,
    TeamFilter, TeamPatch, TeamSortBy, User,
};
use crate::error::ApiError;

/// Repository for registered accounts.
pub trait UserRepository: Send + Sync {
    /// Exact match on `lower(email)`.
    async fn find_by_email_ci(&self, email: &str) -> Result<Option<User>, ApiError>;

    /// Exact match on `lower(username)`.
    async fn find_by_username_ci(&self, username: &str) -> Result<Option<User>, ApiError>;

    async fn create(&self, user: &User) -> Result<(), ApiError>;
}

/// Repository for teams.
pub trait TeamRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Team>, ApiError>;

    /// Exact match on `lower(name)` — used for uniqueness checks and for
    /// resolving fixture team-name references on writes.
    async fn find_by_name_ci(&self, name: &str) -> Result<Option<Team>, ApiError>;

    /// First team whose name contains `term`, case-insensitively. Used to
    /// resolve fixture search filters, where a partial name must still narrow
    /// to a team.
    async fn find_by_name_contains(&self, term: &str) -> Result<Option<Team>, ApiError>;

    async fn create(&self, team: &Team) -> Result<(), ApiError>;

    async fn update(&self, id: Uuid, patch: &TeamPatch) -> Result<(), ApiError>;

    /// Delete by id. Deleting an absent team is a no-op, not an error.
    async fn delete(&self, id: Uuid) -> Result<(), ApiError>;

    /// One page of matching teams in the requested order, plus the total
    /// count of ALL records matching the filter (counted independently of
    /// the page).
    async fn search(
        &self,
        filter: &TeamFilter,
        sort_by: TeamSortBy,
        order: Sort,
        page: PageRequest,
    ) -> Result<(Vec<Team>, u64), ApiError>;
}

/// Repository for fixtures.
pub trait FixtureRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Fixture>, ApiError>;

    /// Fetch with both team references denormalized.
    async fn find_with_teams(&self, id: Uuid) -> Result<Option<FixtureWithTeams>, ApiError>;

    /// Lookup by the unique (home, away, date) triple.
    async fn find_by_opponents_and_date(
        &self,
        home_team_id: Uuid,
        away_team_id: Uuid,
        date: DateTime<Utc>,
    ) -> Result<Option<Fixture>, ApiError>;

    async fn create(&self, fixture: &Fixture) -> Result<(), ApiError>;

    async fn update(&self, id: Uuid, update: &FixtureUpdate) -> Result<(), ApiError>;

    /// Delete by id. Deleting an absent fixture is a no-op, not an error.
    async fn delete(&self, id: Uuid) -> Result<(), ApiError>;

    /// As [`TeamRepository::search`], with team data denormalized per item.
    async fn search(
        &self,
        filter: &FixtureFilter,
        sort_by: FixtureSortBy,
        order: Sort,
        page: PageRequest,
    ) -> Result<(Vec<FixtureWithTeams>, u64), ApiError>;
}

/// Server-side session store (Redis). Records expire 24 hours after `put`;
/// the TTL is absolute, not refreshed by reads.
pub trait SessionStore: Send + Sync {
    async fn put(&self, session_id: Uuid, record: &SessionRecord) -> Result<(), ApiError>;

    async fn get(&self, session_id: Uuid) -> Result<Option<SessionRecord>, ApiError>;

    /// Delete a session. Deleting an absent session is not an error.
    async fn delete(&self, session_id: Uuid) -> Result<(), ApiError>;
}
