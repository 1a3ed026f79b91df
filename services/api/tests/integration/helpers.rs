use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use matchday_api::domain::repository::{
    FixtureRepository, SessionStore, TeamRepository, UserRepository,
};
use matchday_api::domain::types::{
    Fixture, FixtureFilter, FixtureSortBy, FixtureUpdate, FixtureWithTeams, SessionRecord, Team,
    TeamFilter, TeamPatch, TeamSortBy, User,
};
use matchday_api::error::ApiError;
use matchday_domain::pagination::{PageRequest, Sort};

// ── MockUserRepo ─────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepo {
    pub fn empty() -> Self {
        Self::default()
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_email_ci(&self, email: &str) -> Result<Option<User>, ApiError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn find_by_username_ci(&self, username: &str) -> Result<Option<User>, ApiError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username.eq_ignore_ascii_case(username))
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }
}

// ── MockTeamRepo ─────────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockTeamRepo {
    pub teams: Arc<Mutex<Vec<Team>>>,
}

impl MockTeamRepo {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with(teams: Vec<Team>) -> Self {
        Self {
            teams: Arc::new(Mutex::new(teams)),
        }
    }
}

impl TeamRepository for MockTeamRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Team>, ApiError> {
        Ok(self
            .teams
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn find_by_name_ci(&self, name: &str) -> Result<Option<Team>, ApiError> {
        Ok(self
            .teams
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    async fn find_by_name_contains(&self, term: &str) -> Result<Option<Team>, ApiError> {
        let term = term.to_lowercase();
        Ok(self
            .teams
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.name.to_lowercase().contains(&term))
            .cloned())
    }

    async fn create(&self, team: &Team) -> Result<(), ApiError> {
        self.teams.lock().unwrap().push(team.clone());
        Ok(())
    }

    async fn update(&self, id: Uuid, patch: &TeamPatch) -> Result<(), ApiError> {
        let mut teams = self.teams.lock().unwrap();
        let team = teams
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(ApiError::TeamNotFound)?;
        if let Some(name) = &patch.name {
            team.name = name.clone();
        }
        if let Some(country) = &patch.country {
            team.country = country.clone();
        }
        team.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.teams.lock().unwrap().retain(|t| t.id != id);
        Ok(())
    }

    async fn search(
        &self,
        filter: &TeamFilter,
        sort_by: TeamSortBy,
        order: Sort,
        page: PageRequest,
    ) -> Result<(Vec<Team>, u64), ApiError> {
        let teams = self.teams.lock().unwrap();
        let mut matching: Vec<Team> = teams
            .iter()
            .filter(|t| {
                ci_contains(&t.name, filter.name.as_deref())
                    && ci_contains(&t.country, filter.country.as_deref())
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            let ord = match sort_by {
                TeamSortBy::Name => a.name.cmp(&b.name),
                TeamSortBy::Country => a.country.cmp(&b.country),
                TeamSortBy::CreatedAt => a.created_at.cmp(&b.created_at),
            };
            match order {
                Sort::Asc => ord,
                Sort::Desc => ord.reverse(),
            }
        });
        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .collect();
        Ok((items, total))
    }
}

fn ci_contains(haystack: &str, needle: Option<&str>) -> bool {
    needle.is_none_or(|n| haystack.to_lowercase().contains(&n.to_lowercase()))
}

// ── MockFixtureRepo ──────────────────────────────────────────────────────────

/// Shares the team list with a [`MockTeamRepo`] so denormalized reads see
/// teams created earlier in the same scenario. `dup_checks` counts
/// opponent+date lookups for asserting the update-recheck asymmetry.
#[derive(Clone)]
pub struct MockFixtureRepo {
    pub fixtures: Arc<Mutex<Vec<Fixture>>>,
    pub teams: Arc<Mutex<Vec<Team>>>,
    pub dup_checks: Arc<Mutex<u32>>,
}

impl MockFixtureRepo {
    pub fn sharing(teams: &MockTeamRepo) -> Self {
        Self {
            fixtures: Arc::new(Mutex::new(vec![])),
            teams: Arc::clone(&teams.teams),
            dup_checks: Arc::new(Mutex::new(0)),
        }
    }

    fn denormalize(&self, fixture: Fixture) -> FixtureWithTeams {
        let teams = self.teams.lock().unwrap();
        let home_team = teams
            .iter()
            .find(|t| t.id == fixture.home_team_id)
            .cloned()
            .expect("home team present in shared team list");
        let away_team = teams
            .iter()
            .find(|t| t.id == fixture.away_team_id)
            .cloned()
            .expect("away team present in shared team list");
        FixtureWithTeams {
            fixture,
            home_team,
            away_team,
        }
    }
}

impl FixtureRepository for MockFixtureRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Fixture>, ApiError> {
        Ok(self
            .fixtures
            .lock()
            .unwrap()
            .iter()
            .find(|f| f.id == id)
            .cloned())
    }

    async fn find_with_teams(&self, id: Uuid) -> Result<Option<FixtureWithTeams>, ApiError> {
        Ok(self.find_by_id(id).await?.map(|f| self.denormalize(f)))
    }

    async fn find_by_opponents_and_date(
        &self,
        home_team_id: Uuid,
        away_team_id: Uuid,
        date: DateTime<Utc>,
    ) -> Result<Option<Fixture>, ApiError> {
        *self.dup_checks.lock().unwrap() += 1;
        Ok(self
            .fixtures
            .lock()
            .unwrap()
            .iter()
            .find(|f| {
                f.home_team_id == home_team_id && f.away_team_id == away_team_id && f.date == date
            })
            .cloned())
    }

    async fn create(&self, fixture: &Fixture) -> Result<(), ApiError> {
        self.fixtures.lock().unwrap().push(fixture.clone());
        Ok(())
    }

    async fn update(&self, id: Uuid, update: &FixtureUpdate) -> Result<(), ApiError> {
        let mut fixtures = self.fixtures.lock().unwrap();
        let fixture = fixtures
            .iter_mut()
            .find(|f| f.id == id)
            .ok_or(ApiError::FixtureNotFound)?;
        fixture.home_team_id = update.home_team_id;
        fixture.away_team_id = update.away_team_id;
        fixture.date = update.date;
        fixture.location = update.location.clone();
        if let Some(status) = update.status {
            fixture.status = status;
        }
        if let Some(home_score) = update.home_score {
            fixture.home_score = Some(home_score);
        }
        if let Some(away_score) = update.away_score {
            fixture.away_score = Some(away_score);
        }
        fixture.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.fixtures.lock().unwrap().retain(|f| f.id != id);
        Ok(())
    }

    async fn search(
        &self,
        filter: &FixtureFilter,
        sort_by: FixtureSortBy,
        order: Sort,
        page: PageRequest,
    ) -> Result<(Vec<FixtureWithTeams>, u64), ApiError> {
        let mut matching: Vec<Fixture> = self
            .fixtures
            .lock()
            .unwrap()
            .iter()
            .filter(|f| {
                filter.home_team_id.is_none_or(|id| f.home_team_id == id)
                    && filter.away_team_id.is_none_or(|id| f.away_team_id == id)
                    && filter.status.is_none_or(|s| f.status == s)
                    && filter.date_from.is_none_or(|d| f.date >= d)
                    && filter.date_to.is_none_or(|d| f.date <= d)
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| {
            let ord = match sort_by {
                FixtureSortBy::Date => a.date.cmp(&b.date),
                FixtureSortBy::Status => a.status.as_str().cmp(b.status.as_str()),
                FixtureSortBy::Location => a.location.cmp(&b.location),
                FixtureSortBy::CreatedAt => a.created_at.cmp(&b.created_at),
            };
            match order {
                Sort::Asc => ord,
                Sort::Desc => ord.reverse(),
            }
        });
        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit as usize)
            .map(|f| self.denormalize(f))
            .collect();
        Ok((items, total))
    }
}

// ── MockSessionStore ─────────────────────────────────────────────────────────

#[derive(Clone, Default)]
pub struct MockSessionStore {
    pub records: Arc<Mutex<HashMap<Uuid, SessionRecord>>>,
}

impl MockSessionStore {
    pub fn empty() -> Self {
        Self::default()
    }
}

impl SessionStore for MockSessionStore {
    async fn put(&self, session_id: Uuid, record: &SessionRecord) -> Result<(), ApiError> {
        self.records
            .lock()
            .unwrap()
            .insert(session_id, record.clone());
        Ok(())
    }

    async fn get(&self, session_id: Uuid) -> Result<Option<SessionRecord>, ApiError> {
        Ok(self.records.lock().unwrap().get(&session_id).cloned())
    }

    async fn delete(&self, session_id: Uuid) -> Result<(), ApiError> {
        self.records.lock().unwrap().remove(&session_id);
        Ok(())
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-integration-tests-only";

pub fn test_team(name: &str, country: &str) -> Team {
    let now = Utc::now();
    Team {
        id: Uuid::now_v7(),
        name: name.to_owned(),
        country: country.to_owned(),
        created_at: now,
        updated_at: now,
    }
}
