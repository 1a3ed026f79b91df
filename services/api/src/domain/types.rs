use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use matchday_domain::fixture::FixtureStatus;
use matchday_domain::user::Role;

/// Registered account. `password_hash` is the argon2 PHC string, never the
/// plaintext.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial team update; absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct TeamPatch {
    pub name: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Fixture {
    pub id: Uuid,
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub date: DateTime<Utc>,
    pub location: String,
    pub status: FixtureStatus,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub unique_link: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Fixture {
    /// Stable share link, derived from the fixture's own id once allocated.
    pub fn link_for(id: Uuid) -> String {
        format!("fixture/{id}")
    }
}

/// Fixture with its two team references resolved into embedded team data.
#[derive(Debug, Clone)]
pub struct FixtureWithTeams {
    pub fixture: Fixture,
    pub home_team: Team,
    pub away_team: Team,
}

/// Replacement values for a fixture update. Opponents, date and location are
/// always supplied; status and scores only when changing.
#[derive(Debug, Clone)]
pub struct FixtureUpdate {
    pub home_team_id: Uuid,
    pub away_team_id: Uuid,
    pub date: DateTime<Utc>,
    pub location: String,
    pub status: Option<FixtureStatus>,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
}

/// Server-side session record, stored as JSON in Redis under the session id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub user_id: Uuid,
    pub role: Role,
}

// ── Search filters ───────────────────────────────────────────────────────────

/// Team search filter. String fields match case-insensitive substrings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamFilter {
    pub name: Option<String>,
    pub country: Option<String>,
}

/// Fixture search filter. Team-name query parameters are resolved to ids
/// before this is built; an unmatched name resolves to `Uuid::nil()`, which
/// matches no fixture — never to an absent (unfiltered) component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixtureFilter {
    pub home_team_id: Option<Uuid>,
    pub away_team_id: Option<Uuid>,
    pub status: Option<FixtureStatus>,
    /// Inclusive lower bound on the fixture date.
    pub date_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the fixture date.
    pub date_to: Option<DateTime<Utc>>,
}

// ── Sort fields (per-resource allow-lists) ───────────────────────────────────

/// Sortable team fields. `sortBy` input outside this list is rejected at the
/// boundary rather than passed through to the query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TeamSortBy {
    #[default]
    Name,
    Country,
    CreatedAt,
}

impl TeamSortBy {
    pub fn from_param(v: &str) -> Option<Self> {
        match v {
            "name" => Some(Self::Name),
            "country" => Some(Self::Country),
            "createdAt" => Some(Self::CreatedAt),
            _ => None,
        }
    }
}

/// Sortable fixture fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FixtureSortBy {
    #[default]
    Date,
    Status,
    Location,
    CreatedAt,
}

impl FixtureSortBy {
    pub fn from_param(v: &str) -> Option<Self> {
        match v {
            "date" => Some(Self::Date),
            "status" => Some(Self::Status),
            "location" => Some(Self::Location),
            "createdAt" => Some(Self::CreatedAt),
            _ => None,
        }
    }
}
