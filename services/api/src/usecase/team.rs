use chrono::Utc;
use uuid::Uuid;

use matchday_domain::pagination::{PageInfo, PageRequest, Paginated, Sort};

use crate::domain::repository::TeamRepository;
use crate::domain::types::{Team, TeamFilter, TeamPatch, TeamSortBy};
use crate::error::ApiError;

// ── AddTeam ──────────────────────────────────────────────────────────────────

pub struct AddTeamInput {
    pub name: String,
    pub country: String,
}

pub struct AddTeamUseCase<R: TeamRepository> {
    pub teams: R,
}

impl<R: TeamRepository> AddTeamUseCase<R> {
    pub async fn execute(&self, input: AddTeamInput) -> Result<Team, ApiError> {
        // Name uniqueness is case-insensitive; the lower(name) index backstops
        // this check under concurrent inserts.
        if self.teams.find_by_name_ci(&input.name).await?.is_some() {
            return Err(ApiError::TeamExists);
        }

        let now = Utc::now();
        let team = Team {
            id: Uuid::now_v7(),
            name: input.name,
            country: input.country,
            created_at: now,
            updated_at: now,
        };
        self.teams.create(&team).await?;
        Ok(team)
    }
}

// ── GetTeam ──────────────────────────────────────────────────────────────────

pub struct GetTeamUseCase<R: TeamRepository> {
    pub teams: R,
}

impl<R: TeamRepository> GetTeamUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<Team, ApiError> {
        self.teams
            .find_by_id(id)
            .await?
            .ok_or(ApiError::TeamNotFound)
    }
}

// ── UpdateTeam ───────────────────────────────────────────────────────────────

pub struct UpdateTeamUseCase<R: TeamRepository> {
    pub teams: R,
}

impl<R: TeamRepository> UpdateTeamUseCase<R> {
    pub async fn execute(&self, id: Uuid, patch: TeamPatch) -> Result<Team, ApiError> {
        let existing = self
            .teams
            .find_by_id(id)
            .await?
            .ok_or(ApiError::TeamNotFound)?;

        // Renaming onto another team's name is a conflict; renaming onto the
        // team's own name (any casing) is not.
        if let Some(name) = &patch.name {
            if let Some(holder) = self.teams.find_by_name_ci(name).await? {
                if holder.id != existing.id {
                    return Err(ApiError::TeamExists);
                }
            }
        }

        self.teams.update(id, &patch).await?;
        self.teams
            .find_by_id(id)
            .await?
            .ok_or(ApiError::TeamNotFound)
    }
}

// ── RemoveTeam ───────────────────────────────────────────────────────────────

pub struct RemoveTeamUseCase<R: TeamRepository> {
    pub teams: R,
}

impl<R: TeamRepository> RemoveTeamUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), ApiError> {
        // No existence check: removing an absent team is a no-op.
        self.teams.delete(id).await
    }
}

// ── SearchTeams ──────────────────────────────────────────────────────────────

pub struct SearchTeamsInput {
    pub filter: TeamFilter,
    pub sort_by: TeamSortBy,
    pub order: Sort,
    pub page: PageRequest,
}

pub struct SearchTeamsUseCase<R: TeamRepository> {
    pub teams: R,
}

impl<R: TeamRepository> SearchTeamsUseCase<R> {
    pub async fn execute(&self, input: SearchTeamsInput) -> Result<Paginated<Team>, ApiError> {
        let (items, total) = self
            .teams
            .search(&input.filter, input.sort_by, input.order, input.page)
            .await?;
        Ok(Paginated {
            items,
            pagination: PageInfo::new(total, input.page),
        })
    }
}
