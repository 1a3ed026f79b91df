use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use matchday_core::response::ApiSuccess;
use matchday_domain::pagination::{PageRequest, Paginated, Sort};

use crate::domain::types::{Team, TeamFilter, TeamPatch, TeamSortBy};
use crate::error::ApiError;
use crate::extractors::Identity;
use crate::handlers::{validation_error, violation};
use crate::state::AppState;
use crate::usecase::team::{
    AddTeamInput, AddTeamUseCase, GetTeamUseCase, RemoveTeamUseCase, SearchTeamsInput,
    SearchTeamsUseCase, UpdateTeamUseCase,
};

// ── Request / response types ─────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTeamRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "country is required"))]
    pub country: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTeamRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "country must not be empty"))]
    pub country: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSearchQuery {
    pub name: Option<String>,
    pub country: Option<String>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamResponse {
    pub id: Uuid,
    pub name: String,
    pub country: String,
    #[serde(serialize_with = "matchday_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "matchday_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Team> for TeamResponse {
    fn from(team: Team) -> Self {
        Self {
            id: team.id,
            name: team.name,
            country: team.country,
            created_at: team.created_at,
            updated_at: team.updated_at,
        }
    }
}

/// Parse `sortBy`/`order` against the team allow-list. Unknown values are a
/// validation failure, not a passthrough to the storage layer.
fn parse_sort(query: &TeamSearchQuery) -> Result<(TeamSortBy, Sort), ApiError> {
    let mut violations = vec![];
    let sort_by = match query.sort_by.as_deref() {
        None => TeamSortBy::default(),
        Some(v) => TeamSortBy::from_param(v).unwrap_or_else(|| {
            violations.push(violation(
                "sortBy",
                "must be one of: name, country, createdAt",
            ));
            TeamSortBy::default()
        }),
    };
    let order = match query.order.as_deref() {
        None => Sort::default(),
        Some("asc") => Sort::Asc,
        Some("desc") => Sort::Desc,
        Some(_) => {
            violations.push(violation("order", "must be one of: asc, desc"));
            Sort::default()
        }
    };
    if violations.is_empty() {
        Ok((sort_by, order))
    } else {
        Err(ApiError::Validation(violations))
    }
}

// ── POST /api/teams ──────────────────────────────────────────────────────────

pub async fn create_team(
    identity: Identity,
    State(state): State<AppState>,
    Json(req): Json<CreateTeamRequest>,
) -> Result<impl IntoResponse, ApiError> {
    identity.require_admin()?;
    req.validate().map_err(validation_error)?;

    let uc = AddTeamUseCase {
        teams: state.team_repo(),
    };
    let team = uc
        .execute(AddTeamInput {
            name: req.name,
            country: req.country,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiSuccess::with_data(
            "Team created successfully",
            TeamResponse::from(team),
        )),
    ))
}

// ── GET /api/teams/{id} ──────────────────────────────────────────────────────

pub async fn get_team(
    _identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let uc = GetTeamUseCase {
        teams: state.team_repo(),
    };
    let team = uc.execute(id).await?;
    Ok(Json(ApiSuccess::with_data(
        "Team fetched successfully",
        TeamResponse::from(team),
    )))
}

// ── PATCH /api/teams/{id} ────────────────────────────────────────────────────

pub async fn update_team(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTeamRequest>,
) -> Result<impl IntoResponse, ApiError> {
    identity.require_admin()?;
    req.validate().map_err(validation_error)?;

    let uc = UpdateTeamUseCase {
        teams: state.team_repo(),
    };
    let team = uc
        .execute(
            id,
            TeamPatch {
                name: req.name,
                country: req.country,
            },
        )
        .await?;
    Ok(Json(ApiSuccess::with_data(
        "Team updated successfully",
        TeamResponse::from(team),
    )))
}

// ── DELETE /api/teams/{id} ───────────────────────────────────────────────────

pub async fn remove_team(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    identity.require_admin()?;

    let uc = RemoveTeamUseCase {
        teams: state.team_repo(),
    };
    uc.execute(id).await?;
    Ok(Json(ApiSuccess::message("Team removed successfully")))
}

// ── GET /api/teams ───────────────────────────────────────────────────────────

pub async fn search_teams(
    _identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<TeamSearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (sort_by, order) = parse_sort(&query)?;
    let page = PageRequest::from_params(query.page, query.limit);

    let uc = SearchTeamsUseCase {
        teams: state.team_repo(),
    };
    let result = uc
        .execute(SearchTeamsInput {
            filter: TeamFilter {
                name: query.name,
                country: query.country,
            },
            sort_by,
            order,
            page,
        })
        .await?;

    let data = Paginated {
        items: result
            .items
            .into_iter()
            .map(TeamResponse::from)
            .collect::<Vec<_>>(),
        pagination: result.pagination,
    };
    Ok(Json(ApiSuccess::with_data(
        "Teams fetched successfully",
        data,
    )))
}
