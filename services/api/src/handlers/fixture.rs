use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use matchday_core::response::ApiSuccess;
use matchday_domain::fixture::FixtureStatus;
use matchday_domain::pagination::{PageRequest, Paginated, Sort};

use crate::domain::types::{FixtureSortBy, FixtureWithTeams};
use crate::error::ApiError;
use crate::extractors::Identity;
use crate::handlers::team::TeamResponse;
use crate::handlers::{validation_error, violation};
use crate::state::AppState;
use crate::usecase::fixture::{
    CreateFixtureUseCase, FixtureInput, GetFixtureUseCase, RemoveFixtureUseCase,
    SearchFixturesInput, SearchFixturesUseCase, UpdateFixtureUseCase,
};

// ── Request / response types ─────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FixtureRequest {
    #[validate(length(min = 1, message = "homeTeam is required"))]
    pub home_team: String,
    #[validate(length(min = 1, message = "awayTeam is required"))]
    pub away_team: String,
    pub date: DateTime<Utc>,
    #[validate(length(min = 1, message = "location is required"))]
    pub location: String,
    pub status: Option<String>,
    pub home_team_score: Option<i32>,
    pub away_team_score: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureSearchQuery {
    pub home_team_name: Option<String>,
    pub away_team_name: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub sort_by: Option<String>,
    pub order: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureResponse {
    pub id: Uuid,
    pub home_team: TeamResponse,
    pub away_team: TeamResponse,
    #[serde(serialize_with = "matchday_core::serde::to_rfc3339_ms")]
    pub date: DateTime<Utc>,
    pub location: String,
    pub status: FixtureStatus,
    pub home_team_score: Option<i32>,
    pub away_team_score: Option<i32>,
    pub unique_link: String,
    #[serde(serialize_with = "matchday_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "matchday_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<FixtureWithTeams> for FixtureResponse {
    fn from(value: FixtureWithTeams) -> Self {
        Self {
            id: value.fixture.id,
            home_team: value.home_team.into(),
            away_team: value.away_team.into(),
            date: value.fixture.date,
            location: value.fixture.location,
            status: value.fixture.status,
            home_team_score: value.fixture.home_score,
            away_team_score: value.fixture.away_score,
            unique_link: value.fixture.unique_link,
            created_at: value.fixture.created_at,
            updated_at: value.fixture.updated_at,
        }
    }
}

fn parse_status(value: Option<&str>) -> Result<Option<FixtureStatus>, ApiError> {
    match value {
        None => Ok(None),
        Some(v) => FixtureStatus::from_str(v).map(Some).ok_or_else(|| {
            ApiError::Validation(vec![violation(
                "status",
                "must be one of: pending, completed",
            )])
        }),
    }
}

fn parse_sort(query: &FixtureSearchQuery) -> Result<(FixtureSortBy, Sort), ApiError> {
    let mut violations = vec![];
    let sort_by = match query.sort_by.as_deref() {
        None => FixtureSortBy::default(),
        Some(v) => FixtureSortBy::from_param(v).unwrap_or_else(|| {
            violations.push(violation(
                "sortBy",
                "must be one of: date, status, location, createdAt",
            ));
            FixtureSortBy::default()
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

fn fixture_input(req: FixtureRequest) -> Result<FixtureInput, ApiError> {
    let status = parse_status(req.status.as_deref())?;
    Ok(FixtureInput {
        home_team: req.home_team,
        away_team: req.away_team,
        date: req.date,
        location: req.location,
        status,
        home_score: req.home_team_score,
        away_score: req.away_team_score,
    })
}

// ── POST /api/fixtures ───────────────────────────────────────────────────────

pub async fn create_fixture(
    identity: Identity,
    State(state): State<AppState>,
    Json(req): Json<FixtureRequest>,
) -> Result<impl IntoResponse, ApiError> {
    identity.require_admin()?;
    req.validate().map_err(validation_error)?;

    let uc = CreateFixtureUseCase {
        fixtures: state.fixture_repo(),
        teams: state.team_repo(),
    };
    let created = uc.execute(fixture_input(req)?).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiSuccess::with_data(
            "Fixture created successfully",
            FixtureResponse::from(created),
        )),
    ))
}

// ── GET /api/fixtures/{id} ───────────────────────────────────────────────────

pub async fn get_fixture(
    _identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let uc = GetFixtureUseCase {
        fixtures: state.fixture_repo(),
    };
    let found = uc.execute(id).await?;
    Ok(Json(ApiSuccess::with_data(
        "Fixture fetched successfully",
        FixtureResponse::from(found),
    )))
}

// ── PATCH /api/fixtures/{id} ─────────────────────────────────────────────────

pub async fn update_fixture(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<FixtureRequest>,
) -> Result<impl IntoResponse, ApiError> {
    identity.require_admin()?;
    req.validate().map_err(validation_error)?;

    let uc = UpdateFixtureUseCase {
        fixtures: state.fixture_repo(),
        teams: state.team_repo(),
    };
    let updated = uc.execute(id, fixture_input(req)?).await?;
    Ok(Json(ApiSuccess::with_data(
        "Fixture updated successfully",
        FixtureResponse::from(updated),
    )))
}

// ── DELETE /api/fixtures/{id} ────────────────────────────────────────────────

pub async fn remove_fixture(
    identity: Identity,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    identity.require_admin()?;

    let uc = RemoveFixtureUseCase {
        fixtures: state.fixture_repo(),
    };
    uc.execute(id).await?;
    Ok(Json(ApiSuccess::message("Fixture removed successfully")))
}

// ── GET /api/fixtures ────────────────────────────────────────────────────────

pub async fn search_fixtures(
    _identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<FixtureSearchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let (sort_by, order) = parse_sort(&query)?;
    let status = parse_status(query.status.as_deref())?;
    let page = PageRequest::from_params(query.page, query.limit);

    let uc = SearchFixturesUseCase {
        fixtures: state.fixture_repo(),
        teams: state.team_repo(),
    };
    let result = uc
        .execute(SearchFixturesInput {
            home_team_name: query.home_team_name,
            away_team_name: query.away_team_name,
            status,
            date_from: query.start_date,
            date_to: query.end_date,
            sort_by,
            order,
            page,
        })
        .await?;

    let data = Paginated {
        items: result
            .items
            .into_iter()
            .map(FixtureResponse::from)
            .collect::<Vec<_>>(),
        pagination: result.pagination,
    };
    Ok(Json(ApiSuccess::with_data(
        "Fixtures fetched successfully",
        data,
    )))
}
