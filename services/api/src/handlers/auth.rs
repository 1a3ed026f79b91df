use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use validator::Validate;

use matchday_auth_types::cookie::{clear_session_cookie, set_session_cookie};
use matchday_core::response::ApiSuccess;
use matchday_domain::user::Role;

use crate::error::ApiError;
use crate::extractors::Identity;
use crate::handlers::validation_error;
use crate::state::AppState;
use crate::usecase::auth::{
    LoginInput, LoginUseCase, LogoutUseCase, RegisterInput, RegisterUseCase,
};

// ── Request / response types ─────────────────────────────────────────────────

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, message = "username must be at least 3 characters"))]
    pub username: String,
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    pub id: uuid::Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    #[serde(serialize_with = "matchday_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Serialize)]
pub struct LoginData {
    pub token: String,
}

// ── POST /api/auth/register ──────────────────────────────────────────────────

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate().map_err(validation_error)?;

    let uc = RegisterUseCase {
        users: state.user_repo(),
    };
    let user = uc
        .execute(RegisterInput {
            username: req.username,
            email: req.email,
            password: req.password,
            role: req.role.unwrap_or(Role::User),
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiSuccess::with_data(
            "User registered successfully",
            RegisteredUser {
                id: user.id,
                username: user.username,
                email: user.email,
                role: user.role,
                created_at: user.created_at,
            },
        )),
    ))
}

// ── POST /api/auth/login ─────────────────────────────────────────────────────

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    req.validate().map_err(validation_error)?;

    let uc = LoginUseCase {
        users: state.user_repo(),
        sessions: state.session_store(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = uc
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    let jar = set_session_cookie(jar, out.session_id);
    Ok((
        StatusCode::CREATED,
        jar,
        Json(ApiSuccess::with_data(
            "Login successful",
            LoginData { token: out.token },
        )),
    ))
}

// ── POST /api/auth/logout ────────────────────────────────────────────────────

pub async fn logout(
    identity: Identity,
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError> {
    let uc = LogoutUseCase {
        sessions: state.session_store(),
    };
    uc.execute(identity.session_id).await?;

    let jar = clear_session_cookie(jar);
    Ok((
        StatusCode::CREATED,
        jar,
        Json(ApiSuccess::message("Logout successful")),
    ))
}
