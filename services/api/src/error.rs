use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// One field-level validation failure, reported before any service call.
#[derive(Debug, Clone, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

/// API domain error variants.
///
/// Missing token, bad token and missing session are deliberately separate
/// variants — they share little beyond "request rejected" and each needs to
/// stay observable as its own cause.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("access denied")]
    TokenMissing,
    #[error("invalid token")]
    TokenInvalid,
    #[error("session expired, please log in again")]
    SessionExpired,
    #[error("access denied")]
    Forbidden,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("user with username already exists")]
    UsernameTaken,
    #[error("user with email already exists")]
    EmailTaken,
    #[error("team already exists")]
    TeamExists,
    #[error("team not found")]
    TeamNotFound,
    #[error("home team does not exist")]
    HomeTeamNotFound,
    #[error("away team does not exist")]
    AwayTeamNotFound,
    #[error("fixture already exists")]
    FixtureExists,
    #[error("fixture not found")]
    FixtureNotFound,
    #[error("validation failed")]
    Validation(Vec<FieldViolation>),
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TokenMissing => "TOKEN_MISSING",
            Self::TokenInvalid => "TOKEN_INVALID",
            Self::SessionExpired => "SESSION_EXPIRED",
            Self::Forbidden => "FORBIDDEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::TeamExists => "TEAM_EXISTS",
            Self::TeamNotFound => "TEAM_NOT_FOUND",
            Self::HomeTeamNotFound => "HOME_TEAM_NOT_FOUND",
            Self::AwayTeamNotFound => "AWAY_TEAM_NOT_FOUND",
            Self::FixtureExists => "FIXTURE_EXISTS",
            Self::FixtureNotFound => "FIXTURE_NOT_FOUND",
            Self::Validation(_) => "VALIDATION",
            Self::Internal(_) => "INTERNAL",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::TokenMissing | Self::SessionExpired => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::TokenInvalid
            | Self::InvalidCredentials
            | Self::UsernameTaken
            | Self::EmailTaken
            | Self::TeamExists
            | Self::FixtureExists => StatusCode::BAD_REQUEST,
            Self::TeamNotFound
            | Self::HomeTeamNotFound
            | Self::AwayTeamNotFound
            | Self::FixtureNotFound => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Log 500s only — tower-http TraceLayer already records method/uri/status
        // for all requests; 4xx are expected client errors. Internal errors need
        // the anyhow chain logged so the root cause is traceable. The chain is
        // never serialized into the body.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = match &self {
            Self::Validation(violations) => serde_json::json!({
                "status": "error",
                "error": self.to_string(),
                "violations": violations,
            }),
            _ => serde_json::json!({
                "status": "error",
                "error": self.to_string(),
            }),
        };
        (status, axum::Json(body)).into_response()
    }
}
