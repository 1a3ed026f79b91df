//! Request identity extractor: bearer token plus server-side session.

use axum::extract::FromRequestParts;
use axum_extra::extract::cookie::CookieJar;
use http::request::Parts;
use uuid::Uuid;

use matchday_auth_types::cookie::session_id_from_jar;
use matchday_auth_types::token::validate_token;
use matchday_domain::user::Role;

use crate::domain::repository::SessionStore;
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller. Extraction succeeds only when the bearer token
/// verifies AND the session cookie names a live server-side session; either
/// leg failing rejects the request with its own error.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
    pub session_id: Uuid,
}

impl Identity {
    /// Role gate for write routes.
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.role.is_admin() {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }
}

fn bearer_token(parts: &Parts) -> Result<String, ApiError> {
    let header = parts
        .headers
        .get(http::header::AUTHORIZATION)
        .ok_or(ApiError::TokenMissing)?;
    let value = header.to_str().map_err(|_| ApiError::TokenInvalid)?;
    let token = value.strip_prefix("Bearer ").ok_or(ApiError::TokenInvalid)?;
    Ok(token.to_owned())
}

impl FromRequestParts<AppState> for Identity {
    type Rejection = ApiError;

    // Extract synchronously, then return a 'static async block; an `async fn`
    // body here trips E0195 against axum-core's `impl Future + Send` signature.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let token = bearer_token(parts);
        let jar = CookieJar::from_headers(&parts.headers);
        let state = state.clone();

        async move {
            let token = token?;
            let info =
                validate_token(&token, &state.jwt_secret).map_err(|_| ApiError::TokenInvalid)?;

            let session_id = session_id_from_jar(&jar).ok_or(ApiError::SessionExpired)?;
            let record = state
                .session_store()
                .get(session_id)
                .await?
                .ok_or(ApiError::SessionExpired)?;

            Ok(Self {
                user_id: info.user_id,
                email: info.email,
                // Session record is authoritative for the role.
                role: record.role,
                session_id,
            })
        }
    }
}
