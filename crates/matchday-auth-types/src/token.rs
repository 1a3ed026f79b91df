//! JWT bearer-token issuing and validation.
//!
//! Tokens are HS256-signed with a shared server secret and expire one hour
//! after issuance. The token proves identity only; an active server-side
//! session is required in addition (checked by the API's auth extractor).

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use matchday_domain::user::Role;

/// Bearer-token lifetime in seconds (1 hour).
pub const TOKEN_EXP_SECS: u64 = 3600;

/// JWT claims payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User ID (UUID string).
    pub sub: String,
    pub email: String,
    pub role: Role,
    /// Expiration timestamp (seconds since UNIX epoch).
    pub exp: u64,
}

/// Identity extracted from a validated bearer token.
#[derive(Debug, Clone)]
pub struct TokenInfo {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
    pub exp: u64,
}

/// Errors returned by [`validate_token`].
///
/// Callers are expected to collapse all variants into a single "invalid
/// token" failure; the split exists for logging and tests.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
    #[error("signing failed")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

/// Sign a token for a verified identity. Returns the token and its expiry.
pub fn issue_token(
    user_id: Uuid,
    email: &str,
    role: Role,
    secret: &str,
) -> Result<(String, u64), TokenError> {
    let exp = now_secs() + TOKEN_EXP_SECS;
    let claims = TokenClaims {
        sub: user_id.to_string(),
        email: email.to_owned(),
        role,
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(TokenError::Signing)?;
    Ok((token, exp))
}

/// Decode and validate a bearer token, returning the embedded identity.
///
/// Validation: HS256, exp checked, required claims `exp` + `sub`, default
/// 60s leeway for clock skew.
pub fn validate_token(token: &str, secret: &str) -> Result<TokenInfo, TokenError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::InvalidSignature,
        _ => TokenError::Malformed,
    })?;

    let user_id = data
        .claims
        .sub
        .parse::<Uuid>()
        .map_err(|_| TokenError::Malformed)?;

    Ok(TokenInfo {
        user_id,
        email: data.claims.email,
        role: data.claims.role,
        exp: data.claims.exp,
    })
}
