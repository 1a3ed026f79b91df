use chrono::Utc;
use uuid::Uuid;

use matchday_auth_types::token::issue_token;
use matchday_domain::user::Role;

use crate::domain::repository::{SessionStore, UserRepository};
use crate::domain::types::{SessionRecord, User};
use crate::error::ApiError;
use crate::password::{hash_password, verify_password};

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

pub struct RegisterUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> RegisterUseCase<U> {
    pub async fn execute(&self, input: RegisterInput) -> Result<User, ApiError> {
        if self
            .users
            .find_by_username_ci(&input.username)
            .await?
            .is_some()
        {
            return Err(ApiError::UsernameTaken);
        }
        if self.users.find_by_email_ci(&input.email).await?.is_some() {
            return Err(ApiError::EmailTaken);
        }

        let user = User {
            id: Uuid::now_v7(),
            username: input.username,
            email: input.email,
            password_hash: hash_password(&input.password)?,
            role: input.role,
            created_at: Utc::now(),
        };
        self.users.create(&user).await?;
        Ok(user)
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub token: String,
    pub token_exp: u64,
    pub session_id: Uuid,
}

pub struct LoginUseCase<U: UserRepository, S: SessionStore> {
    pub users: U,
    pub sessions: S,
    pub jwt_secret: String,
}

impl<U: UserRepository, S: SessionStore> LoginUseCase<U, S> {
    pub async fn execute(&self, input: LoginInput) -> Result<LoginOutput, ApiError> {
        // Unknown email and wrong password are indistinguishable to the caller.
        let user = self
            .users
            .find_by_email_ci(&input.email)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;

        if !verify_password(&input.password, &user.password_hash) {
            return Err(ApiError::InvalidCredentials);
        }

        let (token, token_exp) = issue_token(user.id, &user.email, user.role, &self.jwt_secret)
            .map_err(|e| ApiError::Internal(e.into()))?;

        let session_id = Uuid::new_v4();
        self.sessions
            .put(
                session_id,
                &SessionRecord {
                    user_id: user.id,
                    role: user.role,
                },
            )
            .await?;

        Ok(LoginOutput {
            user_id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
            token,
            token_exp,
            session_id,
        })
    }
}

// ── Logout ───────────────────────────────────────────────────────────────────

pub struct LogoutUseCase<S: SessionStore> {
    pub sessions: S,
}

impl<S: SessionStore> LogoutUseCase<S> {
    pub async fn execute(&self, session_id: Uuid) -> Result<(), ApiError> {
        self.sessions.delete(session_id).await
    }
}
