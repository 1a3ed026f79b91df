use deadpool_redis::Pool;
use deadpool_redis::redis::AsyncCommands;
use uuid::Uuid;

use matchday_auth_types::cookie::SESSION_TTL_SECS;

use crate::domain::repository::SessionStore;
use crate::domain::types::SessionRecord;
use crate::error::ApiError;

#[derive(Clone)]
pub struct RedisSessionStore {
    pub pool: Pool,
}

fn session_key(session_id: Uuid) -> String {
    format!("session:{}", session_id)
}

impl SessionStore for RedisSessionStore {
    async fn put(&self, session_id: Uuid, record: &SessionRecord) -> Result<(), ApiError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| ApiError::Internal(e.into()))?;
        let value = serde_json::to_string(record).map_err(|e| ApiError::Internal(e.into()))?;
        let (): () = conn
            .set_ex(session_key(session_id), value, SESSION_TTL_SECS)
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| ApiError::Internal(e.into()))?;
        Ok(())
    }

    async fn get(&self, session_id: Uuid) -> Result<Option<SessionRecord>, ApiError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| ApiError::Internal(e.into()))?;
        let value: Option<String> = conn
            .get(session_key(session_id))
            .await
            .map_err(|e| ApiError::Internal(e.into()))?;
        match value {
            Some(json) => {
                let record =
                    serde_json::from_str(&json).map_err(|e| ApiError::Internal(e.into()))?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, session_id: Uuid) -> Result<(), ApiError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| ApiError::Internal(e.into()))?;
        let (): () = conn
            .del(session_key(session_id))
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| ApiError::Internal(e.into()))?;
        Ok(())
    }
}
