use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use domain::CallerIdentity;
use storage::Db;

use crate::http::{internal_error, ApiError};

/// 从 `Authorization: Bearer <token>` 解析调用者；缺失或未知 token 视为匿名
pub struct Caller(pub Option<CallerIdentity>);

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

#[async_trait]
impl<S> FromRequestParts<S> for Caller
where
    Db: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts) else {
            return Ok(Caller(None));
        };

        let db = Db::from_ref(state);
        let caller = db.find_session(token).await.map_err(|e| {
            tracing::error!("Session lookup failed: {:?}", e);
            internal_error(&e)
        })?;

        if caller.is_none() {
            tracing::debug!("Unknown session token, treating request as anonymous");
        }
        Ok(Caller(caller))
    }
}
