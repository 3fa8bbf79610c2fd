//! Bearer token authentication

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::debug;

use super::error::ApiError;
use super::state::SharedState;
use crate::auth::Session;
use crate::models::UserId;

/// The authenticated caller of a request
///
/// Extracting it fails with 401 when the `Authorization: Bearer <token>`
/// header is missing, malformed, unknown or expired.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: UserId,
    pub session: Session,
}

impl FromRequestParts<SharedState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| ApiError::unauthorized("Missing bearer token"))?
            .to_str()
            .map_err(|_| ApiError::unauthorized("Malformed authorization header"))?;

        let token = header
            .strip_prefix("Bearer ")
            .or_else(|| header.strip_prefix("bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::unauthorized("Malformed authorization header"))?;

        let session = state.sessions.resolve(token)?;
        debug!(user = %session.user_id, "authenticated request");

        Ok(Self {
            id: session.user_id,
            session,
        })
    }
}
