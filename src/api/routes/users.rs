//! `/api/v1/users`
//!
//! A caller only ever sees their own profile. Deleting a profile removes
//! everything the user owns and signs out all of their sessions.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Deserialize;
use tracing::info;

use crate::api::error::{ApiError, ApiJson, ApiPath, ApiQuery};
use crate::api::extract::AuthUser;
use crate::api::state::{blocking, SharedState};
use crate::models::{User, UserDto, UserId};
use crate::services::UserService;

pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/api/v1/users", get(list).post(create))
        .route("/api/v1/users/by-email", get(by_email))
        .route("/api/v1/users/{id}", get(show).put(update).delete(remove))
}

#[derive(Debug, Deserialize)]
struct EmailQuery {
    email: String,
}

async fn list(
    State(state): State<SharedState>,
    user: AuthUser,
) -> Result<Json<Vec<UserDto>>, ApiError> {
    let users = blocking(&state, move |s| UserService::new(&s.storage).list(user.id)).await?;
    Ok(Json(users.iter().map(User::to_dto).collect()))
}

async fn by_email(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiQuery(query): ApiQuery<EmailQuery>,
) -> Result<Json<UserDto>, ApiError> {
    let found = blocking(&state, move |s| {
        UserService::new(&s.storage).find_by_email(user.id, &query.email)
    })
    .await?;
    Ok(Json(found.to_dto()))
}

async fn show(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<UserId>,
) -> Result<Json<UserDto>, ApiError> {
    let found = blocking(&state, move |s| UserService::new(&s.storage).get(user.id, id)).await?;
    Ok(Json(found.to_dto()))
}

/// Create another account; the caller stays signed in as themselves
async fn create(
    State(state): State<SharedState>,
    _user: AuthUser,
    ApiJson(dto): ApiJson<UserDto>,
) -> Result<(StatusCode, Json<UserDto>), ApiError> {
    let created = blocking(&state, move |s| UserService::new(&s.storage).register(&dto)).await?;
    Ok((StatusCode::CREATED, Json(created.to_dto())))
}

async fn update(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<UserId>,
    ApiJson(dto): ApiJson<UserDto>,
) -> Result<Json<UserDto>, ApiError> {
    let updated = blocking(&state, move |s| {
        UserService::new(&s.storage).update(user.id, id, &dto)
    })
    .await?;
    Ok(Json(updated.to_dto()))
}

async fn remove(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<UserId>,
) -> Result<StatusCode, ApiError> {
    blocking(&state, move |s| {
        UserService::new(&s.storage).delete(user.id, id)?;
        let revoked = s.sessions.revoke_user(id)?;
        info!(user = %id, revoked, "sessions revoked after account deletion");
        Ok(())
    })
    .await?;
    Ok(StatusCode::NO_CONTENT)
}
