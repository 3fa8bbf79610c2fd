//! `/api/v1/savings`

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::api::error::{ApiError, ApiJson, ApiPath, ApiQuery};
use crate::api::extract::AuthUser;
use crate::api::state::{blocking, SharedState};
use crate::models::{ListFilter, Saving, SavingDto, SavingId};
use crate::services::SavingService;

pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/api/v1/savings", get(list).post(create))
        .route("/api/v1/savings/{id}", get(show).put(update).delete(remove))
}

async fn list(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiQuery(filter): ApiQuery<ListFilter>,
) -> Result<Json<Vec<SavingDto>>, ApiError> {
    let savings = blocking(&state, move |s| {
        SavingService::new(&s.storage).list(user.id, &filter)
    })
    .await?;
    Ok(Json(savings.iter().map(Saving::to_dto).collect()))
}

async fn show(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<SavingId>,
) -> Result<Json<SavingDto>, ApiError> {
    let saving = blocking(&state, move |s| SavingService::new(&s.storage).get(user.id, id)).await?;
    Ok(Json(saving.to_dto()))
}

async fn create(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiJson(dto): ApiJson<SavingDto>,
) -> Result<(StatusCode, Json<SavingDto>), ApiError> {
    let saving = blocking(&state, move |s| {
        SavingService::new(&s.storage).create(user.id, &dto)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(saving.to_dto())))
}

async fn update(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<SavingId>,
    ApiJson(dto): ApiJson<SavingDto>,
) -> Result<Json<SavingDto>, ApiError> {
    let saving = blocking(&state, move |s| {
        SavingService::new(&s.storage).update(user.id, id, &dto)
    })
    .await?;
    Ok(Json(saving.to_dto()))
}

async fn remove(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<SavingId>,
) -> Result<StatusCode, ApiError> {
    blocking(&state, move |s| SavingService::new(&s.storage).delete(user.id, id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
