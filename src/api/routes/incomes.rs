//! `/api/v1/incomes`

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::api::error::{ApiError, ApiJson, ApiPath, ApiQuery};
use crate::api::extract::AuthUser;
use crate::api::state::{blocking, SharedState};
use crate::models::{Income, IncomeDto, IncomeId, ListFilter};
use crate::services::IncomeService;

pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/api/v1/incomes", get(list).post(create))
        .route("/api/v1/incomes/{id}", get(show).put(update).delete(remove))
}

async fn list(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiQuery(filter): ApiQuery<ListFilter>,
) -> Result<Json<Vec<IncomeDto>>, ApiError> {
    let incomes = blocking(&state, move |s| {
        IncomeService::new(&s.storage).list(user.id, &filter)
    })
    .await?;
    Ok(Json(incomes.iter().map(Income::to_dto).collect()))
}

async fn show(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<IncomeId>,
) -> Result<Json<IncomeDto>, ApiError> {
    let income = blocking(&state, move |s| IncomeService::new(&s.storage).get(user.id, id)).await?;
    Ok(Json(income.to_dto()))
}

async fn create(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiJson(dto): ApiJson<IncomeDto>,
) -> Result<(StatusCode, Json<IncomeDto>), ApiError> {
    let income = blocking(&state, move |s| {
        IncomeService::new(&s.storage).create(user.id, &dto)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(income.to_dto())))
}

async fn update(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<IncomeId>,
    ApiJson(dto): ApiJson<IncomeDto>,
) -> Result<Json<IncomeDto>, ApiError> {
    let income = blocking(&state, move |s| {
        IncomeService::new(&s.storage).update(user.id, id, &dto)
    })
    .await?;
    Ok(Json(income.to_dto()))
}

async fn remove(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<IncomeId>,
) -> Result<StatusCode, ApiError> {
    blocking(&state, move |s| IncomeService::new(&s.storage).delete(user.id, id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
