//! `/api/v1/expenses`

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::api::error::{ApiError, ApiJson, ApiPath, ApiQuery};
use crate::api::extract::AuthUser;
use crate::api::state::{blocking, SharedState};
use crate::models::{Expense, ExpenseDto, ExpenseId, ListFilter};
use crate::services::ExpenseService;

pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/api/v1/expenses", get(list).post(create))
        .route("/api/v1/expenses/{id}", get(show).put(update).delete(remove))
}

async fn list(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiQuery(filter): ApiQuery<ListFilter>,
) -> Result<Json<Vec<ExpenseDto>>, ApiError> {
    let expenses = blocking(&state, move |s| {
        ExpenseService::new(&s.storage).list(user.id, &filter)
    })
    .await?;
    Ok(Json(expenses.iter().map(Expense::to_dto).collect()))
}

async fn show(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<ExpenseId>,
) -> Result<Json<ExpenseDto>, ApiError> {
    let expense = blocking(&state, move |s| ExpenseService::new(&s.storage).get(user.id, id)).await?;
    Ok(Json(expense.to_dto()))
}

async fn create(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiJson(dto): ApiJson<ExpenseDto>,
) -> Result<(StatusCode, Json<ExpenseDto>), ApiError> {
    let expense = blocking(&state, move |s| {
        ExpenseService::new(&s.storage).create(user.id, &dto)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(expense.to_dto())))
}

async fn update(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<ExpenseId>,
    ApiJson(dto): ApiJson<ExpenseDto>,
) -> Result<Json<ExpenseDto>, ApiError> {
    let expense = blocking(&state, move |s| {
        ExpenseService::new(&s.storage).update(user.id, id, &dto)
    })
    .await?;
    Ok(Json(expense.to_dto()))
}

async fn remove(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<ExpenseId>,
) -> Result<StatusCode, ApiError> {
    blocking(&state, move |s| ExpenseService::new(&s.storage).delete(user.id, id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
