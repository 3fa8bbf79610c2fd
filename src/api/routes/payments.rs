//! `/api/v1/payments`
//!
//! Payments are returned with their expense embedded. Deleting a payment
//! answers 200 with the removed payment.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::api::error::{ApiError, ApiJson, ApiPath, ApiQuery};
use crate::api::extract::AuthUser;
use crate::api::state::{blocking, SharedState};
use crate::models::{ListFilter, PaymentDto, PaymentId};
use crate::services::PaymentService;

pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/api/v1/payments", get(list).post(create))
        .route("/api/v1/payments/{id}", get(show).put(update).delete(remove))
}

async fn list(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiQuery(filter): ApiQuery<ListFilter>,
) -> Result<Json<Vec<PaymentDto>>, ApiError> {
    let payments: Vec<PaymentDto> = blocking(&state, move |s| {
        let service = PaymentService::new(&s.storage);
        service
            .list(user.id, &filter)?
            .iter()
            .map(|p| service.to_dto(p))
            .collect()
    })
    .await?;
    Ok(Json(payments))
}

async fn show(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<PaymentId>,
) -> Result<Json<PaymentDto>, ApiError> {
    let payment = blocking(&state, move |s| {
        let service = PaymentService::new(&s.storage);
        service.to_dto(&service.get(user.id, id)?)
    })
    .await?;
    Ok(Json(payment))
}

async fn create(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiJson(dto): ApiJson<PaymentDto>,
) -> Result<(StatusCode, Json<PaymentDto>), ApiError> {
    let payment = blocking(&state, move |s| {
        let service = PaymentService::new(&s.storage);
        service.to_dto(&service.create(user.id, &dto)?)
    })
    .await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

async fn update(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<PaymentId>,
    ApiJson(dto): ApiJson<PaymentDto>,
) -> Result<Json<PaymentDto>, ApiError> {
    let payment = blocking(&state, move |s| {
        let service = PaymentService::new(&s.storage);
        service.to_dto(&service.update(user.id, id, &dto)?)
    })
    .await?;
    Ok(Json(payment))
}

async fn remove(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiPath(id): ApiPath<PaymentId>,
) -> Result<Json<PaymentDto>, ApiError> {
    let payment = blocking(&state, move |s| {
        let service = PaymentService::new(&s.storage);
        service.to_dto(&service.delete(user.id, id)?)
    })
    .await?;
    Ok(Json(payment))
}
