//! `/api/auth`

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};

use crate::api::error::{ApiError, ApiJson};
use crate::api::extract::AuthUser;
use crate::api::state::{blocking, SharedState};
use crate::models::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest};
use crate::services::AuthService;

pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
}

async fn register(
    State(state): State<SharedState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let user = blocking(&state, move |s| {
        AuthService::new(&s.storage, &s.sessions).register(&request)
    })
    .await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(format!(
            "User {} registered successfully.",
            user.email
        ))),
    ))
}

async fn login(
    State(state): State<SharedState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let session = blocking(&state, move |s| {
        AuthService::new(&s.storage, &s.sessions).login(&request)
    })
    .await?;
    Ok(Json(LoginResponse {
        token: session.token,
        expires_at: Some(session.expires_at),
    }))
}

async fn logout(
    State(state): State<SharedState>,
    user: AuthUser,
) -> Result<Json<MessageResponse>, ApiError> {
    blocking(&state, move |s| {
        AuthService::new(&s.storage, &s.sessions).logout(&user.session)
    })
    .await?;
    Ok(Json(MessageResponse::new("Logged out successfully.")))
}
