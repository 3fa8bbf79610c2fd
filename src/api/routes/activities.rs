//! `/api/activities`

use axum::{extract::State, routing::get, Json, Router};
use serde::Deserialize;

use crate::api::error::{ApiError, ApiQuery};
use crate::api::extract::AuthUser;
use crate::api::state::{blocking, SharedState};
use crate::models::ActivityDto;
use crate::services::ActivityService;

pub fn routes() -> Router<SharedState> {
    Router::new().route("/api/activities/recent", get(recent))
}

#[derive(Debug, Deserialize)]
struct RecentQuery {
    limit: Option<usize>,
}

async fn recent(
    State(state): State<SharedState>,
    user: AuthUser,
    ApiQuery(query): ApiQuery<RecentQuery>,
) -> Result<Json<Vec<ActivityDto>>, ApiError> {
    let entries = blocking(&state, move |s| {
        let limit = query
            .limit
            .unwrap_or(s.settings.server.recent_activity_limit);
        ActivityService::new(&s.storage).recent(user.id, limit)
    })
    .await?;
    Ok(Json(entries))
}
