//! Route handlers, one module per resource

pub mod activities;
pub mod auth;
pub mod expenses;
pub mod incomes;
pub mod payments;
pub mod savings;
pub mod users;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use super::state::SharedState;

/// All API routes
pub fn routes() -> Router<SharedState> {
    Router::new()
        .route("/health", get(health))
        .merge(auth::routes())
        .merge(users::routes())
        .merge(expenses::routes())
        .merge(incomes::routes())
        .merge(payments::routes())
        .merge(savings::routes())
        .merge(activities::routes())
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
