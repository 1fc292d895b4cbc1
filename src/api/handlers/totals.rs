//! Leaderboard totals handler.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::app_state::AppState;
use crate::domain::Totals;
use crate::error::{ApiError, ErrorResponse};

/// `GET /totals` — Ranked main and Legion leaderboards.
///
/// # Errors
///
/// Returns [`ApiError`] (500) if the store cannot be read or a total
/// overflows.
#[utoipa::path(
    get,
    path = "/totals",
    tag = "Leaderboards",
    summary = "Get leaderboards",
    description = "Sums every team's scores across all rounds, per category, and ranks teams by descending total. Equal totals are ordered by team name.",
    responses(
        (status = 200, description = "Ranked leaderboards", body = Totals),
        (status = 500, description = "Store unavailable or total not finite", body = ErrorResponse),
    )
)]
pub async fn get_totals(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let totals = state
        .round_service
        .compute_totals()
        .await
        .map_err(|e| e.during("Error calculating totals"))?;
    Ok(Json(totals))
}

/// Leaderboard routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/totals", get(get_totals))
}
