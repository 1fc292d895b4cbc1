//! Round handlers: list, fetch, and upsert.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{MessageResponse, UpsertRoundRequest};
use crate::app_state::AppState;
use crate::domain::{RoundNumber, RoundRecord};
use crate::error::{ApiError, ErrorResponse, LedgerError};
use crate::persistence::UpsertOutcome;

/// `GET /rounds` — List stored round numbers.
///
/// # Errors
///
/// Returns [`ApiError`] (500) if the store cannot be read.
#[utoipa::path(
    get,
    path = "/rounds",
    tag = "Rounds",
    summary = "List rounds",
    description = "Returns every stored round number in ascending order.",
    responses(
        (status = 200, description = "Round numbers", body = Vec<i64>),
        (status = 500, description = "Store unavailable", body = ErrorResponse),
    )
)]
pub async fn list_rounds(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let rounds = state
        .round_service
        .list_rounds()
        .await
        .map_err(|e| e.during("Error fetching rounds"))?;
    Ok(Json(rounds))
}

/// `GET /round/{round}` — Fetch one round's raw scores.
///
/// # Errors
///
/// Returns [`ApiError`] with 400 for a non-integer round, 404 if the round
/// was never stored, and 500 if the store cannot be read.
#[utoipa::path(
    get,
    path = "/round/{round}",
    tag = "Rounds",
    summary = "Get round scores",
    description = "Returns the main and Legion score maps stored for one round.",
    params(
        ("round" = i64, Path, description = "Round number"),
    ),
    responses(
        (status = 200, description = "Round scores", body = RoundRecord),
        (status = 400, description = "Round is not an integer", body = ErrorResponse),
        (status = 404, description = "Round not found", body = ErrorResponse),
        (status = 500, description = "Store unavailable", body = ErrorResponse),
    )
)]
pub async fn get_round(
    State(state): State<AppState>,
    Path(raw_round): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    const HEADLINE: &str = "Error fetching round";

    let round: RoundNumber = raw_round.parse().map_err(|e: LedgerError| e.during(HEADLINE))?;
    let record = state
        .round_service
        .get_round(round)
        .await
        .map_err(|e| e.during(HEADLINE))?;
    Ok(Json(record))
}

/// `POST /round` — Create a round or replace its scores.
///
/// # Errors
///
/// Returns [`ApiError`] with 400 for a missing or malformed body and 500
/// if the write fails. Both carry the localized failure headline.
#[utoipa::path(
    post,
    path = "/round",
    tag = "Rounds",
    summary = "Upsert round scores",
    description = "Stores both score maps for a round. An existing round has both maps replaced wholesale; prior values are not kept.",
    request_body = UpsertRoundRequest,
    responses(
        (status = 201, description = "Round created", body = MessageResponse),
        (status = 200, description = "Round updated", body = MessageResponse),
        (status = 400, description = "Missing or malformed fields", body = ErrorResponse),
        (status = 500, description = "Write failed", body = ErrorResponse),
    )
)]
pub async fn upsert_round(
    State(state): State<AppState>,
    body: Result<Json<UpsertRoundRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let headline = state.locale.write_failed();

    let Json(req) = body.map_err(|e| LedgerError::from(e).during(headline))?;
    let outcome = state
        .round_service
        .upsert_round(req.round, req.mainresults, req.legion)
        .await
        .map_err(|e| e.during(headline))?;

    let response = match outcome {
        UpsertOutcome::Created => (
            StatusCode::CREATED,
            Json(MessageResponse {
                message: state.locale.round_created(req.round),
            }),
        ),
        UpsertOutcome::Updated => (
            StatusCode::OK,
            Json(MessageResponse {
                message: state.locale.round_updated(req.round),
            }),
        ),
    };
    Ok(response)
}

/// Round routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/rounds", get(list_rounds))
        .route("/round", post(upsert_round))
        .route("/round/{round}", get(get_round))
}
