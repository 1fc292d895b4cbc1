//! Ledger error types with HTTP status code mapping.
//!
//! [`LedgerError`] is the central error type for the library. Handlers
//! wrap it in an [`ApiError`], which adds the endpoint-specific headline
//! and renders the JSON error body.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::RoundNumber;

/// Headline for lookups of a round that was never stored.
const ROUND_NOT_FOUND: &str = "Round not found";

/// JSON error response body.
///
/// ```json
/// { "message": "Error fetching rounds", "error": "store unavailable: connection refused" }
/// ```
///
/// `error` is omitted when there is no underlying failure to report
/// (a missing round, for instance).
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable headline for the failed operation.
    pub message: String,
    /// Underlying error detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Failure taxonomy shared by the store, service and API layers.
///
/// | Variant            | HTTP Status               |
/// |--------------------|---------------------------|
/// | `StoreUnavailable` | 500 Internal Server Error |
/// | `WriteFailed`      | 500 Internal Server Error |
/// | `RoundNotFound`    | 404 Not Found             |
/// | `Validation`       | 400 Bad Request           |
/// | `Aggregation`      | 500 Internal Server Error |
/// | `Config`           | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// The store could not be reached or a read failed.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    /// No record exists for the requested round.
    #[error("round {0} not found")]
    RoundNotFound(RoundNumber),

    /// An insert or update was rejected or failed.
    #[error("write failed: {0}")]
    WriteFailed(String),

    /// Input was missing or malformed.
    #[error("invalid request: {0}")]
    Validation(String),

    /// Stored scores could not be combined into finite totals.
    #[error("aggregation failed: {0}")]
    Aggregation(String),

    /// Startup configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl LedgerError {
    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::RoundNotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::StoreUnavailable(_)
            | Self::WriteFailed(_)
            | Self::Aggregation(_)
            | Self::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Attaches the headline shown to the caller for this endpoint.
    #[must_use]
    pub fn during(self, headline: impl Into<String>) -> ApiError {
        ApiError {
            headline: headline.into(),
            source: self,
        }
    }

    fn default_headline(&self) -> &'static str {
        match self {
            Self::StoreUnavailable(_) => "Error reading rounds",
            Self::RoundNotFound(_) => ROUND_NOT_FOUND,
            Self::WriteFailed(_) => "Error saving round",
            Self::Validation(_) => "Invalid request",
            Self::Aggregation(_) => "Error calculating totals",
            Self::Config(_) => "Server misconfigured",
        }
    }
}

impl From<JsonRejection> for LedgerError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

/// A [`LedgerError`] paired with the headline of the failing endpoint.
#[derive(Debug)]
pub struct ApiError {
    headline: String,
    source: LedgerError,
}

impl ApiError {
    /// The underlying error.
    #[must_use]
    pub const fn source(&self) -> &LedgerError {
        &self.source
    }

    /// The headline rendered as `message`.
    #[must_use]
    pub fn headline(&self) -> &str {
        &self.headline
    }
}

impl From<LedgerError> for ApiError {
    fn from(source: LedgerError) -> Self {
        let headline = source.default_headline();
        source.during(headline)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.source.status_code();
        let body = match &self.source {
            LedgerError::RoundNotFound(_) => ErrorResponse {
                message: ROUND_NOT_FOUND.to_string(),
                error: None,
            },
            other => ErrorResponse {
                message: self.headline,
                error: Some(other.to_string()),
            },
        };

        if status.is_server_error() {
            tracing::error!(%status, error = %self.source, "request failed");
        } else {
            tracing::debug!(%status, error = %self.source, "request rejected");
        }

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
            panic!("readable body");
        };
        serde_json::from_slice(&bytes).unwrap_or_default()
    }

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(
            LedgerError::StoreUnavailable("down".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            LedgerError::WriteFailed("nope".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            LedgerError::RoundNotFound(RoundNumber::new(4)).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            LedgerError::Validation("bad".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            LedgerError::Aggregation("inf".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn server_error_carries_headline_and_detail() {
        let response = LedgerError::StoreUnavailable("connection refused".into())
            .during("Error fetching rounds")
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["message"], "Error fetching rounds");
        assert_eq!(json["error"], "store unavailable: connection refused");
    }

    #[tokio::test]
    async fn not_found_omits_error_detail() {
        let response = LedgerError::RoundNotFound(RoundNumber::new(9))
            .during("Error fetching round")
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = body_json(response).await;
        assert_eq!(json["message"], "Round not found");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn default_headline_is_used_without_context() {
        let api: ApiError = LedgerError::Validation("missing round".into()).into();
        assert_eq!(api.headline(), "Invalid request");
        assert!(matches!(api.source(), LedgerError::Validation(_)));
    }
}
