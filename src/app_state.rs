//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::messages::Locale;
use crate::service::RoundService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
///
/// Built once at startup; the store connection it wraps is created on
/// first use and reused by every request afterwards.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Round service for all business logic.
    pub round_service: Arc<RoundService>,
    /// Language for write responses.
    pub locale: Locale,
}

impl AppState {
    /// Creates application state around a round service.
    #[must_use]
    pub fn new(round_service: Arc<RoundService>, locale: Locale) -> Self {
        Self {
            round_service,
            locale,
        }
    }
}
