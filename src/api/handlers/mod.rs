//! REST endpoint handlers organized by resource.

pub mod rounds;
pub mod system;
pub mod totals;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(rounds::routes())
        .merge(totals::routes())
        .merge(system::routes())
}
