//! Service layer: business logic orchestration.
//!
//! [`RoundService`] validates input, delegates storage to a
//! [`crate::persistence::RoundStore`], and runs the leaderboard
//! aggregation over the rounds it reads back.

pub mod round_service;

pub use round_service::RoundService;
