//! Domain layer: round records, validated score maps, and the
//! leaderboard aggregation engine.
//!
//! Everything here is pure and synchronous. Persistence lives in
//! [`crate::persistence`]; orchestration lives in [`crate::service`].

pub mod leaderboard;
pub mod round;

pub use leaderboard::{LeaderboardEntry, Totals, compute_totals};
pub use round::{Category, RoundNumber, RoundRecord, Score, ScoreMap, TeamName};
