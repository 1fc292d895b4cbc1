//! Database row models for the `rounds` table.

use chrono::{DateTime, Utc};
use sqlx::types::Json;

use crate::domain::{RoundNumber, RoundRecord, ScoreMap};

/// A row from the `rounds` table.
///
/// Score maps are stored as JSONB objects and re-validated when decoded,
/// so a hand-edited row with a blank team name or a non-numeric score
/// surfaces as a read error instead of reaching the aggregation.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RoundRow {
    /// Round number (primary key).
    pub round: i64,
    /// Main-category scores.
    pub main_results: Json<ScoreMap>,
    /// Legion-category scores.
    pub legion_results: Json<ScoreMap>,
    /// First insert timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<RoundRow> for RoundRecord {
    fn from(row: RoundRow) -> Self {
        Self {
            round: RoundNumber::new(row.round),
            main_results: row.main_results.0,
            legion_results: row.legion_results.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
