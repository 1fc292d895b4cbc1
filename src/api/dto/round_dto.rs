//! Round DTOs for the upsert endpoint.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{RoundNumber, ScoreMap};

/// Shapes a front end may send for the round number.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawRound {
    Integer(i64),
    Float(f64),
    Text(String),
}

/// Converts `value` to a round number if it is a whole number within range.
fn integral(value: f64) -> Option<RoundNumber> {
    // i64::MAX as f64 rounds up to 2^63, which is out of range.
    let in_range = value >= i64::MIN as f64 && value < i64::MAX as f64;
    let whole = value.is_finite() && value.fract() == 0.0;
    (whole && in_range).then(|| RoundNumber::new(value as i64))
}

/// Accepts `3`, `3.0`, and `"3"` for the round number. Fractions,
/// non-numeric strings, and non-finite values are rejected.
fn lenient_round<'de, D>(deserializer: D) -> Result<RoundNumber, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = RawRound::deserialize(deserializer)
        .map_err(|_| de::Error::custom("round must be an integer or a numeric string"))?;
    match raw {
        RawRound::Integer(value) => Ok(RoundNumber::new(value)),
        RawRound::Float(value) => integral(value)
            .ok_or_else(|| de::Error::custom(format!("round must be an integer, got {value}"))),
        RawRound::Text(text) => text
            .parse::<RoundNumber>()
            .ok()
            .or_else(|| text.trim().parse::<f64>().ok().and_then(integral))
            .ok_or_else(|| de::Error::custom(format!("round must be an integer, got {text:?}"))),
    }
}

/// Request body for `POST /round`.
///
/// All three fields are required; score maps may be empty objects.
/// `round` may arrive as a whole number (`3` or `3.0`) or a numeric string.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpsertRoundRequest {
    /// Round number to create or replace.
    #[serde(deserialize_with = "lenient_round")]
    pub round: RoundNumber,
    /// Main-category scores, team name to score.
    pub mainresults: ScoreMap,
    /// Legion-category scores, team name to score.
    #[serde(rename = "Legion")]
    pub legion: ScoreMap,
}

/// Response body carrying a single human-readable message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Localized outcome text.
    pub message: String,
}
