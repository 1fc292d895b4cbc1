//! Round records and their validated score maps.
//!
//! A [`RoundRecord`] holds two independent [`ScoreMap`]s, one per
//! [`Category`]. Score maps only ever contain non-empty team names and
//! finite scores; malformed entries are rejected when the map is built,
//! whether the data arrives over HTTP or is read back from the store.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::LedgerError;

/// Maximum length of a team name, in characters.
pub const MAX_TEAM_NAME_LEN: usize = 100;

/// Unique identifier of a competition round.
///
/// Acts as the primary key of a [`RoundRecord`] and never changes once
/// the record exists.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
#[schema(value_type = i64)]
pub struct RoundNumber(i64);

impl RoundNumber {
    /// Wraps a raw round number.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the raw round number.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RoundNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RoundNumber {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl std::str::FromStr for RoundNumber {
    type Err = LedgerError;

    /// Parses a path segment such as `"12"`. Anything that is not a plain
    /// base-10 integer (`"12abc"`, `"1.5"`, `""`) is a validation failure.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| LedgerError::Validation(format!("round must be an integer, got {s:?}")))
    }
}

/// Team identifier inside a score map: trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct TeamName(String);

impl TeamName {
    /// Validates and normalizes a raw team name.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Validation`] if the trimmed name is empty or
    /// longer than [`MAX_TEAM_NAME_LEN`] characters.
    pub fn new(raw: &str) -> Result<Self, LedgerError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LedgerError::Validation(
                "team name must not be empty".to_string(),
            ));
        }
        if trimmed.chars().count() > MAX_TEAM_NAME_LEN {
            return Err(LedgerError::Validation(format!(
                "team name exceeds {MAX_TEAM_NAME_LEN} characters: {trimmed:?}"
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the team name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TeamName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single finite score value.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Score(f64);

impl Score {
    /// Validates a raw score.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Validation`] for NaN or infinite values.
    pub fn new(value: f64) -> Result<Self, LedgerError> {
        if value.is_finite() {
            Ok(Self(value))
        } else {
            Err(LedgerError::Validation(format!(
                "score must be a finite number, got {value}"
            )))
        }
    }

    /// Returns the raw score.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }
}

/// Mapping from team to score for one category of one round.
///
/// Serialized as a plain JSON object (`{"Team A": 10, "Team B": 5}`).
/// Deserialization validates every entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "BTreeMap<String, f64>")]
#[schema(value_type = std::collections::HashMap<String, f64>)]
pub struct ScoreMap(BTreeMap<TeamName, Score>);

impl ScoreMap {
    /// Creates an empty score map.
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Iterates over `(team, score)` pairs in team-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&TeamName, Score)> {
        self.0.iter().map(|(team, score)| (team, *score))
    }

    /// Returns the score recorded for `team`, if any.
    #[must_use]
    pub fn get(&self, team: &str) -> Option<Score> {
        self.0.get(team).copied()
    }

    /// Number of teams in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if no team has a score.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<BTreeMap<String, f64>> for ScoreMap {
    type Error = LedgerError;

    fn try_from(raw: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        let mut map = BTreeMap::new();
        for (name, value) in raw {
            let team = TeamName::new(&name)?;
            let score = Score::new(value)
                .map_err(|e| LedgerError::Validation(format!("team {team}: {e}")))?;
            if map.insert(team.clone(), score).is_some() {
                return Err(LedgerError::Validation(format!(
                    "duplicate team name after trimming: {team:?}"
                )));
            }
        }
        Ok(Self(map))
    }
}

impl<'a> TryFrom<&[(&'a str, f64)]> for ScoreMap {
    type Error = LedgerError;

    fn try_from(pairs: &[(&'a str, f64)]) -> Result<Self, Self::Error> {
        let raw: BTreeMap<String, f64> = pairs
            .iter()
            .map(|(team, score)| ((*team).to_string(), *score))
            .collect();
        if raw.len() != pairs.len() {
            return Err(LedgerError::Validation(
                "duplicate team name in score list".to_string(),
            ));
        }
        Self::try_from(raw)
    }
}

/// The two parallel leaderboards a round contributes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// The main competition.
    Main,
    /// The Legion competition.
    Legion,
}

/// Persisted scores for one round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RoundRecord {
    /// Round number (primary key).
    pub round: RoundNumber,
    /// Main-category scores.
    #[serde(rename = "mainresults")]
    pub main_results: ScoreMap,
    /// Legion-category scores.
    #[serde(rename = "Legion")]
    pub legion_results: ScoreMap,
    /// When the round was first stored.
    pub created_at: DateTime<Utc>,
    /// When the score maps were last replaced.
    pub updated_at: DateTime<Utc>,
}

impl RoundRecord {
    /// Creates a freshly stored record; both timestamps are `now`.
    #[must_use]
    pub fn new(round: RoundNumber, main_results: ScoreMap, legion_results: ScoreMap) -> Self {
        let now = Utc::now();
        Self {
            round,
            main_results,
            legion_results,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the score map for `category`.
    #[must_use]
    pub const fn results(&self, category: Category) -> &ScoreMap {
        match category {
            Category::Main => &self.main_results,
            Category::Legion => &self.legion_results,
        }
    }

    /// Replaces both score maps wholesale and bumps `updated_at`.
    pub fn replace_results(&mut self, main_results: ScoreMap, legion_results: ScoreMap) {
        self.main_results = main_results;
        self.legion_results = legion_results;
        self.updated_at = Utc::now();
    }
}
