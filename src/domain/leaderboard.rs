//! Leaderboard aggregation over all stored rounds.
//!
//! Totals are recomputed from scratch on every request: each category is
//! summed per team across every [`RoundRecord`], then sorted by descending
//! total. Teams with equal totals are ordered by ascending name so the
//! output is fully deterministic for a given input set. A total that
//! overflows to infinity is reported as an aggregation failure instead of
//! being ranked.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::round::{Category, RoundRecord, TeamName};
use crate::error::LedgerError;

/// One row of a ranked leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardEntry {
    /// 1-based position in the leaderboard.
    pub rank: u32,
    /// Team name.
    pub team: String,
    /// Score summed across all rounds.
    pub score: f64,
}

/// Ranked leaderboards for both categories.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Totals {
    /// Main-category leaderboard.
    pub main: Vec<LeaderboardEntry>,
    /// Legion-category leaderboard.
    pub legion: Vec<LeaderboardEntry>,
}

/// Sums every team's scores in `category` across `records`.
///
/// A team missing from a round contributes nothing for that round.
#[must_use]
pub fn accumulate<'a, I>(records: I, category: Category) -> HashMap<TeamName, f64>
where
    I: IntoIterator<Item = &'a RoundRecord>,
{
    let mut totals: HashMap<TeamName, f64> = HashMap::new();
    for record in records {
        for (team, score) in record.results(category).iter() {
            *totals.entry(team.clone()).or_insert(0.0) += score.get();
        }
    }
    totals
}

/// Orders per-team totals into a leaderboard.
///
/// Sorted by descending score, then ascending team name. Ranks are the
/// 1-based positions in that order, so they are contiguous and never shared.
#[must_use]
pub fn rank(totals: HashMap<TeamName, f64>) -> Vec<LeaderboardEntry> {
    let mut rows: Vec<(TeamName, f64)> = totals.into_iter().collect();
    rows.sort_by(|(team_a, score_a), (team_b, score_b)| {
        score_b
            .total_cmp(score_a)
            .then_with(|| team_a.cmp(team_b))
    });

    rows.into_iter()
        .zip(1u32..)
        .map(|((team, score), rank)| LeaderboardEntry {
            rank,
            team: team.to_string(),
            score,
        })
        .collect()
}

/// Sums and ranks one category, rejecting totals that are not finite.
fn board(
    records: &[RoundRecord],
    category: Category,
) -> Result<Vec<LeaderboardEntry>, LedgerError> {
    let totals = accumulate(records, category);
    if let Some((team, total)) = totals.iter().find(|(_, total)| !total.is_finite()) {
        return Err(LedgerError::Aggregation(format!(
            "{category:?} total for team {team} is {total}"
        )));
    }
    Ok(rank(totals))
}

/// Computes both leaderboards from the full set of rounds.
///
/// # Errors
///
/// Returns [`LedgerError::Aggregation`] if any team's total in either
/// category overflows to a non-finite value.
pub fn compute_totals(records: &[RoundRecord]) -> Result<Totals, LedgerError> {
    Ok(Totals {
        main: board(records, Category::Main)?,
        legion: board(records, Category::Legion)?,
    })
}
