//! Round service: list, fetch, upsert, and aggregate rounds.

use std::sync::Arc;

use crate::domain::{RoundNumber, RoundRecord, ScoreMap, Totals, compute_totals};
use crate::error::LedgerError;
use crate::persistence::{RoundStore, UpsertOutcome};

/// Orchestration layer for all round operations.
///
/// Stateless coordinator over a shared [`RoundStore`] handle. Every
/// operation is a single store call followed, for totals, by an
/// in-memory aggregation; nothing is cached between requests.
#[derive(Debug, Clone)]
pub struct RoundService {
    store: Arc<dyn RoundStore>,
}

impl RoundService {
    /// Creates a new `RoundService`.
    #[must_use]
    pub fn new(store: Arc<dyn RoundStore>) -> Self {
        Self { store }
    }

    /// Lists every stored round number in ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::StoreUnavailable`] if the store read fails.
    pub async fn list_rounds(&self) -> Result<Vec<RoundNumber>, LedgerError> {
        let rounds = self.store.list_round_numbers().await?;
        tracing::debug!(count = rounds.len(), "rounds listed");
        Ok(rounds)
    }

    /// Fetches the stored scores for one round.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::RoundNotFound`] if the round was never stored,
    /// or [`LedgerError::StoreUnavailable`] if the store read fails.
    pub async fn get_round(&self, round: RoundNumber) -> Result<RoundRecord, LedgerError> {
        self.store
            .find_by_round(round)
            .await?
            .ok_or(LedgerError::RoundNotFound(round))
    }

    /// Computes the main and Legion leaderboards over all rounds.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::StoreUnavailable`] if the store read fails,
    /// or [`LedgerError::Aggregation`] if a total is not finite.
    pub async fn compute_totals(&self) -> Result<Totals, LedgerError> {
        let records = self.store.find_all().await?;
        let totals = compute_totals(&records)?;
        tracing::debug!(
            rounds = records.len(),
            main_teams = totals.main.len(),
            legion_teams = totals.legion.len(),
            "totals computed"
        );
        Ok(totals)
    }

    /// Creates the round or replaces both of its score maps.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::WriteFailed`] if the store rejects the write.
    /// Store read failures during the upsert are reported the same way.
    pub async fn upsert_round(
        &self,
        round: RoundNumber,
        main_results: ScoreMap,
        legion_results: ScoreMap,
    ) -> Result<UpsertOutcome, LedgerError> {
        let main_teams = main_results.len();
        let legion_teams = legion_results.len();

        let (_, outcome) = self
            .store
            .upsert(round, main_results, legion_results)
            .await
            .map_err(|e| match e {
                LedgerError::StoreUnavailable(msg) => LedgerError::WriteFailed(msg),
                other => other,
            })?;

        tracing::info!(
            %round,
            created = outcome.created(),
            main_teams,
            legion_teams,
            "round upserted"
        );
        Ok(outcome)
    }

    /// Reports whether the store is reachable.
    pub async fn store_healthy(&self) -> bool {
        match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "store health check failed");
                false
            }
        }
    }
}
