//! Round store that is never reachable, for exercising failure paths.

use async_trait::async_trait;

use super::{RoundStore, UpsertOutcome};
use crate::domain::{RoundNumber, RoundRecord, ScoreMap};
use crate::error::LedgerError;

/// Detail carried by every [`UnavailableRoundStore`] failure.
pub(crate) const REFUSED: &str = "connection refused";

/// Store whose every call fails with [`LedgerError::StoreUnavailable`].
#[derive(Debug)]
pub(crate) struct UnavailableRoundStore;

fn refused<T>() -> Result<T, LedgerError> {
    Err(LedgerError::StoreUnavailable(REFUSED.into()))
}

#[async_trait]
impl RoundStore for UnavailableRoundStore {
    async fn find_all(&self) -> Result<Vec<RoundRecord>, LedgerError> {
        refused()
    }

    async fn list_round_numbers(&self) -> Result<Vec<RoundNumber>, LedgerError> {
        refused()
    }

    async fn find_by_round(
        &self,
        _round: RoundNumber,
    ) -> Result<Option<RoundRecord>, LedgerError> {
        refused()
    }

    async fn upsert(
        &self,
        _round: RoundNumber,
        _main_results: ScoreMap,
        _legion_results: ScoreMap,
    ) -> Result<(RoundRecord, UpsertOutcome), LedgerError> {
        refused()
    }

    async fn ping(&self) -> Result<(), LedgerError> {
        refused()
    }
}
