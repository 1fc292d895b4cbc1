//! In-process round store.
//!
//! [`MemoryRoundStore`] keeps all rounds in a `BTreeMap` behind a
//! [`tokio::sync::RwLock`]. Reads share the lock; an upsert holds the
//! write lock for its whole lookup-and-write, which makes it atomic.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{RoundStore, UpsertOutcome};
use crate::domain::{RoundNumber, RoundRecord, ScoreMap};
use crate::error::LedgerError;

/// Round store backed by process memory. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemoryRoundStore {
    rounds: RwLock<BTreeMap<RoundNumber, RoundRecord>>,
}

impl MemoryRoundStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored rounds.
    pub async fn len(&self) -> usize {
        self.rounds.read().await.len()
    }
}

#[async_trait]
impl RoundStore for MemoryRoundStore {
    async fn find_all(&self) -> Result<Vec<RoundRecord>, LedgerError> {
        Ok(self.rounds.read().await.values().cloned().collect())
    }

    async fn list_round_numbers(&self) -> Result<Vec<RoundNumber>, LedgerError> {
        Ok(self.rounds.read().await.keys().copied().collect())
    }

    async fn find_by_round(
        &self,
        round: RoundNumber,
    ) -> Result<Option<RoundRecord>, LedgerError> {
        Ok(self.rounds.read().await.get(&round).cloned())
    }

    async fn upsert(
        &self,
        round: RoundNumber,
        main_results: ScoreMap,
        legion_results: ScoreMap,
    ) -> Result<(RoundRecord, UpsertOutcome), LedgerError> {
        let mut map = self.rounds.write().await;
        if let Some(existing) = map.get_mut(&round) {
            existing.replace_results(main_results, legion_results);
            return Ok((existing.clone(), UpsertOutcome::Updated));
        }

        let record = RoundRecord::new(round, main_results, legion_results);
        map.insert(round, record.clone());
        Ok((record, UpsertOutcome::Created))
    }

    async fn ping(&self) -> Result<(), LedgerError> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn scores(pairs: &[(&str, f64)]) -> ScoreMap {
        let Ok(map) = ScoreMap::try_from(pairs) else {
            panic!("valid score map");
        };
        map
    }

    #[tokio::test]
    async fn upsert_creates_then_updates() {
        let store = MemoryRoundStore::new();
        let round = RoundNumber::new(1);

        let Ok((_, first)) = store
            .upsert(round, scores(&[("A", 10.0)]), scores(&[]))
            .await
        else {
            panic!("first upsert failed");
        };
        assert_eq!(first, UpsertOutcome::Created);

        let Ok((record, second)) = store
            .upsert(round, scores(&[("B", 2.0)]), scores(&[("X", 1.0)]))
            .await
        else {
            panic!("second upsert failed");
        };
        assert_eq!(second, UpsertOutcome::Updated);
        assert!(record.main_results.get("A").is_none());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn find_by_round_missing_is_none() {
        let store = MemoryRoundStore::new();
        let found = store.find_by_round(RoundNumber::new(7)).await;
        assert!(matches!(found, Ok(None)));
    }

    #[tokio::test]
    async fn round_numbers_are_sorted() {
        let store = MemoryRoundStore::new();
        for n in [3, 1, 2] {
            let _ = store
                .upsert(RoundNumber::new(n), ScoreMap::new(), ScoreMap::new())
                .await;
        }
        let Ok(rounds) = store.list_round_numbers().await else {
            panic!("list failed");
        };
        assert_eq!(
            rounds,
            vec![RoundNumber::new(1), RoundNumber::new(2), RoundNumber::new(3)]
        );
    }

    #[tokio::test]
    async fn concurrent_upserts_create_exactly_once() {
        let store = Arc::new(MemoryRoundStore::new());
        let round = RoundNumber::new(42);

        let handles: Vec<_> = (0..16_i32)
            .map(|i| {
                let store = Arc::clone(&store);
                tokio::spawn(async move {
                    store
                        .upsert(round, scores(&[("A", f64::from(i))]), ScoreMap::new())
                        .await
                        .map(|(_, outcome)| outcome)
                })
            })
            .collect();

        let mut created = 0;
        for handle in handles {
            if let Ok(Ok(UpsertOutcome::Created)) = handle.await {
                created += 1;
            }
        }
        assert_eq!(created, 1);
        assert_eq!(store.len().await, 1);
    }
}
