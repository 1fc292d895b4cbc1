//! Persistence layer: the round store.
//!
//! [`RoundStore`] is the seam between the service and storage. Two
//! backends implement it: [`postgres::PostgresRoundStore`] (JSONB rows in
//! a `rounds` table, one row per round number) and
//! [`memory::MemoryRoundStore`] (process-local, for tests and for running
//! without a database).

pub mod memory;
pub mod models;
pub mod postgres;
#[cfg(test)]
pub(crate) mod unavailable;

use async_trait::async_trait;

use crate::domain::{RoundNumber, RoundRecord, ScoreMap};
use crate::error::LedgerError;

pub use memory::MemoryRoundStore;
pub use postgres::PostgresRoundStore;

/// Whether an upsert created a new round or replaced an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No record existed; one was inserted.
    Created,
    /// An existing record had both score maps replaced.
    Updated,
}

impl UpsertOutcome {
    /// Returns `true` for [`UpsertOutcome::Created`].
    #[must_use]
    pub const fn created(self) -> bool {
        matches!(self, Self::Created)
    }
}

/// Durable collection of [`RoundRecord`]s keyed by round number.
///
/// # Implementation Notes
///
/// - At most one record exists per round number.
/// - [`RoundStore::upsert`] must be atomic: concurrent upserts of the same
///   round create the record exactly once, and the last write wins.
/// - Read failures map to [`LedgerError::StoreUnavailable`], write
///   failures to [`LedgerError::WriteFailed`].
#[async_trait]
pub trait RoundStore: Send + Sync + std::fmt::Debug {
    /// Returns every stored round, ordered by round number.
    async fn find_all(&self) -> Result<Vec<RoundRecord>, LedgerError>;

    /// Returns every stored round number in ascending order.
    async fn list_round_numbers(&self) -> Result<Vec<RoundNumber>, LedgerError>;

    /// Returns the record for `round`, or `None` if it was never stored.
    async fn find_by_round(&self, round: RoundNumber)
    -> Result<Option<RoundRecord>, LedgerError>;

    /// Inserts the round or replaces both score maps of the existing one.
    async fn upsert(
        &self,
        round: RoundNumber,
        main_results: ScoreMap,
        legion_results: ScoreMap,
    ) -> Result<(RoundRecord, UpsertOutcome), LedgerError>;

    /// Checks that the backend is reachable.
    async fn ping(&self) -> Result<(), LedgerError>;
}
