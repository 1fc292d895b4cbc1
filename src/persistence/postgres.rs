//! PostgreSQL implementation of the round store.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;

use super::models::RoundRow;
use super::{RoundStore, UpsertOutcome};
use crate::config::LedgerConfig;
use crate::domain::{RoundNumber, RoundRecord, ScoreMap};
use crate::error::LedgerError;

/// PostgreSQL-backed round store using `sqlx::PgPool`.
///
/// The pool is created lazily: no connection is opened until the first
/// query, and connections are then reused for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct PostgresRoundStore {
    pool: PgPool,
}

impl PostgresRoundStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Builds a lazily-connecting pool from the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Config`] if `DATABASE_URL` cannot be parsed.
    pub fn connect_lazy(config: &LedgerConfig) -> Result<Self, LedgerError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(config.database_connect_timeout())
            .idle_timeout(Some(Duration::from_secs(300)))
            .connect_lazy(&config.database_url)
            .map_err(|e| LedgerError::Config(format!("DATABASE_URL: {e}")))?;
        Ok(Self::new(pool))
    }

    /// Applies the embedded schema migrations.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::StoreUnavailable`] if the database cannot be
    /// reached or a migration fails.
    pub async fn migrate(&self) -> Result<(), LedgerError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| LedgerError::StoreUnavailable(e.to_string()))
    }
}

#[async_trait]
impl RoundStore for PostgresRoundStore {
    async fn find_all(&self) -> Result<Vec<RoundRecord>, LedgerError> {
        let rows = sqlx::query_as::<_, RoundRow>(
            "SELECT round, main_results, legion_results, created_at, updated_at \
             FROM rounds ORDER BY round ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| LedgerError::StoreUnavailable(e.to_string()))?;

        Ok(rows.into_iter().map(RoundRecord::from).collect())
    }

    async fn list_round_numbers(&self) -> Result<Vec<RoundNumber>, LedgerError> {
        let rounds = sqlx::query_scalar::<_, i64>("SELECT round FROM rounds ORDER BY round ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| LedgerError::StoreUnavailable(e.to_string()))?;

        Ok(rounds.into_iter().map(RoundNumber::new).collect())
    }

    async fn find_by_round(
        &self,
        round: RoundNumber,
    ) -> Result<Option<RoundRecord>, LedgerError> {
        let row = sqlx::query_as::<_, RoundRow>(
            "SELECT round, main_results, legion_results, created_at, updated_at \
             FROM rounds WHERE round = $1",
        )
        .bind(round.get())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| LedgerError::StoreUnavailable(e.to_string()))?;

        Ok(row.map(RoundRecord::from))
    }

    async fn upsert(
        &self,
        round: RoundNumber,
        main_results: ScoreMap,
        legion_results: ScoreMap,
    ) -> Result<(RoundRecord, UpsertOutcome), LedgerError> {
        // `xmax = 0` holds only for a freshly inserted tuple, which tells
        // the two ON CONFLICT branches apart in a single statement.
        let (created_at, updated_at, inserted) =
            sqlx::query_as::<_, (DateTime<Utc>, DateTime<Utc>, bool)>(
                "INSERT INTO rounds (round, main_results, legion_results) \
                 VALUES ($1, $2, $3) \
                 ON CONFLICT (round) DO UPDATE \
                 SET main_results = EXCLUDED.main_results, \
                     legion_results = EXCLUDED.legion_results, \
                     updated_at = now() \
                 RETURNING created_at, updated_at, (xmax = 0) AS inserted",
            )
            .bind(round.get())
            .bind(Json(&main_results))
            .bind(Json(&legion_results))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| LedgerError::WriteFailed(e.to_string()))?;

        let outcome = if inserted {
            UpsertOutcome::Created
        } else {
            UpsertOutcome::Updated
        };
        let record = RoundRecord {
            round,
            main_results,
            legion_results,
            created_at,
            updated_at,
        };
        Ok((record, outcome))
    }

    async fn ping(&self) -> Result<(), LedgerError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| LedgerError::StoreUnavailable(e.to_string()))
    }
}
