//! # round-ledger
//!
//! REST API that stores per-round competition scores for two parallel
//! leaderboards ("main" and "Legion") and serves running totals.
//!
//! Each round is one record holding two team→score maps. Totals are
//! recomputed from every stored round on each request and ranked by
//! descending score, ties broken by team name.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── RoundService (service/)
//!     ├── Leaderboard aggregation (domain/)
//!     │
//!     └── RoundStore (persistence/)
//!           ├── PostgreSQL
//!           └── in-memory
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod messages;
pub mod persistence;
pub mod service;
