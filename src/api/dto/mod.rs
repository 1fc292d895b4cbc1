//! Data Transfer Objects for REST request/response serialization.
//!
//! Field names mirror the JSON the scoreboard front end already sends
//! (`mainresults`, `Legion`).

pub mod round_dto;

pub use round_dto::*;
