//! # Match Analyzer
//!
//! Hell Let Loose match roster analyzer. The server export lists each
//! participant's kills and deaths per weapon but not their team or role;
//! both are inferred from the weapons and rolled up into team statistics.
//!
//! ## Architecture
//!
//! - **models**: Core data structures (participants, match reports, history)
//! - **catalog**: Weapon catalog (side, faction and role per weapon)
//! - **classify**: Side/role inference and the disambiguation policy
//! - **calculate**: Match aggregation, ratios and side comparison
//! - **ingest**: Roster CSV reading and the per-match pipeline
//! - **storage**: Filesystem data lake operations (results, JSONL, Parquet)
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod catalog;
pub mod classify;
pub mod config;
pub mod ingest;
pub mod models;
pub mod storage;

pub use models::*;
