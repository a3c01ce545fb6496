//! # TCG Tracker
//!
//! Trading card game match tracking with cross-project performance analytics.
//!
//! ## Architecture
//!
//! - **models**: Match records, projects, and report types
//! - **calculate**: The analytics aggregation engine
//! - **storage**: JSONL data lake and the record store seam
//! - **api**: REST reporting endpoint
//! - **config**: Configuration loading and validation

pub mod api;
pub mod calculate;
pub mod config;
pub mod models;
pub mod storage;

pub use models::*;
