//! insurelab-core: synthetic insurance dataset pipeline.
//!
//! Generates four related synthetic datasets (customers, policies,
//! claims, risk indicators) with controlled null injection, cleans them
//! (dedup, categorical normalization, mean imputation, date fallback),
//! and loads them into a SQLite sink — a linear, deterministic batch
//! pipeline: generate → save JSON → ingest → clean → persist.

pub mod clean;
pub mod config;
pub mod dataset;
pub mod error;
pub mod faker;
pub mod generator;
pub mod model;
pub mod pipeline;
pub mod rng;
pub mod store;
pub mod types;
