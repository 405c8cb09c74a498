//! Logic Module - Classification & Monitoring
//!
//! - `vessel/` - Vessel status classifier (rules, checks, batch)
//! - `alerts` / `summary` - Outputs for the presentation layer
//! - `feed` / `config` / `monitor` - Polling host around the classifier

// Core classifier
pub mod vessel;

// Outputs
pub mod alerts;
pub mod summary;

// Host plumbing
pub mod feed;
pub mod config;
pub mod monitor;
