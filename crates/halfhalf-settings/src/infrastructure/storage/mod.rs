//! Storage infrastructure: configuration file and last submitted snapshot.
//!
//! - `config`          reads the TOML configuration from the platform config
//!   directory and falls back to defaults on first run.
//! - `snapshot_store`  keeps the snapshot the user last submitted, so the
//!   next page open starts from those values instead of the schema defaults.

pub mod config;
pub mod snapshot_store;
