//! halfhalf-settings library crate.
//!
//! This crate hosts the Half/Half settings page: it turns a schema into an
//! interactive form, keeps the battery-saving toggle in step with the
//! show-seconds toggle, and produces the settings snapshot on submit.
//!
//! # Architecture (clean architecture)
//!
//! ```text
//! halfhalf-core (schema, snapshot, palette)
//!         ↑
//! [halfhalf-settings]
//!   ├── application/      Form handle traits, in-memory form, enablement rule
//!   └── infrastructure/
//!         ├── render/     Host-framework JSON output
//!         └── storage/    TOML config and the persisted snapshot
//! ```
//!
//! # Layer rules
//!
//! - `application` depends on `halfhalf-core` only; no file or terminal I/O.
//! - `infrastructure` depends on `application`, `halfhalf-core`, `serde_json`
//!   and `toml`.
//! - `main.rs` wires the two together behind a CLI.

/// Application layer: form model and the conditional enablement rule.
pub mod application;

/// Infrastructure layer: rendering, configuration and snapshot persistence.
pub mod infrastructure;
