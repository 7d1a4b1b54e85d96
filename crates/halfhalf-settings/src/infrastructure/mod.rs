//! Infrastructure layer for the settings host.
//!
//! Contains the adapters that touch the outside world: JSON rendering for the
//! host framework, the TOML configuration file, and the persisted snapshot.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `halfhalf_core`, but MUST NOT be imported by the `application` or domain
//! layers.

pub mod render;
pub mod storage;
