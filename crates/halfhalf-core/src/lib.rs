//! # halfhalf-core
//!
//! Shared library for the Half/Half watchface settings page containing the
//! declarative settings schema, the settings snapshot exchanged with the
//! watch, and the watch-side palette that consumes it.
//!
//! This crate is used by the settings host (`halfhalf-settings`) and by any
//! tool that needs to read or produce a snapshot.  It has zero dependencies on
//! UI frameworks, file systems, or message transports.
//!
//! # Architecture overview (for beginners)
//!
//! The settings page is a form shown on the phone.  The user picks two colors
//! and a couple of toggles, presses "Save Settings", and the phone sends the
//! chosen values to the watch as a flat key/value message.
//!
//! This crate (`halfhalf-core`) is the shared foundation.  It defines:
//!
//! - **`domain::schema`** – The form itself, as pure data: an ordered tree of
//!   field descriptors (headings, sections, colors, toggles, text, submit).
//!
//! - **`domain::variants`** – The three schema versions that have shipped.
//!   Exactly one is rendered per page; `half-half` is the canonical one.
//!
//! - **`domain::snapshot`** – The message the watch receives on submit.  Its
//!   keys, value types, and default values are the only contract the watch
//!   depends on, so they are modelled with closed enums.
//!
//! - **`domain::palette`** – How the watch turns a snapshot into the colors it
//!   draws with.

// Rust will look for the module in a subdirectory with the same name
// (src/domain/mod.rs).
pub mod domain;

// Re-export the most-used types at the crate root so callers can write
// `halfhalf_core::Schema` instead of `halfhalf_core::domain::schema::Schema`.
pub use domain::capability::{Capability, CapabilityError, CapabilityFilter, CapabilitySet, Requirement};
pub use domain::color::{ColorError, GColor8, HexColor};
pub use domain::keys::{KeyError, MessageKey, ValueKind};
pub use domain::palette::WatchSettings;
pub use domain::schema::{
    ColorField, FieldDescriptor, Heading, InteractiveField, Schema, SchemaError, Section, Submit,
    TextBlock, ToggleField,
};
pub use domain::snapshot::{SettingValue, SettingsSnapshot, SnapshotError};
pub use domain::variants::{SchemaVariant, VariantError};
