//! Domain entities for the Half/Half settings page.
//!
//! This module contains pure data and rules with no infrastructure
//! dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! Clean Architecture organises code into concentric layers.  The innermost
//! layer is called the **domain** (or "entities" layer).  Domain code:
//!
//! - Contains the core rules of the application.
//! - Has **no** imports from UI frameworks, file systems, or transports.
//! - Can be compiled and tested on any platform without any external setup.
//!
//! Here the domain is the vocabulary shared by the phone-side settings page
//! and the watch: which keys exist, what type each value has, and what the
//! form looks like.  The host that renders the form and the code that stores
//! snapshots both depend on these types, never the other way round.

/// Device capability classes and the filters attached to field descriptors.
pub mod capability;

/// Hex RGB colors and the 8-bit watch color they reduce to.
pub mod color;

/// The four message keys shared with the watch.
pub mod keys;

/// Watch-side view of the settings.
pub mod palette;

/// Field descriptors and the schema tree.
pub mod schema;

/// The key/value snapshot produced on submit.
pub mod snapshot;

/// The historical schema versions.
pub mod variants;
