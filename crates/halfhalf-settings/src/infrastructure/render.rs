//! Host-framework JSON output.
//!
//! The host renders the page from a JSON array of descriptors using the
//! Clay vocabulary (`type`, `messageKey`, `defaultValue`, `capabilities`, ...).
//! Two renderings are offered:
//!
//! - [`render_page`] resolves capability filters for one device and emits only
//!   what that device shows.
//! - [`render_schema`] emits the full schema with the filters intact, for
//!   hosts that evaluate them themselves.

use halfhalf_core::{CapabilitySet, Schema};
use tracing::debug;

/// Renders the page as shown on a device with `capabilities`.
///
/// # Errors
///
/// Returns a [`serde_json::Error`] if serialization fails.
pub fn render_page(schema: &Schema, capabilities: &CapabilitySet) -> Result<String, serde_json::Error> {
    let page = schema.visible_for(capabilities);
    debug!(
        items = page.items.len(),
        fields = page.interactive_fields().len(),
        "rendering page for device"
    );
    serde_json::to_string_pretty(&page)
}

/// Renders the whole schema, capability filters included.
///
/// # Errors
///
/// Returns a [`serde_json::Error`] if serialization fails.
pub fn render_schema(schema: &Schema) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(schema)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
