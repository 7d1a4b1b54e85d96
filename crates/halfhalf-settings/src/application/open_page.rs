//! Use case: open the settings page.
//!
//! Opening the page is the hook the host runs once the form has been
//! constructed: build the form for the device, seed whatever the user saved
//! last time, then install every enablement rule the schema calls for.  The
//! rules read the restored values, so restoring must come first.

use halfhalf_core::{CapabilitySet, Schema, SchemaError, SchemaVariant, SettingsSnapshot};
use thiserror::Error;
use tracing::info;

use super::enable_rule::{rules_for, RuleError};
use super::form::SettingsForm;

#[derive(Debug, Error)]
pub enum OpenPageError {
    #[error("invalid settings schema: {0}")]
    Schema(#[from] SchemaError),

    #[error("failed to install enablement rule: {0}")]
    Rule(#[from] RuleError),
}

/// Builds and wires the form for `schema` on a device with `capabilities`.
///
/// # Errors
///
/// Returns [`OpenPageError`] if the schema is defective or a rule cannot be
/// installed.
pub fn open_page(
    schema: &Schema,
    capabilities: &CapabilitySet,
    saved: Option<&SettingsSnapshot>,
) -> Result<SettingsForm, OpenPageError> {
    let mut form = SettingsForm::build(schema, capabilities)?;

    let restored = saved.map_or(0, |snapshot| form.restore(snapshot));

    let rules = rules_for(form.page());
    for rule in &rules {
        rule.install(&mut form)?;
    }

    info!(
        fields = form.submit().len(),
        restored,
        rules = rules.len(),
        "settings page opened"
    );
    Ok(form)
}

/// [`open_page`] for one of the shipped schema variants.
pub fn open_settings_page(
    variant: SchemaVariant,
    capabilities: &CapabilitySet,
    saved: Option<&SettingsSnapshot>,
) -> Result<SettingsForm, OpenPageError> {
    open_page(&variant.schema(), capabilities, saved)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
