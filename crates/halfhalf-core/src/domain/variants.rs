//! The schema versions the settings page has shipped with.
//!
//! Three schemas exist.  They differ only in which roles the two colors are
//! labelled with, whether the seconds toggles are present, and whether a
//! preview image is shown on color displays.  Exactly one is rendered per page
//! and none of them migrates into another, so they are kept side by side as
//! versioned data.  [`SchemaVariant::HalfHalf`] is the canonical version.
//!
//! | Variant             | Color labels       | Seconds toggles | Preview image |
//! |---------------------|--------------------|-----------------|---------------|
//! | `half-half`         | Upper / Lower      | yes             | no            |
//! | `background-accent` | Accent / Background| no              | no            |
//! | `illustrated`       | Accent / Background| no              | `COLOR` only  |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::capability::{Capability, CapabilityFilter};
use super::color::HexColor;
use super::keys::MessageKey;
use super::schema::{FieldDescriptor, Schema};

/// Default upper/accent color.
pub const DEFAULT_SECONDARY_COLOR: &str = "007DCE";
/// Default lower/background color.
pub const DEFAULT_PRIMARY_COLOR: &str = "FFFFFF";

const BATTERY_SAVE_DESCRIPTION: &str = "Automatically hide seconds after 10 seconds of inactivity to save battery. Seconds will reappear when you use the watch or move your wrist.";

const PREVIEW_IMAGE: &str = "<img src=\"images/preview-color.png\" alt=\"Half/Half preview\" width=\"100%\">";

/// Error returned when a string does not name a shipped schema version.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown schema variant {0:?} (expected half-half, background-accent or illustrated)")]
pub struct VariantError(pub String);

/// A shipped schema version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaVariant {
    /// Upper/Lower colors plus the seconds toggles.
    #[default]
    HalfHalf,
    /// Background/Accent colors only.
    BackgroundAccent,
    /// Background/Accent colors with a preview image on color displays.
    Illustrated,
}

impl SchemaVariant {
    pub const ALL: [SchemaVariant; 3] = [
        SchemaVariant::HalfHalf,
        SchemaVariant::BackgroundAccent,
        SchemaVariant::Illustrated,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaVariant::HalfHalf => "half-half",
            SchemaVariant::BackgroundAccent => "background-accent",
            SchemaVariant::Illustrated => "illustrated",
        }
    }

    /// Builds the schema for this version.
    pub fn schema(&self) -> Schema {
        match self {
            SchemaVariant::HalfHalf => Schema::new(vec![
                FieldDescriptor::heading("Half/Half Settings"),
                FieldDescriptor::section(vec![
                    FieldDescriptor::heading("Color Options"),
                    FieldDescriptor::color(MessageKey::SecondaryColor, "Upper Color", secondary()),
                    FieldDescriptor::color(MessageKey::PrimaryColor, "Lower Color", primary()),
                ]),
                FieldDescriptor::section(vec![
                    FieldDescriptor::heading("Display Options"),
                    FieldDescriptor::toggle(MessageKey::ShowSeconds, "Show Seconds", true, None),
                    FieldDescriptor::toggle(
                        MessageKey::BatterySaveSeconds,
                        "Battery Saving Mode",
                        false,
                        Some(BATTERY_SAVE_DESCRIPTION),
                    ),
                ]),
                FieldDescriptor::submit("Save Settings"),
            ]),
            SchemaVariant::BackgroundAccent => Schema::new(vec![
                FieldDescriptor::heading("Half/Half Settings"),
                accent_colors_section(None),
                FieldDescriptor::submit("Save Settings"),
            ]),
            SchemaVariant::Illustrated => Schema::new(vec![
                FieldDescriptor::heading("Half/Half Settings"),
                accent_colors_section(Some(FieldDescriptor::text(
                    PREVIEW_IMAGE,
                    CapabilityFilter::requires([Capability::Color]),
                ))),
                FieldDescriptor::submit("Save Settings"),
            ]),
        }
    }
}

fn accent_colors_section(preview: Option<FieldDescriptor>) -> FieldDescriptor {
    let mut items = vec![FieldDescriptor::heading("Color Options")];
    items.extend(preview);
    items.push(FieldDescriptor::color(MessageKey::SecondaryColor, "Accent Color", secondary()));
    items.push(FieldDescriptor::color(MessageKey::PrimaryColor, "Background Color", primary()));
    FieldDescriptor::section(items)
}

// The `.expect()` calls below are safe: both constants are valid six-digit
// hex strings and the unit tests parse them.
fn secondary() -> HexColor {
    HexColor::parse(DEFAULT_SECONDARY_COLOR).expect("default secondary color is valid hex")
}

fn primary() -> HexColor {
    HexColor::parse(DEFAULT_PRIMARY_COLOR).expect("default primary color is valid hex")
}

impl fmt::Display for SchemaVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaVariant {
    type Err = VariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SchemaVariant::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| VariantError(s.to_string()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
