//! Message keys shared between the settings page and the watch.
//!
//! The watch application is compiled against a fixed list of message keys.
//! Each key addresses exactly one interactive field in the schema and carries
//! exactly one value type.  Because the list is closed, it is modelled as an
//! enum: a typo in a key name is a compile error rather than a silently
//! dropped setting.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string does not name a declared message key.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown message key: {0:?}")]
pub struct KeyError(pub String);

/// The value type a message key carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    /// Six-digit hex RGB string, e.g. `"007DCE"`.
    Color,
    /// `true` / `false`.
    Bool,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Color => f.write_str("color"),
            ValueKind::Bool => f.write_str("bool"),
        }
    }
}

/// A key of the settings message.
///
/// Declaration order is the schema's render order, which is also the order
/// keys appear in a serialized [`SettingsSnapshot`](super::snapshot::SettingsSnapshot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageKey {
    /// Color of the upper half (accent color).
    SecondaryColor,
    /// Color of the lower half (background color).
    PrimaryColor,
    /// Whether the seconds are drawn at all.
    ShowSeconds,
    /// Whether the seconds hide themselves after a period of inactivity.
    BatterySaveSeconds,
}

impl MessageKey {
    /// Every declared key, in render order.
    pub const ALL: [MessageKey; 4] = [
        MessageKey::SecondaryColor,
        MessageKey::PrimaryColor,
        MessageKey::ShowSeconds,
        MessageKey::BatterySaveSeconds,
    ];

    /// The wire name of the key.
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKey::SecondaryColor => "SECONDARY_COLOR",
            MessageKey::PrimaryColor => "PRIMARY_COLOR",
            MessageKey::ShowSeconds => "SHOW_SECONDS",
            MessageKey::BatterySaveSeconds => "BATTERY_SAVE_SECONDS",
        }
    }

    /// The declared value type of the key.
    pub fn value_kind(&self) -> ValueKind {
        match self {
            MessageKey::SecondaryColor | MessageKey::PrimaryColor => ValueKind::Color,
            MessageKey::ShowSeconds | MessageKey::BatterySaveSeconds => ValueKind::Bool,
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MessageKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| KeyError(s.to_string()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
