//! Watch-side view of the settings.
//!
//! When a snapshot arrives the watch picks out the keys it knows, reduces the
//! colors to its 8-bit palette, keeps whatever the message did not mention,
//! and redraws.  [`WatchSettings::apply`] reproduces that so the host can
//! predict what the watch will show for a given snapshot.

use tracing::debug;

use super::color::GColor8;
use super::keys::MessageKey;
use super::snapshot::SettingsSnapshot;

/// The settings the watchface draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchSettings {
    /// Lower half and the text drawn over the upper half (`PRIMARY_COLOR`).
    pub background: GColor8,
    /// Upper half and the text drawn over the lower half (`SECONDARY_COLOR`).
    pub accent: GColor8,
    pub show_seconds: bool,
    pub battery_save_seconds: bool,
}

impl Default for WatchSettings {
    /// Used on first launch, before any snapshot has been received.
    fn default() -> Self {
        Self {
            background: GColor8::WHITE,
            accent: GColor8::BLUE_MOON,
            show_seconds: true,
            battery_save_seconds: false,
        }
    }
}

impl WatchSettings {
    /// Applies the keys present in `snapshot`; absent keys keep their value.
    ///
    /// Returns `true` if anything changed.
    pub fn apply(&mut self, snapshot: &SettingsSnapshot) -> bool {
        let before = *self;

        if let Some(c) = snapshot.get_color(MessageKey::PrimaryColor) {
            self.background = GColor8::from(c);
        }
        if let Some(c) = snapshot.get_color(MessageKey::SecondaryColor) {
            self.accent = GColor8::from(c);
        }
        if let Some(b) = snapshot.get_bool(MessageKey::ShowSeconds) {
            self.show_seconds = b;
        }
        if let Some(b) = snapshot.get_bool(MessageKey::BatterySaveSeconds) {
            self.battery_save_seconds = b;
        }

        let changed = *self != before;
        debug!(changed, "applied settings snapshot: {:?}", self);
        changed
    }

    /// Whether the seconds hide themselves after inactivity.  Only meaningful
    /// while seconds are shown.
    pub fn seconds_auto_hide(&self) -> bool {
        self.show_seconds && self.battery_save_seconds
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
