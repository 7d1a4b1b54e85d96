//! Device capabilities and the visibility filters attached to fields.
//!
//! The host reports the capabilities of the watch the page is being rendered
//! for (platform, color depth, display shape, sensors).  A field descriptor may
//! carry a [`CapabilityFilter`]; the renderer shows the field only when every
//! requirement in the filter holds for the reported [`CapabilitySet`].
//!
//! # Wire format
//!
//! Filters serialize as an array of capability names.  A requirement that
//! must *not* hold is written with a `NOT_` prefix:
//!
//! ```json
//! "capabilities": ["COLOR", "NOT_ROUND"]
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix marking a negated requirement on the wire.
const NEGATION_PREFIX: &str = "NOT_";

/// Error returned for an unrecognised capability or platform name.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CapabilityError {
    #[error("unknown capability: {0:?}")]
    UnknownCapability(String),

    #[error("unknown platform: {0:?}")]
    UnknownPlatform(String),
}

/// A capability class a device can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Capability {
    PlatformAplite,
    PlatformBasalt,
    PlatformChalk,
    PlatformDiorite,
    PlatformEmery,
    /// Black-and-white display.
    Bw,
    /// 64-color display.
    Color,
    Microphone,
    Smartstrap,
    SmartstrapPower,
    Health,
    /// Rectangular display.
    Rect,
    /// Round display.
    Round,
    Display144x168,
    Display180x180Round,
    Display200x228,
}

impl Capability {
    pub const ALL: [Capability; 16] = [
        Capability::PlatformAplite,
        Capability::PlatformBasalt,
        Capability::PlatformChalk,
        Capability::PlatformDiorite,
        Capability::PlatformEmery,
        Capability::Bw,
        Capability::Color,
        Capability::Microphone,
        Capability::Smartstrap,
        Capability::SmartstrapPower,
        Capability::Health,
        Capability::Rect,
        Capability::Round,
        Capability::Display144x168,
        Capability::Display180x180Round,
        Capability::Display200x228,
    ];

    /// The wire name of the capability.
    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::PlatformAplite => "PLATFORM_APLITE",
            Capability::PlatformBasalt => "PLATFORM_BASALT",
            Capability::PlatformChalk => "PLATFORM_CHALK",
            Capability::PlatformDiorite => "PLATFORM_DIORITE",
            Capability::PlatformEmery => "PLATFORM_EMERY",
            Capability::Bw => "BW",
            Capability::Color => "COLOR",
            Capability::Microphone => "MICROPHONE",
            Capability::Smartstrap => "SMARTSTRAP",
            Capability::SmartstrapPower => "SMARTSTRAP_POWER",
            Capability::Health => "HEALTH",
            Capability::Rect => "RECT",
            Capability::Round => "ROUND",
            Capability::Display144x168 => "DISPLAY_144x168",
            Capability::Display180x180Round => "DISPLAY_180x180_ROUND",
            Capability::Display200x228 => "DISPLAY_200x228",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = CapabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Capability::ALL
            .into_iter()
            .find(|cap| cap.as_str() == s)
            .ok_or_else(|| CapabilityError::UnknownCapability(s.to_string()))
    }
}

impl TryFrom<String> for Capability {
    type Error = CapabilityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Capability> for String {
    fn from(value: Capability) -> Self {
        value.as_str().to_string()
    }
}

/// A single requirement: a capability that must (or must not) be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Requirement {
    pub capability: Capability,
    /// `true` when the capability must be absent.
    pub negated: bool,
}

impl Requirement {
    /// A requirement satisfied when `capability` is present.
    pub fn has(capability: Capability) -> Self {
        Self {
            capability,
            negated: false,
        }
    }

    /// A requirement satisfied when `capability` is absent.
    pub fn lacks(capability: Capability) -> Self {
        Self {
            capability,
            negated: true,
        }
    }

    /// Returns `true` if the requirement holds for `set`.
    pub fn holds_for(&self, set: &CapabilitySet) -> bool {
        set.contains(self.capability) != self.negated
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            f.write_str(NEGATION_PREFIX)?;
        }
        f.write_str(self.capability.as_str())
    }
}

impl FromStr for Requirement {
    type Err = CapabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_prefix(NEGATION_PREFIX) {
            Some(rest) => Ok(Self::lacks(rest.parse()?)),
            None => Ok(Self::has(s.parse()?)),
        }
    }
}

impl TryFrom<String> for Requirement {
    type Error = CapabilityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Requirement> for String {
    fn from(value: Requirement) -> Self {
        value.to_string()
    }
}

/// A conjunction of requirements.  An empty filter matches every device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilityFilter(pub Vec<Requirement>);

impl CapabilityFilter {
    /// A filter with no requirements.
    pub fn any() -> Self {
        Self::default()
    }

    /// A filter requiring every capability in `caps`.
    pub fn requires(caps: impl IntoIterator<Item = Capability>) -> Self {
        Self(caps.into_iter().map(Requirement::has).collect())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` when every requirement holds for `set`.
    pub fn matches(&self, set: &CapabilitySet) -> bool {
        self.0.iter().all(|req| req.holds_for(set))
    }
}

/// The capabilities a device reports at render time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CapabilitySet(BTreeSet<Capability>);

impl CapabilitySet {
    pub fn new(caps: impl IntoIterator<Item = Capability>) -> Self {
        Self(caps.into_iter().collect())
    }

    /// The capabilities reported by a named watch platform.
    ///
    /// # Errors
    ///
    /// Returns [`CapabilityError::UnknownPlatform`] for an unrecognised name.
    pub fn for_platform(platform: &str) -> Result<Self, CapabilityError> {
        use Capability::*;

        let caps: &[Capability] = match platform {
            "aplite" => &[PlatformAplite, Bw, Rect, Display144x168],
            "basalt" => &[
                PlatformBasalt,
                Color,
                Rect,
                Health,
                Microphone,
                Smartstrap,
                SmartstrapPower,
                Display144x168,
            ],
            "chalk" => &[
                PlatformChalk,
                Color,
                Round,
                Health,
                Microphone,
                Smartstrap,
                SmartstrapPower,
                Display180x180Round,
            ],
            "diorite" => &[
                PlatformDiorite,
                Bw,
                Rect,
                Health,
                Microphone,
                Smartstrap,
                Display144x168,
            ],
            "emery" => &[
                PlatformEmery,
                Color,
                Rect,
                Health,
                Microphone,
                Smartstrap,
                SmartstrapPower,
                Display200x228,
            ],
            other => return Err(CapabilityError::UnknownPlatform(other.to_string())),
        };
        Ok(Self::new(caps.iter().copied()))
    }

    pub fn contains(&self, cap: Capability) -> bool {
        self.0.contains(&cap)
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Capability> for CapabilitySet {
    fn from_iter<T: IntoIterator<Item = Capability>>(iter: T) -> Self {
        Self::new(iter)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
