//! The settings snapshot: the key/value message the watch receives on submit.
//!
//! A snapshot is a flat JSON object whose keys are exactly the interactive
//! keys declared by the schema and whose values have the key's declared type:
//!
//! ```json
//! {"SECONDARY_COLOR":"007DCE","PRIMARY_COLOR":"FFFFFF","SHOW_SECONDS":true,"BATTERY_SAVE_SECONDS":false}
//! ```
//!
//! This is the only externally visible contract of the settings page, so the
//! types are closed: keys are [`MessageKey`]s and values are either a
//! [`HexColor`] or a `bool`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::color::HexColor;
use super::keys::{MessageKey, ValueKind};
use super::schema::Schema;

/// Errors produced when a snapshot does not fit a schema or cannot be parsed.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The snapshot carries a key the schema does not declare.
    #[error("key {0} is not declared by the schema")]
    UndeclaredKey(MessageKey),

    /// The schema declares a key the snapshot does not carry.
    #[error("key {0} is missing from the snapshot")]
    MissingKey(MessageKey),

    /// A value does not have its key's declared type.
    #[error("key {key} expects a {expected} value, got {found}")]
    TypeMismatch {
        key: MessageKey,
        expected: ValueKind,
        found: ValueKind,
    },

    /// The JSON text is malformed or uses unknown keys / invalid colors.
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single setting value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Color(HexColor),
}

impl SettingValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            SettingValue::Bool(_) => ValueKind::Bool,
            SettingValue::Color(_) => ValueKind::Color,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SettingValue::Bool(b) => Some(*b),
            SettingValue::Color(_) => None,
        }
    }

    pub fn as_color(&self) -> Option<&HexColor> {
        match self {
            SettingValue::Color(c) => Some(c),
            SettingValue::Bool(_) => None,
        }
    }

    /// Parses a textual value as the type `kind` expects (`true`/`false`, or
    /// a hex color).  Returns `None` when the text does not fit.
    pub fn parse_as(kind: ValueKind, text: &str) -> Option<Self> {
        match kind {
            ValueKind::Bool => text.parse().ok().map(SettingValue::Bool),
            ValueKind::Color => HexColor::parse(text).ok().map(SettingValue::Color),
        }
    }
}

impl From<bool> for SettingValue {
    fn from(value: bool) -> Self {
        SettingValue::Bool(value)
    }
}

impl From<HexColor> for SettingValue {
    fn from(value: HexColor) -> Self {
        SettingValue::Color(value)
    }
}

/// The finalized key/value set produced on submit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsSnapshot {
    values: BTreeMap<MessageKey, SettingValue>,
}

impl SettingsSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, returning the previous value if there was one.
    pub fn insert(&mut self, key: MessageKey, value: impl Into<SettingValue>) -> Option<SettingValue> {
        self.values.insert(key, value.into())
    }

    pub fn get(&self, key: MessageKey) -> Option<&SettingValue> {
        self.values.get(&key)
    }

    pub fn get_bool(&self, key: MessageKey) -> Option<bool> {
        self.get(key).and_then(SettingValue::as_bool)
    }

    pub fn get_color(&self, key: MessageKey) -> Option<&HexColor> {
        self.get(key).and_then(SettingValue::as_color)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Entries in key (render) order.
    pub fn iter(&self) -> impl Iterator<Item = (MessageKey, &SettingValue)> + '_ {
        self.values.iter().map(|(k, v)| (*k, v))
    }

    /// Checks that the snapshot carries exactly the schema's keys with their
    /// declared types.
    ///
    /// # Errors
    ///
    /// Returns the first [`SnapshotError::UndeclaredKey`],
    /// [`SnapshotError::TypeMismatch`] or [`SnapshotError::MissingKey`] found.
    pub fn validate_against(&self, schema: &Schema) -> Result<(), SnapshotError> {
        for (key, value) in self.iter() {
            let field = schema.field(key).ok_or(SnapshotError::UndeclaredKey(key))?;
            if field.kind() != value.kind() {
                return Err(SnapshotError::TypeMismatch {
                    key,
                    expected: field.kind(),
                    found: value.kind(),
                });
            }
        }
        if let Some(missing) = schema.keys().into_iter().find(|k| !self.values.contains_key(k)) {
            return Err(SnapshotError::MissingKey(missing));
        }
        Ok(())
    }

    /// Parses a snapshot from its JSON object form.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Json`] for malformed JSON, unknown keys, or
    /// values that are neither booleans nor hex colors.
    pub fn from_json(text: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serializes the snapshot as a compact JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl FromIterator<(MessageKey, SettingValue)> for SettingsSnapshot {
    fn from_iter<T: IntoIterator<Item = (MessageKey, SettingValue)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::schema::FieldDescriptor;

    fn two_field_schema() -> Schema {
        Schema::new(vec![
            FieldDescriptor::color(
                MessageKey::PrimaryColor,
                "Lower",
                HexColor::parse("FFFFFF").unwrap(),
            ),
            FieldDescriptor::toggle(MessageKey::ShowSeconds, "Show Seconds", true, None),
        ])
    }

    #[test]
    fn test_json_object_is_flat_and_ordered_by_key() {
        // Arrange
        let mut snapshot = SettingsSnapshot::new();
        snapshot.insert(MessageKey::ShowSeconds, true);
        snapshot.insert(MessageKey::PrimaryColor, HexColor::parse("FFFFFF").unwrap());

        // Act
        let json = snapshot.to_json().unwrap();

        // Assert
        assert_eq!(json, r#"{"PRIMARY_COLOR":"FFFFFF","SHOW_SECONDS":true}"#);
    }

    #[test]
    fn test_from_json_reads_bools_and_colors() {
        let snapshot =
            SettingsSnapshot::from_json(r#"{"SECONDARY_COLOR":"007DCE","BATTERY_SAVE_SECONDS":false}"#)
                .unwrap();
        assert_eq!(
            snapshot.get_color(MessageKey::SecondaryColor).map(HexColor::as_str),
            Some("007DCE")
        );
        assert_eq!(snapshot.get_bool(MessageKey::BatterySaveSeconds), Some(false));
    }

    #[test]
    fn test_from_json_rejects_unknown_key() {
        let result = SettingsSnapshot::from_json(r#"{"TIMEZONE":"UTC"}"#);
        assert!(matches!(result, Err(SnapshotError::Json(_))));
    }

    #[test]
    fn test_from_json_rejects_non_color_string() {
        let result = SettingsSnapshot::from_json(r#"{"PRIMARY_COLOR":"white"}"#);
        assert!(matches!(result, Err(SnapshotError::Json(_))));
    }

    #[test]
    fn test_validate_accepts_schema_defaults() {
        let schema = two_field_schema();
        assert!(schema.defaults().validate_against(&schema).is_ok());
    }

    #[test]
    fn test_validate_reports_missing_key() {
        let schema = two_field_schema();
        let mut snapshot = SettingsSnapshot::new();
        snapshot.insert(MessageKey::ShowSeconds, false);

        let result = snapshot.validate_against(&schema);

        assert!(matches!(result, Err(SnapshotError::MissingKey(MessageKey::PrimaryColor))));
    }

    #[test]
    fn test_validate_reports_undeclared_key() {
        let schema = two_field_schema();
        let mut snapshot = schema.defaults();
        snapshot.insert(MessageKey::BatterySaveSeconds, true);

        let result = snapshot.validate_against(&schema);

        assert!(matches!(
            result,
            Err(SnapshotError::UndeclaredKey(MessageKey::BatterySaveSeconds))
        ));
    }

    #[test]
    fn test_validate_reports_type_mismatch() {
        let schema = two_field_schema();
        let mut snapshot = schema.defaults();
        snapshot.insert(MessageKey::PrimaryColor, true);

        let result = snapshot.validate_against(&schema);

        assert!(matches!(
            result,
            Err(SnapshotError::TypeMismatch {
                key: MessageKey::PrimaryColor,
                expected: ValueKind::Color,
                found: ValueKind::Bool,
            })
        ));
    }

    #[test]
    fn test_parse_as_follows_declared_kind() {
        assert_eq!(
            SettingValue::parse_as(ValueKind::Bool, "false"),
            Some(SettingValue::Bool(false))
        );
        assert_eq!(SettingValue::parse_as(ValueKind::Bool, "007DCE"), None);
        assert_eq!(
            SettingValue::parse_as(ValueKind::Color, "#00aaff"),
            Some(SettingValue::Color(HexColor::parse("00AAFF").unwrap()))
        );
    }
}
