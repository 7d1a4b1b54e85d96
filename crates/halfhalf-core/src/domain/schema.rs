//! Field descriptors and the settings schema tree.
//!
//! A [`Schema`] is an ordered list of [`FieldDescriptor`]s.  Sections nest
//! further descriptors, so the schema is a tree; the order of the tree is the
//! order the host renders the page in.  Only color and toggle fields hold a
//! value, and each of them is addressed by a [`MessageKey`] that must be
//! unique across the whole tree.
//!
//! The schema is inert data.  It serializes to the JSON vocabulary the host's
//! form renderer understands:
//!
//! ```json
//! [
//!   { "type": "heading", "defaultValue": "Half/Half Settings" },
//!   { "type": "section", "items": [
//!       { "type": "color", "messageKey": "SECONDARY_COLOR", "defaultValue": "007DCE",
//!         "label": "Upper Color", "sunlight": true, "allowGray": true }
//!   ] },
//!   { "type": "submit", "defaultValue": "Save Settings" }
//! ]
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::capability::{CapabilityFilter, CapabilitySet};
use super::color::HexColor;
use super::keys::{MessageKey, ValueKind};
use super::snapshot::{SettingValue, SettingsSnapshot};

/// Errors that indicate a defective schema.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    /// Two interactive fields share a message key.
    #[error("message key {0} is declared more than once")]
    DuplicateKey(MessageKey),

    /// A field's kind does not match the value type its key carries.
    #[error("message key {key} carries {declared} values but is used by a {field} field")]
    KindMismatch {
        key: MessageKey,
        declared: ValueKind,
        field: ValueKind,
    },
}

// ── Descriptors ───────────────────────────────────────────────────────────────

/// One declarative UI element of the settings page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldDescriptor {
    Heading(Heading),
    Section(Section),
    Text(TextBlock),
    Color(ColorField),
    Toggle(ToggleField),
    Submit(Submit),
}

/// Decorative heading text.  Holds no value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Heading {
    pub default_value: String,
    #[serde(default, skip_serializing_if = "CapabilityFilter::is_empty")]
    pub capabilities: CapabilityFilter,
}

/// A container nesting further descriptors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub items: Vec<FieldDescriptor>,
    #[serde(default, skip_serializing_if = "CapabilityFilter::is_empty")]
    pub capabilities: CapabilityFilter,
}

/// Static descriptive or illustrative content (may contain markup).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub default_value: String,
    #[serde(default, skip_serializing_if = "CapabilityFilter::is_empty")]
    pub capabilities: CapabilityFilter,
}

/// A color picker storing a hex RGB string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorField {
    pub message_key: MessageKey,
    pub default_value: HexColor,
    pub label: String,
    /// Render the picker with sunlight-friendly swatches.
    #[serde(default)]
    pub sunlight: bool,
    /// Offer grayscale swatches.
    #[serde(default)]
    pub allow_gray: bool,
    #[serde(default, skip_serializing_if = "CapabilityFilter::is_empty")]
    pub capabilities: CapabilityFilter,
}

/// A boolean switch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleField {
    pub message_key: MessageKey,
    pub label: String,
    pub default_value: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "CapabilityFilter::is_empty")]
    pub capabilities: CapabilityFilter,
}

/// The button that turns the in-progress values into a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submit {
    pub default_value: String,
    #[serde(default, skip_serializing_if = "CapabilityFilter::is_empty")]
    pub capabilities: CapabilityFilter,
}

impl FieldDescriptor {
    pub fn heading(text: &str) -> Self {
        FieldDescriptor::Heading(Heading {
            default_value: text.to_string(),
            capabilities: CapabilityFilter::any(),
        })
    }

    pub fn section(items: Vec<FieldDescriptor>) -> Self {
        FieldDescriptor::Section(Section {
            items,
            capabilities: CapabilityFilter::any(),
        })
    }

    pub fn text(content: &str, capabilities: CapabilityFilter) -> Self {
        FieldDescriptor::Text(TextBlock {
            default_value: content.to_string(),
            capabilities,
        })
    }

    /// A sunlight-friendly color picker that allows gray swatches.
    pub fn color(key: MessageKey, label: &str, default_value: HexColor) -> Self {
        FieldDescriptor::Color(ColorField {
            message_key: key,
            default_value,
            label: label.to_string(),
            sunlight: true,
            allow_gray: true,
            capabilities: CapabilityFilter::any(),
        })
    }

    pub fn toggle(key: MessageKey, label: &str, default_value: bool, description: Option<&str>) -> Self {
        FieldDescriptor::Toggle(ToggleField {
            message_key: key,
            label: label.to_string(),
            default_value,
            description: description.map(str::to_string),
            capabilities: CapabilityFilter::any(),
        })
    }

    pub fn submit(label: &str) -> Self {
        FieldDescriptor::Submit(Submit {
            default_value: label.to_string(),
            capabilities: CapabilityFilter::any(),
        })
    }

    /// The visibility filter attached to this descriptor.
    pub fn capabilities(&self) -> &CapabilityFilter {
        match self {
            FieldDescriptor::Heading(h) => &h.capabilities,
            FieldDescriptor::Section(s) => &s.capabilities,
            FieldDescriptor::Text(t) => &t.capabilities,
            FieldDescriptor::Color(c) => &c.capabilities,
            FieldDescriptor::Toggle(t) => &t.capabilities,
            FieldDescriptor::Submit(s) => &s.capabilities,
        }
    }

    /// The interactive view of this descriptor, if it holds a value.
    pub fn as_interactive(&self) -> Option<InteractiveField<'_>> {
        match self {
            FieldDescriptor::Color(c) => Some(InteractiveField::Color(c)),
            FieldDescriptor::Toggle(t) => Some(InteractiveField::Toggle(t)),
            _ => None,
        }
    }
}

/// A descriptor that holds a value: a color or a toggle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractiveField<'a> {
    Color(&'a ColorField),
    Toggle(&'a ToggleField),
}

impl InteractiveField<'_> {
    pub fn key(&self) -> MessageKey {
        match self {
            InteractiveField::Color(c) => c.message_key,
            InteractiveField::Toggle(t) => t.message_key,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            InteractiveField::Color(c) => &c.label,
            InteractiveField::Toggle(t) => &t.label,
        }
    }

    /// The kind of value the field stores.
    pub fn kind(&self) -> ValueKind {
        match self {
            InteractiveField::Color(_) => ValueKind::Color,
            InteractiveField::Toggle(_) => ValueKind::Bool,
        }
    }

    pub fn default_value(&self) -> SettingValue {
        match self {
            InteractiveField::Color(c) => SettingValue::Color(c.default_value.clone()),
            InteractiveField::Toggle(t) => SettingValue::Bool(t.default_value),
        }
    }
}

// ── Schema ────────────────────────────────────────────────────────────────────

/// The ordered top-level sequence of descriptors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    pub items: Vec<FieldDescriptor>,
}

impl Schema {
    pub fn new(items: Vec<FieldDescriptor>) -> Self {
        Self { items }
    }

    /// Checks that every interactive key is unique and matches its field kind.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateKey`] on the first repeated key, or
    /// [`SchemaError::KindMismatch`] when a color key is used by a toggle (or
    /// the reverse).
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for field in self.interactive_fields() {
            let key = field.key();
            if !seen.insert(key) {
                return Err(SchemaError::DuplicateKey(key));
            }
            if key.value_kind() != field.kind() {
                return Err(SchemaError::KindMismatch {
                    key,
                    declared: key.value_kind(),
                    field: field.kind(),
                });
            }
        }
        Ok(())
    }

    /// Color and toggle fields in render (depth-first) order.
    pub fn interactive_fields(&self) -> Vec<InteractiveField<'_>> {
        let mut out = Vec::new();
        collect_interactive(&self.items, &mut out);
        out
    }

    /// Looks up an interactive field by its key.
    pub fn field(&self, key: MessageKey) -> Option<InteractiveField<'_>> {
        self.interactive_fields().into_iter().find(|f| f.key() == key)
    }

    /// Returns `true` if an interactive field with `key` is declared.
    pub fn declares(&self, key: MessageKey) -> bool {
        self.field(key).is_some()
    }

    /// The interactive keys, in render order.
    pub fn keys(&self) -> Vec<MessageKey> {
        self.interactive_fields().iter().map(InteractiveField::key).collect()
    }

    /// The snapshot made of every interactive field's default value.
    pub fn defaults(&self) -> SettingsSnapshot {
        self.interactive_fields()
            .iter()
            .map(|f| (f.key(), f.default_value()))
            .collect()
    }

    /// A copy holding only the descriptors visible on a device reporting
    /// `capabilities`.  A hidden section hides everything inside it.
    pub fn visible_for(&self, capabilities: &CapabilitySet) -> Schema {
        Schema {
            items: prune(&self.items, capabilities),
        }
    }
}

fn collect_interactive<'a>(items: &'a [FieldDescriptor], out: &mut Vec<InteractiveField<'a>>) {
    for item in items {
        match item {
            FieldDescriptor::Section(section) => collect_interactive(&section.items, out),
            other => out.extend(other.as_interactive()),
        }
    }
}

fn prune(items: &[FieldDescriptor], capabilities: &CapabilitySet) -> Vec<FieldDescriptor> {
    items
        .iter()
        .filter(|item| item.capabilities().matches(capabilities))
        .map(|item| match item {
            FieldDescriptor::Section(section) => FieldDescriptor::Section(Section {
                items: prune(&section.items, capabilities),
                capabilities: section.capabilities.clone(),
            }),
            other => other.clone(),
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::capability::Capability;

    fn color(hex: &str) -> HexColor {
        HexColor::parse(hex).unwrap()
    }

    fn sample_schema() -> Schema {
        Schema::new(vec![
            FieldDescriptor::heading("Settings"),
            FieldDescriptor::section(vec![
                FieldDescriptor::color(MessageKey::SecondaryColor, "Upper", color("007DCE")),
                FieldDescriptor::text("color only", CapabilityFilter::requires([Capability::Color])),
            ]),
            FieldDescriptor::section(vec![FieldDescriptor::toggle(
                MessageKey::ShowSeconds,
                "Show Seconds",
                true,
                None,
            )]),
            FieldDescriptor::submit("Save"),
        ])
    }

    #[test]
    fn test_validate_accepts_unique_keys() {
        assert_eq!(sample_schema().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_duplicate_key_across_sections() {
        // Arrange
        let mut schema = sample_schema();
        schema.items.push(FieldDescriptor::section(vec![FieldDescriptor::toggle(
            MessageKey::ShowSeconds,
            "Again",
            false,
            None,
        )]));

        // Act / Assert
        assert_eq!(
            schema.validate(),
            Err(SchemaError::DuplicateKey(MessageKey::ShowSeconds))
        );
    }

    #[test]
    fn test_validate_rejects_toggle_using_color_key() {
        let schema = Schema::new(vec![FieldDescriptor::toggle(
            MessageKey::PrimaryColor,
            "Wrong",
            true,
            None,
        )]);
        assert_eq!(
            schema.validate(),
            Err(SchemaError::KindMismatch {
                key: MessageKey::PrimaryColor,
                declared: ValueKind::Color,
                field: ValueKind::Bool,
            })
        );
    }

    #[test]
    fn test_interactive_fields_follow_render_order() {
        let keys = sample_schema().keys();
        assert_eq!(keys, vec![MessageKey::SecondaryColor, MessageKey::ShowSeconds]);
    }

    #[test]
    fn test_field_lookup_by_key() {
        let schema = sample_schema();
        let field = schema.field(MessageKey::ShowSeconds).expect("declared");
        assert_eq!(field.label(), "Show Seconds");
        assert!(schema.field(MessageKey::BatterySaveSeconds).is_none());
    }

    #[test]
    fn test_defaults_collects_every_interactive_default() {
        let defaults = sample_schema().defaults();
        assert_eq!(defaults.len(), 2);
        assert_eq!(
            defaults.get(MessageKey::SecondaryColor),
            Some(&SettingValue::Color(color("007DCE")))
        );
        assert_eq!(defaults.get(MessageKey::ShowSeconds), Some(&SettingValue::Bool(true)));
    }

    #[test]
    fn test_visible_for_drops_fields_whose_filter_fails() {
        // Arrange
        let bw = CapabilitySet::new([Capability::Bw, Capability::Rect]);

        // Act
        let visible = sample_schema().visible_for(&bw);

        // Assert: the color-only text block is gone, the color picker stays
        let FieldDescriptor::Section(section) = &visible.items[1] else {
            panic!("second item must remain a section");
        };
        assert_eq!(section.items.len(), 1);
        assert!(matches!(section.items[0], FieldDescriptor::Color(_)));
    }

    #[test]
    fn test_visible_for_hides_whole_section() {
        let schema = Schema::new(vec![FieldDescriptor::Section(Section {
            items: vec![FieldDescriptor::heading("Round only")],
            capabilities: CapabilityFilter::requires([Capability::Round]),
        })]);
        let visible = schema.visible_for(&CapabilitySet::new([Capability::Rect]));
        assert!(visible.items.is_empty());
    }

    #[test]
    fn test_color_field_serializes_in_host_vocabulary() {
        let field = FieldDescriptor::color(MessageKey::PrimaryColor, "Lower Color", color("FFFFFF"));
        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "color",
                "messageKey": "PRIMARY_COLOR",
                "defaultValue": "FFFFFF",
                "label": "Lower Color",
                "sunlight": true,
                "allowGray": true
            })
        );
    }

    #[test]
    fn test_toggle_without_description_omits_it() {
        let field = FieldDescriptor::toggle(MessageKey::ShowSeconds, "Show Seconds", true, None);
        let json = serde_json::to_value(&field).unwrap();
        assert!(json.get("description").is_none());
        assert_eq!(json["defaultValue"], serde_json::json!(true));
    }

    #[test]
    fn test_schema_parses_from_host_json() {
        // The host JSON may omit optional flags.
        let json = r#"[
            {"type": "heading", "defaultValue": "Title"},
            {"type": "section", "items": [
                {"type": "color", "messageKey": "SECONDARY_COLOR", "defaultValue": "007DCE", "label": "Upper"},
                {"type": "text", "defaultValue": "<b>hi</b>", "capabilities": ["NOT_BW"]}
            ]},
            {"type": "submit", "defaultValue": "Save"}
        ]"#;

        let schema: Schema = serde_json::from_str(json).expect("valid schema JSON");

        assert_eq!(schema.items.len(), 3);
        assert_eq!(schema.keys(), vec![MessageKey::SecondaryColor]);
        let Some(InteractiveField::Color(c)) = schema.field(MessageKey::SecondaryColor) else {
            panic!("color field expected");
        };
        assert!(!c.sunlight);
        assert!(!c.allow_gray);
    }
}
