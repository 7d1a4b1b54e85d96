//! Integration tests for the settings message contract.
//!
//! The watch application interprets a snapshot by key, type, and default
//! value.  These tests pin those three things down through the public API,
//! exercising the schema variants, the snapshot, and the watch palette
//! together.

use std::collections::HashSet;

use halfhalf_core::{
    GColor8, HexColor, MessageKey, Schema, SchemaVariant, SettingValue, SettingsSnapshot,
    ValueKind, WatchSettings,
};

fn canonical() -> Schema {
    SchemaVariant::default().schema()
}

#[test]
fn test_every_interactive_key_is_unique_in_every_variant() {
    for variant in SchemaVariant::ALL {
        let keys = variant.schema().keys();
        let unique: HashSet<_> = keys.iter().copied().collect();
        assert_eq!(unique.len(), keys.len(), "{variant} repeats a key");
    }
}

#[test]
fn test_canonical_defaults_match_watch_contract() {
    let defaults = canonical().defaults();

    assert_eq!(
        defaults.to_json().unwrap(),
        r#"{"SECONDARY_COLOR":"007DCE","PRIMARY_COLOR":"FFFFFF","SHOW_SECONDS":true,"BATTERY_SAVE_SECONDS":false}"#
    );
}

#[test]
fn test_declared_value_types_match_schema_fields() {
    let schema = canonical();
    for key in MessageKey::ALL {
        let field = schema.field(key).expect("canonical schema declares every key");
        assert_eq!(field.kind(), key.value_kind(), "{key}");
    }
}

#[test]
fn test_submitted_snapshot_with_four_pairs_validates() {
    // Arrange: the exact snapshot a user produces by saving the defaults
    let json = r#"{"SECONDARY_COLOR":"007DCE","PRIMARY_COLOR":"FFFFFF","SHOW_SECONDS":true,"BATTERY_SAVE_SECONDS":false}"#;

    // Act
    let snapshot = SettingsSnapshot::from_json(json).expect("parse");

    // Assert
    assert_eq!(snapshot.len(), 4);
    assert!(snapshot.validate_against(&canonical()).is_ok());
    assert_eq!(
        snapshot.get(MessageKey::SecondaryColor),
        Some(&SettingValue::Color(HexColor::parse("007DCE").unwrap()))
    );
    assert_eq!(snapshot.get(MessageKey::PrimaryColor).map(SettingValue::kind), Some(ValueKind::Color));
    assert_eq!(snapshot.get_bool(MessageKey::ShowSeconds), Some(true));
    assert_eq!(snapshot.get_bool(MessageKey::BatterySaveSeconds), Some(false));
}

#[test]
fn test_canonical_snapshot_does_not_fit_older_variant() {
    let snapshot = canonical().defaults();
    let older = SchemaVariant::BackgroundAccent.schema();
    assert!(snapshot.validate_against(&older).is_err());
}

#[test]
fn test_schema_json_round_trips_through_host_vocabulary() {
    for variant in SchemaVariant::ALL {
        let schema = variant.schema();
        let json = serde_json::to_string(&schema).expect("serialize");
        let back: Schema = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, schema, "{variant}");
    }
}

#[test]
fn test_watch_draws_default_snapshot_as_blue_over_white() {
    let mut watch = WatchSettings::default();
    watch.apply(&canonical().defaults());

    assert_eq!(watch.background, GColor8::WHITE);
    assert_eq!(watch.accent, GColor8::from_hex(0x007DCE));
    assert!(watch.show_seconds);
    assert!(!watch.seconds_auto_hide());
}
