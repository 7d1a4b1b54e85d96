//! The form handle a host provides, and an in-memory host built from a schema.
//!
//! After the host has rendered the page it hands behavioural hooks a handle to
//! the constructed form.  Through that handle a hook can look fields up by
//! message key, read a toggle, enable or disable a field, and subscribe to a
//! field's change notifications.  The handle is always passed explicitly;
//! nothing reaches for an ambient "current form".
//!
//! # Event model
//!
//! Everything is single-threaded and synchronous.  A user interaction
//! ([`SettingsForm::set_value`]) stores the new value and then runs every
//! handler subscribed to that field, in subscription order, before
//! returning.  Handlers receive the form as `&mut dyn FormControl`, so they
//! can change other fields' state but cannot subscribe further handlers while
//! a notification is being dispatched.
//!
//! # Testability
//!
//! The rule in [`enable_rule`](super::enable_rule) only sees the traits, so
//! unit tests drive it with a `mockall` mock while integration tests use
//! [`SettingsForm`].

use std::collections::HashMap;

use halfhalf_core::{
    CapabilitySet, HexColor, MessageKey, Schema, SchemaError, SettingValue, SettingsSnapshot,
    ValueKind,
};
use thiserror::Error;
use tracing::{debug, error, warn};

/// Errors reported by a form handle.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    /// No field on the form carries this key.
    #[error("no field with message key {0}")]
    UnknownField(MessageKey),

    /// The value does not have the field's type.
    #[error("field {key} holds {expected} values, got {found}")]
    TypeMismatch {
        key: MessageKey,
        expected: ValueKind,
        found: ValueKind,
    },

    /// The user tried to change a disabled field.
    #[error("field {0} is disabled")]
    Disabled(MessageKey),
}

/// A change notification handler.
///
/// Called with the form and the field's newly reported value.
pub type ChangeHandler = Box<dyn FnMut(&mut dyn FormControl, &SettingValue) -> Result<(), FormError>>;

/// Field lookup, read, and enable/disable on a constructed form.
pub trait FormControl {
    /// Returns `true` if a field with `key` exists on the form.
    fn has_field(&self, key: MessageKey) -> bool;

    /// Reads the current value of a toggle.
    fn toggle_value(&self, key: MessageKey) -> Result<bool, FormError>;

    /// Enables or disables a field.
    fn set_enabled(&mut self, key: MessageKey, enabled: bool) -> Result<(), FormError>;
}

/// A [`FormControl`] that also accepts change subscriptions.
pub trait FormHandle: FormControl {
    /// Subscribes `handler` to future changes of the field `key`.
    fn on_change(&mut self, key: MessageKey, handler: ChangeHandler) -> Result<(), FormError>;
}

/// Runtime state of one interactive field.
#[derive(Debug, Clone)]
struct FormItem {
    key: MessageKey,
    kind: ValueKind,
    label: String,
    value: SettingValue,
    enabled: bool,
}

/// An in-memory settings form built from a schema.
///
/// Holds the page as rendered for one device plus the current value and
/// enabled state of every interactive field on it.
pub struct SettingsForm {
    page: Schema,
    items: Vec<FormItem>,
    handlers: HashMap<MessageKey, Vec<ChangeHandler>>,
}

impl SettingsForm {
    /// Builds the form for a device reporting `capabilities`.
    ///
    /// Every interactive field starts at its default value, enabled.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] if the schema is defective.
    pub fn build(schema: &Schema, capabilities: &CapabilitySet) -> Result<Self, SchemaError> {
        schema.validate()?;
        let page = schema.visible_for(capabilities);
        let items = page
            .interactive_fields()
            .iter()
            .map(|field| FormItem {
                key: field.key(),
                kind: field.kind(),
                label: field.label().to_string(),
                value: field.default_value(),
                enabled: true,
            })
            .collect();

        Ok(Self {
            page,
            items,
            handlers: HashMap::new(),
        })
    }

    /// The page as rendered for this device.
    pub fn page(&self) -> &Schema {
        &self.page
    }

    /// Seeds previously submitted values without notifying subscribers.
    ///
    /// Keys the form does not have, or values of the wrong type, are skipped.
    /// Returns the number of values restored.
    pub fn restore(&mut self, saved: &SettingsSnapshot) -> usize {
        let mut restored = 0;
        for (key, value) in saved.iter() {
            let Some(item) = self.items.iter_mut().find(|i| i.key == key) else {
                warn!(%key, "saved value for a field this page does not have; skipping");
                continue;
            };
            if item.kind != value.kind() {
                warn!(%key, expected = %item.kind, found = %value.kind(), "saved value has the wrong type; skipping");
                continue;
            }
            item.value = value.clone();
            restored += 1;
        }
        restored
    }

    /// The current value of a field.
    pub fn value(&self, key: MessageKey) -> Option<&SettingValue> {
        self.item(key).ok().map(|item| &item.value)
    }

    /// The label a field is rendered with.
    pub fn label(&self, key: MessageKey) -> Option<&str> {
        self.item(key).ok().map(|item| item.label.as_str())
    }

    /// Whether a field currently accepts user input.
    pub fn is_enabled(&self, key: MessageKey) -> Result<bool, FormError> {
        Ok(self.item(key)?.enabled)
    }

    /// Number of change handlers subscribed to a field.
    pub fn subscriber_count(&self, key: MessageKey) -> usize {
        self.handlers.get(&key).map_or(0, Vec::len)
    }

    /// Applies a user change to a field and notifies its subscribers.
    ///
    /// # Errors
    ///
    /// Returns [`FormError::UnknownField`], [`FormError::TypeMismatch`] or
    /// [`FormError::Disabled`] without changing anything, or the first error a
    /// subscriber returned (the value is kept and every subscriber still runs).
    pub fn set_value(&mut self, key: MessageKey, value: SettingValue) -> Result<(), FormError> {
        let item = self.item_mut(key)?;
        if item.kind != value.kind() {
            return Err(FormError::TypeMismatch {
                key,
                expected: item.kind,
                found: value.kind(),
            });
        }
        if !item.enabled {
            return Err(FormError::Disabled(key));
        }
        item.value = value.clone();
        debug!(%key, ?value, "field changed");
        self.dispatch(key, &value)
    }

    pub fn set_toggle(&mut self, key: MessageKey, on: bool) -> Result<(), FormError> {
        self.set_value(key, SettingValue::Bool(on))
    }

    pub fn set_color(&mut self, key: MessageKey, color: HexColor) -> Result<(), FormError> {
        self.set_value(key, SettingValue::Color(color))
    }

    /// Collects every interactive field's current value, disabled fields
    /// included.
    pub fn submit(&self) -> SettingsSnapshot {
        self.items
            .iter()
            .map(|item| (item.key, item.value.clone()))
            .collect()
    }

    fn dispatch(&mut self, key: MessageKey, value: &SettingValue) -> Result<(), FormError> {
        let mut handlers = self.handlers.remove(&key).unwrap_or_default();
        let mut result = Ok(());
        for handler in handlers.iter_mut() {
            if let Err(e) = handler(&mut *self as &mut dyn FormControl, value) {
                error!(%key, "change handler failed: {e}");
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }
        self.handlers.insert(key, handlers);
        result
    }

    fn item(&self, key: MessageKey) -> Result<&FormItem, FormError> {
        self.items
            .iter()
            .find(|i| i.key == key)
            .ok_or(FormError::UnknownField(key))
    }

    fn item_mut(&mut self, key: MessageKey) -> Result<&mut FormItem, FormError> {
        self.items
            .iter_mut()
            .find(|i| i.key == key)
            .ok_or(FormError::UnknownField(key))
    }
}

impl FormControl for SettingsForm {
    fn has_field(&self, key: MessageKey) -> bool {
        self.items.iter().any(|i| i.key == key)
    }

    fn toggle_value(&self, key: MessageKey) -> Result<bool, FormError> {
        let item = self.item(key)?;
        item.value.as_bool().ok_or(FormError::TypeMismatch {
            key,
            expected: ValueKind::Bool,
            found: item.kind,
        })
    }

    fn set_enabled(&mut self, key: MessageKey, enabled: bool) -> Result<(), FormError> {
        let item = self.item_mut(key)?;
        if item.enabled != enabled {
            debug!(%key, enabled, "field enablement changed");
        }
        item.enabled = enabled;
        Ok(())
    }
}

impl FormHandle for SettingsForm {
    fn on_change(&mut self, key: MessageKey, handler: ChangeHandler) -> Result<(), FormError> {
        if !self.has_field(key) {
            return Err(FormError::UnknownField(key));
        }
        self.handlers.entry(key).or_default().push(handler);
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
