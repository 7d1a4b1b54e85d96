//! Conditional enablement: one toggle decides whether another can be used.
//!
//! The battery-saving mode only means something while the seconds are shown,
//! so the "Battery Saving Mode" toggle is enabled exactly when the "Show
//! Seconds" toggle is on.
//!
//! # State machine
//!
//! The controlled toggle has two states, driven entirely by the last value the
//! controlling toggle reported:
//!
//! ```text
//!              controlling = true
//!   Disabled  ───────────────────►  Enabled
//!             ◄───────────────────
//!              controlling = false
//! ```
//!
//! The initial state is derived synchronously when the rule is installed,
//! then a change subscription re-applies the same decision on every
//! notification.

use halfhalf_core::{MessageKey, Schema, SettingValue, ValueKind};
use thiserror::Error;
use tracing::{debug, info};

use super::form::{FormControl, FormError, FormHandle};

/// Errors raised while installing a rule.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RuleError {
    /// The rule names a field the form does not have.  This is a defect in
    /// the schema, not a runtime condition.
    #[error("schema defect: enablement rule references missing field {0}")]
    MissingField(MessageKey),

    /// The form rejected one of the rule's operations.
    #[error(transparent)]
    Form(#[from] FormError),
}

/// Enables `controlled` iff the toggle `controlling` is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnablementRule {
    pub controlling: MessageKey,
    pub controlled: MessageKey,
}

impl EnablementRule {
    /// "Show Seconds" drives "Battery Saving Mode".
    pub const SECONDS: EnablementRule = EnablementRule {
        controlling: MessageKey::ShowSeconds,
        controlled: MessageKey::BatterySaveSeconds,
    };

    /// Applies the rule to the form's current state and subscribes it to
    /// future changes of the controlling toggle.
    ///
    /// Installing the same rule twice leaves two subscriptions that always
    /// set the same state.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::MissingField`] if either field is absent, or
    /// [`RuleError::Form`] if the form rejects a read, write or subscription.
    pub fn install<F: FormHandle + ?Sized>(&self, form: &mut F) -> Result<(), RuleError> {
        for key in [self.controlling, self.controlled] {
            if !form.has_field(key) {
                return Err(RuleError::MissingField(key));
            }
        }

        let current = form.toggle_value(self.controlling)?;
        self.apply(form, current)?;

        let rule = *self;
        form.on_change(
            self.controlling,
            Box::new(move |form: &mut dyn FormControl, value: &SettingValue| {
                let on = value.as_bool().ok_or(FormError::TypeMismatch {
                    key: rule.controlling,
                    expected: ValueKind::Bool,
                    found: value.kind(),
                })?;
                rule.apply(form, on)
            }),
        )?;

        info!(
            controlling = %self.controlling,
            controlled = %self.controlled,
            enabled = current,
            "enablement rule installed"
        );
        Ok(())
    }

    /// Sets the controlled field's state for a controlling value.
    pub fn apply<F: FormControl + ?Sized>(&self, form: &mut F, controlling_on: bool) -> Result<(), FormError> {
        debug!(
            controlled = %self.controlled,
            enabled = controlling_on,
            "applying enablement rule"
        );
        form.set_enabled(self.controlled, controlling_on)
    }
}

/// The rules a schema calls for: every known rule touching a field it
/// declares.
///
/// A schema declaring only one of a rule's two fields still gets the rule, so
/// [`EnablementRule::install`] reports the missing one as a schema defect.
pub fn rules_for(schema: &Schema) -> Vec<EnablementRule> {
    [EnablementRule::SECONDS]
        .into_iter()
        .filter(|rule| schema.declares(rule.controlling) || schema.declares(rule.controlled))
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::form::ChangeHandler;
    use halfhalf_core::SchemaVariant;
    use mockall::{mock, predicate::eq};
    use std::cell::RefCell;
    use std::rc::Rc;

    mock! {
        pub Form {}

        impl FormControl for Form {
            fn has_field(&self, key: MessageKey) -> bool;
            fn toggle_value(&self, key: MessageKey) -> Result<bool, FormError>;
            fn set_enabled(&mut self, key: MessageKey, enabled: bool) -> Result<(), FormError>;
        }

        impl FormHandle for Form {
            fn on_change(&mut self, key: MessageKey, handler: ChangeHandler) -> Result<(), FormError>;
        }
    }

    /// A mock form with both seconds toggles present and "Show Seconds" at
    /// `show_seconds`.  The subscribed handler is stored in `slot`.
    fn form_with_show_seconds(show_seconds: bool, slot: Rc<RefCell<Option<ChangeHandler>>>) -> MockForm {
        let mut form = MockForm::new();
        form.expect_has_field().returning(|_| true);
        form.expect_toggle_value()
            .with(eq(MessageKey::ShowSeconds))
            .times(1)
            .returning(move |_| Ok(show_seconds));
        form.expect_set_enabled()
            .with(eq(MessageKey::BatterySaveSeconds), eq(show_seconds))
            .times(1)
            .returning(|_, _| Ok(()));
        form.expect_on_change()
            .withf(|key, _| *key == MessageKey::ShowSeconds)
            .times(1)
            .returning_st(move |_, handler| {
                *slot.borrow_mut() = Some(handler);
                Ok(())
            });
        form
    }

    #[test]
    fn test_install_enables_controlled_when_controlling_is_on() {
        let mut form = form_with_show_seconds(true, Rc::default());
        assert_eq!(EnablementRule::SECONDS.install(&mut form), Ok(()));
    }

    #[test]
    fn test_install_disables_controlled_when_controlling_is_off() {
        let mut form = form_with_show_seconds(false, Rc::default());
        assert_eq!(EnablementRule::SECONDS.install(&mut form), Ok(()));
    }

    #[test]
    fn test_subscribed_handler_follows_reported_value() {
        // Arrange
        let slot: Rc<RefCell<Option<ChangeHandler>>> = Rc::default();
        let mut form = form_with_show_seconds(true, Rc::clone(&slot));
        EnablementRule::SECONDS.install(&mut form).unwrap();
        let mut handler = slot.borrow_mut().take().expect("rule must subscribe");

        let mut later = MockForm::new();
        later
            .expect_set_enabled()
            .with(eq(MessageKey::BatterySaveSeconds), eq(false))
            .times(1)
            .returning(|_, _| Ok(()));

        // Act
        let result = handler(&mut later, &SettingValue::Bool(false));

        // Assert
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn test_handler_rejects_non_bool_notification() {
        let slot: Rc<RefCell<Option<ChangeHandler>>> = Rc::default();
        let mut form = form_with_show_seconds(true, Rc::clone(&slot));
        EnablementRule::SECONDS.install(&mut form).unwrap();
        let mut handler = slot.borrow_mut().take().expect("rule must subscribe");

        // No expectations: the handler must not touch the form.
        let mut later = MockForm::new();
        let color = SettingValue::Color(halfhalf_core::HexColor::parse("000000").unwrap());
        let result = handler(&mut later, &color);

        assert_eq!(
            result,
            Err(FormError::TypeMismatch {
                key: MessageKey::ShowSeconds,
                expected: ValueKind::Bool,
                found: ValueKind::Color,
            })
        );
    }

    #[test]
    fn test_install_reports_missing_controlled_field_as_schema_defect() {
        // Arrange: the form has "Show Seconds" but no battery-saving toggle
        let mut form = MockForm::new();
        form.expect_has_field()
            .returning(|key| key == MessageKey::ShowSeconds);

        // Act
        let result = EnablementRule::SECONDS.install(&mut form);

        // Assert: nothing was read, written or subscribed
        assert_eq!(result, Err(RuleError::MissingField(MessageKey::BatterySaveSeconds)));
    }

    #[test]
    fn test_install_propagates_subscription_failure() {
        let mut form = MockForm::new();
        form.expect_has_field().returning(|_| true);
        form.expect_toggle_value().returning(|_| Ok(true));
        form.expect_set_enabled().returning(|_, _| Ok(()));
        form.expect_on_change()
            .returning(|key, _| Err(FormError::UnknownField(key)));

        let result = EnablementRule::SECONDS.install(&mut form);

        assert_eq!(
            result,
            Err(RuleError::Form(FormError::UnknownField(MessageKey::ShowSeconds)))
        );
    }

    #[test]
    fn test_rules_for_canonical_schema_is_seconds_rule() {
        let rules = rules_for(&SchemaVariant::HalfHalf.schema());
        assert_eq!(rules, vec![EnablementRule::SECONDS]);
    }

    #[test]
    fn test_rules_for_half_declared_pair_still_selects_rule() {
        let only_controlled = Schema::new(vec![halfhalf_core::FieldDescriptor::toggle(
            MessageKey::BatterySaveSeconds,
            "Battery Saving Mode",
            false,
            None,
        )]);
        let only_controlling = Schema::new(vec![halfhalf_core::FieldDescriptor::toggle(
            MessageKey::ShowSeconds,
            "Show Seconds",
            true,
            None,
        )]);

        assert_eq!(rules_for(&only_controlled), vec![EnablementRule::SECONDS]);
        assert_eq!(rules_for(&only_controlling), vec![EnablementRule::SECONDS]);
    }

    #[test]
    fn test_rules_for_schema_without_seconds_is_empty() {
        assert!(rules_for(&SchemaVariant::BackgroundAccent.schema()).is_empty());
        assert!(rules_for(&SchemaVariant::Illustrated.schema()).is_empty());
    }
}
