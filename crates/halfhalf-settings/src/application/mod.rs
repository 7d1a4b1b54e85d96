//! Application layer use cases for the settings page.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure data and rules) and the infrastructure (files, terminals, hosts).
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain objects to fulfil a user goal (e.g., "open the
//!   settings page with the previously saved values").
//! - **Depend on abstractions** (traits) rather than concrete hosts, so the
//!   enablement rule can be driven by a real form, an in-memory form, or a
//!   mock in tests.
//! - **Contain no file system access and no terminal output**.
//!
//! # Sub-modules
//!
//! - **`form`**        – The [`FormControl`](form::FormControl) /
//!   [`FormHandle`](form::FormHandle) traits a host provides, and
//!   [`SettingsForm`](form::SettingsForm), an in-memory host built from a
//!   schema.
//!
//! - **`enable_rule`** – Links the enabled state of one toggle to the value of
//!   another (show seconds → battery-saving seconds).
//!
//! - **`open_page`**   – Builds a form, restores saved values, and installs
//!   every rule the schema calls for.

pub mod enable_rule;
pub mod form;
pub mod open_page;
