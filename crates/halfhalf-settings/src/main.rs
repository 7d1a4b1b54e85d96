//! Half/Half settings host: entry point.
//!
//! Drives the settings page from the command line: print the schema or the
//! page a device would render, open the page with the saved values, apply
//! user changes in order (with the battery-saving toggle following "Show
//! Seconds"), and submit the resulting snapshot.
//!
//! # Usage
//!
//! ```text
//! halfhalf-settings [OPTIONS] <COMMAND>
//!
//! Commands:
//!   schema     Print the full schema with capability filters
//!   render     Print the page as rendered for the configured device
//!   defaults   Print the default snapshot
//!   submit     Open the page, apply --set changes, print and save the snapshot
//!   validate   Check a snapshot file against the schema
//!
//! Options:
//!   --config <PATH>           Config file [default: platform config dir]
//!   --variant <VARIANT>       half-half | background-accent | illustrated
//!   --capabilities <LIST>     Comma-separated capability names
//!   --platform <NAME>         aplite | basalt | chalk | diorite | emery
//! ```
//!
//! # Environment variable overrides
//!
//! | Variable           | Description                          |
//! |--------------------|--------------------------------------|
//! | `HALFHALF_CONFIG`  | Config file path                     |
//! | `HALFHALF_VARIANT` | Schema variant                       |
//! | `RUST_LOG`         | Log filter (overrides `[logging]`)   |
//!
//! Logs go to stderr; stdout carries only JSON output.

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context};
use clap::{Parser, Subcommand};
use halfhalf_core::{
    Capability, CapabilitySet, MessageKey, SchemaVariant, SettingValue, SettingsSnapshot, WatchSettings,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

use halfhalf_settings::application::open_page::open_settings_page;
use halfhalf_settings::infrastructure::render::{render_page, render_schema};
use halfhalf_settings::infrastructure::storage::config::{config_file_path, load_config_from, AppConfig};
use halfhalf_settings::infrastructure::storage::snapshot_store::SnapshotStore;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Settings page host for the Half/Half watchface.
#[derive(Debug, Parser)]
#[command(name = "halfhalf-settings", about = "Settings page host for the Half/Half watchface", version)]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, env = "HALFHALF_CONFIG")]
    config: Option<PathBuf>,

    /// Schema variant to render.  Overrides `[page] variant`.
    #[arg(long, env = "HALFHALF_VARIANT")]
    variant: Option<SchemaVariant>,

    /// Capabilities the device reports, e.g. `COLOR,RECT`.  Overrides
    /// `[page] capabilities`.
    #[arg(long, value_delimiter = ',', conflicts_with = "platform")]
    capabilities: Option<Vec<Capability>>,

    /// Use the capability set of a named watch platform.
    #[arg(long)]
    platform: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the full schema with capability filters.
    Schema,
    /// Print the page as rendered for the configured device.
    Render,
    /// Print the default snapshot.
    Defaults,
    /// Open the page, apply changes in order, print and save the snapshot.
    Submit {
        /// A user change, `KEY=VALUE` (e.g. `SHOW_SECONDS=false`).  Repeatable.
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,

        /// Print the snapshot without saving it.
        #[arg(long)]
        no_save: bool,
    },
    /// Check a snapshot JSON file against the schema.
    Validate {
        file: PathBuf,
    },
}

/// Everything a command needs, resolved from the CLI and the config file.
struct Session {
    variant: SchemaVariant,
    capabilities: CapabilitySet,
    store: SnapshotStore,
}

impl Cli {
    fn session(&self, config: &AppConfig, config_path: &std::path::Path) -> anyhow::Result<Session> {
        let capabilities = match (&self.capabilities, &self.platform) {
            (Some(list), _) => CapabilitySet::new(list.iter().copied()),
            (None, Some(platform)) => CapabilitySet::for_platform(platform)?,
            (None, None) => config.page.capabilities.clone(),
        };
        Ok(Session {
            variant: self.variant.unwrap_or(config.page.variant),
            capabilities,
            store: SnapshotStore::new(config.snapshot_path(config_path)),
        })
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => config_file_path().context("no --config given and no platform config directory")?,
    };
    let config = load_config_from(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;

    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    let session = cli.session(&config, &config_path)?;
    info!(
        variant = %session.variant,
        capabilities = session.capabilities.iter().count(),
        "settings host starting"
    );

    match cli.command {
        Command::Schema => {
            println!("{}", render_schema(&session.variant.schema())?);
        }
        Command::Render => {
            println!("{}", render_page(&session.variant.schema(), &session.capabilities)?);
        }
        Command::Defaults => {
            println!("{}", serde_json::to_string_pretty(&session.variant.schema().defaults())?);
        }
        Command::Submit { set, no_save } => submit(&session, &set, no_save)?,
        Command::Validate { file } => validate(&session, &file)?,
    }
    Ok(())
}

/// Opens the page with the saved values, replays `assignments` as user
/// changes, then prints and (unless `no_save`) stores the snapshot.
fn submit(session: &Session, assignments: &[String], no_save: bool) -> anyhow::Result<()> {
    let saved = session.store.load()?;
    let mut form = open_settings_page(session.variant, &session.capabilities, saved.as_ref())?;

    for assignment in assignments {
        let (key, value) = parse_assignment(assignment)?;
        form.set_value(key, value)
            .with_context(|| format!("could not apply {assignment}"))?;
        info!(
            %key,
            battery_save_enabled = ?form.is_enabled(MessageKey::BatterySaveSeconds).ok(),
            "applied change"
        );
    }

    let snapshot = form.submit();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    if !no_save {
        session.store.save(&snapshot)?;
    }
    Ok(())
}

fn validate(session: &Session, file: &std::path::Path) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(file).with_context(|| format!("failed to read {}", file.display()))?;
    let snapshot = SettingsSnapshot::from_json(&text)?;
    snapshot
        .validate_against(&session.variant.schema())
        .with_context(|| format!("{} does not match the {} schema", file.display(), session.variant))?;

    let mut watch = WatchSettings::default();
    watch.apply(&snapshot);
    println!(
        "ok: background=0x{:02X} accent=0x{:02X} show_seconds={} battery_save_seconds={}",
        watch.background.argb, watch.accent.argb, watch.show_seconds, watch.battery_save_seconds
    );
    Ok(())
}

/// Splits `KEY=VALUE` and parses the value as the key's type.
fn parse_assignment(text: &str) -> anyhow::Result<(MessageKey, SettingValue)> {
    let (key, value) = text
        .split_once('=')
        .ok_or_else(|| anyhow!("expected KEY=VALUE, got {text:?}"))?;
    let key: MessageKey = key.trim().parse()?;
    let Some(value) = SettingValue::parse_as(key.value_kind(), value.trim()) else {
        bail!("{value:?} is not a valid {} value for {key}", key.value_kind());
    };
    Ok((key, value))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
