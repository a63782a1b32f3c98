// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Conduit CLI entrypoint.
//!
//! # Usage
//! ```text
//! conduit-cli scenarios [--json] [--config FILE | --config-dir DIR] [--log-level LEVEL]
//! conduit-cli actions
//! ```
//!
//! Exits with code `0` when every scenario check holds and `1` otherwise.
//! Logs go to stderr so `--json` output stays machine readable.

// The CLI is expected to print to stdout/stderr.
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod scenarios;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, Table};
use conduit_config_fs::FsConfigStore;
use conduit_core::{ConfigService, Pipe, PipeRegistry, Position, PowerSwitchPipe, SwitchConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Conduit power switch developer CLI")]
struct Args {
    /// Default log level when RUST_LOG is unset (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the reference scenarios on an in-memory grid
    Scenarios {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
        /// Read switch config from this JSON file
        #[arg(long, conflicts_with = "config_dir")]
        config: Option<PathBuf>,
        /// Read switch config from a config store rooted at this directory
        #[arg(long)]
        config_dir: Option<PathBuf>,
    },
    /// List the actions a power switch advertises
    Actions,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&args.log_level).context("invalid log level")?,
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match args.command {
        Command::Scenarios {
            json,
            config,
            config_dir,
        } => {
            let cfg = load_config(config.as_deref(), config_dir.as_deref())?;
            debug!(?cfg, "loaded switch config");
            run_scenarios(&cfg, json)
        }
        Command::Actions => {
            list_actions();
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_config(file: Option<&Path>, dir: Option<&Path>) -> Result<SwitchConfig> {
    if let Some(path) = file {
        let bytes =
            std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        return serde_json::from_slice(&bytes)
            .with_context(|| format!("parsing {}", path.display()));
    }
    if let Some(dir) = dir {
        let store = FsConfigStore::at(dir)?;
        return Ok(ConfigService::new(store).load_switch_config()?);
    }
    Ok(SwitchConfig::default())
}

fn run_scenarios(cfg: &SwitchConfig, json: bool) -> Result<ExitCode> {
    let outcomes = scenarios::run_all(cfg);
    if json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    } else {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL).set_header(vec![
            "scenario", "summary", "redstone", "switched", "toggled", "open", "checks",
        ]);
        for o in &outcomes {
            let held = o.checks.iter().filter(|c| c.ok).count();
            table.add_row(vec![
                o.name.to_string(),
                o.summary.to_string(),
                o.state.redstone.to_string(),
                o.state.switched.to_string(),
                o.state.toggled.to_string(),
                o.state.is_open().to_string(),
                format!("{held}/{}", o.checks.len()),
            ]);
        }
        println!("{table}");
        for o in outcomes.iter().filter(|o| !o.passed()) {
            for c in o.checks.iter().filter(|c| !c.ok) {
                eprintln!("{}: check failed: {}", o.name, c.label);
            }
        }
    }

    if outcomes.iter().all(scenarios::Outcome::passed) {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn list_actions() {
    let mut registry = PipeRegistry::new();
    let cfg = SwitchConfig::default();
    PowerSwitchPipe::register(&mut registry, &cfg);
    let pipe = PowerSwitchPipe::new(Position::default(), &registry, &cfg);
    for action in pipe.actions() {
        println!("{}", action.label());
    }
}
