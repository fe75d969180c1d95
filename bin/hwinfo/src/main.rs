// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # hwinfo
//!
//! Waybar `custom` module: prints one JSON record with CPU temperature,
//! CPU load, and memory usage, then exits. The bar's own timer re-runs it.
//!
//! ## Usage
//! ```bash
//! # One sample with the best available backend
//! hwinfo
//!
//! # Force the raw /sys + /proc backend, with debug logs on stderr
//! hwinfo --backend sysfs -vv
//!
//! # Show the effective configuration
//! hwinfo --config ~/.config/hwinfo.toml --print-config
//! ```
//!
//! ## Waybar
//! ```json
//! "custom/hwinfo": { "exec": "hwinfo", "return-type": "json", "interval": 5 }
//! ```

mod logging;

use anyhow::Context;
use clap::Parser;
use hw_sampler::{BackendKind, DisplayLabels, SamplerConfig, StatusRecord};
use std::io::Write;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "hwinfo",
    about = "Print CPU temperature, CPU load and memory usage as a Waybar JSON record",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Backend override: auto, sysinfo, or sysfs.
    #[arg(short, long)]
    backend: Option<BackendKind>,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    print_config: bool,

    /// Enable verbose logging on stderr (repeat for more: -v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e:#}");
            let record = StatusRecord::error(format!("{e:#}"), &DisplayLabels::default());
            emit(&record)?;
            return Ok(ExitCode::FAILURE);
        }
    };

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(ExitCode::SUCCESS);
    }

    let snapshot = hw_sampler::sample(&config);
    emit(&StatusRecord::from_snapshot(&snapshot, &config.labels()))?;
    Ok(ExitCode::SUCCESS)
}

/// Reads the config file (if any) and applies command-line overrides.
fn load_config(cli: &Cli) -> anyhow::Result<SamplerConfig> {
    let mut config = match &cli.config {
        Some(path) => SamplerConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SamplerConfig::default(),
    };
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }
    tracing::debug!(backend = %config.backend, "configuration loaded");
    Ok(config)
}

/// Writes one record as a single JSON line and flushes stdout.
fn emit(record: &StatusRecord) -> anyhow::Result<()> {
    let json = record.to_json().context("serialising status record")?;
    let mut out = std::io::stdout().lock();
    writeln!(out, "{json}").context("writing to stdout")?;
    out.flush().context("flushing stdout")?;
    Ok(())
}
