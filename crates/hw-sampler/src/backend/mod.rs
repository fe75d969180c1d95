// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! The [`Backend`] trait and backend selection.
//!
//! | Backend | Temperature | Memory | CPU load |
//! |---|---|---|---|
//! | [`SysinfoBackend`] | hwmon chips, then thermal zones | unified stats, then `/proc/meminfo` | yes |
//! | [`SysfsBackend`] | thermal zones | `/proc/meminfo` | no |
//!
//! [`select_backend`] probes once at startup; the sampling pipeline only
//! ever sees `dyn Backend`.

#[cfg(feature = "sysinfo")]
mod rich;
mod sysfs;

#[cfg(feature = "sysinfo")]
pub use rich::SysinfoBackend;
pub use sysfs::SysfsBackend;

use crate::{CpuLoad, MemoryUsage, SamplerConfig, SamplerError};
use std::fmt;
use std::str::FromStr;

/// A source of hardware readings.
///
/// Each operation reports its own failure; the caller decides what an
/// error means for the snapshot.
pub trait Backend {
    /// Short name used in logs and in the snapshot.
    fn name(&self) -> &'static str;

    /// Reads the most believable CPU temperature in degrees Celsius.
    ///
    /// `Ok(None)` means sensors were readable but none was plausible.
    fn read_temperature(&mut self) -> Result<Option<f32>, SamplerError>;

    /// Reads used and total physical memory.
    fn read_memory(&mut self) -> Result<MemoryUsage, SamplerError>;

    /// Measures overall and per-core CPU utilisation.
    fn read_cpu_load(&mut self) -> Result<CpuLoad, SamplerError>;
}

/// Which backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// The rich backend when compiled in and supported, else sysfs.
    #[default]
    Auto,
    /// The `sysinfo`-based rich backend.
    Sysinfo,
    /// Raw `/sys` and `/proc` files only.
    Sysfs,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BackendKind::Auto => "auto",
            BackendKind::Sysinfo => "sysinfo",
            BackendKind::Sysfs => "sysfs",
        };
        f.write_str(name)
    }
}

impl FromStr for BackendKind {
    type Err = SamplerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(BackendKind::Auto),
            "sysinfo" | "rich" => Ok(BackendKind::Sysinfo),
            "sysfs" | "fallback" => Ok(BackendKind::Sysfs),
            other => Err(SamplerError::ConfigError(format!(
                "unknown backend '{other}'; expected 'auto', 'sysinfo', or 'sysfs'"
            ))),
        }
    }
}

/// Returns `true` if the rich backend is compiled in and supports this OS.
pub fn rich_backend_available() -> bool {
    #[cfg(feature = "sysinfo")]
    {
        sysinfo::IS_SUPPORTED_SYSTEM
    }
    #[cfg(not(feature = "sysinfo"))]
    {
        false
    }
}

/// Creates the backend requested by `config`, falling back to sysfs when
/// the rich backend is missing.
pub fn select_backend(config: &SamplerConfig) -> Box<dyn Backend> {
    let fallback = SysfsBackend::from_config(config);

    let want_rich = match config.backend {
        BackendKind::Sysfs => false,
        BackendKind::Auto => rich_backend_available(),
        BackendKind::Sysinfo => {
            if !rich_backend_available() {
                tracing::warn!("sysinfo backend requested but unavailable; using sysfs");
            }
            rich_backend_available()
        }
    };

    if !want_rich {
        tracing::debug!("using {} backend", fallback.name());
        return Box::new(fallback);
    }

    #[cfg(feature = "sysinfo")]
    {
        let rich = SysinfoBackend::new(fallback, config.load_window());
        tracing::debug!("using {} backend", rich.name());
        Box::new(rich)
    }
    #[cfg(not(feature = "sysinfo"))]
    {
        Box::new(fallback)
    }
}
