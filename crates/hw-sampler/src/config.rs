// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Sampler configuration loaded from TOML files or constructed programmatically.
//!
//! # TOML Format
//! ```toml
//! backend = "auto"
//! thermal_root = "/sys/class/thermal"
//! meminfo_path = "/proc/meminfo"
//! load_window_ms = 1000
//! class = "hwinfo"
//! alt = "hwinfo"
//! ```
//!
//! Every field is optional. The sampling interval itself belongs to the
//! status bar and is not configured here.

use crate::backend::BackendKind;
use crate::memory::MEMINFO_PATH;
use crate::render::DisplayLabels;
use crate::thermal::THERMAL_ROOT;
use crate::SamplerError;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Shortest window over which CPU usage can be measured meaningfully.
#[cfg(feature = "sysinfo")]
const MIN_LOAD_WINDOW: Duration = sysinfo::MINIMUM_CPU_UPDATE_INTERVAL;
#[cfg(not(feature = "sysinfo"))]
const MIN_LOAD_WINDOW: Duration = Duration::from_millis(200);

/// Configuration for one sampling pass.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Which backend to use: `"auto"`, `"sysinfo"` or `"sysfs"`.
    pub backend: BackendKind,
    /// Directory holding `thermal_zoneN` entries.
    pub thermal_root: PathBuf,
    /// `/proc/meminfo`-formatted file.
    pub meminfo_path: PathBuf,
    /// CPU usage sampling window in milliseconds.
    pub load_window_ms: u64,
    /// Value of the `class` field in the status record.
    pub class: String,
    /// Value of the `alt` field in the status record.
    pub alt: String,
}

impl SamplerConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, SamplerError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SamplerError::ConfigError(format!("cannot read config '{}': {e}", path.display()))
        })?;
        Self::from_toml(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, SamplerError> {
        toml::from_str(toml_str)
            .map_err(|e| SamplerError::ConfigError(format!("TOML parse error: {e}")))
    }

    /// Serialises configuration to TOML.
    pub fn to_toml(&self) -> Result<String, SamplerError> {
        toml::to_string_pretty(self)
            .map_err(|e| SamplerError::ConfigError(format!("TOML serialise error: {e}")))
    }

    /// The CPU usage sampling window, never shorter than the minimum the
    /// rich backend can measure.
    pub fn load_window(&self) -> Duration {
        Duration::from_millis(self.load_window_ms).max(MIN_LOAD_WINDOW)
    }

    /// The fixed tags placed in every status record.
    pub fn labels(&self) -> DisplayLabels {
        DisplayLabels {
            class: self.class.clone(),
            alt: self.alt.clone(),
        }
    }
}

impl Default for SamplerConfig {
    fn default() -> Self {
        let labels = DisplayLabels::default();
        Self {
            backend: BackendKind::Auto,
            thermal_root: PathBuf::from(THERMAL_ROOT),
            meminfo_path: PathBuf::from(MEMINFO_PATH),
            load_window_ms: 1000,
            class: labels.class,
            alt: labels.alt,
        }
    }
}
