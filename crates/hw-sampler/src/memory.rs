// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! System memory usage.
//!
//! [`MemoryUsage`] is produced either by the rich backend's unified memory
//! call or by parsing `MemTotal` / `MemAvailable` from `/proc/meminfo`.
//! Used memory is `total - available`, never more than `total`.

use crate::sensors::round_tenth;
use crate::SamplerError;
use std::path::Path;

/// Default path to the kernel memory info file.
pub const MEMINFO_PATH: &str = "/proc/meminfo";

const KIB: u64 = 1024;
const MIB: f64 = 1024.0 * 1024.0;
const GIB: f64 = 1024.0 * 1024.0 * 1024.0;

/// Used and total physical memory, with `used_bytes <= total_bytes`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct MemoryUsage {
    used_bytes: u64,
    total_bytes: u64,
}

impl MemoryUsage {
    /// Creates a usage value, clamping `used` to `total`.
    pub fn new(used_bytes: u64, total_bytes: u64) -> Self {
        if used_bytes > total_bytes {
            tracing::warn!(
                used_bytes,
                total_bytes,
                "used memory exceeds total; clamping"
            );
        }
        Self {
            used_bytes: used_bytes.min(total_bytes),
            total_bytes,
        }
    }

    /// Creates a usage value from total and available memory.
    pub fn from_available(total_bytes: u64, available_bytes: u64) -> Self {
        Self::new(total_bytes.saturating_sub(available_bytes), total_bytes)
    }

    /// Reads memory usage from `/proc/meminfo`-formatted file at `path`.
    pub fn read_meminfo(path: &Path) -> Result<Self, SamplerError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                SamplerError::NotAvailable {
                    path: path.display().to_string(),
                }
            } else {
                SamplerError::ReadError {
                    path: path.display().to_string(),
                    source: e,
                }
            }
        })?;

        Self::parse_meminfo(&content, path)
    }

    /// Parses the content of a `/proc/meminfo`-formatted string.
    pub fn parse_meminfo(content: &str, source_path: &Path) -> Result<Self, SamplerError> {
        let mut total_kb: Option<u64> = None;
        let mut available_kb: Option<u64> = None;

        for line in content.lines() {
            let Some((key, rest)) = line.split_once(':') else {
                continue;
            };
            let slot = match key.trim() {
                "MemTotal" => &mut total_kb,
                "MemAvailable" => &mut available_kb,
                _ => continue,
            };
            let value = rest.split_whitespace().next().unwrap_or("");
            *slot = Some(parse_kb_value(value, source_path)?);

            if total_kb.is_some() && available_kb.is_some() {
                break;
            }
        }

        let total_kb = total_kb.ok_or_else(|| SamplerError::ParseError {
            path: source_path.display().to_string(),
            detail: "MemTotal not found".to_string(),
        })?;
        let available_kb = available_kb.ok_or_else(|| SamplerError::ParseError {
            path: source_path.display().to_string(),
            detail: "MemAvailable not found".to_string(),
        })?;

        Ok(Self::from_available(
            total_kb.saturating_mul(KIB),
            available_kb.saturating_mul(KIB),
        ))
    }

    pub fn used_bytes(&self) -> u64 {
        self.used_bytes
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    /// Used memory as a percentage of total, rounded to one decimal.
    ///
    /// Returns `0.0` when total is zero.
    pub fn percent(&self) -> f32 {
        if self.total_bytes == 0 {
            return 0.0;
        }
        round_tenth((self.used_bytes as f64 / self.total_bytes as f64 * 100.0) as f32)
    }

    pub fn used_gib(&self) -> f64 {
        self.used_bytes as f64 / GIB
    }

    pub fn total_gib(&self) -> f64 {
        self.total_bytes as f64 / GIB
    }

    pub fn used_mib(&self) -> f64 {
        self.used_bytes as f64 / MIB
    }

    pub fn total_mib(&self) -> f64 {
        self.total_bytes as f64 / MIB
    }
}

/// Parses a numeric string from `/proc/meminfo` (values are in kB).
fn parse_kb_value(s: &str, source_path: &Path) -> Result<u64, SamplerError> {
    s.parse::<u64>().map_err(|_| SamplerError::ParseError {
        path: source_path.display().to_string(),
        detail: format!("expected integer kB value, got '{s}'"),
    })
}
