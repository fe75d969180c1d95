// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Raw kernel thermal zones under `/sys/class/thermal/`.
//!
//! Each `thermal_zoneN` directory exposes `temp` (millidegrees Celsius,
//! e.g. `58400` → 58.4 °C) and `type` (the zone's driver, e.g.
//! `x86_pkg_temp`, `acpitz`, `cpu-thermal`).

use crate::sensors::{self, SensorReading};
use crate::SamplerError;
use std::path::{Path, PathBuf};

/// Default sysfs directory holding the thermal zones.
pub const THERMAL_ROOT: &str = "/sys/class/thermal";

const ZONE_PREFIX: &str = "thermal_zone";

/// Type reported for zones whose `type` file is missing or unreadable.
const UNKNOWN_ZONE_TYPE: &str = "unknown";

/// Enumerates the thermal zones below `root`, in zone-index order.
///
/// A zone whose `temp` cannot be read or parsed is skipped with a warning.
/// A missing `root` is reported as [`SamplerError::NotAvailable`].
pub fn read_zones(root: &Path) -> Result<Vec<SensorReading>, SamplerError> {
    let mut zones = zone_dirs(root)?;
    zones.sort_by_key(|(idx, _)| *idx);

    let mut readings = Vec::with_capacity(zones.len());
    for (_, dir) in zones {
        match read_zone(&dir) {
            Ok(reading) => readings.push(reading),
            Err(e) => tracing::warn!("skipping thermal zone: {e}"),
        }
    }
    Ok(readings)
}

/// Picks a CPU temperature from the zones below `root`.
///
/// Ranks zones by their `type` like hwmon chips; if no zone type is
/// recognised, the first zone with a plausible value wins.
pub fn zone_temperature(root: &Path) -> Result<Option<f32>, SamplerError> {
    let zones = read_zones(root)?;
    if zones.is_empty() {
        tracing::debug!("no thermal zones under {}", root.display());
    }
    Ok(sensors::select_temperature(&zones).or_else(|| sensors::first_valid(&zones)))
}

/// Reads one `thermal_zoneN` directory.
pub(crate) fn read_zone(dir: &Path) -> Result<SensorReading, SamplerError> {
    let celsius = read_millidegrees(&dir.join("temp"))?;
    let source = read_sysfs_file(&dir.join("type"))
        .map(|t| t.to_ascii_lowercase())
        .unwrap_or_else(|_| UNKNOWN_ZONE_TYPE.to_string());
    Ok(SensorReading::new(source, celsius))
}

/// Reads a temperature file in millidegrees Celsius and converts to degrees.
pub(crate) fn read_millidegrees(path: &Path) -> Result<f32, SamplerError> {
    let content = read_sysfs_file(path)?;
    let millidegrees: i64 = content.parse::<i64>().map_err(|_| SamplerError::ParseError {
        path: path.display().to_string(),
        detail: format!("expected integer millidegrees, got '{content}'"),
    })?;
    Ok(millidegrees as f32 / 1000.0)
}

/// Lists `(index, path)` for every `thermal_zoneN` entry below `root`.
fn zone_dirs(root: &Path) -> Result<Vec<(u32, PathBuf)>, SamplerError> {
    if !root.exists() {
        return Err(SamplerError::NotAvailable {
            path: root.display().to_string(),
        });
    }
    let entries = std::fs::read_dir(root).map_err(|e| SamplerError::ReadError {
        path: root.display().to_string(),
        source: e,
    })?;

    Ok(entries
        .filter_map(|e| e.ok())
        .filter_map(|e| {
            let name = e.file_name();
            let idx = name.to_str()?.strip_prefix(ZONE_PREFIX)?.parse::<u32>().ok()?;
            Some((idx, e.path()))
        })
        .collect())
}

/// Reads a sysfs file and returns its trimmed content.
pub(crate) fn read_sysfs_file(path: &Path) -> Result<String, SamplerError> {
    if !path.exists() {
        return Err(SamplerError::NotAvailable {
            path: path.display().to_string(),
        });
    }
    std::fs::read_to_string(path)
        .map(|s| s.trim().to_string())
        .map_err(|e| SamplerError::ReadError {
            path: path.display().to_string(),
            source: e,
        })
}
