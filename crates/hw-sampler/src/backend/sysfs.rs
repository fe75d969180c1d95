// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Fallback backend over raw kernel files.

use super::Backend;
use crate::{thermal, CpuLoad, MemoryUsage, SamplerConfig, SamplerError};
use std::path::PathBuf;

/// Reads `/sys/class/thermal` and `/proc/meminfo` directly.
///
/// CPU load is not provided: it would need two `/proc/stat` samples and an
/// artificial sleep.
#[derive(Debug, Clone)]
pub struct SysfsBackend {
    thermal_root: PathBuf,
    meminfo_path: PathBuf,
}

impl SysfsBackend {
    pub fn new(thermal_root: impl Into<PathBuf>, meminfo_path: impl Into<PathBuf>) -> Self {
        Self {
            thermal_root: thermal_root.into(),
            meminfo_path: meminfo_path.into(),
        }
    }

    pub fn from_config(config: &SamplerConfig) -> Self {
        Self::new(config.thermal_root.clone(), config.meminfo_path.clone())
    }
}

impl Backend for SysfsBackend {
    fn name(&self) -> &'static str {
        "sysfs"
    }

    fn read_temperature(&mut self) -> Result<Option<f32>, SamplerError> {
        thermal::zone_temperature(&self.thermal_root)
    }

    fn read_memory(&mut self) -> Result<MemoryUsage, SamplerError> {
        MemoryUsage::read_meminfo(&self.meminfo_path)
    }

    fn read_cpu_load(&mut self) -> Result<CpuLoad, SamplerError> {
        Err(SamplerError::Unsupported {
            backend: self.name(),
            metric: "cpu load",
        })
    }
}
