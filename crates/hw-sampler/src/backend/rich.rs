// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Rich backend built on the `sysinfo` crate.
//!
//! Temperatures come from hwmon components. A component label is either the
//! sensor's raw `tempN_label` (`"Package id 0"`, `"Tctl"`) or, when the chip
//! publishes none, `"<chip> tempN"` (`"acpitz temp1"`);
//! [`sensors::chip_for_label`] recovers the chip from both forms.
//! When the components yield nothing usable, temperature and memory are
//! read through the wrapped [`SysfsBackend`] instead.

use super::{Backend, SysfsBackend};
use crate::sensors::{self, SensorReading};
use crate::{CpuLoad, MemoryUsage, SamplerError};
use std::time::Duration;
use sysinfo::{Components, CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};

/// Reads hwmon sensors, unified memory statistics and windowed CPU usage.
pub struct SysinfoBackend {
    system: System,
    fallback: SysfsBackend,
    load_window: Duration,
}

impl SysinfoBackend {
    /// Creates the backend. `load_window` is how long CPU usage is sampled.
    pub fn new(fallback: SysfsBackend, load_window: Duration) -> Self {
        let system = System::new_with_specifics(
            RefreshKind::nothing()
                .with_cpu(CpuRefreshKind::nothing().with_cpu_usage())
                .with_memory(MemoryRefreshKind::nothing().with_ram()),
        );
        Self {
            system,
            fallback,
            load_window: load_window.max(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL),
        }
    }

    /// Collects every hwmon temperature, tagged with its chip name.
    fn component_readings() -> Vec<SensorReading> {
        let components = Components::new_with_refreshed_list();
        sensors::readings_from_labels(
            components
                .list()
                .iter()
                .map(|c| (c.label(), c.temperature())),
        )
    }
}

impl Backend for SysinfoBackend {
    fn name(&self) -> &'static str {
        "sysinfo"
    }

    fn read_temperature(&mut self) -> Result<Option<f32>, SamplerError> {
        let readings = Self::component_readings();
        tracing::trace!(?readings, "hwmon readings");

        if let Some(celsius) = sensors::select_temperature(&readings) {
            return Ok(Some(celsius));
        }

        tracing::debug!(
            count = readings.len(),
            "no usable hwmon CPU sensor; trying thermal zones"
        );
        self.fallback.read_temperature()
    }

    fn read_memory(&mut self) -> Result<MemoryUsage, SamplerError> {
        self.system.refresh_memory();
        let total = self.system.total_memory();
        if total == 0 {
            tracing::debug!("sysinfo reported no memory; reading meminfo");
            return self.fallback.read_memory();
        }
        Ok(MemoryUsage::new(self.system.used_memory(), total))
    }

    fn read_cpu_load(&mut self) -> Result<CpuLoad, SamplerError> {
        // Usage is the delta between two refreshes.
        self.system.refresh_cpu_usage();
        std::thread::sleep(self.load_window);
        self.system.refresh_cpu_usage();

        let cpus = self.system.cpus();
        if cpus.is_empty() {
            return Err(SamplerError::Unsupported {
                backend: self.name(),
                metric: "cpu load",
            });
        }

        Ok(CpuLoad::new(
            self.system.global_cpu_usage(),
            cpus.iter().map(|cpu| cpu.cpu_usage()),
        ))
    }
}
