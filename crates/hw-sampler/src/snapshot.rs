// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Aggregated point-in-time hardware snapshot.
//!
//! A [`HardwareSnapshot`] combines temperature, load, and memory readings
//! into a single value. It is built once per invocation by a [`Sampler`]
//! and rendered into a [`StatusRecord`](crate::StatusRecord).

use crate::backend::Backend;
use crate::{CpuLoad, MemoryUsage, SamplerError};
use chrono::{DateTime, Local};

/// A complete point-in-time reading of the sampled hardware metrics.
///
/// Every metric is optional: a field is `None` when its source was missing,
/// unreadable, or implausible.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HardwareSnapshot {
    /// CPU temperature in degrees Celsius, rounded to 0.1.
    pub cpu_temperature_celsius: Option<f32>,
    /// Overall and per-core CPU utilisation.
    pub cpu_load: Option<CpuLoad>,
    /// Physical memory usage.
    pub memory: Option<MemoryUsage>,
    /// When the snapshot was taken.
    pub sampled_at: DateTime<Local>,
    /// Backend that produced the readings.
    pub backend: &'static str,
}

impl HardwareSnapshot {
    /// Overall CPU utilisation in percent.
    pub fn cpu_load_percent_overall(&self) -> Option<f32> {
        self.cpu_load.as_ref().map(|l| l.overall)
    }

    /// Per-core CPU utilisation in percent, index = core id.
    pub fn cpu_load_percent_per_core(&self) -> Option<&[f32]> {
        self.cpu_load.as_ref().map(|l| l.per_core.as_slice())
    }

    pub fn memory_used_bytes(&self) -> Option<u64> {
        self.memory.map(|m| m.used_bytes())
    }

    pub fn memory_total_bytes(&self) -> Option<u64> {
        self.memory.map(|m| m.total_bytes())
    }

    /// Returns `true` if no metric could be read at all.
    pub fn is_empty(&self) -> bool {
        self.cpu_temperature_celsius.is_none() && self.cpu_load.is_none() && self.memory.is_none()
    }
}

/// Runs one sampling pass over a [`Backend`].
pub struct Sampler {
    backend: Box<dyn Backend>,
}

impl Sampler {
    pub fn new(backend: Box<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Name of the backend in use.
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Reads every metric, turning each failure into an absent field.
    ///
    /// Never fails: with no readable source every metric is absent and
    /// [`HardwareSnapshot::is_empty`] holds.
    pub fn sample(&mut self) -> HardwareSnapshot {
        let backend = self.backend.name();

        let cpu_temperature_celsius =
            absent_on_error("temperature", self.backend.read_temperature())
                .flatten()
                .filter(|t| crate::sensors::is_plausible(*t));
        let memory = absent_on_error("memory", self.backend.read_memory());
        let cpu_load = absent_on_error("cpu load", self.backend.read_cpu_load());

        let snapshot = HardwareSnapshot {
            cpu_temperature_celsius,
            cpu_load,
            memory,
            sampled_at: Local::now(),
            backend,
        };

        tracing::debug!(
            backend,
            temperature = ?snapshot.cpu_temperature_celsius,
            load = ?snapshot.cpu_load_percent_overall(),
            memory_used = ?snapshot.memory_used_bytes(),
            "sampled"
        );
        snapshot
    }
}

/// Swallows a metric error, logging it at a level matching its kind.
fn absent_on_error<T>(metric: &str, result: Result<T, SamplerError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) if e.is_missing_source() => {
            tracing::debug!("{metric} unavailable: {e}");
            None
        }
        Err(e) => {
            tracing::warn!("{metric} unreadable: {e}");
            None
        }
    }
}
