// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! # hw-sampler
//!
//! Samples CPU temperature, CPU load, and memory usage and renders them as
//! a status-bar record.
//!
//! # Sampled Metrics
//! - **CPU temperature**: the most believable sensor, CPU die sensors first.
//! - **CPU load**: overall and per-core utilisation over a short window.
//! - **Memory**: used and total physical memory.
//!
//! # Graceful Degradation
//! Two backends implement [`Backend`]: the rich [`SysinfoBackend`] (cargo
//! feature `sysinfo`, on by default) and the [`SysfsBackend`] over raw
//! `/sys` and `/proc` files. [`select_backend`] picks one at startup. Any
//! individual read failure leaves that field absent; sampling itself never
//! fails.
//!
//! # Example
//! ```no_run
//! use hw_sampler::{SamplerConfig, StatusRecord};
//!
//! let config = SamplerConfig::default();
//! let snap = hw_sampler::sample(&config);
//! let record = StatusRecord::from_snapshot(&snap, &config.labels());
//! println!("{}", record.to_json().unwrap());
//! ```

pub mod backend;
mod config;
mod cpu;
mod error;
mod memory;
mod render;
pub mod sensors;
mod snapshot;
pub mod thermal;

#[cfg(feature = "sysinfo")]
pub use backend::SysinfoBackend;
pub use backend::{select_backend, Backend, BackendKind, SysfsBackend};
pub use config::SamplerConfig;
pub use cpu::CpuLoad;
pub use error::SamplerError;
pub use memory::MemoryUsage;
pub use render::{DisplayLabels, StatusRecord};
pub use snapshot::{HardwareSnapshot, Sampler};

/// Takes one snapshot with the backend chosen by `config`.
///
/// This is a convenience wrapper around [`select_backend`] and [`Sampler::sample`].
pub fn sample(config: &SamplerConfig) -> HardwareSnapshot {
    Sampler::new(select_backend(config)).sample()
}
