// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Error types for hardware sampling.

/// Errors that can occur when reading a single metric or loading configuration.
///
/// None of these escape [`Sampler::sample`](crate::Sampler::sample): every
/// sensor-level error is turned into an absent field there.
#[derive(Debug, thiserror::Error)]
pub enum SamplerError {
    /// Failed to read a sysfs or procfs file.
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: String,
        source: std::io::Error,
    },

    /// Failed to parse a numeric value from a system file.
    #[error("failed to parse value from {path}: {detail}")]
    ParseError { path: String, detail: String },

    /// The expected sysfs path does not exist (container, VM, non-Linux host).
    #[error("sysfs path not found: {path}")]
    NotAvailable { path: String },

    /// The backend has no way of providing this metric.
    #[error("{backend} backend does not provide {metric}")]
    Unsupported {
        backend: &'static str,
        metric: &'static str,
    },

    /// Configuration error.
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl SamplerError {
    /// Returns `true` for errors that only mean "this data source is not
    /// present here", as opposed to a source that exists but misbehaves.
    pub fn is_missing_source(&self) -> bool {
        matches!(
            self,
            SamplerError::NotAvailable { .. } | SamplerError::Unsupported { .. }
        )
    }
}
