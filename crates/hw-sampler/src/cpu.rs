// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! CPU utilisation.
//!
//! Instantaneous utilisation needs two samples separated by a time window,
//! so only the rich backend provides it. The raw fallback files are never
//! used to approximate it.

use crate::sensors::round_tenth;

/// CPU utilisation over one sampling window, in percent.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CpuLoad {
    /// Utilisation across all cores, in `[0, 100]`.
    pub overall: f32,
    /// Utilisation per core, index = core id, each in `[0, 100]`.
    pub per_core: Vec<f32>,
}

impl CpuLoad {
    /// Builds a load value, clamping every figure to `[0, 100]` and
    /// rounding to one decimal. Non-finite figures become `0.0`.
    pub fn new(overall: f32, per_core: impl IntoIterator<Item = f32>) -> Self {
        Self {
            overall: normalise_percent(overall),
            per_core: per_core.into_iter().map(normalise_percent).collect(),
        }
    }
}

fn normalise_percent(value: f32) -> f32 {
    if !value.is_finite() {
        return 0.0;
    }
    round_tenth(value.clamp(0.0, 100.0))
}
