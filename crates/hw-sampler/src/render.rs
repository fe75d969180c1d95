// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Status-bar record rendering.
//!
//! Turns a [`HardwareSnapshot`] into the JSON object a Waybar `custom`
//! module expects: `text`, `tooltip`, `class`, `alt`.
//!
//! # Example output
//! ```text
//! {"text":"CPU: 58.4°C (4.1%) | MEM: 6GB/31GB (20.1%)","tooltip":"Hardware Info\n…","class":"hwinfo","alt":"hwinfo"}
//! ```

use crate::{HardwareSnapshot, MemoryUsage};
use std::fmt::Write;

/// Placeholder for a metric with no data.
const NOT_AVAILABLE: &str = "N/A";

/// Bar text used when nothing at all could be sampled.
const EMPTY_TEXT: &str = "CPU: N/A | MEM: N/A";

const DEFAULT_TAG: &str = "hwinfo";

/// The fixed `class` and `alt` tags for styling hooks in the bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLabels {
    pub class: String,
    pub alt: String,
}

impl Default for DisplayLabels {
    fn default() -> Self {
        Self {
            class: DEFAULT_TAG.to_string(),
            alt: DEFAULT_TAG.to_string(),
        }
    }
}

/// One status-bar update.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct StatusRecord {
    pub text: String,
    pub tooltip: String,
    pub class: String,
    pub alt: String,
}

impl StatusRecord {
    /// Renders a snapshot. Absent metrics drop out of `text` and read `N/A`
    /// in the tooltip.
    pub fn from_snapshot(snapshot: &HardwareSnapshot, labels: &DisplayLabels) -> Self {
        Self {
            text: bar_text(snapshot),
            tooltip: tooltip(snapshot),
            class: labels.class.clone(),
            alt: labels.alt.clone(),
        }
    }

    /// The minimal record printed when no snapshot could be produced.
    pub fn error(message: impl std::fmt::Display, labels: &DisplayLabels) -> Self {
        Self {
            text: EMPTY_TEXT.to_string(),
            tooltip: format!("Error: {message}"),
            class: format!("{}-error", labels.class),
            alt: format!("{}-error", labels.alt),
        }
    }

    /// Serialises to a single-line JSON object.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// `"58.4°C (4.1%)"`, `"58.4°C"`, `"4.1%"`, or `None`.
fn cpu_clause(snapshot: &HardwareSnapshot) -> Option<String> {
    match (
        snapshot.cpu_temperature_celsius,
        snapshot.cpu_load_percent_overall(),
    ) {
        (Some(t), Some(load)) => Some(format!("{t:.1}°C ({load:.1}%)")),
        (Some(t), None) => Some(format!("{t:.1}°C")),
        (None, Some(load)) => Some(format!("{load:.1}%")),
        (None, None) => None,
    }
}

/// `"6GB/31GB (20.1%)"`, sizes in whole GiB.
fn memory_clause(memory: &MemoryUsage) -> String {
    format!(
        "{:.0}GB/{:.0}GB ({:.1}%)",
        memory.used_gib().round(),
        memory.total_gib().round(),
        memory.percent(),
    )
}

fn bar_text(snapshot: &HardwareSnapshot) -> String {
    let clauses: Vec<String> = [
        cpu_clause(snapshot).map(|c| format!("CPU: {c}")),
        snapshot.memory.as_ref().map(|m| format!("MEM: {}", memory_clause(m))),
    ]
    .into_iter()
    .flatten()
    .collect();

    if clauses.is_empty() {
        EMPTY_TEXT.to_string()
    } else {
        clauses.join(" | ")
    }
}

fn tooltip(snapshot: &HardwareSnapshot) -> String {
    let mut out = String::from("Hardware Info\n");

    let cpu = cpu_clause(snapshot).unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let _ = writeln!(out, "CPU Temp: {cpu}");

    if let Some(cores) = snapshot.cpu_load_percent_per_core().filter(|c| !c.is_empty()) {
        out.push_str("CPU Load:\n");
        for (i, load) in cores.iter().enumerate() {
            let _ = writeln!(out, "  Core {i}: {load:.1}%");
        }
    }

    match &snapshot.memory {
        Some(m) => {
            let _ = writeln!(
                out,
                "Memory: {:.2}MB / {:.2}MB ({:.1}%)",
                m.used_mib(),
                m.total_mib(),
                m.percent(),
            );
        }
        None => out.push_str("Memory: N/A\n"),
    }

    let _ = write!(out, "Updated: {}", snapshot.sampled_at.format("%H:%M:%S"));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CpuLoad;
    use chrono::{Local, TimeZone};

    const GIB: u64 = 1024 * 1024 * 1024;

    fn snapshot(
        temperature: Option<f32>,
        load: Option<CpuLoad>,
        memory: Option<MemoryUsage>,
    ) -> HardwareSnapshot {
        HardwareSnapshot {
            cpu_temperature_celsius: temperature,
            cpu_load: load,
            memory,
            sampled_at: Local.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap(),
            backend: "test",
        }
    }

    fn memory_20_percent() -> MemoryUsage {
        // 6.2 GiB of 31 GiB = 20.0%
        MemoryUsage::new(31 * GIB / 5, 31 * GIB)
    }

    #[test]
    fn test_full_text() {
        let snap = snapshot(
            Some(58.4),
            Some(CpuLoad::new(4.1, [3.0, 5.2])),
            Some(memory_20_percent()),
        );
        let record = StatusRecord::from_snapshot(&snap, &DisplayLabels::default());
        assert_eq!(record.text, "CPU: 58.4°C (4.1%) | MEM: 6GB/31GB (20.0%)");
        assert_eq!(record.class, "hwinfo");
        assert_eq!(record.alt, "hwinfo");
    }

    #[test]
    fn test_text_without_load() {
        let snap = snapshot(Some(58.4), None, Some(memory_20_percent()));
        let record = StatusRecord::from_snapshot(&snap, &DisplayLabels::default());
        assert_eq!(record.text, "CPU: 58.4°C | MEM: 6GB/31GB (20.0%)");
        assert!(!record.tooltip.contains("CPU Load:"));
    }

    #[test]
    fn test_text_without_temperature() {
        let snap = snapshot(None, Some(CpuLoad::new(12.0, [12.0])), None);
        let record = StatusRecord::from_snapshot(&snap, &DisplayLabels::default());
        assert_eq!(record.text, "CPU: 12.0%");
    }

    #[test]
    fn test_text_without_memory() {
        let snap = snapshot(Some(47.0), None, None);
        let record = StatusRecord::from_snapshot(&snap, &DisplayLabels::default());
        assert_eq!(record.text, "CPU: 47.0°C");
        assert!(record.tooltip.contains("Memory: N/A"));
    }

    #[test]
    fn test_text_all_absent() {
        let snap = snapshot(None, None, None);
        let record = StatusRecord::from_snapshot(&snap, &DisplayLabels::default());
        assert_eq!(record.text, "CPU: N/A | MEM: N/A");
        assert!(record.tooltip.contains("CPU Temp: N/A"));
        assert_eq!(record.class, "hwinfo");
    }

    #[test]
    fn test_tooltip_layout() {
        let snap = snapshot(
            Some(58.4),
            Some(CpuLoad::new(4.1, [3.0, 5.2])),
            Some(MemoryUsage::new(6 * GIB, 32 * GIB)),
        );
        let record = StatusRecord::from_snapshot(&snap, &DisplayLabels::default());
        let expected = "Hardware Info\n\
                        CPU Temp: 58.4°C (4.1%)\n\
                        CPU Load:\n  Core 0: 3.0%\n  Core 1: 5.2%\n\
                        Memory: 6144.00MB / 32768.00MB (18.8%)\n\
                        Updated: 09:26:53";
        assert_eq!(record.tooltip, expected);
    }

    #[test]
    fn test_custom_labels() {
        let labels = DisplayLabels {
            class: "hw".into(),
            alt: "cpu-mem".into(),
        };
        let record = StatusRecord::from_snapshot(&snapshot(None, None, None), &labels);
        assert_eq!(record.class, "hw");
        assert_eq!(record.alt, "cpu-mem");
    }

    #[test]
    fn test_error_record() {
        let record = StatusRecord::error("stdout closed", &DisplayLabels::default());
        assert_eq!(record.text, "CPU: N/A | MEM: N/A");
        assert_eq!(record.tooltip, "Error: stdout closed");
        assert_eq!(record.class, "hwinfo-error");
        assert_eq!(record.alt, "hwinfo-error");
    }

    #[test]
    fn test_json_single_line() {
        let snap = snapshot(Some(58.4), None, Some(memory_20_percent()));
        let json = StatusRecord::from_snapshot(&snap, &DisplayLabels::default())
            .to_json()
            .unwrap();
        assert!(!json.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["class"], "hwinfo");
        assert_eq!(value["alt"], "hwinfo");
        assert_eq!(value["text"], "CPU: 58.4°C | MEM: 6GB/31GB (20.0%)");
        assert!(value["tooltip"].as_str().unwrap().starts_with("Hardware Info\n"));
    }
}
