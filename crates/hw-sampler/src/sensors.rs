// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Sensor filtering and prioritisation.
//!
//! Everything here is a pure function over [`SensorReading`]s, independent
//! of how the readings were acquired, so the policy can be tested without
//! real hardware.
//!
//! # Policy
//! 1. Readings outside `[0, 150]` °C (or not finite) are sensor noise and
//!    are dropped.
//! 2. Chips are ranked into tiers: CPU die sensors (fixed priority order),
//!    then anything named like a CPU, then ACPI/platform zones. Unrelated
//!    devices (NVMe, GPU, Wi-Fi) never qualify.
//! 3. The best chip's valid readings are averaged and rounded to 0.1 °C.

/// Lowest plausible temperature in degrees Celsius.
pub const MIN_VALID_CELSIUS: f32 = 0.0;

/// Highest plausible temperature in degrees Celsius.
pub const MAX_VALID_CELSIUS: f32 = 150.0;

/// CPU die sensor drivers, best first.
const DIE_CHIPS: &[&str] = &[
    "coretemp",
    "k10temp",
    "zenpower",
    "x86_pkg_temp",
    "cpu_thermal",
    "cpu-thermal",
    "soc_thermal",
];

/// A single temperature reading tagged with its originating chip/driver.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SensorReading {
    /// Chip or driver name (`coretemp`, `acpitz`, a thermal zone `type`, …).
    pub source: String,
    /// Temperature in degrees Celsius.
    pub celsius: f32,
}

impl SensorReading {
    pub fn new(source: impl Into<String>, celsius: f32) -> Self {
        Self {
            source: source.into(),
            celsius,
        }
    }

    /// Returns `true` if the reading lies in the plausible range.
    pub fn is_valid(&self) -> bool {
        is_plausible(self.celsius)
    }
}

/// How believable a chip is as "the CPU temperature". Lower is better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SensorClass {
    /// A known CPU die driver; the index is its position in the priority list.
    Die(usize),
    /// Any other chip whose name mentions a CPU or core.
    CpuNamed,
    /// ACPI / platform thermal zone.
    Platform,
}

/// Classifies a chip name. `None` means the chip never counts as a CPU sensor.
pub fn classify(source: &str) -> Option<SensorClass> {
    let name = source.trim().to_ascii_lowercase();
    if let Some(idx) = DIE_CHIPS.iter().position(|chip| name == *chip) {
        return Some(SensorClass::Die(idx));
    }
    if name.contains("cpu") || name.contains("core") {
        return Some(SensorClass::CpuNamed);
    }
    if name.contains("acpi") {
        return Some(SensorClass::Platform);
    }
    None
}

/// Returns `true` if `celsius` is a plausible sensor value.
pub fn is_plausible(celsius: f32) -> bool {
    celsius.is_finite() && (MIN_VALID_CELSIUS..=MAX_VALID_CELSIUS).contains(&celsius)
}

/// Picks the most believable CPU temperature from a set of readings.
///
/// Returns `None` if no valid reading comes from a CPU-like or platform chip.
/// Ties between chips of the same class are broken by enumeration order.
pub fn select_temperature(readings: &[SensorReading]) -> Option<f32> {
    let mut best: Option<(SensorClass, &str)> = None;
    for reading in readings.iter().filter(|r| r.is_valid()) {
        let Some(class) = classify(&reading.source) else {
            continue;
        };
        match best {
            Some((current, _)) if current <= class => {}
            _ => best = Some((class, reading.source.as_str())),
        }
    }

    let (_, chip) = best?;
    let values: Vec<f32> = readings
        .iter()
        .filter(|r| r.is_valid() && r.source == chip)
        .map(|r| r.celsius)
        .collect();
    average(&values)
}

/// Returns the first valid reading in enumeration order, regardless of source.
///
/// Used for raw thermal zones whose types are unknown to [`classify`].
pub fn first_valid(readings: &[SensorReading]) -> Option<f32> {
    readings
        .iter()
        .find(|r| r.is_valid())
        .map(|r| round_tenth(r.celsius))
}

/// Raw hwmon `tempN_label` prefixes and the die driver that publishes them.
const LABEL_CHIPS: &[(&str, &str)] = &[
    ("package id", "coretemp"),
    ("core ", "coretemp"),
    ("tctl", "k10temp"),
    ("tdie", "k10temp"),
    ("tccd", "k10temp"),
];

/// Maps a hwmon component label to the chip that produced it.
///
/// Sensors with a `tempN_label` file carry only that raw text (`"Package id 0"`,
/// `"Core 3"`, `"Tctl"`), so known die labels map to their driver. Sensors
/// without one are labelled `"<chip> tempN"` and yield the leading chip name.
pub fn chip_for_label(label: &str) -> String {
    let label = label.trim().to_ascii_lowercase();
    LABEL_CHIPS
        .iter()
        .find(|(prefix, _)| label.starts_with(prefix))
        .map(|(_, chip)| (*chip).to_string())
        .unwrap_or_else(|| chip_of(&label).to_string())
}

/// Turns `(label, temperature)` pairs from hwmon components into readings
/// tagged with their chip. Components without a temperature are skipped.
pub fn readings_from_labels<'a>(
    components: impl IntoIterator<Item = (&'a str, Option<f32>)>,
) -> Vec<SensorReading> {
    components
        .into_iter()
        .filter_map(|(label, celsius)| Some(SensorReading::new(chip_for_label(label), celsius?)))
        .collect()
}

fn chip_of(label: &str) -> &str {
    label.split_whitespace().next().unwrap_or("")
}

/// Rounds to one decimal place.
pub fn round_tenth(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

fn average(values: &[f32]) -> Option<f32> {
    if values.is_empty() {
        return None;
    }
    let sum: f64 = values.iter().map(|&v| f64::from(v)).sum();
    Some(round_tenth((sum / values.len() as f64) as f32))
}
