// Copyright (c) 2025 Dimitris Kafetzis
//
// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Integration tests: fallback sampling end to end.
//!
//! These tests build fake `/sys/class/thermal` and `/proc/meminfo` trees in
//! a temporary directory and drive the sysfs backend through the public
//! sampling and rendering API, with no dependence on the host's sensors.

use hw_sampler::{
    BackendKind, DisplayLabels, Sampler, SamplerConfig, StatusRecord, SysfsBackend,
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// ── Helpers ────────────────────────────────────────────────────

const MEMINFO: &str = "\
MemTotal:       32716000 kB
MemFree:         1218456 kB
MemAvailable:   26214400 kB
Buffers:          123456 kB
";

/// A fake host: thermal zones plus a meminfo file.
struct FakeHost {
    dir: TempDir,
}

impl FakeHost {
    fn new() -> Self {
        let host = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        std::fs::create_dir_all(host.thermal_root()).unwrap();
        host
    }

    fn thermal_root(&self) -> PathBuf {
        self.dir.path().join("thermal")
    }

    fn meminfo(&self) -> PathBuf {
        self.dir.path().join("meminfo")
    }

    fn zone(self, idx: u32, kind: &str, millidegrees: &str) -> Self {
        let zone = self.thermal_root().join(format!("thermal_zone{idx}"));
        std::fs::create_dir_all(&zone).unwrap();
        std::fs::write(zone.join("type"), format!("{kind}\n")).unwrap();
        std::fs::write(zone.join("temp"), format!("{millidegrees}\n")).unwrap();
        self
    }

    fn with_meminfo(self, content: &str) -> Self {
        std::fs::write(self.meminfo(), content).unwrap();
        self
    }

    fn sampler(&self) -> Sampler {
        Sampler::new(Box::new(SysfsBackend::new(
            self.thermal_root(),
            self.meminfo(),
        )))
    }

    fn config(&self) -> SamplerConfig {
        SamplerConfig {
            backend: BackendKind::Sysfs,
            thermal_root: self.thermal_root(),
            meminfo_path: self.meminfo(),
            ..Default::default()
        }
    }
}

fn approx(a: Option<f32>, b: f32) -> bool {
    a.map(|v| (v - b).abs() < 0.001).unwrap_or(false)
}

// ── Sampling ───────────────────────────────────────────────────

#[test]
fn test_single_zone_normalised() {
    let host = FakeHost::new()
        .zone(0, "unknown-sensor", "58400")
        .with_meminfo(MEMINFO);
    let snap = host.sampler().sample();
    assert!(approx(snap.cpu_temperature_celsius, 58.4));
}

#[test]
fn test_fallback_has_no_load() {
    let host = FakeHost::new()
        .zone(0, "x86_pkg_temp", "58400")
        .with_meminfo(MEMINFO);
    let snap = host.sampler().sample();
    assert_eq!(snap.backend, "sysfs");
    assert_eq!(snap.cpu_load_percent_overall(), None);
    assert_eq!(snap.cpu_load_percent_per_core(), None);

    let record = StatusRecord::from_snapshot(&snap, &DisplayLabels::default());
    assert_eq!(record.text, "CPU: 58.4°C | MEM: 6GB/31GB (19.9%)");
    assert!(!record.tooltip.contains("CPU Load:"));
}

#[test]
fn test_memory_from_meminfo() {
    let host = FakeHost::new().with_meminfo(MEMINFO);
    let snap = host.sampler().sample();
    let used = snap.memory_used_bytes().unwrap();
    let total = snap.memory_total_bytes().unwrap();
    assert_eq!(total, 32716000 * 1024);
    assert_eq!(used, (32716000 - 26214400) * 1024);
    assert!(used <= total);

    let pct = snap.memory.unwrap().percent();
    let expected = ((used as f64 / total as f64 * 100.0) * 10.0).round() / 10.0;
    assert!((f64::from(pct) - expected).abs() < 0.001);
}

#[test]
fn test_cpu_zone_preferred_over_acpi() {
    let host = FakeHost::new()
        .zone(0, "acpitz", "45000")
        .zone(1, "x86_pkg_temp", "58400")
        .with_meminfo(MEMINFO);
    assert!(approx(host.sampler().sample().cpu_temperature_celsius, 58.4));
}

#[test]
fn test_out_of_range_zones_never_reported() {
    let host = FakeHost::new()
        .zone(0, "x86_pkg_temp", "-40000")
        .zone(1, "acpitz", "151000")
        .with_meminfo(MEMINFO);
    let snap = host.sampler().sample();
    assert_eq!(snap.cpu_temperature_celsius, None);
    assert!(snap.memory.is_some());
}

#[test]
fn test_broken_meminfo_marks_memory_absent() {
    let host = FakeHost::new()
        .zone(0, "acpitz", "41000")
        .with_meminfo("MemTotal: 1000 kB\n");
    let snap = host.sampler().sample();
    assert!(snap.memory.is_none());
    assert!(approx(snap.cpu_temperature_celsius, 41.0));

    let record = StatusRecord::from_snapshot(&snap, &DisplayLabels::default());
    assert_eq!(record.text, "CPU: 41.0°C");
}

#[test]
fn test_nothing_available_still_renders() {
    let dir = tempfile::tempdir().unwrap();
    let mut sampler = Sampler::new(Box::new(SysfsBackend::new(
        dir.path().join("missing-thermal"),
        dir.path().join("missing-meminfo"),
    )));
    let snap = sampler.sample();
    assert!(snap.is_empty());

    let json = StatusRecord::from_snapshot(&snap, &DisplayLabels::default())
        .to_json()
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["text"], "CPU: N/A | MEM: N/A");
    assert_eq!(value["class"], "hwinfo");
}

#[test]
fn test_repeat_sampling_idempotent() {
    let host = FakeHost::new()
        .zone(0, "x86_pkg_temp", "61250")
        .with_meminfo(MEMINFO);
    let mut sampler = host.sampler();
    let a = sampler.sample();
    let b = sampler.sample();
    assert_eq!(a.cpu_temperature_celsius, b.cpu_temperature_celsius);
    assert_eq!(a.memory, b.memory);
    assert_eq!(a.cpu_load, b.cpu_load);
}

// ── Configuration-driven sampling ──────────────────────────────

#[test]
fn test_sample_with_config() {
    let host = FakeHost::new()
        .zone(0, "cpu-thermal", "52000")
        .with_meminfo(MEMINFO);
    let config = host.config();
    let snap = hw_sampler::sample(&config);
    assert_eq!(snap.backend, "sysfs");
    assert!(approx(snap.cpu_temperature_celsius, 52.0));
    assert!(snap.memory.is_some());
}

#[test]
fn test_config_file_labels() {
    let host = FakeHost::new().with_meminfo(MEMINFO);
    let config_path = host.dir.path().join("hwinfo.toml");
    std::fs::write(
        &config_path,
        format!(
            "backend = \"sysfs\"\nthermal_root = {:?}\nmeminfo_path = {:?}\nclass = \"hw\"\n",
            host.thermal_root().display().to_string(),
            host.meminfo().display().to_string(),
        ),
    )
    .unwrap();

    let config = SamplerConfig::from_file(&config_path).unwrap();
    let snap = hw_sampler::sample(&config);
    let record = StatusRecord::from_snapshot(&snap, &config.labels());
    assert_eq!(record.class, "hw");
    assert_eq!(record.alt, "hwinfo");
    assert_eq!(record.text, "MEM: 6GB/31GB (19.9%)");
}

#[test]
fn test_real_host_invariants() {
    // Runs against the actual machine; only checks invariants.
    if !Path::new("/proc/meminfo").exists() {
        return;
    }
    let config = SamplerConfig {
        backend: BackendKind::Sysfs,
        ..Default::default()
    };
    let snap = hw_sampler::sample(&config);
    if let Some(t) = snap.cpu_temperature_celsius {
        assert!((0.0..=150.0).contains(&t));
    }
    if let (Some(used), Some(total)) = (snap.memory_used_bytes(), snap.memory_total_bytes()) {
        assert!(used <= total);
    }
}
