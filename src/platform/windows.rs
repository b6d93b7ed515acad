//! Windows providers
//!
//! Capacity comes from the display-adapter device class in the registry;
//! live usage and utilization come from the GPU performance-counter classes
//! exposed through WMI. Both are read-only snapshots; connections are scoped
//! to each query and released immediately after reading.

use super::{is_adapter_instance_key, parse_memory_size};
use crate::error::{ProbeError, Result};
use crate::provider::{AdapterCandidate, AdapterProvider, CounterCategory, CounterProvider};
use log::debug;
use serde::Deserialize;
use winreg::enums::HKEY_LOCAL_MACHINE;
use winreg::RegKey;
use wmi::{COMLibrary, WMIConnection};

/// Display-adapter device class under HKLM
const DISPLAY_CLASS_KEY: &str =
    "SYSTEM\\CurrentControlSet\\Control\\Class\\{4d36e968-e325-11ce-bfc1-08002be10318}";

/// Driver description value on each adapter instance key
const DRIVER_DESC_VALUE: &str = "DriverDesc";

/// Declared dedicated memory size, a raw 64-bit byte count
const MEMORY_SIZE_VALUE: &str = "HardwareInformation.qwMemorySize";

/// Suffix of the per-instance counter name for the 3D engine category
const ENGTYPE_3D_SUFFIX: &str = "engtype_3D";

/// Win32_PerfFormattedData_GPUPerformanceCounters_GPUEngine
#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct GpuEngineRow {
    name: Option<String>,
    utilization_percentage: Option<u64>,
}

/// Win32_PerfFormattedData_GPUPerformanceCounters_GPUProcessMemory
#[derive(Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct GpuProcessMemoryRow {
    dedicated_usage: Option<u64>,
}

/// Scans the display-adapter class registry area for candidates
#[derive(Default)]
pub struct RegistryAdapterProvider;

impl RegistryAdapterProvider {
    /// Create a registry-backed adapter provider
    pub fn new() -> Self {
        Self
    }
}

impl AdapterProvider for RegistryAdapterProvider {
    fn adapter_candidates(&self) -> Result<Vec<AdapterCandidate>> {
        let hklm = RegKey::predef(HKEY_LOCAL_MACHINE);
        let class = hklm.open_subkey(DISPLAY_CLASS_KEY).map_err(|e| {
            ProbeError::Registry(format!("cannot open display adapter class key: {}", e))
        })?;

        let mut candidates = Vec::new();
        for name in class.enum_keys().flatten() {
            if !is_adapter_instance_key(&name) {
                continue;
            }
            let Ok(entry) = class.open_subkey(&name) else {
                continue;
            };
            let description: String = match entry.get_value(DRIVER_DESC_VALUE) {
                Ok(desc) => desc,
                Err(_) => continue,
            };
            if description.trim().is_empty() {
                continue;
            }
            let Ok(raw) = entry.get_raw_value(MEMORY_SIZE_VALUE) else {
                continue;
            };
            // Malformed sizes exclude the single adapter, not the scan.
            let Some(capacity_bytes) = parse_memory_size(&raw.bytes) else {
                continue;
            };
            if capacity_bytes == 0 {
                continue;
            }
            debug!(
                "adapter {}: '{}' declares {} bytes",
                name, description, capacity_bytes
            );
            candidates.push(AdapterCandidate {
                description,
                capacity_bytes,
            });
        }
        Ok(candidates)
    }
}

/// Samples the WMI GPU performance-counter classes
#[derive(Default)]
pub struct PerfCounterProvider;

impl PerfCounterProvider {
    /// Create a WMI-backed counter provider
    pub fn new() -> Self {
        Self
    }

    fn connection() -> Result<WMIConnection> {
        let com = COMLibrary::new()
            .map_err(|e| ProbeError::Counter(format!("COM initialization failed: {}", e)))?;
        WMIConnection::with_namespace_path("root\\CIMV2", com.into())
            .map_err(|e| ProbeError::Counter(format!("WMI connection failed: {}", e)))
    }
}

impl CounterProvider for PerfCounterProvider {
    fn sample(&self, category: CounterCategory) -> Result<Vec<Option<f64>>> {
        let con = Self::connection()?;
        match category {
            CounterCategory::DedicatedMemory => {
                let rows: Vec<GpuProcessMemoryRow> = con
                    .raw_query(
                        "SELECT DedicatedUsage FROM \
                         Win32_PerfFormattedData_GPUPerformanceCounters_GPUProcessMemory",
                    )
                    .map_err(|e| {
                        ProbeError::Counter(format!("dedicated memory query failed: {}", e))
                    })?;
                Ok(rows
                    .into_iter()
                    .map(|r| r.dedicated_usage.map(|v| v as f64))
                    .collect())
            }
            CounterCategory::Engine3d | CounterCategory::EngineAll => {
                let rows: Vec<GpuEngineRow> = con
                    .raw_query(
                        "SELECT Name, UtilizationPercentage FROM \
                         Win32_PerfFormattedData_GPUPerformanceCounters_GPUEngine",
                    )
                    .map_err(|e| {
                        ProbeError::Counter(format!("engine utilization query failed: {}", e))
                    })?;
                Ok(rows
                    .into_iter()
                    .filter(|r| {
                        category == CounterCategory::EngineAll
                            || r.name
                                .as_deref()
                                .is_some_and(|n| n.ends_with(ENGTYPE_3D_SUFFIX))
                    })
                    .map(|r| r.utilization_percentage.map(|v| v as f64))
                    .collect())
            }
        }
    }
}
