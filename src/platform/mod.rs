//! OS-facing provider implementations
//!
//! Windows reads the display-adapter class area of the registry and the GPU
//! performance-counter classes. Other platforms get stub providers that
//! soft-fail, so the probe still emits a well-formed all-sentinel line.

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "windows")]
pub use windows::{PerfCounterProvider as SystemCounters, RegistryAdapterProvider as SystemAdapters};

#[cfg(not(target_os = "windows"))]
mod stub {
    use crate::error::{ProbeError, Result};
    use crate::provider::{AdapterCandidate, AdapterProvider, CounterCategory, CounterProvider};

    /// Adapter provider for platforms without a supported registry
    pub struct SystemAdapters;

    impl SystemAdapters {
        pub fn new() -> Self {
            Self
        }
    }

    impl Default for SystemAdapters {
        fn default() -> Self {
            Self::new()
        }
    }

    impl AdapterProvider for SystemAdapters {
        fn adapter_candidates(&self) -> Result<Vec<AdapterCandidate>> {
            Err(ProbeError::UnsupportedPlatform(
                "adapter registry scanning is only implemented on Windows".to_string(),
            ))
        }
    }

    /// Counter provider for platforms without a supported counter subsystem
    pub struct SystemCounters;

    impl SystemCounters {
        pub fn new() -> Self {
            Self
        }
    }

    impl Default for SystemCounters {
        fn default() -> Self {
            Self::new()
        }
    }

    impl CounterProvider for SystemCounters {
        fn sample(&self, _category: CounterCategory) -> Result<Vec<Option<f64>>> {
            Err(ProbeError::UnsupportedPlatform(
                "GPU performance counters are only implemented on Windows".to_string(),
            ))
        }
    }
}

#[cfg(not(target_os = "windows"))]
pub use stub::{SystemAdapters, SystemCounters};

/// True for registry subkey names of adapter instances (0000, 0001, ...)
#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
pub(crate) fn is_adapter_instance_key(name: &str) -> bool {
    name.len() == 4 && name.bytes().all(|b| b.is_ascii_digit())
}

/// Parse a declared memory size from raw registry bytes
///
/// The value is stored as a little-endian 64-bit byte count, though some
/// drivers write it as a 32-bit DWORD. Anything else is malformed and the
/// adapter entry is skipped.
#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
pub(crate) fn parse_memory_size(raw: &[u8]) -> Option<u64> {
    match raw.len() {
        8 => Some(u64::from_le_bytes(raw.try_into().ok()?)),
        4 => Some(u32::from_le_bytes(raw.try_into().ok()?) as u64),
        _ => None,
    }
}
