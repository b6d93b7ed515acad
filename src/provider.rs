//! Provider seams over OS instrumentation
//!
//! The resolution logic never touches the registry or the performance-counter
//! subsystem directly; it goes through these two narrow traits so it can run
//! against fabricated data in tests. The real implementations live in
//! [`crate::platform`].

use crate::error::Result;

/// A display adapter discovered in the hardware-description registry
///
/// Transient: produced per scanned registry entry and discarded after
/// capacity selection. Only entries with a non-empty description and a
/// strictly positive declared memory size become candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterCandidate {
    /// Driver description string for the adapter
    pub description: String,
    /// Declared dedicated memory size in bytes
    pub capacity_bytes: u64,
}

/// Performance-counter category to sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterCategory {
    /// GPU utilization percentage, 3D engine instances only
    Engine3d,
    /// GPU utilization percentage across all engine categories
    EngineAll,
    /// Dedicated GPU memory usage in bytes, one instance per consumer
    DedicatedMemory,
}

/// Lists adapter candidates from the hardware-description registry
pub trait AdapterProvider {
    /// Enumerate valid adapter candidates
    ///
    /// Entries with malformed or missing fields are skipped, not errors; an
    /// empty vector means no valid candidate exists. `Err` is reserved for
    /// the registry area itself being inaccessible.
    fn adapter_candidates(&self) -> Result<Vec<AdapterCandidate>>;
}

/// Samples one cooked reading per instance of a counter category
pub trait CounterProvider {
    /// Take a single snapshot of every instance in the category
    ///
    /// `None` entries are instances that exist but reported no cooked value.
    /// An empty vector means the category has no instances at all. Both are
    /// distinct from a genuine zero reading, which comes back as `Some(0.0)`.
    fn sample(&self, category: CounterCategory) -> Result<Vec<Option<f64>>>;
}
