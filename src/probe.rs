//! Snapshot orchestration
//!
//! Runs the two resolution routines in sequence and combines their reports.
//! Each stage fails independently into its own notes, so a snapshot is always
//! produced and the status line is always well-formed.

use crate::memory::resolve_memory;
use crate::provider::{AdapterProvider, CounterProvider};
use crate::report::Snapshot;
use crate::utilization::resolve_utilization;

/// One-shot GPU probe over a pair of instrumentation providers
///
/// Every snapshot is a fresh, independent read; the probe holds no cached
/// state between invocations.
pub struct Probe<A: AdapterProvider, C: CounterProvider> {
    adapters: A,
    counters: C,
}

impl<A: AdapterProvider, C: CounterProvider> Probe<A, C> {
    /// Build a probe from explicit providers
    pub fn new(adapters: A, counters: C) -> Self {
        Self { adapters, counters }
    }

    /// Take a single snapshot of memory and utilization
    pub fn snapshot(&self) -> Snapshot {
        let memory = resolve_memory(&self.adapters, &self.counters);
        let utilization = resolve_utilization(&self.counters);
        Snapshot {
            memory,
            utilization,
        }
    }
}

/// Probe wired to this host's OS instrumentation
pub fn system_probe() -> Probe<crate::platform::SystemAdapters, crate::platform::SystemCounters> {
    Probe::new(
        crate::platform::SystemAdapters::new(),
        crate::platform::SystemCounters::new(),
    )
}
