//! VRAM capacity and usage resolution
//!
//! Combines three stages into one report: live dedicated-memory usage from
//! the performance-counter subsystem, declared capacity from the registry
//! adapter scan, and a cross-check between the two. Every stage soft-fails
//! into a diagnostic note; the routine itself is total.

use crate::notes::{Notes, Severity};
use crate::provider::{AdapterCandidate, AdapterProvider, CounterCategory, CounterProvider};
use crate::units::bytes_to_gib;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Resolved VRAM memory statistics for one snapshot
///
/// `None` is the explicit "unavailable" sentinel; a measured zero is kept as
/// `Some(0.0)`. Immutable once produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryReport {
    /// Dedicated memory in use, in GiB rounded to one decimal
    pub used_gib: Option<f64>,
    /// Declared capacity of the selected adapter, in GiB rounded to one decimal
    pub total_gib: Option<f64>,
    /// Diagnostic notes accumulated across the stages
    pub notes: Notes,
}

impl MemoryReport {
    /// Human-readable summary for the verbose display
    pub fn display(&self) -> String {
        let used = match self.used_gib {
            Some(v) => format!("{:.1} GB", v),
            None => "unavailable".to_string(),
        };
        let total = match self.total_gib {
            Some(v) => format!("{:.1} GB", v),
            None => "unavailable".to_string(),
        };
        format!("VRAM used: {} / total: {}", used, total)
    }
}

/// Resolve memory statistics from the providers
///
/// Usage and capacity are independent: either may come back unavailable
/// without affecting the other. The consistency check only fires when both
/// are concrete.
pub fn resolve_memory(
    adapters: &dyn AdapterProvider,
    counters: &dyn CounterProvider,
) -> MemoryReport {
    let mut notes = Notes::new();

    let used_gib = sample_dedicated_usage(counters, &mut notes);
    let total_gib = resolve_capacity(adapters, &mut notes);

    if let Some(note) = consistency_note(used_gib, total_gib) {
        warn!("memory consistency check failed: {}", note);
        notes.push(Severity::Critical, note);
    }

    MemoryReport {
        used_gib,
        total_gib,
        notes,
    }
}

/// Sum non-null dedicated-usage instances and convert to GiB
fn sample_dedicated_usage(counters: &dyn CounterProvider, notes: &mut Notes) -> Option<f64> {
    let readings = match counters.sample(CounterCategory::DedicatedMemory) {
        Ok(readings) => readings,
        Err(e) => {
            warn!("dedicated memory counter query failed: {}", e);
            notes.push(
                Severity::Warning,
                format!("Dedicated memory counter query failed: {}.", e),
            );
            return None;
        }
    };

    if readings.is_empty() {
        notes.push(
            Severity::Info,
            "No dedicated memory counter instances found.",
        );
        return None;
    }

    let mut total_bytes = 0.0f64;
    let mut seen = false;
    for reading in readings.iter().flatten() {
        total_bytes += reading;
        seen = true;
    }

    if !seen {
        notes.push(
            Severity::Info,
            "Dedicated memory counter instances reported no values.",
        );
        return None;
    }

    debug!("dedicated usage: {} bytes across instances", total_bytes);
    Some(bytes_to_gib(total_bytes.max(0.0) as u64))
}

/// Scan the registry candidates and select the reporting capacity
fn resolve_capacity(adapters: &dyn AdapterProvider, notes: &mut Notes) -> Option<f64> {
    let candidates = match adapters.adapter_candidates() {
        Ok(candidates) => candidates,
        Err(e) => {
            warn!("adapter registry scan failed: {}", e);
            notes.push(
                Severity::Warning,
                format!("Adapter registry scan failed: {}.", e),
            );
            return None;
        }
    };

    if candidates.is_empty() {
        notes.push(
            Severity::Info,
            "No display adapter with a declared memory size found in the registry.",
        );
        return None;
    }

    let selected = select_largest(&candidates);
    debug!(
        "selected adapter '{}' ({} bytes) from {} candidate(s)",
        selected.description,
        selected.capacity_bytes,
        candidates.len()
    );
    Some(bytes_to_gib(selected.capacity_bytes))
}

/// Pick the candidate with the largest capacity
///
/// Capacities are compared on the rounded-GiB value. The largest adapter is a
/// heuristic proxy for the discrete/primary GPU when vendor identity cannot
/// be read from generic hardware metadata. Ties keep the first-encountered
/// candidate; no secondary key is defined.
pub fn select_largest(candidates: &[AdapterCandidate]) -> &AdapterCandidate {
    let mut best = &candidates[0];
    let mut best_gib = bytes_to_gib(best.capacity_bytes);
    for candidate in &candidates[1..] {
        let gib = bytes_to_gib(candidate.capacity_bytes);
        if gib > best_gib {
            best = candidate;
            best_gib = gib;
        }
    }
    best
}

/// Cross-check usage against capacity
///
/// Usage can legitimately exceed capacity through measurement skew (per-
/// process double counting, or the counters and the registry describing
/// different adapters), so this reports an anomaly instead of clearing the
/// numeric fields.
fn consistency_note(used_gib: Option<f64>, total_gib: Option<f64>) -> Option<String> {
    match (used_gib, total_gib) {
        (Some(used), Some(total)) if used > total => Some(format!(
            "Reported usage ({:.1} GB) exceeds detected capacity ({:.1} GB); \
             readings may come from different adapters or double-count processes.",
            used, total
        )),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ProbeError, Result};

    struct FakeAdapters(Vec<AdapterCandidate>);

    impl AdapterProvider for FakeAdapters {
        fn adapter_candidates(&self) -> Result<Vec<AdapterCandidate>> {
            Ok(self.0.clone())
        }
    }

    struct FailingAdapters;

    impl AdapterProvider for FailingAdapters {
        fn adapter_candidates(&self) -> Result<Vec<AdapterCandidate>> {
            Err(ProbeError::Registry("display class key missing".into()))
        }
    }

    struct FakeCounters {
        memory: Vec<Option<f64>>,
    }

    impl CounterProvider for FakeCounters {
        fn sample(&self, category: CounterCategory) -> Result<Vec<Option<f64>>> {
            match category {
                CounterCategory::DedicatedMemory => Ok(self.memory.clone()),
                _ => Ok(Vec::new()),
            }
        }
    }

    fn candidate(description: &str, capacity_bytes: u64) -> AdapterCandidate {
        AdapterCandidate {
            description: description.to_string(),
            capacity_bytes,
        }
    }

    #[test]
    fn selects_largest_capacity() {
        let candidates = vec![
            candidate("iGPU", 1_073_741_824),
            candidate("dGPU", 8 * 1_073_741_824),
            candidate("other", 4 * 1_073_741_824),
        ];
        assert_eq!(select_largest(&candidates).description, "dGPU");
    }

    #[test]
    fn tie_keeps_first_encountered() {
        let candidates = vec![
            candidate("first", 8 * 1_073_741_824),
            candidate("second", 8 * 1_073_741_824),
        ];
        assert_eq!(select_largest(&candidates).description, "first");
    }

    #[test]
    fn no_candidates_leaves_total_unset() {
        let report = resolve_memory(
            &FakeAdapters(Vec::new()),
            &FakeCounters {
                memory: vec![Some(1_073_741_824.0)],
            },
        );
        assert_eq!(report.total_gib, None);
        assert_eq!(report.used_gib, Some(1.0));
        assert!(!report.notes.is_empty());
    }

    #[test]
    fn zero_counter_instances_is_sentinel() {
        let report = resolve_memory(
            &FakeAdapters(vec![candidate("gpu", 8 * 1_073_741_824)]),
            &FakeCounters { memory: Vec::new() },
        );
        assert_eq!(report.used_gib, None);
        assert_eq!(report.total_gib, Some(8.0));
    }

    #[test]
    fn all_null_instances_is_sentinel() {
        let report = resolve_memory(
            &FakeAdapters(vec![candidate("gpu", 8 * 1_073_741_824)]),
            &FakeCounters {
                memory: vec![None, None],
            },
        );
        assert_eq!(report.used_gib, None);
    }

    #[test]
    fn zero_reading_is_preserved_not_sentinel() {
        let report = resolve_memory(
            &FakeAdapters(vec![candidate("gpu", 8 * 1_073_741_824)]),
            &FakeCounters {
                memory: vec![Some(0.0)],
            },
        );
        assert_eq!(report.used_gib, Some(0.0));
    }

    #[test]
    fn usage_sums_across_instances() {
        let report = resolve_memory(
            &FakeAdapters(vec![candidate("gpu", 8 * 1_073_741_824)]),
            &FakeCounters {
                memory: vec![Some(1_073_741_824.0), None, Some(2_147_483_648.0)],
            },
        );
        assert_eq!(report.used_gib, Some(3.0));
    }

    #[test]
    fn usage_above_capacity_adds_critical_note() {
        let report = resolve_memory(
            &FakeAdapters(vec![candidate("gpu", 8 * 1_073_741_824)]),
            &FakeCounters {
                memory: vec![Some(9.0 * 1_073_741_824.0)],
            },
        );
        assert_eq!(report.used_gib, Some(9.0));
        assert_eq!(report.total_gib, Some(8.0));
        assert_eq!(report.notes.max_severity(), Some(Severity::Critical));
    }

    #[test]
    fn usage_below_capacity_adds_no_consistency_note() {
        let report = resolve_memory(
            &FakeAdapters(vec![candidate("gpu", 8 * 1_073_741_824)]),
            &FakeCounters {
                memory: vec![Some(4.0 * 1_073_741_824.0)],
            },
        );
        assert_eq!(report.used_gib, Some(4.0));
        assert!(report.notes.is_empty());
    }

    #[test]
    fn registry_failure_is_a_note_not_an_abort() {
        let report = resolve_memory(
            &FailingAdapters,
            &FakeCounters {
                memory: vec![Some(1_073_741_824.0)],
            },
        );
        assert_eq!(report.total_gib, None);
        assert_eq!(report.used_gib, Some(1.0));
        assert_eq!(report.notes.max_severity(), Some(Severity::Warning));
        assert!(report.notes.joined().contains("display class key missing"));
    }
}
