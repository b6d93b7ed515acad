//! GPU utilization resolution
//!
//! Two-tier fallback across engine categories. The 3D-engine tier represents
//! one logical engine whose per-instance (per-process) values are additive,
//! so it sums; the all-engine tier spans parallel engines where summing would
//! over-count, so it takes the maximum instead. This asymmetry is deliberate.

use crate::notes::{Notes, Severity};
use crate::provider::{CounterCategory, CounterProvider};
use crate::units::round_percent;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

/// Engine category the reported utilization was derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineScope {
    /// 3D-engine instances, values summed
    ThreeD,
    /// All engine categories, maximum instance value
    AnyEngine,
    /// No tier produced data
    Unavailable,
}

impl EngineScope {
    /// Display label for the scope
    pub fn label(&self) -> &'static str {
        match self {
            EngineScope::ThreeD => "3D Engine",
            EngineScope::AnyEngine => "Max of Any Engine",
            EngineScope::Unavailable => "unavailable",
        }
    }
}

/// Resolved GPU utilization for one snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UtilizationReport {
    /// Utilization rounded to the nearest whole percent; `None` means no
    /// engine counter produced a value
    pub percent: Option<u32>,
    /// Which tier produced the value
    pub engine: EngineScope,
    /// Diagnostic notes accumulated across the tiers
    pub notes: Notes,
}

impl UtilizationReport {
    /// Human-readable summary for the verbose display
    pub fn display(&self) -> String {
        match self.percent {
            Some(p) => format!("GPU utilization: {}% ({})", p, self.engine.label()),
            None => "GPU utilization: unavailable".to_string(),
        }
    }
}

/// Resolve utilization from the counter provider
pub fn resolve_utilization(counters: &dyn CounterProvider) -> UtilizationReport {
    let mut notes = Notes::new();

    // Tier 1: 3D engine only, per-instance values are additive shares.
    match sample_tier(counters, CounterCategory::Engine3d, &mut notes) {
        Some(values) => {
            let percent = round_percent(values.iter().sum());
            debug!("3D engine tier: {} instance(s), sum {}%", values.len(), percent);
            return UtilizationReport {
                percent: Some(percent),
                engine: EngineScope::ThreeD,
                notes,
            };
        }
        None => {
            notes.push(
                Severity::Info,
                "No 3D engine utilization data; falling back to all engine categories.",
            );
        }
    }

    // Tier 2: every engine category, maximum to avoid over-counting
    // parallel engines.
    if let Some(values) = sample_tier(counters, CounterCategory::EngineAll, &mut notes) {
        let max = values.iter().cloned().fold(f64::MIN, f64::max);
        let percent = round_percent(max);
        debug!("all-engine tier: {} instance(s), max {}%", values.len(), percent);
        return UtilizationReport {
            percent: Some(percent),
            engine: EngineScope::AnyEngine,
            notes,
        };
    }

    notes.push(
        Severity::Warning,
        "No GPU engine utilization counters produced data.",
    );
    UtilizationReport {
        percent: None,
        engine: EngineScope::Unavailable,
        notes,
    }
}

/// Sample one tier, returning the non-null readings if any exist
fn sample_tier(
    counters: &dyn CounterProvider,
    category: CounterCategory,
    notes: &mut Notes,
) -> Option<Vec<f64>> {
    let readings = match counters.sample(category) {
        Ok(readings) => readings,
        Err(e) => {
            warn!("utilization counter query failed for {:?}: {}", category, e);
            notes.push(
                Severity::Warning,
                format!("Utilization counter query failed: {}.", e),
            );
            return None;
        }
    };

    let values: Vec<f64> = readings.into_iter().flatten().collect();
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}
