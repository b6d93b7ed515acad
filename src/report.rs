//! Output formatting
//!
//! Produces the machine-parseable status line consumed by the supervising
//! application, and the verbose multi-section display for humans. The
//! "unavailable" sentinel token and a measured zero must never be confused:
//! GB fields always render with exactly one decimal ("8.0", never "8"), the
//! utilization field is a bare integer, and `N/A` appears only when no data
//! was collected.

use crate::memory::MemoryReport;
use crate::notes::Note;
use crate::utilization::UtilizationReport;
use serde::{Deserialize, Serialize};

/// Sentinel token emitted for fields with no collected data
pub const UNAVAILABLE: &str = "N/A";

/// Format a GiB field: one decimal place, or the sentinel token
pub fn fmt_gib(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}", v),
        None => UNAVAILABLE.to_string(),
    }
}

/// Format the utilization field: bare integer, or the sentinel token
pub fn fmt_percent(value: Option<u32>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => UNAVAILABLE.to_string(),
    }
}

/// One complete probe result: memory and utilization reports combined
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// VRAM usage and capacity
    pub memory: MemoryReport,
    /// Engine utilization
    pub utilization: UtilizationReport,
}

impl Snapshot {
    /// The fixed-order `USED;TOTAL;UTIL` status line
    pub fn status_line(&self) -> String {
        format!(
            "{};{};{}",
            fmt_gib(self.memory.used_gib),
            fmt_gib(self.memory.total_gib),
            fmt_percent(self.utilization.percent)
        )
    }

    /// Multi-section human-readable display with accumulated notes
    pub fn table(&self) -> String {
        let mut out = String::new();
        out.push_str("GPU Memory\n");
        out.push_str(&format!("  {}\n", self.memory.display()));
        for note in self.memory.notes.iter() {
            out.push_str(&format!("  note [{}]: {}\n", severity_label(note), note.message));
        }
        out.push_str("GPU Utilization\n");
        out.push_str(&format!("  {}\n", self.utilization.display()));
        for note in self.utilization.notes.iter() {
            out.push_str(&format!("  note [{}]: {}\n", severity_label(note), note.message));
        }
        out
    }
}

fn severity_label(note: &Note) -> &'static str {
    use crate::notes::Severity;
    match note.severity {
        Severity::Info => "info",
        Severity::Warning => "warning",
        Severity::Critical => "critical",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notes::{Notes, Severity};
    use crate::utilization::EngineScope;

    fn snapshot(
        used: Option<f64>,
        total: Option<f64>,
        percent: Option<u32>,
        engine: EngineScope,
    ) -> Snapshot {
        Snapshot {
            memory: MemoryReport {
                used_gib: used,
                total_gib: total,
                notes: Notes::new(),
            },
            utilization: UtilizationReport {
                percent,
                engine,
                notes: Notes::new(),
            },
        }
    }

    #[test]
    fn gib_fields_always_render_one_decimal() {
        assert_eq!(fmt_gib(Some(8.0)), "8.0");
        assert_eq!(fmt_gib(Some(1.5)), "1.5");
        assert_eq!(fmt_gib(Some(0.0)), "0.0");
    }

    #[test]
    fn sentinel_and_zero_are_distinct_in_both_fields() {
        assert_eq!(fmt_gib(None), "N/A");
        assert_ne!(fmt_gib(Some(0.0)), fmt_gib(None));
        assert_eq!(fmt_percent(None), "N/A");
        assert_ne!(fmt_percent(Some(0)), fmt_percent(None));
    }

    #[test]
    fn status_line_field_order_is_used_total_util() {
        let snap = snapshot(Some(1.5), Some(8.0), Some(65), EngineScope::ThreeD);
        assert_eq!(snap.status_line(), "1.5;8.0;65");
    }

    #[test]
    fn status_line_with_missing_capacity() {
        let snap = snapshot(Some(2.0), None, Some(55), EngineScope::ThreeD);
        assert_eq!(snap.status_line(), "2.0;N/A;55");
    }

    #[test]
    fn status_line_all_unavailable() {
        let snap = snapshot(None, None, None, EngineScope::Unavailable);
        assert_eq!(snap.status_line(), "N/A;N/A;N/A");
    }

    #[test]
    fn table_includes_notes() {
        let mut snap = snapshot(Some(9.0), Some(8.0), None, EngineScope::Unavailable);
        snap.memory
            .notes
            .push(Severity::Critical, "usage exceeds capacity");
        let table = snap.table();
        assert!(table.contains("GPU Memory"));
        assert!(table.contains("note [critical]: usage exceeds capacity"));
        assert!(table.contains("GPU Utilization"));
        assert!(table.contains("unavailable"));
    }
}
