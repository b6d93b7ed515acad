//! # VRAM Probe (vramprobe)
//!
//! Single-snapshot reporting of a host's discrete-GPU memory capacity,
//! memory usage, and compute utilization as one compact machine-parseable
//! line, for a supervising application that cannot query GPU drivers
//! directly. Targets systems without a vendor monitoring CLI by falling back
//! to generic OS instrumentation: the display-adapter area of the hardware
//! registry and the GPU performance-counter subsystem.
//!
//! Every data source fails softly. Missing registry entries, empty counter
//! sets, and subsystem errors become diagnostic notes, and the status line
//! is always emitted with an explicit `N/A` sentinel for fields with no
//! collected data. A sentinel is never conflated with a measured zero.
//!
//! ## Quick start
//!
//! ```no_run
//! use vramprobe::system_probe;
//!
//! let snapshot = system_probe().snapshot();
//! // e.g. "1.5;8.0;65" or "N/A;8.0;N/A"
//! println!("{}", snapshot.status_line());
//! ```
//!
//! The resolution logic is independent of the host OS: it runs against the
//! [`provider::AdapterProvider`] and [`provider::CounterProvider`] seams, so
//! it can be exercised with fabricated data.

pub mod error;
pub mod memory;
pub mod notes;
pub mod platform;
pub mod probe;
pub mod provider;
pub mod report;
pub mod units;
pub mod utilization;

pub use error::{ProbeError, Result};
pub use memory::{resolve_memory, MemoryReport};
pub use notes::{Note, Notes, Severity};
pub use probe::{system_probe, Probe};
pub use provider::{AdapterCandidate, AdapterProvider, CounterCategory, CounterProvider};
pub use report::{Snapshot, UNAVAILABLE};
pub use utilization::{resolve_utilization, EngineScope, UtilizationReport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
