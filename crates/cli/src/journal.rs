//! Run-record persistence.
//!
//! Two formats share one record shape: a standalone pretty-printed JSON
//! record per run (the unit `compare` consumes), and an append-only JSONL
//! journal for accumulating runs across machines over time. The journal is
//! append-only on purpose; the vector catalog only ever grows, so a
//! record written by an older tool version stays a valid reference next to
//! newer ones.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use fpsig_core::battery::{BATTERY_VERSION, BatteryRun, RawResult};
use fpsig_core::env::MachineDescriptor;
use fpsig_core::session::RunReport;

/// One persisted battery run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunRecord {
    /// Version of the tool that wrote the record.
    pub tool_version: String,
    /// Battery version the run executed.
    pub battery_version: u32,
    /// Fingerprint digest, as its 64-char hex rendering.
    pub fingerprint: String,
    /// Host correlation metadata.
    pub machine: MachineDescriptor,
    /// Full raw-result dump, in catalog order.
    pub results: Vec<RawResult>,
    /// Vector ids that were non-deterministic across consistency passes.
    pub nondeterministic: Vec<u16>,
}

impl RunRecord {
    /// Builds a record from a completed run.
    pub fn from_report(report: &RunReport) -> Self {
        Self {
            tool_version: env!("CARGO_PKG_VERSION").to_owned(),
            battery_version: report.run.version,
            fingerprint: report.fingerprint.to_string(),
            machine: report.machine.clone(),
            results: report.run.results.clone(),
            nondeterministic: report.run.nondeterministic.clone(),
        }
    }

    /// Reconstructs the run sequence for comparison.
    pub fn to_run(&self) -> BatteryRun {
        BatteryRun {
            version: self.battery_version,
            results: self.results.clone(),
            nondeterministic: self.nondeterministic.clone(),
        }
    }
}

/// Writes one record as a standalone pretty-printed JSON file.
pub fn write_record(path: &Path, record: &RunRecord) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(record)?;
    std::fs::write(path, json)
}

/// Appends one record as a single JSON line to the journal, creating the
/// file on first use. Existing lines are never rewritten.
pub fn append_journal(path: &Path, record: &RunRecord) -> std::io::Result<()> {
    let json = serde_json::to_string(record)?;
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{json}")
}

/// Reads a standalone record file.
pub fn read_record(path: &Path) -> std::io::Result<RunRecord> {
    let text = std::fs::read_to_string(path)?;
    let record: RunRecord = serde_json::from_str(&text)?;
    if record.battery_version > BATTERY_VERSION {
        tracing::warn!(
            path = %path.display(),
            version = record.battery_version,
            "record was written by a newer battery version"
        );
    }
    Ok(record)
}
