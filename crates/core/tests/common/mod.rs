//! Shared helpers for the fpsig-core test suite.

use fpsig_core::battery::{
    BATTERY_VERSION, BatteryRun, BatteryRunner, RawResult, VectorStatus, catalog,
};
use fpsig_core::common::ExceptionFlags;

/// Executes the full battery once under the ambient environment.
pub fn complete_run() -> BatteryRun {
    BatteryRunner::new(catalog())
        .execute(1)
        .expect("uncancelled battery must complete")
}

/// Builds a synthetic result sequence with `count` records.
pub fn synthetic_results(count: usize) -> Vec<RawResult> {
    (0..count)
        .map(|index| RawResult {
            vector_id: index as u16 + 1,
            status: VectorStatus::Ok,
            bits: 0x3FF0_0000_0000_0000 + index as u64,
            flags: ExceptionFlags::NX,
        })
        .collect()
}

/// Wraps a synthetic sequence into a run under the current version.
pub fn synthetic_run(count: usize) -> BatteryRun {
    BatteryRun {
        version: BATTERY_VERSION,
        results: synthetic_results(count),
        nondeterministic: Vec::new(),
    }
}
