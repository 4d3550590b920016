//! Configuration for one battery run.
//!
//! This module defines the knobs a caller may turn without changing what is
//! measured: the floating-point environment to install before execution, the
//! core to pin to, and how many consistency passes to run. It deliberately
//! does *not* configure the battery contents; the vector set is fixed per
//! tool version so historical fingerprints stay comparable.
//!
//! Configuration is supplied via JSON (`serde`) or `RunConfig::default()`.

use serde::Deserialize;

/// Default configuration constants for a battery run.
mod defaults {
    /// Number of times the battery is executed per run.
    ///
    /// Repeated passes detect non-deterministic hosts: any vector whose bits
    /// differ between passes marks the fingerprint unreliable. Three passes
    /// is enough to distinguish "flaky once" from "stable".
    pub const CONSISTENCY_PASSES: usize = 3;
}

/// IEEE 754 rounding-direction attribute installed for the battery.
///
/// The default for comparison across machines is round-to-nearest-even; the
/// other modes exist because several vectors are chosen to round differently
/// under each direction, which is itself part of the observable behaviour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundingMode {
    /// Round to nearest, ties to even (IEEE default).
    #[default]
    NearestEven,
    /// Round towards zero (truncate).
    TowardZero,
    /// Round towards negative infinity.
    Downward,
    /// Round towards positive infinity.
    Upward,
}

/// Configuration for one battery run.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Rounding mode to install before the battery executes.
    pub rounding: RoundingMode,
    /// Enable flush-to-zero: denormal *results* are replaced by signed zero.
    pub flush_to_zero: bool,
    /// Enable denormals-are-zero: denormal *operands* are read as signed zero.
    pub denormals_are_zero: bool,
    /// Logical core to pin the run to. `None` runs unpinned, which is only
    /// acceptable for single-socket diagnostics; cross-machine comparisons
    /// should always pin.
    pub pin_core: Option<usize>,
    /// Number of consistency passes (at least 1).
    pub passes: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            rounding: RoundingMode::default(),
            flush_to_zero: false,
            denormals_are_zero: false,
            pin_core: None,
            passes: defaults::CONSISTENCY_PASSES,
        }
    }
}

impl RunConfig {
    /// Returns the pass count clamped to at least one execution.
    pub fn effective_passes(&self) -> usize {
        self.passes.max(1)
    }
}
