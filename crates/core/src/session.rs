//! Pin-configure-execute orchestration for one battery run.
//!
//! A run is single-threaded and synchronous: pin first (failing loudly if
//! the host refuses), install the floating-point environment second, then
//! execute every consistency pass on that one thread with both guards
//! held. The guards restore affinity and FPU state on every exit path.
//! Comparing multiple targets means multiple independent sessions, each
//! on its own thread with its own guards, sharing nothing but the
//! read-only catalog.

use std::sync::atomic::AtomicBool;

use crate::battery::{BatteryRun, BatteryRunner, Category, RawResult, catalog};
use crate::common::RunError;
use crate::config::RunConfig;
use crate::env::{FpEnvGuard, MachineDescriptor, pin_to_core};
use crate::report::Fingerprint;

/// One complete battery execution: the raw sequence, its digest, and the
/// machine it ran on.
#[derive(Clone, Debug)]
pub struct RunReport {
    /// Correlation metadata for the host; never part of the digest.
    pub machine: MachineDescriptor,
    /// The ordered raw-result sequence.
    pub run: BatteryRun,
    /// Digest over the run's canonical bytes.
    pub fingerprint: Fingerprint,
}

impl RunReport {
    /// True when the fingerprint can be trusted as a stable identifier:
    /// every consistency pass agreed and nothing trapped.
    pub fn is_reliable(&self) -> bool {
        self.run.is_deterministic() && !self.run.any_trapped()
    }
}

/// Executes one complete battery run under `config`.
///
/// # Errors
///
/// [`RunError::AffinityUnavailable`] when a requested pin fails,
/// [`RunError::EnvUnavailable`] when the host cannot express the requested
/// floating-point environment, and [`RunError::Incomplete`] on
/// cancellation. No fingerprint exists in any error case.
pub fn execute_run(config: &RunConfig) -> Result<RunReport, RunError> {
    execute_run_cancellable(config, None)
}

/// [`execute_run`] with an optional cancellation token polled between
/// vectors.
pub fn execute_run_cancellable(
    config: &RunConfig,
    cancel: Option<&AtomicBool>,
) -> Result<RunReport, RunError> {
    // Pin before touching FPU state: an AffinityUnavailable host must not
    // get as far as running vectors it would then have to throw away.
    let _affinity = match config.pin_core {
        Some(core) => Some(pin_to_core(core)?),
        None => None,
    };
    let _env = FpEnvGuard::configure(config)?;

    let mut runner = BatteryRunner::new(catalog());
    if let Some(token) = cancel {
        runner = runner.with_cancel(token);
    }
    let run = runner.execute(config.effective_passes())?;
    let fingerprint = Fingerprint::of_run(&run);
    let machine = MachineDescriptor::capture(config.pin_core);

    tracing::info!(
        %fingerprint,
        core = ?config.pin_core,
        deterministic = run.is_deterministic(),
        "battery run complete"
    );
    Ok(RunReport {
        machine,
        run,
        fingerprint,
    })
}

/// Executes only the vectors in the selected categories, for diagnostic
/// dumps.
///
/// A fingerprint is defined over the *full* versioned battery, so subset
/// runs return bare results and nothing digestible; two subset dumps are
/// comparable to each other but never to a fingerprint.
///
/// # Errors
///
/// Same conditions as [`execute_run`].
pub fn execute_dump(
    config: &RunConfig,
    categories: &[Category],
) -> Result<Vec<RawResult>, RunError> {
    let _affinity = match config.pin_core {
        Some(core) => Some(pin_to_core(core)?),
        None => None,
    };
    let _env = FpEnvGuard::configure(config)?;

    let selected: Vec<_> = catalog()
        .iter()
        .filter(|vector| categories.contains(&vector.category))
        .copied()
        .collect();
    BatteryRunner::new(&selected).execute_pass()
}
