//! Ordered battery execution.
//!
//! The runner walks the vector list in declared order under an
//! already-configured environment, capturing one [`RawResult`] per vector.
//! Recoverable conditions stay local: an unsupported instruction class or a
//! caught per-vector trap records a sentinel and the walk continues. Only
//! cancellation (and a process-fatal fault, which never returns control)
//! stops a run, and a stopped run yields [`RunError::Incomplete`] with the
//! partial results discarded; no fingerprint can exist for it.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::common::error::IncompleteReason;
use crate::common::{ExceptionFlags, RunError};
use crate::env::fenv;

use super::ops;
use super::result::{
    BatteryRun, RawResult, TRAPPED_SENTINEL, UNSUPPORTED_SENTINEL, VectorStatus,
};
use super::vector::OperationVector;
use super::catalog::BATTERY_VERSION;

/// Executes an ordered vector list and collects raw results.
#[derive(Debug)]
pub struct BatteryRunner<'a> {
    vectors: &'a [OperationVector],
    cancel: Option<&'a AtomicBool>,
}

impl<'a> BatteryRunner<'a> {
    /// Creates a runner over `vectors` (normally the full catalog).
    pub fn new(vectors: &'a [OperationVector]) -> Self {
        Self {
            vectors,
            cancel: None,
        }
    }

    /// Attaches a cancellation token, polled between vectors.
    pub fn with_cancel(mut self, token: &'a AtomicBool) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Runs every vector once, in declared order.
    ///
    /// # Errors
    ///
    /// [`RunError::Incomplete`] when the cancellation token fires before the
    /// last vector; the partial results are dropped.
    pub fn execute_pass(&self) -> Result<Vec<RawResult>, RunError> {
        let total = self.vectors.len();
        let mut results = Vec::with_capacity(total);
        for vector in self.vectors {
            if let Some(token) = self.cancel {
                if token.load(Ordering::Relaxed) {
                    return Err(RunError::Incomplete {
                        completed: results.len(),
                        total,
                        reason: IncompleteReason::Cancelled,
                    });
                }
            }
            results.push(run_vector(vector));
        }
        Ok(results)
    }

    /// Runs the battery `passes` times and reports the first pass's results
    /// together with the ids of any vector whose bits, flags, or status
    /// changed between passes.
    ///
    /// Repeating the battery on one machine is itself a diagnostic: the
    /// whole experiment rests on reproducibility, so a host that answers
    /// differently twice gets its fingerprint flagged unreliable rather
    /// than silently averaged.
    ///
    /// # Errors
    ///
    /// [`RunError::Incomplete`] on cancellation during any pass.
    pub fn execute(&self, passes: usize) -> Result<BatteryRun, RunError> {
        let first = self.execute_pass()?;
        let mut nondeterministic = Vec::new();
        for pass in 1..passes.max(1) {
            let repeat = self.execute_pass()?;
            if repeat.len() != first.len() {
                return Err(RunError::Incomplete {
                    completed: repeat.len(),
                    total: first.len(),
                    reason: IncompleteReason::PassMismatch,
                });
            }
            for (reference, observed) in first.iter().zip(&repeat) {
                if reference != observed && !nondeterministic.contains(&reference.vector_id) {
                    tracing::warn!(
                        vector = reference.vector_id,
                        pass,
                        expected_bits = reference.bits,
                        observed_bits = observed.bits,
                        "non-deterministic vector result"
                    );
                    nondeterministic.push(reference.vector_id);
                }
            }
        }
        tracing::debug!(
            vectors = first.len(),
            passes = passes.max(1),
            unstable = nondeterministic.len(),
            "battery complete"
        );
        Ok(BatteryRun {
            version: BATTERY_VERSION,
            results: first,
            nondeterministic,
        })
    }
}

/// Evaluates one vector, capturing bits, flags, and status.
fn run_vector(vector: &OperationVector) -> RawResult {
    fenv::clear_exception_flags();
    let outcome = catch_unwind(AssertUnwindSafe(|| ops::evaluate(vector.op, vector.operands)));
    match outcome {
        Ok(Some(bits)) => RawResult {
            vector_id: vector.id,
            status: VectorStatus::Ok,
            bits,
            flags: fenv::read_exception_flags(),
        },
        Ok(None) => {
            tracing::debug!(vector = vector.id, name = vector.name, "unsupported on host");
            RawResult {
                vector_id: vector.id,
                status: VectorStatus::Unsupported,
                bits: UNSUPPORTED_SENTINEL,
                flags: ExceptionFlags::NONE,
            }
        }
        Err(_) => {
            tracing::warn!(vector = vector.id, name = vector.name, "vector trapped");
            RawResult {
                vector_id: vector.id,
                status: VectorStatus::Trapped,
                bits: TRAPPED_SENTINEL,
                flags: fenv::read_exception_flags(),
            }
        }
    }
}
