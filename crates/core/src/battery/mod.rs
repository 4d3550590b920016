//! The operation battery: the versioned vector catalog and its runner.
//!
//! This module owns the fixed set of numerically sensitive operations whose
//! bit-exact results make up a fingerprint. It provides:
//! 1. **Vectors:** The [`OperationVector`] type, operation kinds, and the
//!    operand bit-pattern constants ([`vector`]).
//! 2. **Catalog:** The versioned, append-only vector list ([`catalog`]).
//! 3. **Evaluation:** Per-category operation implementations kept opaque to
//!    the optimizer ([`ops`]).
//! 4. **Execution:** The ordered runner with per-vector status capture,
//!    cancellation, and consistency passes ([`runner`]).

/// Versioned operation-vector list.
pub mod catalog;
/// Operation implementations per category.
pub mod ops;
/// Raw per-vector results and complete run sequences.
pub mod result;
/// Ordered battery execution.
pub mod runner;
/// Vector types and operand bit patterns.
pub mod vector;

pub use catalog::{BATTERY_VERSION, catalog};
pub use result::{BatteryRun, RawResult, VectorStatus};
pub use runner::BatteryRunner;
pub use vector::{Category, OperationVector, VectorOp};
