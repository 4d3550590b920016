//! CPU floating-point behaviour fingerprinting library.
//!
//! This crate runs a fixed, versioned battery of numerically sensitive
//! operations and reduces their bit-exact results to a stable digest. It provides:
//! 1. **Environment:** Scoped FPU state control (rounding mode, FTZ/DAZ), core
//!    affinity pinning, and machine metadata capture.
//! 2. **Battery:** The versioned operation-vector catalog and the runner that
//!    executes it in declared order under a configured environment.
//! 3. **Report:** Canonical serialization of raw results, SHA-256
//!    fingerprinting, and per-vector comparison between runs.
//! 4. **Session:** Pin-configure-execute orchestration, including repeated
//!    consistency passes to detect non-deterministic hosts.
//!
//! Two machines of the same microarchitecture and microcode are expected to
//! produce identical fingerprints; machines of different families diverge.
//! The digest is a pure function of the ordered raw-result sequence; no
//! timestamps, addresses, or thread identity enter the hashed material.

/// Common types (exception flag mask, error taxonomy).
pub mod common;
/// Run configuration (defaults, rounding mode selection, pass counts).
pub mod config;
/// FPU environment control, core affinity, and machine capture.
pub mod env;
/// Operation-vector catalog and the battery runner.
pub mod battery;
/// Canonical serialization, fingerprint hashing, and run comparison.
pub mod report;
/// Pin-configure-execute orchestration for one battery run.
pub mod session;

/// Root configuration type; use `RunConfig::default()` or deserialize from JSON.
pub use crate::config::RunConfig;
/// One complete battery execution with its fingerprint and machine metadata.
pub use crate::session::RunReport;
/// Fixed-length digest over a run's canonical raw-result bytes.
pub use crate::report::fingerprint::Fingerprint;
