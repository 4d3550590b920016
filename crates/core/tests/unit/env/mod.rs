//! Environment controller tests.

/// Core affinity pinning.
pub mod affinity;
/// Scoped floating-point environment control.
pub mod fenv;
/// Machine metadata capture.
pub mod machine;
