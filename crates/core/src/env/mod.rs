//! Host environment control for battery execution.
//!
//! Everything that touches per-thread global state lives here, and only
//! here. It provides:
//! 1. **Floating-point environment:** Scoped rounding-mode and FTZ/DAZ
//!    control with guaranteed restore on every exit path ([`fenv`]).
//! 2. **Affinity:** Scoped pinning of the calling thread to one logical
//!    core, failing loudly when the host refuses ([`affinity`]).
//! 3. **Machine capture:** Correlation metadata about the host
//!    ([`machine`]): reporting only, never part of fingerprint identity.

/// Core affinity pinning via `sched_setaffinity`.
pub mod affinity;
/// Scoped floating-point environment control and exception-flag access.
pub mod fenv;
/// Host metadata capture for run correlation.
pub mod machine;

pub use affinity::{AffinityGuard, current_core, pin_to_core};
pub use fenv::FpEnvGuard;
pub use machine::MachineDescriptor;
