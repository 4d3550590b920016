//! Result aggregation, fingerprinting, and run comparison.
//!
//! Data flows strictly forward through this module: the canonical
//! serializer turns an ordered raw-result sequence into host-independent
//! bytes, the hasher reduces those bytes to a fixed-length digest, and the
//! comparator walks two sequences position-by-position for the per-vector
//! verdict the digest alone cannot give.

/// Pairwise comparison of two complete runs.
pub mod compare;
/// Fixed-length digest over canonical bytes.
pub mod fingerprint;
/// Canonical byte serialization of result sequences.
pub mod serialize;

pub use compare::{ComparisonReport, VectorComparison, compare};
pub use fingerprint::Fingerprint;
