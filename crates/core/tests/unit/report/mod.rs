//! Report layer tests.

/// Pairwise run comparison.
pub mod compare;
/// Digest purity and rendering.
pub mod fingerprint;
/// Canonical serialization.
pub mod serialize;
