//! Error taxonomy for battery execution and record decoding.
//!
//! Per-vector conditions (an unsupported instruction class, a caught trap)
//! are *statuses* on the raw result, not errors: the battery keeps going and
//! the slot stays occupied. Only conditions that invalidate the whole run
//! surface as [`RunError`]; a fingerprint computed under an unverified
//! affinity or from a partial result sequence would silently corrupt
//! cross-machine comparability.

use thiserror::Error;

/// Why a battery execution stopped before producing a complete result set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IncompleteReason {
    /// The caller's cancellation token was set between vectors.
    Cancelled,
    /// A consistency pass finished with a different vector count than the
    /// first pass, so the passes cannot be compared position-by-position.
    PassMismatch,
}

impl std::fmt::Display for IncompleteReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cancelled => write!(f, "cancelled"),
            Self::PassMismatch => write!(f, "pass length mismatch"),
        }
    }
}

/// Fatal conditions for one battery run. None of these are retried: a
/// hardware-level failure reproduces under unchanged conditions.
#[derive(Debug, Error)]
pub enum RunError {
    /// Requested core/socket pinning could not be established. Fatal: an
    /// unpinned battery can migrate across sockets mid-run, which is exactly
    /// the variable the experiment holds fixed.
    #[error("cannot pin to core {core}: {source}")]
    AffinityUnavailable {
        /// The logical core that was requested.
        core: usize,
        /// The OS error returned by the affinity syscall.
        #[source]
        source: std::io::Error,
    },

    /// The host cannot express the requested floating-point environment
    /// (e.g. FTZ/DAZ on an architecture without a control register for it).
    /// Running anyway would record results under a different environment
    /// than the one the caller asked to compare.
    #[error("floating-point environment control unavailable: {0}")]
    EnvUnavailable(&'static str),

    /// Execution stopped before all vectors completed. Partial results are
    /// discarded; no fingerprint exists for this run.
    #[error("battery incomplete after {completed}/{total} vectors: {reason}")]
    Incomplete {
        /// Vectors that finished before execution stopped.
        completed: usize,
        /// Total vectors in the battery.
        total: usize,
        /// What stopped the run.
        reason: IncompleteReason,
    },
}

/// Errors raised while decoding a canonical raw-result byte sequence.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The buffer does not start with the canonical magic bytes.
    #[error("bad magic: expected {expected:02x?}, found {found:02x?}")]
    BadMagic {
        /// The required magic prefix.
        expected: [u8; 4],
        /// The bytes actually present.
        found: [u8; 4],
    },

    /// The encoded battery version is not one this build understands.
    #[error("unsupported battery version {0}")]
    UnsupportedVersion(u32),

    /// The buffer ended before the declared record count was read.
    #[error("truncated input: expected {expected} bytes, found {found}")]
    Truncated {
        /// Bytes required by the header's record count.
        expected: usize,
        /// Bytes actually available.
        found: usize,
    },

    /// A record carried a status byte outside the known set.
    #[error("unknown status byte {0:#04x} in record {1}")]
    UnknownStatus(u8, usize),
}
