//! Raw per-vector results and complete run sequences.
//!
//! A [`RawResult`] captures what the hardware actually produced: the exact
//! output bit pattern (never a rounded or printed form), the accrued
//! exception flags, and a status. A [`BatteryRun`] is the ordered sequence
//! for one complete execution; partial sequences never leave the runner,
//! so a `BatteryRun`'s existence implies every vector occupies its slot.

use serde::{Deserialize, Serialize};

use crate::common::ExceptionFlags;

/// Result bits recorded for a vector whose instruction class is absent.
///
/// The sentinel occupies the vector's slot in the canonical sequence so
/// two runs with different support profiles stay aligned.
pub const UNSUPPORTED_SENTINEL: u64 = 0xFFFF_FFFF_FFFF_FFFF;

/// Result bits recorded for a vector that trapped during evaluation.
pub const TRAPPED_SENTINEL: u64 = 0xFFFF_FFFF_FFFF_FFFE;

/// Outcome of evaluating one vector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VectorStatus {
    /// The operation executed and produced result bits.
    Ok,
    /// The host lacks the required instruction class; sentinel recorded.
    Unsupported,
    /// Evaluation faulted; sentinel recorded, battery continued.
    Trapped,
}

impl VectorStatus {
    /// Wire byte for the canonical serialization.
    pub fn to_wire(self) -> u8 {
        match self {
            Self::Ok => 0,
            Self::Unsupported => 1,
            Self::Trapped => 2,
        }
    }

    /// Decodes a wire byte; `None` for bytes outside the known set.
    pub fn from_wire(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Ok),
            1 => Some(Self::Unsupported),
            2 => Some(Self::Trapped),
            _ => None,
        }
    }
}

/// Output of running one operation vector on one machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawResult {
    /// Catalog identifier of the vector that produced this result.
    pub vector_id: u16,
    /// How the evaluation concluded.
    pub status: VectorStatus,
    /// Exact output bit pattern (or a sentinel for non-`Ok` statuses).
    pub bits: u64,
    /// Exception flags accrued during the evaluation.
    pub flags: ExceptionFlags,
}

/// The ordered result sequence of one complete battery execution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatteryRun {
    /// Battery version the sequence was produced under.
    pub version: u32,
    /// One result per catalog vector, in declared order.
    pub results: Vec<RawResult>,
    /// Vector ids whose bits differed between consistency passes. Non-empty
    /// means the host violated the tool's core reproducibility assumption;
    /// the fingerprint still exists but is unreliable.
    pub nondeterministic: Vec<u16>,
}

impl BatteryRun {
    /// True when every consistency pass produced identical bits.
    pub fn is_deterministic(&self) -> bool {
        self.nondeterministic.is_empty()
    }

    /// True when any vector trapped during evaluation.
    pub fn any_trapped(&self) -> bool {
        self.results
            .iter()
            .any(|r| r.status == VectorStatus::Trapped)
    }

    /// True when any vector was unsupported on the host, i.e. the digest
    /// covers a reduced feature set.
    pub fn any_unsupported(&self) -> bool {
        self.results
            .iter()
            .any(|r| r.status == VectorStatus::Unsupported)
    }
}
