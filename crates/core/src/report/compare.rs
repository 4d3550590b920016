//! Pairwise comparison of two complete runs.
//!
//! The aggregate digest answers "same or different" but not *where*: a
//! dual-socket system returning the same fingerprint on both sockets and
//! two machines of different families returning different ones are only
//! interpretable through the per-vector breakdown. The comparator walks
//! both sequences position-by-position; alignment is guaranteed because
//! both runs came from the same fixed, versioned catalog.

use thiserror::Error;

use crate::battery::result::{BatteryRun, RawResult};

use super::fingerprint::Fingerprint;

/// Two runs that cannot be compared position-by-position.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompareError {
    /// The runs were produced by different battery versions; their
    /// sequences are not positionally aligned.
    #[error("battery version mismatch: {left} vs {right}")]
    VersionMismatch {
        /// Version of the left run.
        left: u32,
        /// Version of the right run.
        right: u32,
    },

    /// Same version but differing sequence lengths; one of the inputs is
    /// corrupt, since a version fixes the vector count.
    #[error("result count mismatch: {left} vs {right}")]
    LengthMismatch {
        /// Record count of the left run.
        left: usize,
        /// Record count of the right run.
        right: usize,
    },
}

/// Verdict for one vector position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VectorComparison {
    /// Catalog identifier of the compared vector.
    pub vector_id: u16,
    /// True when bits, flags, and status all match.
    pub matched: bool,
    /// Both sides' records when they differ, `None` when matched.
    pub divergence: Option<(RawResult, RawResult)>,
}

/// Pairwise diff of two complete runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComparisonReport {
    /// Battery version both runs were produced under.
    pub version: u32,
    /// Coarse aggregate verdict: the two canonical digests are equal.
    pub digests_equal: bool,
    /// Per-vector verdicts, in catalog order.
    pub vectors: Vec<VectorComparison>,
}

impl ComparisonReport {
    /// Number of matched positions.
    pub fn matched(&self) -> usize {
        self.vectors.iter().filter(|v| v.matched).count()
    }

    /// Number of differing positions.
    pub fn differing(&self) -> usize {
        self.vectors.len() - self.matched()
    }
}

/// Compares two complete runs position-by-position.
///
/// # Errors
///
/// [`CompareError`] when the runs disagree on battery version or record
/// count; comparing misaligned sequences would attribute divergence to
/// the wrong vectors.
pub fn compare(left: &BatteryRun, right: &BatteryRun) -> Result<ComparisonReport, CompareError> {
    if left.version != right.version {
        return Err(CompareError::VersionMismatch {
            left: left.version,
            right: right.version,
        });
    }
    if left.results.len() != right.results.len() {
        return Err(CompareError::LengthMismatch {
            left: left.results.len(),
            right: right.results.len(),
        });
    }

    let vectors = left
        .results
        .iter()
        .zip(&right.results)
        .map(|(l, r)| VectorComparison {
            vector_id: l.vector_id,
            matched: l == r,
            divergence: (l != r).then_some((*l, *r)),
        })
        .collect();

    Ok(ComparisonReport {
        version: left.version,
        digests_equal: Fingerprint::of_run(left) == Fingerprint::of_run(right),
        vectors,
    })
}
