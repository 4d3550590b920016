//! Run comparison tests.

use fpsig_core::report::compare::{CompareError, compare};

use crate::common::synthetic_run;

#[test]
fn test_identical_runs_match_everywhere() {
    let run = synthetic_run(8);
    let report = compare(&run, &run.clone()).expect("aligned runs compare");
    assert!(report.digests_equal);
    assert_eq!(report.matched(), 8);
    assert_eq!(report.differing(), 0);
    assert!(report.vectors.iter().all(|v| v.divergence.is_none()));
}

#[test]
fn test_single_divergence_is_localized() {
    let left = synthetic_run(8);
    let mut right = left.clone();
    right.results[5].bits ^= 0x40;
    let report = compare(&left, &right).expect("aligned runs compare");
    assert!(!report.digests_equal);
    assert_eq!(report.differing(), 1);
    let diverged = report
        .vectors
        .iter()
        .find(|v| !v.matched)
        .expect("one vector differs");
    assert_eq!(diverged.vector_id, left.results[5].vector_id);
    let (l, r) = diverged.divergence.expect("divergence carries both sides");
    assert_eq!(l.bits ^ r.bits, 0x40);
}

#[test]
fn test_version_mismatch_is_an_error() {
    let left = synthetic_run(4);
    let mut right = synthetic_run(4);
    right.version += 1;
    assert!(matches!(
        compare(&left, &right),
        Err(CompareError::VersionMismatch { .. })
    ));
}

#[test]
fn test_length_mismatch_is_an_error() {
    let left = synthetic_run(4);
    let right = synthetic_run(5);
    assert!(matches!(
        compare(&left, &right),
        Err(CompareError::LengthMismatch { left: 4, right: 5 })
    ));
}

#[test]
fn test_status_difference_counts_as_divergence() {
    use fpsig_core::battery::VectorStatus;
    let left = synthetic_run(4);
    let mut right = left.clone();
    right.results[2].status = VectorStatus::Unsupported;
    let report = compare(&left, &right).expect("aligned runs compare");
    assert_eq!(report.differing(), 1, "status changes are divergence too");
}
