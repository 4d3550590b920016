//! Run session tests: pin, configure, execute, report.

use std::sync::atomic::AtomicBool;

use fpsig_core::battery::{Category, catalog};
use fpsig_core::common::RunError;
use fpsig_core::config::RunConfig;
use fpsig_core::session::{execute_dump, execute_run, execute_run_cancellable};

#[test]
fn test_same_host_same_fingerprint() {
    let config = RunConfig::default();
    let first = execute_run(&config).expect("default run completes");
    let second = execute_run(&config).expect("default run completes");
    assert!(first.is_reliable());
    assert_eq!(
        first.fingerprint, second.fingerprint,
        "a fixed host and version must reproduce its fingerprint"
    );
}

#[test]
fn test_report_carries_machine_context() {
    let report = execute_run(&RunConfig::default()).expect("default run completes");
    assert_eq!(report.machine.arch, std::env::consts::ARCH);
    assert_eq!(report.machine.pinned_core, None);
    assert_eq!(report.run.results.len(), catalog().len());
}

#[cfg(target_os = "linux")]
#[test]
fn test_pinned_run_records_its_core() {
    let config = RunConfig {
        pin_core: Some(0),
        ..RunConfig::default()
    };
    let report = execute_run(&config).expect("pin to core 0 succeeds");
    assert_eq!(report.machine.pinned_core, Some(0));
}

#[test]
fn test_unpinnable_core_aborts_without_fingerprint() {
    let config = RunConfig {
        pin_core: Some(1 << 20),
        ..RunConfig::default()
    };
    match execute_run(&config) {
        Err(RunError::AffinityUnavailable { .. }) => {}
        Err(other) => panic!("expected AffinityUnavailable, got {other}"),
        Ok(_) => panic!("an unverified pin must never yield a fingerprint"),
    }
}

#[test]
fn test_cancelled_run_is_incomplete() {
    let cancel = AtomicBool::new(true);
    match execute_run_cancellable(&RunConfig::default(), Some(&cancel)) {
        Err(RunError::Incomplete { .. }) => {}
        Err(other) => panic!("expected Incomplete, got {other}"),
        Ok(_) => panic!("a cancelled run must never yield a fingerprint"),
    }
}

#[test]
fn test_category_dump_runs_only_selected_vectors() {
    let results = execute_dump(&RunConfig::default(), &[Category::Transcendental])
        .expect("subset dump completes");
    let expected = catalog()
        .iter()
        .filter(|v| v.category == Category::Transcendental)
        .count();
    assert_eq!(results.len(), expected);
    for result in &results {
        let vector = catalog()
            .iter()
            .find(|v| v.id == result.vector_id)
            .expect("dump results come from the catalog");
        assert_eq!(vector.category, Category::Transcendental);
    }
}

#[cfg(all(target_os = "linux", target_arch = "x86_64"))]
#[test]
fn test_flush_to_zero_changes_the_denormal_vector() {
    use fpsig_core::battery::vector::patterns;

    let default_run = execute_run(&RunConfig::default()).expect("default run completes");
    let ftz_run = execute_run(&RunConfig {
        flush_to_zero: true,
        ..RunConfig::default()
    })
    .expect("FTZ run completes");

    let find = |report: &fpsig_core::session::RunReport, name: &str| {
        let id = catalog()
            .iter()
            .find(|v| v.name == name)
            .map(|v| v.id)
            .expect("vector exists");
        report
            .run
            .results
            .iter()
            .find(|r| r.vector_id == id)
            .copied()
            .expect("result occupies its slot")
    };

    // Without FTZ the denormal product keeps its exact bit pattern; with
    // FTZ it collapses to signed zero.
    let preserved = find(&default_run, "mul_min_normal_half");
    assert_eq!(preserved.bits, patterns::MID_DENORMAL);
    let flushed = find(&ftz_run, "mul_min_normal_half");
    assert_eq!(f64::from_bits(flushed.bits), 0.0);

    assert!(
        default_run.fingerprint != ftz_run.fingerprint,
        "the two environments must fingerprint differently"
    );
}

#[test]
fn test_concurrent_sessions_agree_with_sequential() {
    // Two isolated sessions on their own threads share only the read-only
    // catalog; their digests must match each other and a sequential run.
    let sequential = execute_run(&RunConfig::default()).expect("sequential run completes");
    let handles: Vec<_> = (0..2)
        .map(|_| {
            std::thread::spawn(|| execute_run(&RunConfig::default()).map(|r| r.fingerprint))
        })
        .collect();
    for handle in handles {
        let fingerprint = handle
            .join()
            .expect("worker thread completes")
            .expect("concurrent run completes");
        assert_eq!(fingerprint, sequential.fingerprint);
    }
}
