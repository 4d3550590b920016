//! Core affinity pinning tests.

use fpsig_core::common::RunError;
use fpsig_core::env::{current_core, pin_to_core};

#[cfg(target_os = "linux")]
#[test]
fn test_pin_to_first_core() {
    let guard = pin_to_core(0).expect("core 0 must be pinnable");
    assert_eq!(guard.core(), 0);
    assert_eq!(
        current_core(),
        Some(0),
        "the thread must actually be scheduled on the pinned core"
    );
}

#[cfg(target_os = "linux")]
#[test]
fn test_pin_restores_previous_mask() {
    // The thread must be schedulable on any allowed core again after the
    // guard drops; pin to core 0, release, then pin to the last visible
    // core to prove the mask was widened back.
    {
        let _guard = pin_to_core(0).expect("core 0 must be pinnable");
    }
    let last = num_cpus::get() - 1;
    let guard = pin_to_core(last);
    assert!(guard.is_ok(), "restored mask must allow pinning elsewhere");
}

#[test]
fn test_pin_to_absurd_core_fails_loudly() {
    let result = pin_to_core(1 << 20);
    match result {
        Err(RunError::AffinityUnavailable { core, .. }) => assert_eq!(core, 1 << 20),
        Err(other) => panic!("expected AffinityUnavailable, got {other}"),
        Ok(_) => panic!("pinning to a non-existent core must fail"),
    }
}
