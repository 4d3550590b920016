//! Machine descriptor capture tests.

use fpsig_core::env::MachineDescriptor;

#[test]
fn test_capture_reflects_build_target() {
    let descriptor = MachineDescriptor::capture(Some(3));
    assert_eq!(descriptor.arch, std::env::consts::ARCH);
    assert_eq!(descriptor.os, std::env::consts::OS);
    assert!(descriptor.logical_cores >= 1);
    assert_eq!(descriptor.pinned_core, Some(3));
}

#[test]
fn test_descriptor_round_trips_through_json() {
    let descriptor = MachineDescriptor::capture(None);
    let json = serde_json::to_string(&descriptor).expect("descriptor serializes");
    let back: MachineDescriptor = serde_json::from_str(&json).expect("descriptor deserializes");
    assert_eq!(back, descriptor);
}
