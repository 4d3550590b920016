//! Fingerprint purity and rendering tests.

use fpsig_core::report::Fingerprint;
use fpsig_core::report::serialize::encode;

use crate::common::synthetic_run;

#[test]
fn test_digest_is_pure_function_of_bytes() {
    let bytes = encode(&synthetic_run(8));
    assert_eq!(
        Fingerprint::of_bytes(&bytes),
        Fingerprint::of_bytes(&bytes),
        "identical bytes must digest identically"
    );
}

#[test]
fn test_digest_of_run_matches_digest_of_its_bytes() {
    let run = synthetic_run(8);
    assert_eq!(
        Fingerprint::of_run(&run),
        Fingerprint::of_bytes(&encode(&run))
    );
}

#[test]
fn test_single_bit_flip_changes_digest() {
    let run = synthetic_run(8);
    let mut flipped = run.clone();
    flipped.results[4].bits ^= 1;
    assert!(
        Fingerprint::of_run(&run) != Fingerprint::of_run(&flipped),
        "one result bit must re-key the digest"
    );
}

#[test]
fn test_hex_rendering_and_parse() {
    let fingerprint = Fingerprint::of_bytes(b"fixed input");
    let hex = fingerprint.to_string();
    assert_eq!(hex.len(), 64);
    assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
    assert_eq!(Fingerprint::parse_hex(&hex), Some(fingerprint));
}

#[test]
fn test_parse_hex_rejects_malformed_input() {
    assert_eq!(Fingerprint::parse_hex("abc"), None);
    let not_hex = "zz".repeat(32);
    assert_eq!(Fingerprint::parse_hex(&not_hex), None);
}
