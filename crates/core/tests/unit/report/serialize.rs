//! Canonical serialization tests.
//!
//! The byte layout is a cross-machine contract; the golden test pins it
//! down literally so an accidental field reorder or width change fails
//! loudly instead of silently re-keying every recorded fingerprint.

use proptest::prelude::*;

use fpsig_core::battery::{BatteryRun, RawResult, VectorStatus};
use fpsig_core::common::{DecodeError, ExceptionFlags};
use fpsig_core::report::serialize::{MAGIC, decode, encode, encode_results};

use crate::common::{synthetic_results, synthetic_run};

#[test]
fn test_golden_byte_layout() {
    let run = BatteryRun {
        version: 1,
        results: vec![RawResult {
            vector_id: 3,
            status: VectorStatus::Ok,
            bits: 0x7FF8_0000_0000_0000,
            flags: ExceptionFlags::NV,
        }],
        nondeterministic: Vec::new(),
    };
    let bytes = encode(&run);
    #[rustfmt::skip]
    let expected: Vec<u8> = vec![
        b'F', b'P', b'S', b'G',             // magic
        0x01, 0x00, 0x00, 0x00,             // version 1, LE
        0x01, 0x00, 0x00, 0x00,             // one record
        0x03, 0x00,                         // vector id 3, LE
        0x00,                               // status ok
        0x10,                               // flags: NV
        0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xF8, 0x7F, // bits, LE
    ];
    assert_eq!(bytes, expected);
}

#[test]
fn test_sequence_round_trip() {
    let run = synthetic_run(8);
    let decoded = decode(&encode(&run)).expect("canonical bytes decode");
    assert_eq!(decoded.version, run.version);
    assert_eq!(decoded.results, run.results);
}

#[test]
fn test_unsupported_and_trapped_keep_their_slots() {
    let mut results = synthetic_results(3);
    results[1].status = VectorStatus::Unsupported;
    results[2].status = VectorStatus::Trapped;
    let decoded = decode(&encode_results(1, &results)).expect("canonical bytes decode");
    assert_eq!(decoded.results[1].status, VectorStatus::Unsupported);
    assert_eq!(decoded.results[2].status, VectorStatus::Trapped);
    assert_eq!(decoded.results.len(), 3);
}

#[test]
fn test_bad_magic_rejected() {
    let mut bytes = encode(&synthetic_run(1));
    bytes[0] = b'X';
    assert!(matches!(decode(&bytes), Err(DecodeError::BadMagic { .. })));
}

#[test]
fn test_truncated_input_rejected() {
    let bytes = encode(&synthetic_run(4));
    let err = decode(&bytes[..bytes.len() - 1]).expect_err("truncated buffer must not decode");
    assert!(matches!(err, DecodeError::Truncated { .. }));
}

#[test]
fn test_unknown_status_rejected() {
    let mut bytes = encode(&synthetic_run(1));
    bytes[14] = 0x7E; // the record's status byte
    assert_eq!(decode(&bytes), Err(DecodeError::UnknownStatus(0x7E, 0)));
}

#[test]
fn test_magic_is_stable() {
    assert_eq!(&MAGIC, b"FPSG");
}

proptest! {
    /// Any record sequence survives encode→decode bit-for-bit.
    #[test]
    fn prop_round_trip_arbitrary_sequences(
        version in any::<u32>(),
        raw in proptest::collection::vec(
            (any::<u16>(), 0u8..3, 0u8..32, any::<u64>()),
            0..64,
        ),
    ) {
        let results: Vec<RawResult> = raw
            .into_iter()
            .map(|(vector_id, status, flags, bits)| RawResult {
                vector_id,
                status: VectorStatus::from_wire(status).expect("status drawn from wire range"),
                bits,
                flags: ExceptionFlags::from_bits(flags),
            })
            .collect();
        let decoded = decode(&encode_results(version, &results)).expect("round trip");
        prop_assert_eq!(decoded.version, version);
        prop_assert_eq!(decoded.results, results);
    }
}
