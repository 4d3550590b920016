//! Exception-flag mask tests.
//!
//! The 5-bit layout is part of the canonical wire format, so these bit
//! positions are load-bearing: changing one would re-key every recorded
//! fingerprint.

use fpsig_core::common::ExceptionFlags;

#[test]
fn test_flag_bit_layout() {
    assert_eq!(ExceptionFlags::NV.bits(), 0b10000);
    assert_eq!(ExceptionFlags::DZ.bits(), 0b01000);
    assert_eq!(ExceptionFlags::OF.bits(), 0b00100);
    assert_eq!(ExceptionFlags::UF.bits(), 0b00010);
    assert_eq!(ExceptionFlags::NX.bits(), 0b00001);
    assert_eq!(ExceptionFlags::NONE.bits(), 0);
}

#[test]
fn test_flag_bitor_and_contains() {
    let combined = ExceptionFlags::NV | ExceptionFlags::DZ;
    assert!(combined.contains(ExceptionFlags::NV));
    assert!(combined.contains(ExceptionFlags::DZ));
    assert!(!combined.contains(ExceptionFlags::OF));
    assert!(!combined.is_empty());
    assert!(ExceptionFlags::NONE.is_empty());
}

#[test]
fn test_flag_from_bits_masks_unused() {
    let flags = ExceptionFlags::from_bits(0xFF);
    assert_eq!(flags.bits(), 0x1F, "bits above the 5-flag mask must drop");
}

#[test]
fn test_flag_display() {
    assert_eq!(ExceptionFlags::NONE.to_string(), "-");
    assert_eq!(ExceptionFlags::NV.to_string(), "NV");
    assert_eq!(
        (ExceptionFlags::OF | ExceptionFlags::NX).to_string(),
        "OF|NX"
    );
}
