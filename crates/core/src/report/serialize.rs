//! Canonical byte serialization of raw-result sequences.
//!
//! The hashed material must be identical for identical results on every
//! host, so the encoding is pinned down completely: fixed field order,
//! fixed width per field, little-endian throughout, flags as their 5-bit
//! mask in one byte. Nothing about the host (struct layout, byte order,
//! pointer width) leaks into the output, and `unsupported`/`trapped`
//! entries occupy their slots like any other.
//!
//! Layout:
//!
//! | Offset | Width | Field                        |
//! |--------|-------|------------------------------|
//! | 0      | 4     | magic `FPSG`                 |
//! | 4      | 4     | battery version (u32 LE)     |
//! | 8      | 4     | record count (u32 LE)        |
//! | 12     | 12×n  | records, in sequence order   |
//!
//! Record: vector id (u16 LE), status (u8), flags (u8), bits (u64 LE).

use crate::battery::result::{BatteryRun, RawResult, VectorStatus};
use crate::common::{DecodeError, ExceptionFlags};

/// Magic prefix of every canonical sequence.
pub const MAGIC: [u8; 4] = *b"FPSG";

/// Bytes per serialized record.
const RECORD_WIDTH: usize = 12;

/// Bytes in the header preceding the records.
const HEADER_WIDTH: usize = 12;

/// A decoded canonical sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedSequence {
    /// Battery version the sequence was produced under.
    pub version: u32,
    /// The records, in their original order.
    pub results: Vec<RawResult>,
}

/// Encodes a complete run into its canonical byte sequence.
pub fn encode(run: &BatteryRun) -> Vec<u8> {
    encode_results(run.version, &run.results)
}

/// Encodes an ordered result sequence under the given battery version.
pub fn encode_results(version: u32, results: &[RawResult]) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_WIDTH + results.len() * RECORD_WIDTH);
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&version.to_le_bytes());
    out.extend_from_slice(&(results.len() as u32).to_le_bytes());
    for result in results {
        out.extend_from_slice(&result.vector_id.to_le_bytes());
        out.push(result.status.to_wire());
        out.push(result.flags.bits());
        out.extend_from_slice(&result.bits.to_le_bytes());
    }
    out
}

/// Decodes a canonical byte sequence back into its result records.
///
/// # Errors
///
/// [`DecodeError`] on a missing magic prefix, a truncated buffer, or a
/// record carrying an unknown status byte.
pub fn decode(bytes: &[u8]) -> Result<DecodedSequence, DecodeError> {
    if bytes.len() < HEADER_WIDTH {
        return Err(DecodeError::Truncated {
            expected: HEADER_WIDTH,
            found: bytes.len(),
        });
    }
    let mut magic = [0u8; 4];
    magic.copy_from_slice(&bytes[0..4]);
    if magic != MAGIC {
        return Err(DecodeError::BadMagic {
            expected: MAGIC,
            found: magic,
        });
    }
    let version = u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    let count = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]) as usize;

    let expected = HEADER_WIDTH + count * RECORD_WIDTH;
    if bytes.len() < expected {
        return Err(DecodeError::Truncated {
            expected,
            found: bytes.len(),
        });
    }

    let mut results = Vec::with_capacity(count);
    for index in 0..count {
        let record = &bytes[HEADER_WIDTH + index * RECORD_WIDTH..];
        let vector_id = u16::from_le_bytes([record[0], record[1]]);
        let status = VectorStatus::from_wire(record[2])
            .ok_or(DecodeError::UnknownStatus(record[2], index))?;
        let flags = ExceptionFlags::from_bits(record[3]);
        let bits = u64::from_le_bytes([
            record[4], record[5], record[6], record[7], record[8], record[9], record[10],
            record[11],
        ]);
        results.push(RawResult {
            vector_id,
            status,
            bits,
            flags,
        });
    }
    Ok(DecodedSequence { version, results })
}
