//! Fixed-length digest over a run's canonical bytes.
//!
//! SHA-256 here is plumbing, not signal: any stable, platform-independent
//! hash would do, because everything the fingerprint distinguishes lives in
//! the raw-result bytes upstream. What matters is purity; identical input
//! bytes give identical digests on every host and build, and nothing
//! non-deterministic (timestamps, addresses, thread identity) is ever fed
//! into the hasher.

use sha2::{Digest, Sha256};

use crate::battery::result::BatteryRun;

use super::serialize;

/// Digest width in bytes.
const DIGEST_WIDTH: usize = 32;

/// Fixed-length digest identifying a host's observed floating-point
/// behaviour across one complete battery execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; DIGEST_WIDTH]);

impl Fingerprint {
    /// Digests a complete run's canonical byte sequence.
    pub fn of_run(run: &BatteryRun) -> Self {
        Self::of_bytes(&serialize::encode(run))
    }

    /// Digests an arbitrary canonical byte sequence.
    pub fn of_bytes(bytes: &[u8]) -> Self {
        let digest = Sha256::digest(bytes);
        Self(digest.into())
    }

    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_WIDTH] {
        &self.0
    }

    /// Parses the fixed-width hexadecimal rendering produced by `Display`.
    pub fn parse_hex(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.len() != DIGEST_WIDTH * 2 {
            return None;
        }
        let mut bytes = [0u8; DIGEST_WIDTH];
        for (index, chunk) in text.as_bytes().chunks_exact(2).enumerate() {
            let pair = std::str::from_utf8(chunk).ok()?;
            bytes[index] = u8::from_str_radix(pair, 16).ok()?;
        }
        Some(Self(bytes))
    }
}

impl std::fmt::Display for Fingerprint {
    /// Renders the digest as 64 lowercase hex characters.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in &self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
