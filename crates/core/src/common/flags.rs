//! Accrued floating-point exception flags.
//!
//! IEEE 754 defines five exception conditions, recorded here in a 5-bit mask:
//!
//! | Bit | Flag | Description         |
//! |-----|------|---------------------|
//! |  4  | NV   | Invalid Operation   |
//! |  3  | DZ   | Divide by Zero      |
//! |  2  | OF   | Overflow            |
//! |  1  | UF   | Underflow           |
//! |  0  | NX   | Inexact             |
//!
//! The mask is captured per vector from the host's accrued-exception state
//! and serialized verbatim into the canonical raw-result record, so the bit
//! layout is part of the wire format and must never change.

use std::fmt;
use std::ops::BitOr;

use serde::{Deserialize, Serialize};

/// Accrued floating-point exception flags raised by one operation vector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionFlags(u8);

impl ExceptionFlags {
    /// No exceptions raised.
    pub const NONE: Self = Self(0);
    /// Invalid Operation.
    pub const NV: Self = Self(1 << 4);
    /// Divide by Zero.
    pub const DZ: Self = Self(1 << 3);
    /// Overflow.
    pub const OF: Self = Self(1 << 2);
    /// Underflow.
    pub const UF: Self = Self(1 << 1);
    /// Inexact.
    pub const NX: Self = Self(1 << 0);

    /// Reconstructs a mask from its raw wire byte, discarding unused bits.
    pub fn from_bits(bits: u8) -> Self {
        Self(bits & 0x1F)
    }

    /// Returns the raw 5-bit flag value as serialized in a raw-result record.
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if no flags are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if every flag in `other` is set in `self`.
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }
}

impl BitOr for ExceptionFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Display for ExceptionFlags {
    /// Renders the set flags as a fixed-order mnemonic list, `-` when empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        let mut first = true;
        for (flag, name) in [
            (Self::NV, "NV"),
            (Self::DZ, "DZ"),
            (Self::OF, "OF"),
            (Self::UF, "UF"),
            (Self::NX, "NX"),
        ] {
            if self.contains(flag) {
                if !first {
                    write!(f, "|")?;
                }
                write!(f, "{name}")?;
                first = false;
            }
        }
        Ok(())
    }
}
