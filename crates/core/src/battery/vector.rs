//! Operation-vector definitions and operand bit patterns.
//!
//! An [`OperationVector`] is an immutable catalog entry: an identifier, a
//! human-readable name, the operation to perform, and the operand bit
//! patterns to feed it. Operands are stored as raw `u64` images of IEEE 754
//! doubles; the catalog pins exact bits, not decimal approximations, so
//! payload-carrying NaNs and denormals survive the trip into the hardware
//! untouched.

use serde::{Deserialize, Serialize};

/// Operation categories, used by the invocation surface to select subsets
/// for diagnostic dumps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Elementary arithmetic at boundary operands.
    Arithmetic,
    /// Fused multiply-add chains (fused vs. explicitly unfused).
    FusedMultiplyAdd,
    /// Transcendental function evaluation at divergence-prone arguments.
    Transcendental,
    /// SIMD horizontal reductions of fixed input vectors.
    Reduction,
    /// Denormal and NaN-payload propagation.
    DenormalNan,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Arithmetic => "arithmetic",
            Self::FusedMultiplyAdd => "fma",
            Self::Transcendental => "transcendental",
            Self::Reduction => "reduction",
            Self::DenormalNan => "denormal-nan",
        };
        write!(f, "{name}")
    }
}

/// The operation a vector performs on its operands.
///
/// Variants are append-only: removing or repurposing one would change the
/// meaning of historical catalog entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VectorOp {
    /// `a + b`.
    Add,
    /// `a - b`.
    Sub,
    /// `a * b`.
    Mul,
    /// `a / b`.
    Div,
    /// `sqrt(a)`.
    Sqrt,
    /// Hardware fused `a * b + c` with a single rounding.
    FusedMulAdd,
    /// `a * b` rounded, then `+ c` rounded: the unfused twin of
    /// [`VectorOp::FusedMulAdd`], kept separate so the fusion signal is the
    /// *difference* between the two results.
    SeparateMulAdd,
    /// Iterated `x = x * m + a` chain seeded from the operands.
    FmaChain,
    /// `sin(a)`.
    Sin,
    /// `cos(a)`.
    Cos,
    /// `tan(a)`.
    Tan,
    /// `exp(a)`.
    Exp,
    /// `ln(a)`.
    Ln,
    /// `log2(a)`.
    Log2,
    /// `atan(a)`.
    Atan,
    /// `sinh(a)`.
    Sinh,
    /// `tanh(a)`.
    Tanh,
    /// `hypot(a, b)`.
    Hypot,
    /// `a.powf(b)`.
    Pow,
    /// Horizontal sum of the operand lanes through 128-bit vector registers.
    ReduceSum128,
    /// Horizontal sum through 256-bit vector registers; `unsupported` on
    /// hosts without a 256-bit unit.
    ReduceSum256,
    /// Horizontal dot product through 128-bit vector registers.
    ReduceDot128,
    /// Iterated denormal decay chain seeded from the operand.
    DenormalDecay,
}

/// One immutable entry of the versioned battery.
///
/// The category is declared per vector rather than derived from the
/// operation: a plain `Add` feeding a payload-carrying NaN is a NaN
/// propagation probe, not boundary arithmetic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperationVector {
    /// Stable identifier; never reused across tool versions.
    pub id: u16,
    /// Human-readable name for dump tables and diff reports.
    pub name: &'static str,
    /// The category this vector probes.
    pub category: Category,
    /// The operation to perform.
    pub op: VectorOp,
    /// Operand bit patterns, interpreted per operation.
    pub operands: &'static [u64],
}

/// Operand bit patterns for the catalog.
///
/// Values with interesting bit-level structure (NaN payloads, denormals,
/// format extremes) are written as explicit hex images; ordinary values go
/// through `to_bits()` on exact literals.
pub mod patterns {
    /// `1.0`.
    pub const ONE: u64 = 0x3FF0_0000_0000_0000;
    /// `-1.0`.
    pub const NEG_ONE: u64 = 0xBFF0_0000_0000_0000;
    /// `2.0`.
    pub const TWO: u64 = 0x4000_0000_0000_0000;
    /// `0.5`.
    pub const HALF: u64 = 0x3FE0_0000_0000_0000;
    /// `3.0`.
    pub const THREE: u64 = 0x4008_0000_0000_0000;
    /// `+0.0`.
    pub const ZERO: u64 = 0x0000_0000_0000_0000;
    /// `-0.0`.
    pub const NEG_ZERO: u64 = 0x8000_0000_0000_0000;
    /// Positive infinity.
    pub const POS_INF: u64 = 0x7FF0_0000_0000_0000;
    /// Negative infinity.
    pub const NEG_INF: u64 = 0xFFF0_0000_0000_0000;
    /// Largest finite double (`f64::MAX`).
    pub const MAX_NORMAL: u64 = 0x7FEF_FFFF_FFFF_FFFF;
    /// Smallest positive normal double (`f64::MIN_POSITIVE`).
    pub const MIN_NORMAL: u64 = 0x0010_0000_0000_0000;
    /// Smallest positive denormal (one mantissa ULP).
    pub const MIN_DENORMAL: u64 = 0x0000_0000_0000_0001;
    /// A mid-range denormal, `2^-1023`.
    pub const MID_DENORMAL: u64 = 0x0008_0000_0000_0000;
    /// Quiet NaN carrying a recognizable payload.
    pub const QNAN_PAYLOAD: u64 = 0x7FF8_0000_DEAD_BEEF;
    /// Signaling NaN (quiet bit clear, payload non-zero).
    pub const SNAN_PAYLOAD: u64 = 0x7FF4_0000_0000_0001;
    /// `1 + 2^-27`: squares to just above 1 with the excess below one ULP,
    /// so fused and unfused multiply-add diverge on it.
    pub const ONE_PLUS_2P27: u64 = 0x3FF0_0000_0200_0000;
    /// `1 - 2^-27`, the matching lower factor.
    pub const ONE_MINUS_2P27: u64 = 0x3FEF_FFFF_FC00_0000;
    /// `2^-60`: far below one ULP of 1.0, visible only under upward rounding.
    pub const TINY: u64 = 0x3C30_0000_0000_0000;
    /// `π`.
    pub const PI: u64 = 0x4009_21FB_5444_2D18;
    /// `π/2`.
    pub const PI_OVER_TWO: u64 = 0x3FF9_21FB_5444_2D18;
    /// `1e15`: large enough that trig range reduction dominates the result.
    pub const LARGE_1E15: u64 = 1.0e15_f64.to_bits();
    /// `709.782712893384…`, just under the `exp` overflow threshold.
    pub const EXP_EDGE: u64 = 709.782712893384_f64.to_bits();
    /// `0.1`, the canonical inexact decimal.
    pub const TENTH: u64 = 0.1_f64.to_bits();
    /// `10.0`.
    pub const TEN: u64 = 10.0_f64.to_bits();
    /// Euler's number `e`.
    pub const E: u64 = std::f64::consts::E.to_bits();
    /// `1e16`, used in cancellation-heavy reduction lanes.
    pub const BIG_1E16: u64 = 1.0e16_f64.to_bits();
    /// `-1e16`, the cancelling partner.
    pub const NEG_BIG_1E16: u64 = (-1.0e16_f64).to_bits();
    /// `1e-308`, a borderline-normal decay seed.
    pub const DECAY_SEED_A: u64 = 1.0e-308_f64.to_bits();
    /// `2e-308` decay seed.
    pub const DECAY_SEED_B: u64 = 2.0e-308_f64.to_bits();
    /// `5e-308` decay seed.
    pub const DECAY_SEED_C: u64 = 5.0e-308_f64.to_bits();
    /// `1e-307` decay seed.
    pub const DECAY_SEED_D: u64 = 1.0e-307_f64.to_bits();
    /// `1e-320`, a decay seed that is already denormal.
    pub const DECAY_SEED_E: u64 = 1.0e-320_f64.to_bits();
    /// The smallest normal written out in decimal, as the original
    /// experiment seeded it.
    pub const DECAY_SEED_F: u64 = 2.2250738585072014e-308_f64.to_bits();
}
