//! Operation evaluation for the battery.
//!
//! Every operand is passed through [`std::hint::black_box`] before it
//! reaches the arithmetic, and the leaf functions are `#[inline(never)]`:
//! the catalog's operands are compile-time constants, and without the
//! barrier the optimizer would happily fold `0.0 / 0.0` into a NaN literal
//! or reassociate a reduction, replacing the hardware evaluation this
//! tool exists to observe with rustc's.

/// Elementary arithmetic at boundary operands.
pub mod arithmetic;
/// Denormal decay chains.
pub mod denormal;
/// Fused and unfused multiply-add.
pub mod fma;
/// SIMD horizontal reductions.
pub mod reduction;
/// Transcendental function evaluation.
pub mod transcendental;

use super::vector::VectorOp;

/// Evaluates one operation over its operand bit patterns.
///
/// Returns the result's exact bit image, or `None` when the host lacks the
/// instruction class the operation requires (e.g. a 256-bit vector unit).
pub fn evaluate(op: VectorOp, operands: &[u64]) -> Option<u64> {
    let a = operand(operands, 0);
    let b = operand(operands, 1);
    let c = operand(operands, 2);
    let bits = match op {
        VectorOp::Add => arithmetic::add(a, b).to_bits(),
        VectorOp::Sub => arithmetic::sub(a, b).to_bits(),
        VectorOp::Mul => arithmetic::mul(a, b).to_bits(),
        VectorOp::Div => arithmetic::div(a, b).to_bits(),
        VectorOp::Sqrt => arithmetic::sqrt(a).to_bits(),
        VectorOp::FusedMulAdd => fma::fused(a, b, c).to_bits(),
        VectorOp::SeparateMulAdd => fma::separate(a, b, c).to_bits(),
        VectorOp::FmaChain => fma::chain(a, b, c).to_bits(),
        VectorOp::Sin => transcendental::sin(a).to_bits(),
        VectorOp::Cos => transcendental::cos(a).to_bits(),
        VectorOp::Tan => transcendental::tan(a).to_bits(),
        VectorOp::Exp => transcendental::exp(a).to_bits(),
        VectorOp::Ln => transcendental::ln(a).to_bits(),
        VectorOp::Log2 => transcendental::log2(a).to_bits(),
        VectorOp::Atan => transcendental::atan(a).to_bits(),
        VectorOp::Sinh => transcendental::sinh(a).to_bits(),
        VectorOp::Tanh => transcendental::tanh(a).to_bits(),
        VectorOp::Hypot => transcendental::hypot(a, b).to_bits(),
        VectorOp::Pow => transcendental::pow(a, b).to_bits(),
        VectorOp::ReduceSum128 => return reduction::sum128(operands),
        VectorOp::ReduceSum256 => return reduction::sum256(operands),
        VectorOp::ReduceDot128 => return reduction::dot128(operands),
        VectorOp::DenormalDecay => denormal::decay_chain(a).to_bits(),
    };
    Some(bits)
}

/// Reads operand `idx` as a double, defaulting to `+0.0` past the end.
fn operand(bits: &[u64], idx: usize) -> f64 {
    f64::from_bits(bits.get(idx).copied().unwrap_or(0))
}
