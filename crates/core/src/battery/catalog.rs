//! The versioned operation-vector catalog.
//!
//! The catalog is append-only: a given [`BATTERY_VERSION`] always names the
//! same ordered vector set, so fingerprints recorded by older builds remain
//! valid references. New vectors are appended with fresh identifiers; an
//! existing entry's id, order, operation, and operand bits must never
//! change. Reordering two entries would silently re-key every fingerprint
//! ever recorded.

use super::vector::patterns as p;
use super::vector::{Category, OperationVector, VectorOp};

/// Version of the vector set below. Bumped when vectors are appended.
pub const BATTERY_VERSION: u32 = 1;

/// Lanes for the cancellation-heavy horizontal sum: the pairwise tree of a
/// 128-bit unit, the two-stage tree of a 256-bit unit, and a strict serial
/// sum all round differently over this sequence.
static CANCELLATION_LANES: &[u64] = &[
    p::BIG_1E16,
    p::ONE,
    p::NEG_BIG_1E16,
    p::ONE,
    p::BIG_1E16,
    p::ONE,
    p::NEG_BIG_1E16,
    p::ONE,
];

/// Lanes of denormals for the reduction paths: whether intermediate sums
/// are flushed depends on the vector unit's denormal handling.
static DENORMAL_LANES: &[u64] = &[
    p::MIN_DENORMAL,
    p::MID_DENORMAL,
    p::MIN_DENORMAL,
    p::MID_DENORMAL,
    p::MIN_DENORMAL,
    p::MID_DENORMAL,
    p::MIN_DENORMAL,
    p::MID_DENORMAL,
];

static CATALOG: &[OperationVector] = &[
    // --- Elementary arithmetic at boundary operands ---
    OperationVector {
        id: 1,
        name: "add_max_max",
        category: Category::Arithmetic,
        op: VectorOp::Add,
        operands: &[p::MAX_NORMAL, p::MAX_NORMAL],
    },
    OperationVector {
        id: 2,
        name: "sub_inf_inf",
        category: Category::Arithmetic,
        op: VectorOp::Sub,
        operands: &[p::POS_INF, p::POS_INF],
    },
    OperationVector {
        id: 3,
        name: "div_zero_zero",
        category: Category::Arithmetic,
        op: VectorOp::Div,
        operands: &[p::ZERO, p::ZERO],
    },
    OperationVector {
        id: 4,
        name: "div_one_zero",
        category: Category::Arithmetic,
        op: VectorOp::Div,
        operands: &[p::ONE, p::ZERO],
    },
    OperationVector {
        id: 5,
        name: "div_one_three",
        category: Category::Arithmetic,
        op: VectorOp::Div,
        operands: &[p::ONE, p::THREE],
    },
    OperationVector {
        id: 6,
        name: "mul_min_normal_half",
        category: Category::Arithmetic,
        op: VectorOp::Mul,
        operands: &[p::MIN_NORMAL, p::HALF],
    },
    OperationVector {
        id: 7,
        name: "sqrt_two",
        category: Category::Arithmetic,
        op: VectorOp::Sqrt,
        operands: &[p::TWO],
    },
    OperationVector {
        id: 8,
        name: "sqrt_neg_one",
        category: Category::Arithmetic,
        op: VectorOp::Sqrt,
        operands: &[p::NEG_ONE],
    },
    OperationVector {
        id: 9,
        name: "add_neg_zero_zero",
        category: Category::Arithmetic,
        op: VectorOp::Add,
        operands: &[p::NEG_ZERO, p::ZERO],
    },
    OperationVector {
        id: 10,
        name: "add_one_tiny",
        category: Category::Arithmetic,
        op: VectorOp::Add,
        operands: &[p::ONE, p::TINY],
    },
    // --- Fused multiply-add chains ---
    OperationVector {
        id: 11,
        name: "fma_fused_cancel",
        category: Category::FusedMultiplyAdd,
        op: VectorOp::FusedMulAdd,
        operands: &[p::ONE_PLUS_2P27, p::ONE_MINUS_2P27, p::NEG_ONE],
    },
    OperationVector {
        id: 12,
        name: "fma_unfused_cancel",
        category: Category::FusedMultiplyAdd,
        op: VectorOp::SeparateMulAdd,
        operands: &[p::ONE_PLUS_2P27, p::ONE_MINUS_2P27, p::NEG_ONE],
    },
    OperationVector {
        id: 13,
        name: "fma_chain_tenth",
        category: Category::FusedMultiplyAdd,
        op: VectorOp::FmaChain,
        operands: &[p::TENTH, p::ONE_PLUS_2P27, p::TINY],
    },
    OperationVector {
        id: 14,
        name: "fma_overflow",
        category: Category::FusedMultiplyAdd,
        op: VectorOp::FusedMulAdd,
        operands: &[p::MAX_NORMAL, p::TWO, p::NEG_INF],
    },
    OperationVector {
        id: 15,
        name: "fma_denormal_product",
        category: Category::FusedMultiplyAdd,
        op: VectorOp::FusedMulAdd,
        operands: &[p::MIN_NORMAL, p::HALF, p::ZERO],
    },
    // --- Transcendental functions at divergence-prone arguments ---
    OperationVector {
        id: 16,
        name: "sin_pi",
        category: Category::Transcendental,
        op: VectorOp::Sin,
        operands: &[p::PI],
    },
    OperationVector {
        id: 17,
        name: "sin_large",
        category: Category::Transcendental,
        op: VectorOp::Sin,
        operands: &[p::LARGE_1E15],
    },
    OperationVector {
        id: 18,
        name: "cos_half",
        category: Category::Transcendental,
        op: VectorOp::Cos,
        operands: &[p::HALF],
    },
    OperationVector {
        id: 19,
        name: "tan_pi_over_two",
        category: Category::Transcendental,
        op: VectorOp::Tan,
        operands: &[p::PI_OVER_TWO],
    },
    OperationVector {
        id: 20,
        name: "exp_overflow_edge",
        category: Category::Transcendental,
        op: VectorOp::Exp,
        operands: &[p::EXP_EDGE],
    },
    OperationVector {
        id: 21,
        name: "exp_one",
        category: Category::Transcendental,
        op: VectorOp::Exp,
        operands: &[p::ONE],
    },
    OperationVector {
        id: 22,
        name: "ln_min_denormal",
        category: Category::Transcendental,
        op: VectorOp::Ln,
        operands: &[p::MIN_DENORMAL],
    },
    OperationVector {
        id: 23,
        name: "log2_ten",
        category: Category::Transcendental,
        op: VectorOp::Log2,
        operands: &[p::TEN],
    },
    OperationVector {
        id: 24,
        name: "atan_large",
        category: Category::Transcendental,
        op: VectorOp::Atan,
        operands: &[p::LARGE_1E15],
    },
    OperationVector {
        id: 25,
        name: "sinh_one",
        category: Category::Transcendental,
        op: VectorOp::Sinh,
        operands: &[p::ONE],
    },
    OperationVector {
        id: 26,
        name: "tanh_half",
        category: Category::Transcendental,
        op: VectorOp::Tanh,
        operands: &[p::HALF],
    },
    OperationVector {
        id: 27,
        name: "hypot_max_max",
        category: Category::Transcendental,
        op: VectorOp::Hypot,
        operands: &[p::MAX_NORMAL, p::MAX_NORMAL],
    },
    OperationVector {
        id: 28,
        name: "pow_pi_e",
        category: Category::Transcendental,
        op: VectorOp::Pow,
        operands: &[p::PI, p::E],
    },
    // --- SIMD horizontal reductions ---
    OperationVector {
        id: 29,
        name: "reduce_sum128_cancel",
        category: Category::Reduction,
        op: VectorOp::ReduceSum128,
        operands: CANCELLATION_LANES,
    },
    OperationVector {
        id: 30,
        name: "reduce_sum256_cancel",
        category: Category::Reduction,
        op: VectorOp::ReduceSum256,
        operands: CANCELLATION_LANES,
    },
    OperationVector {
        id: 31,
        name: "reduce_sum128_denormal",
        category: Category::Reduction,
        op: VectorOp::ReduceSum128,
        operands: DENORMAL_LANES,
    },
    OperationVector {
        id: 32,
        name: "reduce_dot128_cancel",
        category: Category::Reduction,
        op: VectorOp::ReduceDot128,
        operands: CANCELLATION_LANES,
    },
    // --- Denormal and NaN-payload propagation ---
    OperationVector {
        id: 33,
        name: "denormal_passthrough",
        category: Category::DenormalNan,
        op: VectorOp::Mul,
        operands: &[p::MID_DENORMAL, p::ONE],
    },
    OperationVector {
        id: 34,
        name: "qnan_payload_add",
        category: Category::DenormalNan,
        op: VectorOp::Add,
        operands: &[p::QNAN_PAYLOAD, p::ONE],
    },
    OperationVector {
        id: 35,
        name: "snan_quieting_add",
        category: Category::DenormalNan,
        op: VectorOp::Add,
        operands: &[p::SNAN_PAYLOAD, p::ONE],
    },
    OperationVector {
        id: 36,
        name: "decay_borderline",
        category: Category::DenormalNan,
        op: VectorOp::DenormalDecay,
        operands: &[p::DECAY_SEED_A],
    },
    OperationVector {
        id: 37,
        name: "decay_double",
        category: Category::DenormalNan,
        op: VectorOp::DenormalDecay,
        operands: &[p::DECAY_SEED_B],
    },
    OperationVector {
        id: 38,
        name: "decay_five",
        category: Category::DenormalNan,
        op: VectorOp::DenormalDecay,
        operands: &[p::DECAY_SEED_C],
    },
    OperationVector {
        id: 39,
        name: "decay_wide",
        category: Category::DenormalNan,
        op: VectorOp::DenormalDecay,
        operands: &[p::DECAY_SEED_D],
    },
    OperationVector {
        id: 40,
        name: "decay_subnormal_seed",
        category: Category::DenormalNan,
        op: VectorOp::DenormalDecay,
        operands: &[p::DECAY_SEED_E],
    },
    OperationVector {
        id: 41,
        name: "decay_min_normal",
        category: Category::DenormalNan,
        op: VectorOp::DenormalDecay,
        operands: &[p::DECAY_SEED_F],
    },
];

/// Returns the ordered vector set for [`BATTERY_VERSION`].
pub fn catalog() -> &'static [OperationVector] {
    CATALOG
}
