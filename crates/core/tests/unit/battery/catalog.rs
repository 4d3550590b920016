//! Catalog shape tests.
//!
//! The catalog is append-only and its order is the fingerprint's key
//! space; these tests pin the structural properties every version must
//! keep.

use std::collections::HashSet;

use fpsig_core::battery::{BATTERY_VERSION, Category, VectorOp, catalog};

#[test]
fn test_version_is_current() {
    assert_eq!(BATTERY_VERSION, 1);
}

#[test]
fn test_ids_unique_and_strictly_increasing() {
    let vectors = catalog();
    assert!(!vectors.is_empty());
    let mut seen = HashSet::new();
    for pair in vectors.windows(2) {
        assert!(
            pair[0].id < pair[1].id,
            "catalog order must follow id order: {} before {}",
            pair[0].id,
            pair[1].id
        );
    }
    for vector in vectors {
        assert!(seen.insert(vector.id), "duplicate id {}", vector.id);
        assert!(!vector.name.is_empty());
    }
}

#[test]
fn test_every_category_is_covered() {
    let covered: HashSet<_> = catalog().iter().map(|v| v.category).collect();
    for category in [
        Category::Arithmetic,
        Category::FusedMultiplyAdd,
        Category::Transcendental,
        Category::Reduction,
        Category::DenormalNan,
    ] {
        assert!(covered.contains(&category), "no vectors probe {category}");
    }
}

#[test]
fn test_operand_counts_fit_operations() {
    for vector in catalog() {
        let minimum = match vector.op {
            VectorOp::Sqrt
            | VectorOp::Sin
            | VectorOp::Cos
            | VectorOp::Tan
            | VectorOp::Exp
            | VectorOp::Ln
            | VectorOp::Log2
            | VectorOp::Atan
            | VectorOp::Sinh
            | VectorOp::Tanh
            | VectorOp::DenormalDecay => 1,
            VectorOp::Add
            | VectorOp::Sub
            | VectorOp::Mul
            | VectorOp::Div
            | VectorOp::Hypot
            | VectorOp::Pow => 2,
            VectorOp::FusedMulAdd | VectorOp::SeparateMulAdd | VectorOp::FmaChain => 3,
            VectorOp::ReduceSum128 | VectorOp::ReduceSum256 | VectorOp::ReduceDot128 => 4,
        };
        assert!(
            vector.operands.len() >= minimum,
            "vector {} ({}) needs {} operands, has {}",
            vector.id,
            vector.name,
            minimum,
            vector.operands.len()
        );
    }
}

#[test]
fn test_reduction_lanes_are_quad_aligned() {
    for vector in catalog().iter().filter(|v| v.category == Category::Reduction) {
        assert_eq!(
            vector.operands.len() % 4,
            0,
            "reduction vector {} must supply whole quads",
            vector.name
        );
    }
}
