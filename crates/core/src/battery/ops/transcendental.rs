//! Transcendental function evaluation.
//!
//! Unlike the basic operations, transcendentals are not correctly-rounded
//! by IEEE 754: implementations legitimately differ in the last ULPs,
//! especially after argument range reduction (`sin(1e15)`) and near
//! singularities (`tan(π/2)`). That divergence is the point; it separates
//! math-library and hardware lineages that agree on everything else.

use std::hint::black_box;

/// `sin(a)`.
#[inline(never)]
pub fn sin(a: f64) -> f64 {
    black_box(a).sin()
}

/// `cos(a)`.
#[inline(never)]
pub fn cos(a: f64) -> f64 {
    black_box(a).cos()
}

/// `tan(a)`.
#[inline(never)]
pub fn tan(a: f64) -> f64 {
    black_box(a).tan()
}

/// `exp(a)`.
#[inline(never)]
pub fn exp(a: f64) -> f64 {
    black_box(a).exp()
}

/// `ln(a)`.
#[inline(never)]
pub fn ln(a: f64) -> f64 {
    black_box(a).ln()
}

/// `log2(a)`.
#[inline(never)]
pub fn log2(a: f64) -> f64 {
    black_box(a).log2()
}

/// `atan(a)`.
#[inline(never)]
pub fn atan(a: f64) -> f64 {
    black_box(a).atan()
}

/// `sinh(a)`.
#[inline(never)]
pub fn sinh(a: f64) -> f64 {
    black_box(a).sinh()
}

/// `tanh(a)`.
#[inline(never)]
pub fn tanh(a: f64) -> f64 {
    black_box(a).tanh()
}

/// `hypot(a, b)`.
#[inline(never)]
pub fn hypot(a: f64, b: f64) -> f64 {
    black_box(a).hypot(black_box(b))
}

/// `a.powf(b)`.
#[inline(never)]
pub fn pow(a: f64, b: f64) -> f64 {
    black_box(a).powf(black_box(b))
}
