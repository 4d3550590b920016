//! SIMD horizontal reductions.
//!
//! The shape of a reduction tree is an instruction-set property: a 128-bit
//! unit folds pairs, a 256-bit unit folds quads then pairs, and each shape
//! rounds the cancellation-heavy lane sets differently. Each path therefore
//! uses the target's real vector instructions; when the required unit is
//! absent the reduction reports `None` and the vector is recorded as
//! `unsupported`; its slot in the result sequence stays occupied so runs
//! from differently equipped hosts remain comparable position-by-position.
//!
//! Lane counts in the catalog are multiples of the widest chunk (four), so
//! the `chunks_exact` walks below consume every lane.

use std::hint::black_box;

/// Horizontal sum through 128-bit vector registers.
pub fn sum128(lanes: &[u64]) -> Option<u64> {
    let lanes = decode(lanes);
    #[cfg(target_arch = "x86_64")]
    {
        Some(x86::sum128(&lanes).to_bits())
    }
    #[cfg(target_arch = "aarch64")]
    {
        Some(neon::sum128(&lanes).to_bits())
    }
    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        let _ = lanes;
        None
    }
}

/// Horizontal sum through 256-bit vector registers.
pub fn sum256(lanes: &[u64]) -> Option<u64> {
    let lanes = decode(lanes);
    #[cfg(target_arch = "x86_64")]
    {
        if is_x86_feature_detected!("avx") {
            // SAFETY: AVX presence was just verified at runtime.
            return Some(unsafe { x86::sum256(&lanes) }.to_bits());
        }
        None
    }
    #[cfg(not(target_arch = "x86_64"))]
    {
        let _ = lanes;
        None
    }
}

/// Horizontal dot product through 128-bit vector registers. Lanes are read
/// as interleaved `a0 b0 a1 b1 …` pairs.
pub fn dot128(lanes: &[u64]) -> Option<u64> {
    let lanes = decode(lanes);
    #[cfg(target_arch = "x86_64")]
    {
        Some(x86::dot128(&lanes).to_bits())
    }
    #[cfg(target_arch = "aarch64")]
    {
        Some(neon::dot128(&lanes).to_bits())
    }
    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        let _ = lanes;
        None
    }
}

/// Rehydrates lane bit patterns into doubles behind an optimizer barrier.
fn decode(lanes: &[u64]) -> Vec<f64> {
    black_box(lanes.iter().map(|&bits| f64::from_bits(bits)).collect())
}

#[cfg(target_arch = "x86_64")]
mod x86 {
    use std::arch::x86_64::{
        _mm_add_pd, _mm_add_sd, _mm_cvtsd_f64, _mm_loadu_pd, _mm_mul_pd, _mm_setzero_pd,
        _mm_unpackhi_pd, _mm256_add_pd, _mm256_castpd256_pd128, _mm256_extractf128_pd,
        _mm256_loadu_pd, _mm256_setzero_pd,
    };

    /// Pairwise accumulate into one xmm register, then fold high onto low.
    #[inline(never)]
    pub fn sum128(lanes: &[f64]) -> f64 {
        // SAFETY: SSE2 is baseline on x86_64; loads are unaligned-tolerant
        // and stay within the slice.
        unsafe {
            let mut acc = _mm_setzero_pd();
            for pair in lanes.chunks_exact(2) {
                acc = _mm_add_pd(acc, _mm_loadu_pd(pair.as_ptr()));
            }
            let hi = _mm_unpackhi_pd(acc, acc);
            _mm_cvtsd_f64(_mm_add_sd(acc, hi))
        }
    }

    /// Quad-wise accumulate into one ymm register, fold 256→128→64.
    ///
    /// # Safety
    ///
    /// Caller must have verified AVX support at runtime.
    #[target_feature(enable = "avx")]
    pub unsafe fn sum256(lanes: &[f64]) -> f64 {
        // SAFETY: AVX is guaranteed by the caller contract; loads are
        // unaligned-tolerant and stay within the slice.
        unsafe {
            let mut acc = _mm256_setzero_pd();
            for quad in lanes.chunks_exact(4) {
                acc = _mm256_add_pd(acc, _mm256_loadu_pd(quad.as_ptr()));
            }
            let lo = _mm256_castpd256_pd128(acc);
            let hi = _mm256_extractf128_pd::<1>(acc);
            let folded = _mm_add_pd(lo, hi);
            let upper = _mm_unpackhi_pd(folded, folded);
            _mm_cvtsd_f64(_mm_add_sd(folded, upper))
        }
    }

    /// Interleaved multiply-accumulate, then fold high onto low.
    #[inline(never)]
    pub fn dot128(lanes: &[f64]) -> f64 {
        // SAFETY: SSE2 is baseline on x86_64; each quad supplies one xmm
        // of `a` lanes and one of `b` lanes from within the slice.
        unsafe {
            let mut acc = _mm_setzero_pd();
            for quad in lanes.chunks_exact(4) {
                let a = _mm_loadu_pd(quad.as_ptr());
                let b = _mm_loadu_pd(quad[2..].as_ptr());
                acc = _mm_add_pd(acc, _mm_mul_pd(a, b));
            }
            let hi = _mm_unpackhi_pd(acc, acc);
            _mm_cvtsd_f64(_mm_add_sd(acc, hi))
        }
    }
}

#[cfg(target_arch = "aarch64")]
mod neon {
    use std::arch::aarch64::{vaddq_f64, vaddvq_f64, vdupq_n_f64, vfmaq_f64, vld1q_f64};

    /// Pairwise accumulate into one q register, then `FADDP`-style fold.
    #[inline(never)]
    pub fn sum128(lanes: &[f64]) -> f64 {
        // SAFETY: NEON is baseline on aarch64; loads stay within the slice.
        unsafe {
            let mut acc = vdupq_n_f64(0.0);
            for pair in lanes.chunks_exact(2) {
                acc = vaddq_f64(acc, vld1q_f64(pair.as_ptr()));
            }
            vaddvq_f64(acc)
        }
    }

    /// Fused multiply-accumulate (`FMLA`) over interleaved lanes; NEON's
    /// native idiom, which also exposes whether the accumulate fuses.
    #[inline(never)]
    pub fn dot128(lanes: &[f64]) -> f64 {
        // SAFETY: NEON is baseline on aarch64; loads stay within the slice.
        unsafe {
            let mut acc = vdupq_n_f64(0.0);
            for quad in lanes.chunks_exact(4) {
                let a = vld1q_f64(quad.as_ptr());
                let b = vld1q_f64(quad[2..].as_ptr());
                acc = vfmaq_f64(acc, a, b);
            }
            vaddvq_f64(acc)
        }
    }
}
