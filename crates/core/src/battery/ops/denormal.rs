//! Denormal decay chains.
//!
//! Seeded at the bottom of the representable range, the chain repeatedly
//! rescales two coupled values and folds them through range-reduction-heavy
//! trig terms. Denormal handling, intermediate precision, and the host's
//! argument reduction all leave their mark on the final accumulated bits,
//! which is why even same-vendor parts of different generations separate on
//! these vectors.

use std::hint::black_box;

/// Chain length; enough iterations to climb from the denormal range back
/// into normal magnitudes while the trig folds keep mixing low-order bits.
const DECAY_STEPS: usize = 205;

/// Runs the decay chain from `seed` and returns the accumulated result.
#[inline(never)]
pub fn decay_chain(seed: f64) -> f64 {
    let mut x = black_box(seed);
    let mut y = black_box(seed) * 1.112345;
    let mut acc = 0.0_f64;
    for step in 0..DECAY_STEPS {
        x = x / 1.1123156 + x * 0.9123545676;
        y = y * 0.951235467 + y / 1.05123245;

        let combined =
            x * (1.0 + (step as f64 * 0.01).sin()) + y * (1.0 + (step as f64 * 0.01).cos());

        acc += combined + (combined * 1e300).sin() * 1e-308 + (combined * 1e200).atan() * 1e-308;
    }
    acc
}
