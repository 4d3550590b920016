//! Floating-point environment guard tests.
//!
//! These observe the installed state through arithmetic rather than
//! syscalls: `1.0 + 2^-60` is invisible under round-to-nearest but rounds
//! up to the next representable double under upward rounding, so it
//! doubles as a probe for which mode is live.

use std::hint::black_box;

use fpsig_core::common::ExceptionFlags;
use fpsig_core::config::{RoundingMode, RunConfig};
use fpsig_core::env::FpEnvGuard;
use fpsig_core::env::fenv::{clear_exception_flags, read_exception_flags};

/// `2^-60`, far below one ULP of 1.0.
const TINY: f64 = f64::from_bits(0x3C30_0000_0000_0000);

fn one_plus_tiny() -> f64 {
    black_box(1.0_f64) + black_box(TINY)
}

#[cfg(target_os = "linux")]
#[test]
fn test_upward_rounding_installed_and_restored() {
    assert_eq!(one_plus_tiny(), 1.0, "default mode rounds the tail away");
    {
        let config = RunConfig {
            rounding: RoundingMode::Upward,
            ..RunConfig::default()
        };
        let _guard = FpEnvGuard::configure(&config).expect("fenv control on linux");
        assert!(
            one_plus_tiny() > 1.0,
            "upward rounding must surface the tail"
        );
    }
    assert_eq!(one_plus_tiny(), 1.0, "guard drop must restore the mode");
}

#[cfg(target_os = "linux")]
#[test]
fn test_divide_by_zero_raises_dz() {
    let _guard = FpEnvGuard::configure(&RunConfig::default()).expect("fenv control on linux");
    clear_exception_flags();
    let _ = black_box(black_box(1.0_f64) / black_box(0.0_f64));
    let flags = read_exception_flags();
    assert!(flags.contains(ExceptionFlags::DZ), "x/0 must raise DZ");
    assert!(!flags.contains(ExceptionFlags::NV), "x/0 must not raise NV");
}

#[cfg(target_os = "linux")]
#[test]
fn test_zero_over_zero_raises_nv() {
    let _guard = FpEnvGuard::configure(&RunConfig::default()).expect("fenv control on linux");
    clear_exception_flags();
    let result = black_box(black_box(0.0_f64) / black_box(0.0_f64));
    assert!(result.is_nan());
    let flags = read_exception_flags();
    assert!(flags.contains(ExceptionFlags::NV), "0/0 must raise NV");
    assert!(!flags.contains(ExceptionFlags::DZ), "0/0 must not raise DZ");
}

#[cfg(target_os = "linux")]
#[test]
fn test_clear_resets_accrued_flags() {
    let _guard = FpEnvGuard::configure(&RunConfig::default()).expect("fenv control on linux");
    let _ = black_box(black_box(1.0_f64) / black_box(0.0_f64));
    clear_exception_flags();
    assert!(read_exception_flags().is_empty());
}

#[cfg(all(target_os = "linux", target_arch = "x86_64"))]
#[test]
fn test_flush_to_zero_flushes_denormal_result() {
    let denormal_product = || black_box(f64::MIN_POSITIVE) * black_box(0.5_f64);
    assert!(
        denormal_product() != 0.0,
        "denormal result survives under the default environment"
    );
    {
        let config = RunConfig {
            flush_to_zero: true,
            ..RunConfig::default()
        };
        let _guard = FpEnvGuard::configure(&config).expect("MXCSR control on x86_64");
        assert_eq!(
            denormal_product(),
            0.0,
            "FTZ must flush the denormal result to zero"
        );
    }
    assert!(denormal_product() != 0.0, "guard drop must clear FTZ");
}

#[cfg(all(target_os = "linux", target_arch = "x86_64"))]
#[test]
fn test_denormals_are_zero_flushes_operand() {
    let denormal = f64::from_bits(0x0008_0000_0000_0000);
    let passthrough = move || black_box(denormal) * black_box(1.0_f64);
    assert_eq!(
        passthrough().to_bits(),
        denormal.to_bits(),
        "denormal operand passes through untouched by default"
    );
    let config = RunConfig {
        denormals_are_zero: true,
        ..RunConfig::default()
    };
    let _guard = FpEnvGuard::configure(&config).expect("MXCSR control on x86_64");
    assert_eq!(
        passthrough(),
        0.0,
        "DAZ must read the denormal operand as zero"
    );
}
