//! Scoped control of the host floating-point environment.
//!
//! The battery's results are only comparable across machines when the
//! floating-point environment is identical, so the controller follows a
//! strict acquire/release discipline: [`FpEnvGuard::configure`] saves the
//! complete C floating-point environment (plus MXCSR on x86_64 and FPCR on
//! aarch64, where the flush-to-zero bits live), installs the requested
//! state, and restores the saved state on drop, including drops driven by
//! unwinding. The guard is deliberately `!Send`: the fenv is thread-local
//! and must stay with the thread that acquired it.
//!
//! Accrued exception flags are read through the same C interface
//! (`feclearexcept`/`fetestexcept`); the runner clears them before each
//! vector and samples them after.

use std::marker::PhantomData;

use crate::common::{ExceptionFlags, RunError};
use crate::config::{RoundingMode, RunConfig};

/// Direct bindings to the C `<fenv.h>` surface the controller depends on.
///
/// The `libc` crate does not export the `fenv` API, so the handful of
/// functions, constants, and the opaque `fenv_t` type used here are declared
/// against the host C library's stable ABI. Values match the glibc headers
/// for each supported architecture.
#[cfg(target_os = "linux")]
#[allow(non_camel_case_types)]
mod fenv_sys {
    use libc::c_int;

    unsafe extern "C" {
        /// Clears the exception flags named by the mask.
        pub fn feclearexcept(excepts: c_int) -> c_int;
        /// Returns the subset of the mask that is currently raised.
        pub fn fetestexcept(excepts: c_int) -> c_int;
        /// Installs the rounding direction.
        pub fn fesetround(round: c_int) -> c_int;
        /// Saves the entire floating-point environment.
        pub fn fegetenv(envp: *mut fenv_t) -> c_int;
        /// Restores a previously saved floating-point environment.
        pub fn fesetenv(envp: *const fenv_t) -> c_int;
    }

    #[cfg(target_arch = "x86_64")]
    pub const FE_INVALID: c_int = 0x01;
    #[cfg(target_arch = "x86_64")]
    pub const FE_DIVBYZERO: c_int = 0x04;
    #[cfg(target_arch = "x86_64")]
    pub const FE_OVERFLOW: c_int = 0x08;
    #[cfg(target_arch = "x86_64")]
    pub const FE_UNDERFLOW: c_int = 0x10;
    #[cfg(target_arch = "x86_64")]
    pub const FE_INEXACT: c_int = 0x20;
    #[cfg(target_arch = "x86_64")]
    pub const FE_ALL_EXCEPT: c_int =
        FE_INEXACT | FE_DIVBYZERO | FE_UNDERFLOW | FE_OVERFLOW | FE_INVALID;
    #[cfg(target_arch = "x86_64")]
    pub const FE_TONEAREST: c_int = 0x000;
    #[cfg(target_arch = "x86_64")]
    pub const FE_DOWNWARD: c_int = 0x400;
    #[cfg(target_arch = "x86_64")]
    pub const FE_UPWARD: c_int = 0x800;
    #[cfg(target_arch = "x86_64")]
    pub const FE_TOWARDZERO: c_int = 0xc00;

    /// Opaque x87/SSE floating-point environment (glibc `bits/fenv.h`).
    #[cfg(target_arch = "x86_64")]
    #[repr(C)]
    #[derive(Clone, Copy)]
    pub struct fenv_t {
        __control_word: u16,
        __glibc_reserved1: u16,
        __status_word: u16,
        __glibc_reserved2: u16,
        __tags: u16,
        __glibc_reserved3: u16,
        __eip: u32,
        __cs_selector: u16,
        __opcode_and_reserved: u32,
        __data_offset: u32,
        __data_selector: u16,
        __glibc_reserved5: u16,
        __mxcsr: u32,
    }

    #[cfg(target_arch = "aarch64")]
    pub const FE_INVALID: c_int = 1;
    #[cfg(target_arch = "aarch64")]
    pub const FE_DIVBYZERO: c_int = 2;
    #[cfg(target_arch = "aarch64")]
    pub const FE_OVERFLOW: c_int = 4;
    #[cfg(target_arch = "aarch64")]
    pub const FE_UNDERFLOW: c_int = 8;
    #[cfg(target_arch = "aarch64")]
    pub const FE_INEXACT: c_int = 16;
    #[cfg(target_arch = "aarch64")]
    pub const FE_ALL_EXCEPT: c_int =
        FE_INEXACT | FE_DIVBYZERO | FE_UNDERFLOW | FE_OVERFLOW | FE_INVALID;
    #[cfg(target_arch = "aarch64")]
    pub const FE_TONEAREST: c_int = 0x00000000;
    #[cfg(target_arch = "aarch64")]
    pub const FE_UPWARD: c_int = 0x00400000;
    #[cfg(target_arch = "aarch64")]
    pub const FE_DOWNWARD: c_int = 0x00800000;
    #[cfg(target_arch = "aarch64")]
    pub const FE_TOWARDZERO: c_int = 0x00c00000;

    /// Opaque AArch64 floating-point environment (glibc `bits/fenv.h`).
    #[cfg(target_arch = "aarch64")]
    #[repr(C)]
    #[derive(Clone, Copy)]
    pub struct fenv_t {
        __fpcr: u32,
        __fpsr: u32,
    }
}

/// MXCSR flush-to-zero bit (x86_64): denormal results become signed zero.
#[cfg(all(target_os = "linux", target_arch = "x86_64"))]
const MXCSR_FTZ: u32 = 1 << 15;

/// MXCSR denormals-are-zero bit (x86_64): denormal operands read as signed zero.
#[cfg(all(target_os = "linux", target_arch = "x86_64"))]
const MXCSR_DAZ: u32 = 1 << 6;

/// FPCR flush-to-zero bit (aarch64). AArch64 has a single FZ control that
/// flushes both denormal operands and denormal results.
#[cfg(all(target_os = "linux", target_arch = "aarch64"))]
const FPCR_FZ: u64 = 1 << 24;

/// Scoped floating-point environment.
///
/// Constructed by [`FpEnvGuard::configure`] before a battery executes;
/// restores the previously active environment when dropped, regardless of
/// how the battery exits.
pub struct FpEnvGuard {
    #[cfg(target_os = "linux")]
    saved_env: fenv_sys::fenv_t,
    #[cfg(all(target_os = "linux", target_arch = "x86_64"))]
    saved_mxcsr: u32,
    #[cfg(all(target_os = "linux", target_arch = "aarch64"))]
    saved_fpcr: u64,
    /// The fenv is thread-local state; keep the guard on its thread.
    _not_send: PhantomData<*const ()>,
}

impl std::fmt::Debug for FpEnvGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FpEnvGuard").finish_non_exhaustive()
    }
}

impl FpEnvGuard {
    /// Saves the current floating-point environment and installs the one
    /// described by `config`.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::EnvUnavailable`] when the host cannot express the
    /// requested state: FTZ/DAZ on an architecture without a flush control
    /// register, or any non-default state on a platform without fenv access.
    /// Failing is mandatory: recording results under a different environment
    /// than requested would silently break cross-machine comparability.
    #[cfg(target_os = "linux")]
    pub fn configure(config: &RunConfig) -> Result<Self, RunError> {
        let mut saved_env = unsafe { std::mem::zeroed::<fenv_sys::fenv_t>() };
        // SAFETY: fegetenv writes the current environment into the provided
        // fenv_t; the pointer is valid for the duration of the call.
        if unsafe { fenv_sys::fegetenv(&raw mut saved_env) } != 0 {
            return Err(RunError::EnvUnavailable("fegetenv failed"));
        }

        let guard = Self {
            saved_env,
            #[cfg(target_arch = "x86_64")]
            // SAFETY: reading MXCSR has no side effects.
            saved_mxcsr: unsafe { std::arch::x86_64::_mm_getcsr() },
            #[cfg(target_arch = "aarch64")]
            saved_fpcr: read_fpcr(),
            _not_send: PhantomData,
        };

        // SAFETY: fesetround only changes the thread's rounding direction;
        // the saved environment restores it on drop.
        if unsafe { fenv_sys::fesetround(rounding_to_host(config.rounding)) } != 0 {
            return Err(RunError::EnvUnavailable("fesetround rejected mode"));
        }

        guard.apply_flush_bits(config)?;
        tracing::debug!(
            rounding = ?config.rounding,
            ftz = config.flush_to_zero,
            daz = config.denormals_are_zero,
            "floating-point environment installed"
        );
        Ok(guard)
    }

    /// Fallback for hosts without C fenv access: only the IEEE default
    /// environment can be "configured", and flag capture reads as empty.
    #[cfg(not(target_os = "linux"))]
    pub fn configure(config: &RunConfig) -> Result<Self, RunError> {
        if config.rounding != RoundingMode::NearestEven
            || config.flush_to_zero
            || config.denormals_are_zero
        {
            return Err(RunError::EnvUnavailable(
                "no floating-point environment control on this platform",
            ));
        }
        Ok(Self {
            _not_send: PhantomData,
        })
    }

    #[cfg(all(target_os = "linux", target_arch = "x86_64"))]
    fn apply_flush_bits(&self, config: &RunConfig) -> Result<(), RunError> {
        if !config.flush_to_zero && !config.denormals_are_zero {
            return Ok(());
        }
        let mut csr = self.saved_mxcsr;
        if config.flush_to_zero {
            csr |= MXCSR_FTZ;
        }
        if config.denormals_are_zero {
            csr |= MXCSR_DAZ;
        }
        // SAFETY: MXCSR only affects SSE arithmetic on this thread; the
        // saved value is written back on drop.
        unsafe { std::arch::x86_64::_mm_setcsr(csr) };
        Ok(())
    }

    #[cfg(all(target_os = "linux", target_arch = "aarch64"))]
    fn apply_flush_bits(&self, config: &RunConfig) -> Result<(), RunError> {
        if !config.flush_to_zero && !config.denormals_are_zero {
            return Ok(());
        }
        // FPCR.FZ flushes operands and results alike; either request maps
        // onto the same bit.
        write_fpcr(self.saved_fpcr | FPCR_FZ);
        Ok(())
    }

    #[cfg(all(
        target_os = "linux",
        not(any(target_arch = "x86_64", target_arch = "aarch64"))
    ))]
    fn apply_flush_bits(&self, config: &RunConfig) -> Result<(), RunError> {
        if config.flush_to_zero || config.denormals_are_zero {
            return Err(RunError::EnvUnavailable(
                "no FTZ/DAZ control register on this architecture",
            ));
        }
        Ok(())
    }
}

impl Drop for FpEnvGuard {
    fn drop(&mut self) {
        #[cfg(target_os = "linux")]
        {
            // SAFETY: the fenv_t was produced by fegetenv in configure().
            let restored = unsafe { fenv_sys::fesetenv(&raw const self.saved_env) };
            if restored != 0 {
                tracing::warn!("fesetenv failed; floating-point environment not restored");
            }
            #[cfg(target_arch = "x86_64")]
            // SAFETY: writing back the MXCSR value read in configure().
            unsafe {
                std::arch::x86_64::_mm_setcsr(self.saved_mxcsr);
            }
            #[cfg(target_arch = "aarch64")]
            write_fpcr(self.saved_fpcr);
        }
    }
}

/// Clears all accrued exception flags. Called before each vector executes.
pub fn clear_exception_flags() {
    #[cfg(target_os = "linux")]
    {
        // SAFETY: feclearexcept only mutates the thread's accrued flags.
        if unsafe { fenv_sys::feclearexcept(fenv_sys::FE_ALL_EXCEPT) } != 0 {
            tracing::warn!("feclearexcept failed; flag capture may carry stale bits");
        }
    }
}

/// Samples the accrued exception flags raised since the last clear.
///
/// On platforms without fenv access this reads as [`ExceptionFlags::NONE`];
/// the raw result bits are still captured, only the flag channel is blind.
pub fn read_exception_flags() -> ExceptionFlags {
    #[cfg(target_os = "linux")]
    {
        // SAFETY: fetestexcept reads the thread's accrued flags; no mutation.
        let raw = unsafe { fenv_sys::fetestexcept(fenv_sys::FE_ALL_EXCEPT) };
        let mut flags = ExceptionFlags::NONE;
        for (host_bit, flag) in [
            (fenv_sys::FE_INVALID, ExceptionFlags::NV),
            (fenv_sys::FE_DIVBYZERO, ExceptionFlags::DZ),
            (fenv_sys::FE_OVERFLOW, ExceptionFlags::OF),
            (fenv_sys::FE_UNDERFLOW, ExceptionFlags::UF),
            (fenv_sys::FE_INEXACT, ExceptionFlags::NX),
        ] {
            if raw & host_bit != 0 {
                flags = flags | flag;
            }
        }
        flags
    }
    #[cfg(not(target_os = "linux"))]
    ExceptionFlags::NONE
}

/// Maps a [`RoundingMode`] onto the host's `FE_*` rounding constant.
#[cfg(target_os = "linux")]
fn rounding_to_host(mode: RoundingMode) -> libc::c_int {
    match mode {
        RoundingMode::NearestEven => fenv_sys::FE_TONEAREST,
        RoundingMode::TowardZero => fenv_sys::FE_TOWARDZERO,
        RoundingMode::Downward => fenv_sys::FE_DOWNWARD,
        RoundingMode::Upward => fenv_sys::FE_UPWARD,
    }
}

/// Reads the AArch64 floating-point control register.
#[cfg(all(target_os = "linux", target_arch = "aarch64"))]
fn read_fpcr() -> u64 {
    let fpcr: u64;
    // SAFETY: MRS from FPCR is side-effect free and always available at EL0.
    unsafe { std::arch::asm!("mrs {}, fpcr", out(reg) fpcr) };
    fpcr
}

/// Writes the AArch64 floating-point control register.
#[cfg(all(target_os = "linux", target_arch = "aarch64"))]
fn write_fpcr(fpcr: u64) {
    // SAFETY: MSR to FPCR only changes this thread's FP control state.
    unsafe { std::arch::asm!("msr fpcr, {}", in(reg) fpcr) };
}
