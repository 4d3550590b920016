//! Core affinity pinning for battery execution.
//!
//! Cross-core migration mid-battery invalidates the experiment: the whole
//! point of pinning is knowing *which* silicon evaluated the vectors. The
//! pin therefore fails loudly ([`RunError::AffinityUnavailable`]) instead of
//! falling back to an unpinned run, and the previous affinity mask is
//! restored when the guard drops.

use std::marker::PhantomData;

use crate::common::RunError;

/// Scoped core pin for the calling thread.
///
/// Created by [`pin_to_core`]; restores the thread's previous affinity mask
/// on drop.
pub struct AffinityGuard {
    #[cfg(target_os = "linux")]
    previous: libc::cpu_set_t,
    core: usize,
    /// Affinity is per-thread state; keep the guard on its thread.
    _not_send: PhantomData<*const ()>,
}

impl std::fmt::Debug for AffinityGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AffinityGuard")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl AffinityGuard {
    /// The logical core this guard pinned to.
    pub fn core(&self) -> usize {
        self.core
    }
}

/// Pins the calling thread to one logical core for the battery's duration.
///
/// # Errors
///
/// Returns [`RunError::AffinityUnavailable`] when the host refuses the pin
/// (core out of range, cgroup restriction) or the platform has no affinity
/// syscall. Callers must treat this as fatal for the run.
#[cfg(target_os = "linux")]
pub fn pin_to_core(core: usize) -> Result<AffinityGuard, RunError> {
    // SAFETY: cpu_set_t is a plain bitmask; all-zeroes is the empty set.
    let mut previous = unsafe { std::mem::zeroed::<libc::cpu_set_t>() };
    // SAFETY: pid 0 targets the calling thread; the pointer outlives the call.
    if unsafe {
        libc::sched_getaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &raw mut previous)
    } != 0
    {
        return Err(RunError::AffinityUnavailable {
            core,
            source: std::io::Error::last_os_error(),
        });
    }

    // SAFETY: as above; all-zeroes is the empty set.
    let mut wanted = unsafe { std::mem::zeroed::<libc::cpu_set_t>() };
    // SAFETY: CPU_ZERO/CPU_SET only write into the set we own, and the core
    // index is range-checked against the set size by CPU_SET itself.
    unsafe {
        libc::CPU_ZERO(&mut wanted);
        libc::CPU_SET(core, &mut wanted);
    }
    // SAFETY: pid 0 targets the calling thread; the set pointer is valid.
    if unsafe {
        libc::sched_setaffinity(0, std::mem::size_of::<libc::cpu_set_t>(), &raw const wanted)
    } != 0
    {
        return Err(RunError::AffinityUnavailable {
            core,
            source: std::io::Error::last_os_error(),
        });
    }

    tracing::debug!(core, "thread pinned");
    Ok(AffinityGuard {
        previous,
        core,
        _not_send: PhantomData,
    })
}

/// Pinning is unavailable off Linux; the error keeps the failure explicit.
#[cfg(not(target_os = "linux"))]
pub fn pin_to_core(core: usize) -> Result<AffinityGuard, RunError> {
    Err(RunError::AffinityUnavailable {
        core,
        source: std::io::Error::new(
            std::io::ErrorKind::Unsupported,
            "no affinity syscall on this platform",
        ),
    })
}

impl Drop for AffinityGuard {
    fn drop(&mut self) {
        #[cfg(target_os = "linux")]
        {
            // SAFETY: restoring the mask captured in pin_to_core.
            let restored = unsafe {
                libc::sched_setaffinity(
                    0,
                    std::mem::size_of::<libc::cpu_set_t>(),
                    &raw const self.previous,
                )
            };
            if restored != 0 {
                tracing::warn!(core = self.core, "previous affinity mask not restored");
            }
        }
    }
}

/// Reports the logical core the calling thread is currently scheduled on.
///
/// `None` when the host cannot say; callers use this for reporting only,
/// never as a substitute for an established pin.
pub fn current_core() -> Option<usize> {
    #[cfg(target_os = "linux")]
    {
        // SAFETY: sched_getcpu takes no arguments and only reads kernel state.
        let cpu = unsafe { libc::sched_getcpu() };
        usize::try_from(cpu).ok()
    }
    #[cfg(not(target_os = "linux"))]
    None
}
