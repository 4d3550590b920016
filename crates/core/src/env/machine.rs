//! Host metadata capture.
//!
//! A [`MachineDescriptor`] travels alongside a fingerprint so that humans
//! can correlate runs across machines, sockets, and microcode updates. It
//! is free-form reporting data: none of it enters the hashed material, and
//! two descriptors differing does not make two fingerprints differ.

use serde::{Deserialize, Serialize};

/// Correlation metadata for one battery run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineDescriptor {
    /// Target architecture the tool was compiled for (e.g. `x86_64`).
    pub arch: String,
    /// Host operating system family (e.g. `linux`).
    pub os: String,
    /// Logical core count visible to the process.
    pub logical_cores: usize,
    /// Core the run was pinned to, when pinning was requested.
    pub pinned_core: Option<usize>,
    /// CPU microcode revision, when the host exposes it. Best-effort: the
    /// field stays `None` on hosts where it cannot be read portably.
    pub microcode: Option<String>,
}

impl MachineDescriptor {
    /// Captures the host's descriptor for one run.
    pub fn capture(pinned_core: Option<usize>) -> Self {
        Self {
            arch: std::env::consts::ARCH.to_owned(),
            os: std::env::consts::OS.to_owned(),
            logical_cores: num_cpus::get(),
            pinned_core,
            microcode: read_microcode(),
        }
    }
}

/// Reads the microcode revision from `/proc/cpuinfo`, when present.
///
/// Linux exposes one `microcode` line per logical CPU; the first is enough
/// since mixed-microcode systems are exactly what per-core pinned runs are
/// for detecting.
#[cfg(target_os = "linux")]
fn read_microcode() -> Option<String> {
    let cpuinfo = std::fs::read_to_string("/proc/cpuinfo").ok()?;
    cpuinfo
        .lines()
        .find(|line| line.starts_with("microcode"))
        .and_then(|line| line.split(':').nth(1))
        .map(|value| value.trim().to_owned())
}

#[cfg(not(target_os = "linux"))]
fn read_microcode() -> Option<String> {
    None
}
