//! One-time detection of optional vector-compute hardware
//!
//! The wide-vector (SME) query runs at most once per process. The first
//! caller performs it inside a `lazy_static` initializer; concurrent and
//! later callers block on, then read, the same immutable value. Any query
//! failure is reported as "unavailable" rather than surfaced as an error.

#[cfg(all(
    target_arch = "aarch64",
    target_os = "macos",
    not(feature = "no-wide")
))]
mod darwin;
#[cfg(all(
    target_arch = "aarch64",
    any(target_os = "linux", target_os = "android"),
    not(feature = "no-wide")
))]
mod linux;

use lazy_static::lazy_static;
use std::fmt;

/// Environment variable that forces the wide-vector tier off when set to a
/// truthy value. Read once, during detection.
pub const DISABLE_WIDE_ENV: &str = "DOTGENERAL_DISABLE_WIDE";

/// Whether a wide-vector detector exists for this build target
pub const WIDE_DETECTOR_COMPILED: bool = cfg!(all(
    target_arch = "aarch64",
    any(target_os = "macos", target_os = "linux", target_os = "android"),
    not(feature = "no-wide")
));

/// Whether a fixed-width (128-bit) SIMD backend is compiled in for this target.
///
/// SSE2 is part of the x86_64 baseline and NEON is part of the aarch64
/// baseline, so neither needs a runtime check.
pub const STANDARD_SIMD_COMPILED: bool =
    cfg!(any(target_arch = "x86_64", target_arch = "aarch64"));

/// Kernel tier supported by the running machine, ordered from slowest to fastest
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Capability {
    /// Portable scalar code only
    Scalar,
    /// 128-bit SIMD (SSE2 on x86_64, NEON on aarch64)
    Standard,
    /// Streaming-mode scalable vectors (Arm SME)
    Wide,
}

impl Capability {
    /// Short backend name
    pub fn name(&self) -> &'static str {
        match self {
            Capability::Scalar => "scalar",
            Capability::Standard => "standard",
            Capability::Wide => "wide",
        }
    }

    /// Human-readable description of the instruction set behind this tier
    pub fn describe(&self) -> &'static str {
        match self {
            Capability::Scalar => "portable scalar (no SIMD)",
            Capability::Standard if cfg!(target_arch = "aarch64") => "NEON 128-bit",
            Capability::Standard => "SSE2 128-bit",
            Capability::Wide => "SME streaming SVE",
        }
    }

    /// Every tier at or below this one, fastest first
    pub fn tiers_down(&self) -> impl Iterator<Item = Capability> {
        let top = *self;
        [Capability::Wide, Capability::Standard, Capability::Scalar]
            .into_iter()
            .filter(move |tier| *tier <= top)
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

lazy_static! {
    static ref WIDE_VECTOR: bool = {
        let detected = run_wide_query();
        log::info!(
            "wide-vector capability: {}",
            if detected { "present" } else { "absent" }
        );
        detected
    };
}

/// Report whether the wide-vector (SME) engine can be used in this process.
///
/// The underlying query runs exactly once; the answer never changes afterwards.
pub fn detect_wide_vector_capability() -> bool {
    *WIDE_VECTOR
}

/// Best kernel tier this process can run
pub fn capability() -> Capability {
    if detect_wide_vector_capability() {
        Capability::Wide
    } else if STANDARD_SIMD_COMPILED {
        Capability::Standard
    } else {
        Capability::Scalar
    }
}

fn run_wide_query() -> bool {
    wide_query(std::env::var(DISABLE_WIDE_ENV).ok().as_deref(), query_platform)
}

/// The override is checked first; `platform` is not called when it is set.
fn wide_query(env_value: Option<&str>, platform: impl FnOnce() -> bool) -> bool {
    if disabled_by_env(env_value) {
        log::debug!("{DISABLE_WIDE_ENV} set; skipping wide-vector query");
        return false;
    }
    platform()
}

#[cfg(all(
    target_arch = "aarch64",
    target_os = "macos",
    not(feature = "no-wide")
))]
fn query_platform() -> bool {
    darwin::query_sme()
}

#[cfg(all(
    target_arch = "aarch64",
    any(target_os = "linux", target_os = "android"),
    not(feature = "no-wide")
))]
fn query_platform() -> bool {
    linux::query_sme()
}

#[cfg(not(all(
    target_arch = "aarch64",
    any(target_os = "macos", target_os = "linux", target_os = "android"),
    not(feature = "no-wide")
)))]
fn query_platform() -> bool {
    false
}

fn disabled_by_env(value: Option<&str>) -> bool {
    match value {
        Some(v) => matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        None => false,
    }
}

/// Interpret the raw bytes returned for a boolean hardware flag.
///
/// The flag may come back as a native integer (first byte `0x01`) or as
/// text (`"1"`); both mean present. Empty or anything else means absent.
#[cfg_attr(
    not(all(target_arch = "aarch64", target_os = "macos", not(feature = "no-wide"))),
    allow(dead_code)
)]
pub(crate) fn flag_bytes_set(bytes: &[u8]) -> bool {
    matches!(bytes.first(), Some(1) | Some(b'1'))
}
