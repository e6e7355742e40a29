//! Concrete backend implementations
//!
//! Plain types with compile-time dispatch: no Box, no dyn. Each hardware
//! backend exposes `is_available()` and a `new()` that panics when the
//! hardware is missing, so selection mistakes surface immediately.

pub mod scalar;
pub mod standard;
pub mod wide;

pub use scalar::ScalarBackend;
pub use standard::StandardBackend;
pub use wide::WideBackend;

use crate::capability::Capability;

/// Whether the backend for `tier` can run in this process
pub fn is_tier_available(tier: Capability) -> bool {
    match tier {
        Capability::Scalar => true,
        Capability::Standard => StandardBackend::is_available(),
        Capability::Wide => WideBackend::is_available(),
    }
}

/// Get the best available backend name
pub fn best_backend_name() -> &'static str {
    if WideBackend::is_available() {
        return "sme";
    }
    #[cfg(target_arch = "aarch64")]
    {
        "neon"
    }
    #[cfg(target_arch = "x86_64")]
    {
        "sse2"
    }
    #[cfg(not(any(target_arch = "x86_64", target_arch = "aarch64")))]
    {
        "scalar"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::capability;

    #[test]
    fn test_scalar_always_available() {
        assert!(is_tier_available(Capability::Scalar));
    }

    #[test]
    fn test_detected_tiers_are_available() {
        for tier in capability().tiers_down() {
            assert!(is_tier_available(tier), "{tier} reported but unavailable");
        }
    }

    #[test]
    fn test_best_backend_name_consistent() {
        let name = best_backend_name();
        match capability() {
            Capability::Wide => assert_eq!(name, "sme"),
            Capability::Standard => assert!(name == "neon" || name == "sse2"),
            Capability::Scalar => assert_eq!(name, "scalar"),
        }
    }
}
