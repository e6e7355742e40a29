//! Dispatch tuning thresholds
//!
//! The block-length thresholds are performance knobs, not correctness
//! constraints: every backend computes the right answer for any length. The
//! defaults (64 for NEON, 2048 for SME) match where each tier starts paying
//! off on Apple M4-class cores; re-measure them on other hardware.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Default minimum block length for the standard SIMD tier
pub const DEFAULT_MIN_STANDARD_BLOCK: usize = 64;

/// Default minimum block length for the wide-vector tier
pub const DEFAULT_MIN_WIDE_BLOCK: usize = 2048;

/// Configuration for selecting a kernel tier per contraction
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// Blocks shorter than this use the scalar kernel
    pub min_standard_block: usize,
    /// Blocks shorter than this never use the wide-vector kernel
    pub min_wide_block: usize,
    /// Allow the standard SIMD tier
    pub allow_standard: bool,
    /// Allow the wide-vector tier
    pub allow_wide: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            min_standard_block: DEFAULT_MIN_STANDARD_BLOCK,
            min_wide_block: DEFAULT_MIN_WIDE_BLOCK,
            allow_standard: true,
            allow_wide: true,
        }
    }
}

impl DispatchConfig {
    /// Create a configuration with default thresholds
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration that always binds the scalar kernel
    pub fn scalar_only() -> Self {
        Self {
            allow_standard: false,
            allow_wide: false,
            ..Self::default()
        }
    }

    /// Set the standard SIMD threshold
    pub fn with_min_standard_block(mut self, block: usize) -> Self {
        self.min_standard_block = block;
        self
    }

    /// Set the wide-vector threshold
    pub fn with_min_wide_block(mut self, block: usize) -> Self {
        self.min_wide_block = block;
        self
    }

    /// Enable or disable the standard SIMD tier
    pub fn with_standard(mut self, allow: bool) -> Self {
        self.allow_standard = allow;
        self
    }

    /// Enable or disable the wide-vector tier
    pub fn with_wide(mut self, allow: bool) -> Self {
        self.allow_wide = allow;
        self
    }

    /// Check that the thresholds are consistent
    pub fn validate(&self) -> Result<()> {
        if self.allow_standard && self.min_standard_block == 0 {
            return Err(Error::InvalidParameter(
                "min_standard_block must be positive".to_string(),
            ));
        }
        if self.allow_wide && self.min_wide_block == 0 {
            return Err(Error::InvalidParameter(
                "min_wide_block must be positive".to_string(),
            ));
        }
        if self.allow_standard && self.allow_wide && self.min_wide_block < self.min_standard_block
        {
            return Err(Error::InvalidParameter(format!(
                "min_wide_block ({}) must not be below min_standard_block ({})",
                self.min_wide_block, self.min_standard_block
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DispatchConfig::default();
        assert_eq!(config.min_standard_block, 64);
        assert_eq!(config.min_wide_block, 2048);
        assert!(config.allow_standard && config.allow_wide);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = DispatchConfig::new()
            .with_min_standard_block(32)
            .with_min_wide_block(4096)
            .with_wide(false);
        assert_eq!(config.min_standard_block, 32);
        assert_eq!(config.min_wide_block, 4096);
        assert!(!config.allow_wide);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let config = DispatchConfig::new().with_min_standard_block(0);
        assert!(matches!(config.validate(), Err(Error::InvalidParameter(_))));

        let config = DispatchConfig::new().with_min_wide_block(16);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("min_wide_block (16)"));

        // Disabled tiers are not checked
        let config = DispatchConfig::scalar_only()
            .with_min_standard_block(0)
            .with_min_wide_block(0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_partial() {
        let config = DispatchConfig::from_json(r#"{ "min_wide_block": 8192 }"#).unwrap();
        assert_eq!(config.min_wide_block, 8192);
        assert_eq!(config.min_standard_block, DEFAULT_MIN_STANDARD_BLOCK);
    }

    #[test]
    fn test_json_errors() {
        assert!(matches!(
            DispatchConfig::from_json("{ not json"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            DispatchConfig::from_json(r#"{ "min_standard_block": 0 }"#),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let config = DispatchConfig::new().with_min_standard_block(128);
        let parsed = DispatchConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }
}
