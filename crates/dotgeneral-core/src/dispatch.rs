//! Tier selection: bind the best inner loop once per contraction
//!
//! The dispatcher reads the process-wide capability once, combines it with the
//! block-length thresholds from [`DispatchConfig`], and hands back a
//! [`BoundInnerLoop`]. The driver keeps that binding for the whole contraction;
//! nothing is re-checked per block.

use crate::capability::{capability, Capability};
use crate::config::DispatchConfig;
use crate::error::{Error, Result};
use crate::inner_loop::BoundInnerLoop;
use crate::primitives::is_tier_available;

/// Chooses and binds an inner-loop implementation
#[derive(Clone, Debug)]
pub struct KernelDispatcher {
    config: DispatchConfig,
    capability: Capability,
}

impl KernelDispatcher {
    /// Create a dispatcher for the running machine
    pub fn new(config: DispatchConfig) -> Result<Self> {
        Self::with_capability(config, Capability::Wide)
    }

    /// Create a dispatcher that assumes a given capability ceiling.
    ///
    /// The ceiling is clamped to what the machine actually has, so this can
    /// only lower the tier, never enable missing hardware.
    pub fn with_capability(config: DispatchConfig, ceiling: Capability) -> Result<Self> {
        config.validate()?;
        Ok(Self::clamped(config, ceiling))
    }

    fn clamped(config: DispatchConfig, ceiling: Capability) -> Self {
        let capability = ceiling.min(capability());
        log::debug!(
            "kernel dispatcher: capability {} ({}), standard >= {}, wide >= {}",
            capability,
            capability.describe(),
            config.min_standard_block,
            config.min_wide_block
        );
        Self { config, capability }
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Highest tier this dispatcher may bind
    pub fn capability(&self) -> Capability {
        self.capability
    }

    /// Tier to use for blocks of `block_dim` elements
    pub fn select_tier(&self, block_dim: usize) -> Capability {
        let cfg = &self.config;
        if self.capability >= Capability::Wide && cfg.allow_wide && block_dim >= cfg.min_wide_block
        {
            Capability::Wide
        } else if self.capability >= Capability::Standard
            && cfg.allow_standard
            && block_dim >= cfg.min_standard_block
        {
            Capability::Standard
        } else {
            Capability::Scalar
        }
    }

    /// Bind the inner loop for a contraction whose blocks have `block_dim` elements
    pub fn bind(&self, block_dim: usize) -> BoundInnerLoop {
        let tier = self.select_tier(block_dim);
        log::debug!("binding {tier} inner loop for block_dim {block_dim}");
        BoundInnerLoop::new(tier)
    }

    /// Bind a specific tier, failing if this dispatcher cannot run it
    pub fn bind_tier(&self, tier: Capability) -> Result<BoundInnerLoop> {
        if tier > self.capability || !is_tier_available(tier) {
            log::warn!(
                "requested {tier} inner loop but capability is {}",
                self.capability
            );
            return Err(Error::unavailable(tier.name()));
        }
        Ok(BoundInnerLoop::new(tier))
    }
}

impl Default for KernelDispatcher {
    fn default() -> Self {
        Self::clamped(DispatchConfig::default(), Capability::Wide)
    }
}

/// Bind the best inner loop for `block_dim` using the default thresholds
pub fn best_inner_loop(block_dim: usize) -> BoundInnerLoop {
    KernelDispatcher::default().bind(block_dim)
}
