#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! # Policy Configuration
//!
//! Builder-style configuration resolved once at startup.
//!
//! ```
//! use arc_tls_policy::{CapabilityTier, PolicyConfig};
//!
//! let config = PolicyConfig::new().with_platform_level(21);
//! assert_eq!(config.resolve_tier().ok(), Some(CapabilityTier::Modern));
//! ```

use tracing::debug;

use crate::error::PolicyError;
use crate::policy::CipherSuiteList;
use crate::tier::{CapabilityTier, EnvTier, FixedTier, PlatformLevel, TierSource};
use crate::tracing::{TracingConfig, init_tracing};

/// Configuration for building a [`crate::SuiteNegotiator`]
#[derive(Debug, Clone, Default)]
pub struct PolicyConfig {
    /// Explicit tier, takes precedence over every other source
    pub tier: Option<CapabilityTier>,
    /// Environment variable naming the tier
    pub tier_env_var: Option<String>,
    /// Numeric platform level to classify
    pub platform_level: Option<u32>,
    /// Initial cipher suites instead of the tier default
    pub initial_suites: Option<CipherSuiteList>,
    /// Logging setup, installed by [`PolicyConfig::init_tracing`]
    ///
    /// Building a negotiator never installs a subscriber on its own.
    pub tracing: TracingConfig,
}

impl PolicyConfig {
    /// Create an empty configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed tier
    #[must_use]
    pub fn with_tier(mut self, tier: CapabilityTier) -> Self {
        self.tier = Some(tier);
        self
    }

    /// Read the tier from an environment variable
    #[must_use]
    pub fn with_tier_env_var(mut self, var: impl Into<String>) -> Self {
        self.tier_env_var = Some(var.into());
        self
    }

    /// Classify the tier from a platform level
    #[must_use]
    pub fn with_platform_level(mut self, level: u32) -> Self {
        self.platform_level = Some(level);
        self
    }

    /// Start from `suites` instead of the tier default
    #[must_use]
    pub fn with_initial_suites(mut self, suites: CipherSuiteList) -> Self {
        self.initial_suites = Some(suites);
        self
    }

    /// Set logging configuration
    #[must_use]
    pub fn with_tracing_config(mut self, tracing: TracingConfig) -> Self {
        self.tracing = tracing;
        self
    }

    /// Install the global subscriber described by [`Self::tracing`]
    ///
    /// An already installed subscriber is kept.
    pub fn init_tracing(&self) {
        init_tracing(&self.tracing);
    }

    /// Check the configuration for values that can never work
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Config`] for an empty initial suite list.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.initial_suites.as_ref().is_some_and(CipherSuiteList::is_empty) {
            return Err(PolicyError::config("initial cipher suite list is empty", "initial_suites"));
        }
        Ok(())
    }

    /// Resolve the tier: explicit tier, then environment variable, then platform level
    ///
    /// # Errors
    ///
    /// Returns an error if no source is configured or the chosen source fails.
    pub fn resolve_tier(&self) -> Result<CapabilityTier, PolicyError> {
        let tier = if let Some(tier) = self.tier {
            FixedTier(tier).detect_tier()?
        } else if let Some(var) = &self.tier_env_var {
            EnvTier::new(var.clone()).detect_tier()?
        } else if let Some(level) = self.platform_level {
            PlatformLevel(level).detect_tier()?
        } else {
            return Err(PolicyError::config("no capability tier source configured", "tier"));
        };
        debug!(tier = %tier, "Resolved capability tier");
        Ok(tier)
    }
}
