#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! # Platform Capability Tiers
//!
//! A coarse classification of the platform's TLS feature support. The tier is
//! resolved once at startup by a [`TierSource`] and then handed to the policy
//! table and negotiator as a plain value.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::PolicyError;

/// Platform level from which TLS 1.1 and 1.2 can be enabled.
pub const STANDARD_PLATFORM_LEVEL: u32 = 19;
/// Platform level from which the GCM elliptic-curve suites are available.
pub const MODERN_PLATFORM_LEVEL: u32 = 20;

/// Cryptographic capability tier of the running platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityTier {
    /// TLSv1 only, CBC elliptic-curve suites
    Legacy,
    /// TLSv1.2 capable, CBC elliptic-curve suites
    Standard,
    /// TLSv1.2 capable, GCM elliptic-curve suites
    Modern,
}

impl CapabilityTier {
    /// Get all tiers, weakest first
    #[must_use]
    pub fn all() -> &'static [CapabilityTier] {
        &[Self::Legacy, Self::Standard, Self::Modern]
    }

    /// Lowercase name, as accepted by [`FromStr`]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Standard => "standard",
            Self::Modern => "modern",
        }
    }

    /// Whether TLSv1.1 and TLSv1.2 may be enabled
    #[must_use]
    pub fn supports_modern_protocols(&self) -> bool {
        matches!(self, Self::Standard | Self::Modern)
    }

    /// Whether the GCM elliptic-curve suite list applies
    #[must_use]
    pub fn supports_modern_suites(&self) -> bool {
        matches!(self, Self::Modern)
    }

    /// Classify a numeric platform level
    #[must_use]
    pub fn from_platform_level(level: u32) -> Self {
        if level >= MODERN_PLATFORM_LEVEL {
            Self::Modern
        } else if level >= STANDARD_PLATFORM_LEVEL {
            Self::Standard
        } else {
            Self::Legacy
        }
    }
}

impl fmt::Display for CapabilityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CapabilityTier {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(Self::Legacy),
            "standard" => Ok(Self::Standard),
            "modern" => Ok(Self::Modern),
            _ => Err(PolicyError::UnrecognizedTier { value: s.to_string() }),
        }
    }
}

/// Platform-detection collaborator, queried once at startup.
pub trait TierSource {
    /// Resolve the platform's capability tier.
    ///
    /// # Errors
    ///
    /// Returns an error when the source cannot produce a known tier.
    fn detect_tier(&self) -> Result<CapabilityTier, PolicyError>;
}

/// A tier known ahead of time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedTier(pub CapabilityTier);

impl TierSource for FixedTier {
    fn detect_tier(&self) -> Result<CapabilityTier, PolicyError> {
        Ok(self.0)
    }
}

/// A tier derived from a numeric platform level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformLevel(pub u32);

impl TierSource for PlatformLevel {
    fn detect_tier(&self) -> Result<CapabilityTier, PolicyError> {
        let tier = CapabilityTier::from_platform_level(self.0);
        debug!(level = self.0, tier = %tier, "Classified platform level");
        Ok(tier)
    }
}

/// A tier read from an environment variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvTier {
    /// Name of the variable holding `legacy`, `standard` or `modern`
    pub var: String,
}

impl EnvTier {
    /// Read the tier from `var`
    #[must_use]
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl TierSource for EnvTier {
    fn detect_tier(&self) -> Result<CapabilityTier, PolicyError> {
        let value = std::env::var(&self.var).map_err(|e| {
            PolicyError::config(format!("cannot read {}: {e}", self.var), "tier_env_var")
        })?;
        value.parse()
    }
}
