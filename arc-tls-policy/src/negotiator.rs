#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! # Cipher-Suite Negotiator
//!
//! Owns the effective cipher-suite list and applies policy to connection
//! targets. The first time a target rejects the held list as an invalid
//! argument, the negotiator replaces it with that target's own supported
//! suites and keeps the replacement for every later call.
//!
//! ```text
//!   Initial ──set ok──► Stable
//!      │                  │
//!      └──InvalidArgument─┴──► FallenBack (terminal)
//! ```
//!
//! The negotiator is an explicit handle; share it with `Arc` rather than
//! reaching for a global.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::{debug, warn};

use crate::config::PolicyConfig;
use crate::error::{ErrorCode, PolicyError};
use crate::policy::{CipherSuiteList, PolicyTable};
use crate::target::TlsTarget;
use crate::tier::CapabilityTier;
use crate::tracing::PolicySpan;

/// Where the negotiator is in its one-way lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegotiationPhase {
    /// No target has accepted the list yet
    Initial,
    /// The tier default has been accepted at least once
    Stable,
    /// The list was replaced by a target's supported suites
    FallenBack,
}

/// Point-in-time view of the negotiator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegotiatorStatus {
    /// Tier the negotiator was created for
    pub tier: CapabilityTier,
    /// Current phase
    pub phase: NegotiationPhase,
    /// Length of the effective suite list
    pub suite_count: usize,
    /// Number of substitutions performed
    pub fallback_count: u64,
    /// When the first substitution happened
    pub fallen_back_at: Option<DateTime<Utc>>,
}

#[derive(Debug)]
struct EffectiveSuites {
    suites: CipherSuiteList,
    phase: NegotiationPhase,
    fallback_count: u64,
    fallen_back_at: Option<DateTime<Utc>>,
}

/// Holds the effective cipher suites and applies policy to targets
#[derive(Debug)]
pub struct SuiteNegotiator {
    tier: CapabilityTier,
    // Guards the whole read-set-fallback-set sequence.
    state: Mutex<EffectiveSuites>,
}

impl SuiteNegotiator {
    /// Start from the tier's default suite list
    #[must_use]
    pub fn new(tier: CapabilityTier) -> Self {
        Self::from_parts(tier, PolicyTable::cipher_suites_for(tier))
    }

    /// Start from an explicit suite list
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError::Config`] if `suites` is empty.
    pub fn with_suites(tier: CapabilityTier, suites: CipherSuiteList) -> Result<Self, PolicyError> {
        if suites.is_empty() {
            return Err(PolicyError::config("initial cipher suite list is empty", "initial_suites"));
        }
        Ok(Self::from_parts(tier, suites))
    }

    /// Build from configuration, resolving the tier once
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or no tier can be resolved.
    pub fn from_config(config: &PolicyConfig) -> Result<Self, PolicyError> {
        config.validate()?;
        let tier = config.resolve_tier()?;
        match &config.initial_suites {
            Some(suites) => Self::with_suites(tier, suites.clone()),
            None => Ok(Self::new(tier)),
        }
    }

    fn from_parts(tier: CapabilityTier, suites: CipherSuiteList) -> Self {
        debug!(tier = %tier, suite_count = suites.len(), "Created suite negotiator");
        Self {
            tier,
            state: Mutex::new(EffectiveSuites {
                suites,
                phase: NegotiationPhase::Initial,
                fallback_count: 0,
                fallen_back_at: None,
            }),
        }
    }

    /// Tier the negotiator was created for
    #[must_use]
    pub fn tier(&self) -> CapabilityTier {
        self.tier
    }

    /// Snapshot of the effective suite list
    #[must_use]
    pub fn effective_suites(&self) -> CipherSuiteList {
        self.state.lock().suites.clone()
    }

    /// Current phase
    #[must_use]
    pub fn phase(&self) -> NegotiationPhase {
        self.state.lock().phase
    }

    /// Snapshot of phase, list size and fallback history
    #[must_use]
    pub fn status(&self) -> NegotiatorStatus {
        let state = self.state.lock();
        NegotiatorStatus {
            tier: self.tier,
            phase: state.phase,
            suite_count: state.suites.len(),
            fallback_count: state.fallback_count,
            fallen_back_at: state.fallen_back_at,
        }
    }

    /// Enable the effective suites on `target`, falling back once on rejection.
    ///
    /// An invalid-argument rejection replaces the effective list with
    /// `target.supported_cipher_suites()` for all future callers, then sets
    /// that list. The second set is not retried.
    ///
    /// # Errors
    ///
    /// - [`PolicyError::UnrecoverableCipherRejection`] if the target rejects
    ///   its own supported list, or reports none.
    /// - [`PolicyError::Target`] for I/O and state failures from either set, unchanged.
    pub fn apply_cipher_suites<T>(&self, target: &mut T) -> Result<(), PolicyError>
    where
        T: TlsTarget + ?Sized,
    {
        let mut state = self.state.lock();

        let rejection = match target.set_enabled_cipher_suites(&state.suites) {
            Ok(()) => {
                if state.phase == NegotiationPhase::Initial {
                    state.phase = NegotiationPhase::Stable;
                }
                return Ok(());
            }
            Err(err) if err.is_invalid_argument() => err,
            Err(err) => return Err(PolicyError::Target(err)),
        };

        let supported = target.supported_cipher_suites();
        warn!(
            error_code = %ErrorCode::InvalidCipherSuite,
            reason = %rejection,
            "Setting enabled cipher suites failed"
        );
        if supported.is_empty() {
            return Err(PolicyError::UnrecoverableCipherRejection {
                message: "target reported no supported cipher suites".to_string(),
                supported_count: 0,
                source: rejection,
            });
        }
        warn!(suite_count = supported.len(), "Using {} supported suites", supported.len());

        state.suites = supported;
        state.phase = NegotiationPhase::FallenBack;
        state.fallback_count = state.fallback_count.saturating_add(1);
        if state.fallen_back_at.is_none() {
            state.fallen_back_at = Some(Utc::now());
        }

        target.set_enabled_cipher_suites(&state.suites).map_err(|source| {
            if source.is_invalid_argument() {
                PolicyError::UnrecoverableCipherRejection {
                    message: "target rejected its own supported cipher suites".to_string(),
                    supported_count: state.suites.len(),
                    source,
                }
            } else {
                PolicyError::Target(source)
            }
        })
    }

    /// Apply protocol and cipher policy for `tier` to `target` and hand it back.
    ///
    /// # Errors
    ///
    /// Returns target failures unchanged, or
    /// [`PolicyError::UnrecoverableCipherRejection`] from
    /// [`Self::apply_cipher_suites`].
    pub fn configure_socket<T>(&self, mut target: T, tier: CapabilityTier) -> Result<T, PolicyError>
    where
        T: TlsTarget,
    {
        let span = PolicySpan::new("configure_socket", tier);

        let result = span.in_scope(|| -> Result<(), PolicyError> {
            target.set_enabled_protocol_versions(&PolicyTable::protocols_for(tier))?;
            self.apply_cipher_suites(&mut target)
        });

        match result {
            Ok(()) => {
                span.complete(self.status().suite_count);
                Ok(target)
            }
            Err(err) => {
                span.error(&err);
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::policy::ProtocolVersionList;
    use crate::target::TargetError;

    /// Accepts only names from its supported list
    struct StrictTarget {
        supported: CipherSuiteList,
        protocols: ProtocolVersionList,
        enabled: CipherSuiteList,
        set_calls: usize,
    }

    impl StrictTarget {
        fn new(names: &[&str]) -> Self {
            Self {
                supported: CipherSuiteList::from_static(names),
                protocols: ProtocolVersionList::default(),
                enabled: CipherSuiteList::default(),
                set_calls: 0,
            }
        }
    }

    impl TlsTarget for StrictTarget {
        fn set_enabled_protocol_versions(
            &mut self,
            protocols: &ProtocolVersionList,
        ) -> Result<(), TargetError> {
            self.protocols = protocols.clone();
            Ok(())
        }

        fn set_enabled_cipher_suites(
            &mut self,
            suites: &CipherSuiteList,
        ) -> Result<(), TargetError> {
            self.set_calls += 1;
            if let Some(bad) = suites.iter().find(|s| !self.supported.contains(s)) {
                return Err(TargetError::InvalidArgument(format!("unknown suite {bad}")));
            }
            self.enabled = suites.clone();
            Ok(())
        }

        fn supported_cipher_suites(&self) -> CipherSuiteList {
            self.supported.clone()
        }
    }

    #[test]
    fn test_accepted_list_moves_to_stable() {
        let negotiator = SuiteNegotiator::new(CapabilityTier::Modern);
        let defaults = PolicyTable::cipher_suites_for(CapabilityTier::Modern);
        let names: Vec<&str> = defaults.iter().map(String::as_str).collect();
        let mut target = StrictTarget::new(&names);

        assert_eq!(negotiator.phase(), NegotiationPhase::Initial);
        negotiator.apply_cipher_suites(&mut target).unwrap();
        assert_eq!(negotiator.phase(), NegotiationPhase::Stable);
        assert_eq!(target.enabled, defaults);
        assert_eq!(target.set_calls, 1);
    }

    #[test]
    fn test_rejection_installs_supported_list() {
        let negotiator = SuiteNegotiator::new(CapabilityTier::Legacy);
        let mut target =
            StrictTarget::new(&["SSL_RSA_WITH_RC4_128_SHA", "SSL_RSA_WITH_DES_CBC_SHA"]);

        negotiator.apply_cipher_suites(&mut target).unwrap();

        let status = negotiator.status();
        assert_eq!(status.phase, NegotiationPhase::FallenBack);
        assert_eq!(status.fallback_count, 1);
        assert!(status.fallen_back_at.is_some());
        assert_eq!(negotiator.effective_suites(), target.supported);
        assert_eq!(target.enabled, target.supported);
        assert_eq!(target.set_calls, 2);
    }

    #[test]
    fn test_empty_supported_list_is_fatal() {
        let negotiator = SuiteNegotiator::new(CapabilityTier::Modern);
        let mut target = StrictTarget::new(&[]);

        let err = negotiator.apply_cipher_suites(&mut target).unwrap_err();
        assert!(matches!(
            err,
            PolicyError::UnrecoverableCipherRejection { supported_count: 0, .. }
        ));
        assert_eq!(
            negotiator.effective_suites(),
            PolicyTable::cipher_suites_for(CapabilityTier::Modern)
        );
    }

    #[test]
    fn test_configure_socket_sets_tier_protocols() {
        let negotiator = SuiteNegotiator::new(CapabilityTier::Standard);
        let target = StrictTarget::new(&["TLS_RSA_WITH_AES_128_CBC_SHA"]);

        let target = negotiator.configure_socket(target, CapabilityTier::Standard).unwrap();
        assert_eq!(target.protocols, PolicyTable::protocols_for(CapabilityTier::Standard));
        assert_eq!(target.enabled.as_slice(), ["TLS_RSA_WITH_AES_128_CBC_SHA"]);
    }

    #[test]
    fn test_with_suites_rejects_empty() {
        let result =
            SuiteNegotiator::with_suites(CapabilityTier::Modern, CipherSuiteList::default());
        assert!(matches!(result, Err(PolicyError::Config { .. })));
    }

    #[test]
    fn test_from_config_uses_initial_suites() {
        let suites = CipherSuiteList::from_static(&["TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256"]);
        let config =
            PolicyConfig::new().with_platform_level(20).with_initial_suites(suites.clone());
        let negotiator = SuiteNegotiator::from_config(&config).unwrap();
        assert_eq!(negotiator.tier(), CapabilityTier::Modern);
        assert_eq!(negotiator.effective_suites(), suites);
    }
}
