#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! # rustls Connection Target
//!
//! A [`TlsTarget`] backed by a rustls [`CryptoProvider`]. Suite names follow
//! the rustls `CipherSuite` naming (`TLS13_AES_256_GCM_SHA384`,
//! `TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256`, ...); any other name is rejected
//! as an invalid argument, which makes the negotiator fall back to the
//! provider's own list.
//!
//! ```no_run
//! use arc_tls_policy::{CapabilityTier, RustlsTarget, SuiteNegotiator};
//!
//! # fn example() -> Result<(), arc_tls_policy::PolicyError> {
//! let negotiator = SuiteNegotiator::new(CapabilityTier::Modern);
//! let target = negotiator.configure_socket(RustlsTarget::aws_lc_rs(), CapabilityTier::Modern)?;
//! let client_config = target.client_config(rustls::RootCertStore::empty())?;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use rustls::crypto::CryptoProvider;
use rustls::{ClientConfig, RootCertStore, SupportedCipherSuite, SupportedProtocolVersion};
use tracing::debug;

use crate::error::PolicyError;
use crate::policy::{CipherSuiteList, ProtocolVersionList};
use crate::target::{TargetError, TlsTarget};

/// Pre-handshake rustls client settings that accept policy
#[derive(Debug, Clone)]
pub struct RustlsTarget {
    provider: CryptoProvider,
    enabled_suites: Vec<SupportedCipherSuite>,
    enabled_protocols: ProtocolVersionList,
}

impl RustlsTarget {
    /// Wrap `provider`; everything it offers starts enabled
    #[must_use]
    pub fn new(provider: CryptoProvider) -> Self {
        let enabled_suites = provider.cipher_suites.clone();
        Self {
            provider,
            enabled_suites,
            enabled_protocols: ProtocolVersionList::from_static(&["TLSv1.3", "TLSv1.2"]),
        }
    }

    /// Target over the aws-lc-rs provider
    #[must_use]
    pub fn aws_lc_rs() -> Self {
        Self::new(rustls::crypto::aws_lc_rs::default_provider())
    }

    /// Currently enabled suite names
    #[must_use]
    pub fn enabled_cipher_suites(&self) -> CipherSuiteList {
        self.enabled_suites.iter().map(suite_name).collect()
    }

    /// Currently enabled protocol names
    #[must_use]
    pub fn enabled_protocol_versions(&self) -> &ProtocolVersionList {
        &self.enabled_protocols
    }

    /// Build a client configuration restricted to the enabled policy.
    ///
    /// Protocol names rustls cannot speak (`TLSv1`, `TLSv1.1`) are dropped.
    ///
    /// # Errors
    ///
    /// - [`PolicyError::UnsupportedProtocol`] if no enabled protocol is TLSv1.2 or TLSv1.3.
    /// - [`PolicyError::Tls`] if rustls rejects the resulting combination.
    pub fn client_config(&self, roots: RootCertStore) -> Result<ClientConfig, PolicyError> {
        let versions: Vec<&'static SupportedProtocolVersion> =
            self.enabled_protocols.iter().filter_map(|name| protocol_version(name)).collect();
        if versions.is_empty() {
            return Err(PolicyError::UnsupportedProtocol {
                protocols: self.enabled_protocols.to_string(),
            });
        }
        debug!(
            versions = versions.len(),
            suites = self.enabled_suites.len(),
            "Building rustls client config"
        );

        let provider =
            CryptoProvider { cipher_suites: self.enabled_suites.clone(), ..self.provider.clone() };

        let config = ClientConfig::builder_with_provider(Arc::new(provider))
            .with_protocol_versions(&versions)?
            .with_root_certificates(roots)
            .with_no_client_auth();
        Ok(config)
    }
}

impl TlsTarget for RustlsTarget {
    fn set_enabled_protocol_versions(
        &mut self,
        protocols: &ProtocolVersionList,
    ) -> Result<(), TargetError> {
        self.enabled_protocols = protocols.clone();
        Ok(())
    }

    fn set_enabled_cipher_suites(&mut self, suites: &CipherSuiteList) -> Result<(), TargetError> {
        let mut enabled = Vec::with_capacity(suites.len());
        for name in suites {
            let suite = self
                .provider
                .cipher_suites
                .iter()
                .find(|s| suite_name(s) == *name)
                .ok_or_else(|| TargetError::InvalidArgument(format!("unsupported suite {name}")))?;
            enabled.push(*suite);
        }
        self.enabled_suites = enabled;
        Ok(())
    }

    fn supported_cipher_suites(&self) -> CipherSuiteList {
        self.provider.cipher_suites.iter().map(suite_name).collect()
    }
}

fn suite_name(suite: &SupportedCipherSuite) -> String {
    format!("{:?}", suite.suite())
}

fn protocol_version(name: &str) -> Option<&'static SupportedProtocolVersion> {
    match name {
        "TLSv1.3" => Some(&rustls::version::TLS13),
        "TLSv1.2" => Some(&rustls::version::TLS12),
        _ => None,
    }
}
