#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! # Connection Target Contract
//!
//! The minimal capability a not-yet-connected TLS socket must expose so that
//! policy can be applied to it. The handshake, the socket and its lifetime all
//! belong to the caller.

use thiserror::Error;

use crate::policy::{CipherSuiteList, ProtocolVersionList};

/// Failures reported by a connection target
#[derive(Error, Debug)]
pub enum TargetError {
    /// The target's TLS stack does not recognise the given naming.
    ///
    /// This is the only class the negotiator intercepts.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Socket-level failure.
    #[error("target I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The target cannot be configured in its current state.
    #[error("target state error: {0}")]
    State(String),
}

impl TargetError {
    /// True for the invalid-argument class that triggers a suite fallback
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, TargetError::InvalidArgument(_))
    }
}

/// A TLS connection target that accepts protocol and cipher policy.
pub trait TlsTarget {
    /// Restrict the protocol versions the handshake may negotiate.
    ///
    /// # Errors
    ///
    /// Well-formed input is always accepted; I/O or state failures are
    /// passed through to the caller untouched.
    fn set_enabled_protocol_versions(
        &mut self,
        protocols: &ProtocolVersionList,
    ) -> Result<(), TargetError>;

    /// Restrict the cipher suites the handshake may negotiate.
    ///
    /// # Errors
    ///
    /// Returns [`TargetError::InvalidArgument`] when any name is not part of
    /// the stack's naming scheme.
    fn set_enabled_cipher_suites(&mut self, suites: &CipherSuiteList) -> Result<(), TargetError>;

    /// The stack's authoritative list of suites it can enable.
    fn supported_cipher_suites(&self) -> CipherSuiteList;
}

impl<T: TlsTarget + ?Sized> TlsTarget for &mut T {
    fn set_enabled_protocol_versions(
        &mut self,
        protocols: &ProtocolVersionList,
    ) -> Result<(), TargetError> {
        (**self).set_enabled_protocol_versions(protocols)
    }

    fn set_enabled_cipher_suites(&mut self, suites: &CipherSuiteList) -> Result<(), TargetError> {
        (**self).set_enabled_cipher_suites(suites)
    }

    fn supported_cipher_suites(&self) -> CipherSuiteList {
        (**self).supported_cipher_suites()
    }
}
