#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! # Policy Error Handling
//!
//! Error types for policy selection and application:
//! - Error codes grouped by family (I/O, configuration, internal)
//! - Severity levels and recovery hints
//! - Pass-through of connection target failures
//!
//! Only one failure class is ever intercepted: a target rejecting the held
//! cipher-suite list as an invalid argument. That rejection is handled by the
//! negotiator and never reaches the caller; everything here is what remains.

use std::fmt;

use thiserror::Error;

use crate::target::TargetError;

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Informational - operation succeeded but with warnings
    Info,
    /// Warning - operation completed but with potential issues
    Warning,
    /// Error - operation failed but may be recoverable
    Error,
    /// Critical - operation failed and requires intervention
    Critical,
}

/// Policy error codes for easy identification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Crypto provider errors (5000-5099)
    /// The TLS library refused to build a configuration.
    CryptoProviderInitFailed = 5001,

    // IO errors (6000-6099)
    /// The connection target reported an I/O failure.
    IoError = 6001,

    // Configuration errors (7000-7099)
    /// Invalid configuration.
    InvalidConfig = 7001,
    /// Cipher-suite list not recognised by the target's naming scheme.
    InvalidCipherSuite = 7004,
    /// No enabled protocol version is usable.
    InvalidProtocolVersion = 7005,
    /// Capability tier outside the known set.
    UnrecognizedTier = 7006,

    // Internal errors (9000-9099)
    /// Target rejected its own supported-suite list.
    InvariantViolation = 9003,
    /// Target was in a state that does not accept configuration.
    UnexpectedState = 9004,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCode::CryptoProviderInitFailed => write!(f, "CRYPTO_PROVIDER_INIT_FAILED"),
            ErrorCode::IoError => write!(f, "IO_ERROR"),
            ErrorCode::InvalidConfig => write!(f, "INVALID_CONFIG"),
            ErrorCode::InvalidCipherSuite => write!(f, "INVALID_CIPHER_SUITE"),
            ErrorCode::InvalidProtocolVersion => write!(f, "INVALID_PROTOCOL_VERSION"),
            ErrorCode::UnrecognizedTier => write!(f, "UNRECOGNIZED_TIER"),
            ErrorCode::InvariantViolation => write!(f, "INVARIANT_VIOLATION"),
            ErrorCode::UnexpectedState => write!(f, "UNEXPECTED_STATE"),
        }
    }
}

/// Recovery hints for error handling
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecoveryHint {
    /// No recovery possible
    NoRecovery,
    /// Retry the operation with a fresh connection target
    Retry,
    /// Reconfigure and retry
    Reconfigure {
        /// Configuration field to modify.
        field: String,
        /// Suggested new value or approach.
        suggestion: String,
    },
    /// Check network connectivity
    CheckNetworkConnectivity,
}

/// Errors surfaced by policy selection and application
#[derive(Error, Debug)]
pub enum PolicyError {
    /// The target rejected even its own self-reported supported suites.
    #[error("cipher suites rejected after fallback ({supported_count} supported): {message}")]
    UnrecoverableCipherRejection {
        /// Human-readable error message.
        message: String,
        /// Number of suites the target reported as supported.
        supported_count: usize,
        /// The rejection returned by the target.
        #[source]
        source: TargetError,
    },

    /// Capability tier input outside the known set.
    #[error("unrecognized capability tier: {value:?}")]
    UnrecognizedTier {
        /// The offending input.
        value: String,
    },

    /// Connection target failure passed through unchanged.
    #[error(transparent)]
    Target(#[from] TargetError),

    /// None of the enabled protocol versions can be spoken.
    #[error("no usable protocol version in [{protocols}]")]
    UnsupportedProtocol {
        /// The enabled protocol list, comma separated.
        protocols: String,
    },

    /// Configuration error
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message.
        message: String,
        /// Configuration field that caused the error.
        field: Option<String>,
    },

    /// TLS library error while building a configuration.
    #[error("TLS library error: {0}")]
    Tls(#[from] rustls::Error),
}

impl PolicyError {
    /// Create a configuration error for `field`
    pub fn config(message: impl Into<String>, field: impl Into<String>) -> Self {
        PolicyError::Config { message: message.into(), field: Some(field.into()) }
    }

    /// Get error code
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            PolicyError::UnrecoverableCipherRejection { .. } => ErrorCode::InvariantViolation,
            PolicyError::UnrecognizedTier { .. } => ErrorCode::UnrecognizedTier,
            PolicyError::Target(TargetError::InvalidArgument(_)) => ErrorCode::InvalidCipherSuite,
            PolicyError::Target(TargetError::Io(_)) => ErrorCode::IoError,
            PolicyError::Target(TargetError::State(_)) => ErrorCode::UnexpectedState,
            PolicyError::UnsupportedProtocol { .. } => ErrorCode::InvalidProtocolVersion,
            PolicyError::Config { .. } => ErrorCode::InvalidConfig,
            PolicyError::Tls(_) => ErrorCode::CryptoProviderInitFailed,
        }
    }

    /// Get error severity
    #[must_use]
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            PolicyError::UnrecoverableCipherRejection { .. }
            | PolicyError::UnrecognizedTier { .. } => ErrorSeverity::Critical,
            PolicyError::Target(TargetError::Io(_)) => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }

    /// Get recovery hint
    #[must_use]
    pub fn recovery_hint(&self) -> RecoveryHint {
        match self {
            PolicyError::Target(TargetError::Io(_)) => RecoveryHint::CheckNetworkConnectivity,
            PolicyError::Target(TargetError::State(_)) => RecoveryHint::Retry,
            PolicyError::UnrecognizedTier { .. } => RecoveryHint::Reconfigure {
                field: "tier".to_string(),
                suggestion: "use one of: legacy, standard, modern".to_string(),
            },
            PolicyError::UnsupportedProtocol { .. } => RecoveryHint::Reconfigure {
                field: "tier".to_string(),
                suggestion: "select a tier whose protocol list includes TLSv1.2".to_string(),
            },
            PolicyError::Config { field, .. } => RecoveryHint::Reconfigure {
                field: field.clone().unwrap_or_else(|| "unknown".to_string()),
                suggestion: "check the policy configuration".to_string(),
            },
            PolicyError::UnrecoverableCipherRejection { .. }
            | PolicyError::Target(TargetError::InvalidArgument(_))
            | PolicyError::Tls(_) => RecoveryHint::NoRecovery,
        }
    }

    /// Check if error is recoverable
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self.recovery_hint(), RecoveryHint::NoRecovery)
    }
}
