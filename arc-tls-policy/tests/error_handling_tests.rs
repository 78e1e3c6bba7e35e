#![deny(unsafe_code)]
// Test files use unwrap() for assertions
#![allow(clippy::unwrap_used)]

//! Error taxonomy tests
//!
//! Tests for error codes, severities, recovery hints and pass-through

use arc_tls_policy::error::*;
use arc_tls_policy::{CapabilityTier, PolicyConfig, TargetError};

#[test]
fn test_error_code_display() {
    assert_eq!(ErrorCode::IoError.to_string(), "IO_ERROR");
    assert_eq!(ErrorCode::InvalidConfig.to_string(), "INVALID_CONFIG");
    assert_eq!(ErrorCode::InvariantViolation.to_string(), "INVARIANT_VIOLATION");
}

#[test]
fn test_error_code_families() {
    assert_eq!(ErrorCode::IoError as u32 / 1000, 6);
    assert_eq!(ErrorCode::InvalidCipherSuite as u32 / 1000, 7);
    assert_eq!(ErrorCode::UnrecognizedTier as u32 / 1000, 7);
    assert_eq!(ErrorCode::InvariantViolation as u32 / 1000, 9);
}

#[test]
fn test_error_severity_comparison() {
    assert!(ErrorSeverity::Critical > ErrorSeverity::Error);
    assert!(ErrorSeverity::Error > ErrorSeverity::Warning);
    assert!(ErrorSeverity::Warning > ErrorSeverity::Info);
}

#[test]
fn test_unrecognized_tier_fails_loudly() {
    let err = "ultra".parse::<CapabilityTier>().unwrap_err();

    assert_eq!(err.code(), ErrorCode::UnrecognizedTier);
    assert_eq!(err.severity(), ErrorSeverity::Critical);
    assert!(err.to_string().contains("ultra"));
    match err.recovery_hint() {
        RecoveryHint::Reconfigure { field, .. } => assert_eq!(field, "tier"),
        other => unreachable!("unexpected hint {other:?}"),
    }
}

#[test]
fn test_io_error_passes_through_transparently() {
    let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused by peer");
    let err = PolicyError::from(TargetError::from(io_err));

    assert_eq!(err.code(), ErrorCode::IoError);
    assert_eq!(err.recovery_hint(), RecoveryHint::CheckNetworkConnectivity);
    assert!(err.to_string().contains("refused by peer"));
}

#[test]
fn test_state_error_is_retryable() {
    let err = PolicyError::from(TargetError::State("handshake started".to_string()));

    assert_eq!(err.code(), ErrorCode::UnexpectedState);
    assert_eq!(err.recovery_hint(), RecoveryHint::Retry);
    assert!(err.is_recoverable());
}

#[test]
fn test_missing_tier_source_is_config_error() {
    let err = PolicyConfig::new().resolve_tier().unwrap_err();

    assert_eq!(err.code(), ErrorCode::InvalidConfig);
    assert!(err.is_recoverable());
}

#[test]
fn test_rustls_error_conversion() {
    let err = PolicyError::from(rustls::Error::General("no usable cipher suites".to_string()));

    assert_eq!(err.code(), ErrorCode::CryptoProviderInitFailed);
    assert!(!err.is_recoverable());
}
