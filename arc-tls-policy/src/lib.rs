#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! # LatticeArc TLS Policy
//!
//! Connection-hardening policy for outbound TLS sockets: picks the cipher
//! suites and protocol versions a socket should negotiate for the platform's
//! capability tier, and applies them before the handshake.
//!
//! ## Features
//!
//! - **Tiered Policy**: preference-ranked suites and protocols per [`CapabilityTier`]
//! - **Self-Correcting**: one-shot fallback to the stack's own suites when the
//!   preferred naming is rejected, cached for the rest of the process
//! - **Thread-Safe**: a single lock-guarded negotiator shared by handle
//! - **rustls Adapter**: apply policy to a rustls client configuration
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use arc_tls_policy::*;
//!
//! # fn example() -> Result<(), PolicyError> {
//! let config = PolicyConfig::new().with_platform_level(21);
//! let negotiator = Arc::new(SuiteNegotiator::from_config(&config)?);
//!
//! let target = negotiator.configure_socket(RustlsTarget::aws_lc_rs(), negotiator.tier())?;
//! let client_config = target.client_config(rustls::RootCertStore::empty())?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Policy
//!
//! | Tier | Protocols | Suites |
//! |------|-----------|--------|
//! | `Legacy` | TLSv1 | ECDHE CBC, then RSA fallbacks |
//! | `Standard` | TLSv1.2, TLSv1.1, TLSv1 | ECDHE CBC, then RSA fallbacks |
//! | `Modern` | TLSv1.2, TLSv1.1, TLSv1 | ECDHE GCM/CBC, then RSA fallbacks |
//!
//! ## Fallback
//!
//! ```text
//! configure_socket(target, tier)
//!   ├─ target.set_enabled_protocol_versions(protocols_for(tier))
//!   └─ lock ─► target.set_enabled_cipher_suites(effective)
//!                 ├─ Ok ─────────────────────────────► done
//!                 └─ InvalidArgument
//!                       effective = target.supported_cipher_suites()
//!                       target.set_enabled_cipher_suites(effective)
//!                         ├─ Ok ─────────────────────► done (cached)
//!                         └─ Err ─► UnrecoverableCipherRejection
//! ```

pub mod config;
pub mod error;
pub mod negotiator;
pub mod policy;
pub mod rustls_target;
pub mod target;
pub mod tier;
pub mod tracing;

pub use config::PolicyConfig;
pub use error::{ErrorCode, ErrorSeverity, PolicyError, RecoveryHint};
pub use negotiator::{NegotiationPhase, NegotiatorStatus, SuiteNegotiator};
pub use policy::{
    CipherSuiteList, EMERGENCY_FALLBACK_SUITES, LEGACY_CIPHER_SUITES, LEGACY_PROTOCOLS,
    MODERN_CIPHER_SUITES, MODERN_PROTOCOLS, PolicyTable, ProtocolVersionList,
};
pub use rustls_target::RustlsTarget;
pub use target::{TargetError, TlsTarget};
pub use tier::{
    CapabilityTier, EnvTier, FixedTier, MODERN_PLATFORM_LEVEL, PlatformLevel,
    STANDARD_PLATFORM_LEVEL, TierSource,
};
pub use self::tracing::{PolicySpan, TracingConfig, init_tracing, try_init_tracing};
