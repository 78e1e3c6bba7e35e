#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! # Structured Tracing for Policy Application
//!
//! - Span-based tracking of each socket configuration
//! - Structured fields (`tier`, `suite_count`, `error_code`)
//! - Subscriber setup with `RUST_LOG` style filtering

use std::time::{Duration, Instant};

use tracing::{Level, Span, debug, error, info, span, trace};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::PolicyError;
use crate::tier::CapabilityTier;

/// Tracing configuration
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Default log level when `RUST_LOG` is unset
    pub log_level: Level,
    /// Include thread ids in output
    pub with_thread_ids: bool,
    /// Include the event target in output
    pub with_target: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self { log_level: Level::INFO, with_thread_ids: true, with_target: true }
    }
}

impl TracingConfig {
    /// Enable debug logging
    #[must_use]
    pub fn debug() -> Self {
        Self { log_level: Level::DEBUG, ..Default::default() }
    }

    /// Enable trace logging
    #[must_use]
    pub fn trace() -> Self {
        Self { log_level: Level::TRACE, ..Default::default() }
    }
}

/// Install a global subscriber for `config`
///
/// # Errors
///
/// Returns an error if a global subscriber is already set.
pub fn try_init_tracing(
    config: &TracingConfig,
) -> Result<(), tracing_subscriber::util::TryInitError> {
    let filter =
        EnvFilter::builder().with_default_directive(config.log_level.into()).from_env_lossy();

    tracing_subscriber::registry()
        .with(
            fmt::layer().with_target(config.with_target).with_thread_ids(config.with_thread_ids),
        )
        .with(filter)
        .try_init()
}

/// Install a global subscriber for `config`, ignoring an existing one
///
/// # Example
/// ```no_run
/// use arc_tls_policy::tracing::init_tracing;
///
/// init_tracing(&Default::default());
/// ```
pub fn init_tracing(config: &TracingConfig) {
    if let Err(err) = try_init_tracing(config) {
        debug!("Tracing subscriber already installed: {}", err);
    }
}

/// Span around one policy operation
#[derive(Debug)]
pub struct PolicySpan {
    span: Span,
    start_time: Instant,
}

impl PolicySpan {
    /// Create new policy operation span
    pub fn new(operation: &str, tier: CapabilityTier) -> Self {
        let span = span!(
            Level::INFO,
            "tls_policy",
            operation = %operation,
            tier = %tier,
        );

        span.in_scope(|| {
            trace!("Starting policy operation: {}", operation);
        });

        Self { span, start_time: Instant::now() }
    }

    /// Get elapsed time since span creation
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Enter span scope
    pub fn in_scope<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        self.span.in_scope(f)
    }

    /// Complete the span successfully
    pub fn complete(self, suite_count: usize) {
        let duration = self.start_time.elapsed();
        self.span.in_scope(|| {
            debug!(suite_count, "Policy applied in {}us", duration.as_micros());
        });
    }

    /// Complete the span with error
    pub fn error(self, err: &PolicyError) {
        let duration = self.start_time.elapsed();
        self.span.in_scope(|| {
            if err.is_recoverable() {
                info!(
                    error = %err,
                    error_code = %err.code(),
                    "Policy not applied after {:?}",
                    duration
                );
            } else {
                error!(
                    error = %err,
                    error_code = %err.code(),
                    severity = ?err.severity(),
                    "Policy application failed after {:?}",
                    duration
                );
            }
        });
    }
}
