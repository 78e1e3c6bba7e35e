#![deny(unsafe_code)]
#![allow(missing_docs)]
#![allow(clippy::print_stdout)]

//! Policy Selection Example
//!
//! Resolves the capability tier, applies policy to a rustls target and
//! prints what the negotiator settled on.
//!
//! Run with:
//! ```bash
//! ARC_TLS_TIER=modern cargo run --example configure_client
//! ```

use std::error::Error;
use std::sync::Arc;

use arc_tls_policy::*;

fn main() -> Result<(), Box<dyn Error>> {
    let config = PolicyConfig::new()
        .with_tier_env_var("ARC_TLS_TIER")
        .with_tracing_config(TracingConfig::debug());
    config.init_tracing();

    let config = match config.resolve_tier() {
        Ok(_) => config,
        Err(err) => {
            println!("No tier in ARC_TLS_TIER ({err}), using platform level 21\n");
            PolicyConfig { tier_env_var: None, ..config }.with_platform_level(21)
        }
    };

    let negotiator = Arc::new(SuiteNegotiator::from_config(&config)?);
    let tier = negotiator.tier();

    println!("=== Policy for tier '{tier}' ===");
    println!("  Protocols: {}", PolicyTable::protocols_for(tier));
    println!("  Preferred suites: {}\n", PolicyTable::cipher_suites_for(tier));

    let target = negotiator.configure_socket(RustlsTarget::aws_lc_rs(), tier)?;
    let status = negotiator.status();

    println!("Negotiator:");
    println!("  Phase: {:?}", status.phase);
    println!("  Fallbacks: {}", status.fallback_count);
    println!("  Effective suites ({}): {}\n", status.suite_count, negotiator.effective_suites());

    match target.client_config(rustls::RootCertStore::empty()) {
        Ok(_) => println!("rustls client config ready"),
        Err(err) => println!("rustls client config unavailable: {err} [{}]", err.code()),
    }

    Ok(())
}
