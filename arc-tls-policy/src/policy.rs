#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! TLS Policy Table
//!
//! Static, preference-ranked cipher-suite and protocol-version lists keyed by
//! [`CapabilityTier`].
//!
//! ```rust
//! use arc_tls_policy::{CapabilityTier, PolicyTable};
//!
//! let protocols = PolicyTable::protocols_for(CapabilityTier::Modern);
//! assert_eq!(protocols.as_slice(), ["TLSv1.2", "TLSv1.1", "TLSv1"]);
//! ```

use std::fmt;

use crate::tier::CapabilityTier;

// =============================================================================
// EMERGENCY FALLBACK - non-ECC suites shared by every tier, always ranked last
// =============================================================================

/// Weaker non-elliptic-curve suites kept for restrictive peers.
pub const EMERGENCY_FALLBACK_SUITES: [&str; 3] = [
    "TLS_RSA_WITH_AES_256_CBC_SHA",
    "TLS_RSA_WITH_AES_128_CBC_SHA",
    "TLS_RSA_WITH_3DES_EDE_CBC_SHA",
];

// =============================================================================
// CIPHER SUITES
// =============================================================================

/// Suites for platforms with GCM elliptic-curve support.
pub const MODERN_CIPHER_SUITES: [&str; 7] = [
    "TLS_ECDHE_ECDSA_WITH_AES_128_GCM_SHA256",
    "TLS_ECDHE_RSA_WITH_AES_128_GCM_SHA256",
    "TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA",
    "TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA",
    EMERGENCY_FALLBACK_SUITES[0],
    EMERGENCY_FALLBACK_SUITES[1],
    EMERGENCY_FALLBACK_SUITES[2],
];

/// Suites for platforms that predate the GCM elliptic-curve suites.
pub const LEGACY_CIPHER_SUITES: [&str; 7] = [
    "TLS_ECDHE_ECDSA_WITH_AES_256_CBC_SHA",
    "TLS_ECDHE_RSA_WITH_AES_256_CBC_SHA",
    "TLS_ECDHE_ECDSA_WITH_AES_128_CBC_SHA",
    "TLS_ECDHE_RSA_WITH_AES_128_CBC_SHA",
    EMERGENCY_FALLBACK_SUITES[0],
    EMERGENCY_FALLBACK_SUITES[1],
    EMERGENCY_FALLBACK_SUITES[2],
];

// =============================================================================
// PROTOCOL VERSIONS
// =============================================================================

/// Protocols for platforms that can speak TLSv1.2.
pub const MODERN_PROTOCOLS: [&str; 3] = ["TLSv1.2", "TLSv1.1", "TLSv1"];

/// Protocols for platforms limited to TLSv1.
pub const LEGACY_PROTOCOLS: [&str; 1] = ["TLSv1"];

macro_rules! name_list {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
        pub struct $name(Vec<String>);

        impl $name {
            /// Build a list from static names
            #[must_use]
            pub fn from_static(names: &[&str]) -> Self {
                Self(names.iter().map(|n| (*n).to_string()).collect())
            }

            /// Names in preference order
            #[must_use]
            pub fn as_slice(&self) -> &[String] {
                &self.0
            }

            /// Iterate names in preference order
            pub fn iter(&self) -> std::slice::Iter<'_, String> {
                self.0.iter()
            }

            /// Number of names
            #[must_use]
            pub fn len(&self) -> usize {
                self.0.len()
            }

            /// True if the list has no names
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            /// Most preferred name
            #[must_use]
            pub fn first(&self) -> Option<&str> {
                self.0.first().map(String::as_str)
            }

            /// True if `name` is in the list
            #[must_use]
            pub fn contains(&self, name: &str) -> bool {
                self.0.iter().any(|n| n == name)
            }

            /// True if the list ends with `tail`, in order
            #[must_use]
            pub fn ends_with(&self, tail: &[&str]) -> bool {
                self.0.len() >= tail.len()
                    && self.0[self.0.len() - tail.len()..].iter().zip(tail).all(|(a, b)| a == b)
            }
        }

        impl From<Vec<String>> for $name {
            fn from(names: Vec<String>) -> Self {
                Self(names)
            }
        }

        impl FromIterator<String> for $name {
            fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
                Self(iter.into_iter().collect())
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a String;
            type IntoIter = std::slice::Iter<'a, String>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0.join(", "))
            }
        }
    };
}

name_list!(
    /// Ordered cipher-suite names, most preferred first
    CipherSuiteList
);

name_list!(
    /// Ordered protocol-version names, strongest first
    ProtocolVersionList
);

/// Tier-keyed policy lookups
pub struct PolicyTable;

impl PolicyTable {
    /// Preference-ranked cipher suites for `tier`
    #[must_use]
    pub fn cipher_suites_for(tier: CapabilityTier) -> CipherSuiteList {
        if tier.supports_modern_suites() {
            CipherSuiteList::from_static(&MODERN_CIPHER_SUITES)
        } else {
            CipherSuiteList::from_static(&LEGACY_CIPHER_SUITES)
        }
    }

    /// Protocol versions for `tier`, strongest first
    ///
    /// Protocol names are never rejected as malformed the way suite names
    /// are, so there is no negotiation step for these.
    #[must_use]
    pub fn protocols_for(tier: CapabilityTier) -> ProtocolVersionList {
        if tier.supports_modern_protocols() {
            ProtocolVersionList::from_static(&MODERN_PROTOCOLS)
        } else {
            ProtocolVersionList::from_static(&LEGACY_PROTOCOLS)
        }
    }

    /// Whether `suite` is one of the weak emergency fallbacks
    #[must_use]
    pub fn is_emergency_fallback(suite: &str) -> bool {
        EMERGENCY_FALLBACK_SUITES.contains(&suite)
    }
}
