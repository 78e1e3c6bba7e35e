//! Scripted connection targets shared by the integration tests

#![allow(dead_code)]

use arc_tls_policy::{CipherSuiteList, ProtocolVersionList, TargetError, TlsTarget};

/// Suites an old stack reports, in its own naming
pub const OLD_STACK_SUITES: [&str; 4] = [
    "SSL_RSA_WITH_RC4_128_MD5",
    "SSL_RSA_WITH_RC4_128_SHA",
    "TLS_RSA_WITH_AES_128_CBC_SHA",
    "SSL_RSA_WITH_3DES_EDE_CBC_SHA",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behaviour {
    /// Accept any list made only of supported names
    Strict,
    /// Reject every list, including the supported one
    RejectAll,
    /// Fail every suite call with an I/O error
    BrokenPipe,
    /// Fail every suite call with a state error
    Closed,
    /// Reject the first list as invalid, then fail with an I/O error
    RejectThenBrokenPipe,
}

#[derive(Debug)]
pub struct ScriptedTarget {
    pub behaviour: Behaviour,
    pub supported: CipherSuiteList,
    pub protocols: Option<ProtocolVersionList>,
    pub enabled: Option<CipherSuiteList>,
    pub suite_calls: usize,
}

impl ScriptedTarget {
    pub fn new(behaviour: Behaviour, supported: &[&str]) -> Self {
        Self {
            behaviour,
            supported: CipherSuiteList::from_static(supported),
            protocols: None,
            enabled: None,
            suite_calls: 0,
        }
    }

    pub fn old_stack() -> Self {
        Self::new(Behaviour::Strict, &OLD_STACK_SUITES)
    }
}

impl TlsTarget for ScriptedTarget {
    fn set_enabled_protocol_versions(
        &mut self,
        protocols: &ProtocolVersionList,
    ) -> Result<(), TargetError> {
        self.protocols = Some(protocols.clone());
        Ok(())
    }

    fn set_enabled_cipher_suites(&mut self, suites: &CipherSuiteList) -> Result<(), TargetError> {
        self.suite_calls += 1;
        match self.behaviour {
            Behaviour::Strict => {
                if let Some(bad) = suites.iter().find(|s| !self.supported.contains(s)) {
                    return Err(TargetError::InvalidArgument(format!("cipher {bad} not supported")));
                }
            }
            Behaviour::RejectAll => {
                return Err(TargetError::InvalidArgument("cipher naming rejected".to_string()));
            }
            Behaviour::BrokenPipe => {
                return Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe").into());
            }
            Behaviour::Closed => return Err(TargetError::State("socket closed".to_string())),
            Behaviour::RejectThenBrokenPipe => {
                if self.suite_calls == 1 {
                    return Err(TargetError::InvalidArgument("cipher naming rejected".to_string()));
                }
                return Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe").into());
            }
        }
        self.enabled = Some(suites.clone());
        Ok(())
    }

    fn supported_cipher_suites(&self) -> CipherSuiteList {
        self.supported.clone()
    }
}
