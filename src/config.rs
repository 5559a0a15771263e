use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::RelayError;

/// Relay server configuration. Built in code; there are no flags or config files.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Address the HTTP/websocket listener binds to
    pub bind_addr: SocketAddr,

    /// Directory holding `index.html`, `static/` and `js/`
    pub public_dir: PathBuf,

    /// Certificate and key tried at startup before falling back to plain HTTP
    pub tls: TlsPaths,

    pub name_policy: NamePolicy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
}

/// Whether display names and room names are checked before use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamePolicy {
    /// Any string is accepted, including the empty one.
    #[default]
    Unchecked,
    /// Rejects blank names, control characters, and names longer than `max_len` chars.
    Validated { max_len: usize },
}

impl NamePolicy {
    pub fn check(self, name: &str) -> Result<(), RelayError> {
        match self {
            NamePolicy::Unchecked => Ok(()),
            NamePolicy::Validated { max_len } => {
                if name.trim().is_empty()
                    || name.chars().count() > max_len
                    || name.chars().any(char::is_control)
                {
                    Err(RelayError::InvalidName(name.to_string()))
                } else {
                    Ok(())
                }
            }
        }
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            public_dir: PathBuf::from("public"),
            tls: TlsPaths {
                cert_path: PathBuf::from("ssl/relay/certificate.pem"),
                key_path: PathBuf::from("ssl/relay/private.key"),
            },
            name_policy: NamePolicy::Unchecked,
        }
    }
}

impl RelayConfig {
    #[must_use]
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    #[must_use]
    pub fn with_public_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.public_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_tls(mut self, cert_path: impl Into<PathBuf>, key_path: impl Into<PathBuf>) -> Self {
        self.tls = TlsPaths {
            cert_path: cert_path.into(),
            key_path: key_path.into(),
        };
        self
    }

    #[must_use]
    pub fn with_name_policy(mut self, policy: NamePolicy) -> Self {
        self.name_policy = policy;
        self
    }
}
