//! Start-up configuration from the process environment

use jwcert::CertificateVerifier;
use std::net::{AddrParseError, SocketAddr};
use thiserror::Error;

/// Default public key (PEM) for certificates verified without an override
pub const PUBLIC_KEY_VAR: &str = "JWT_PUBLIC_KEY";
pub const BIND_ADDR_VAR: &str = "JWCERT_BIND_ADDR";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid bind address {value:?}: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: AddrParseError,
    },
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub public_key_pem: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through `lookup`, which maps a variable name to
    /// its value
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_value = lookup(BIND_ADDR_VAR)
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = bind_value
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: bind_value.clone(),
                source,
            })?;

        let public_key_pem = lookup(PUBLIC_KEY_VAR)
            .filter(|value| !value.trim().is_empty())
            .map(|value| expand_escaped_newlines(&value));

        Ok(Self {
            bind_addr,
            public_key_pem,
        })
    }

    /// A verifier using the configured default key, if any
    pub fn verifier(&self) -> CertificateVerifier {
        match &self.public_key_pem {
            Some(pem) => CertificateVerifier::new().default_key(pem.clone()),
            None => CertificateVerifier::new(),
        }
    }
}

/// Turn literal `\n` sequences into line breaks, as dotenv files write them.
/// Values that already span lines are kept as they are.
fn expand_escaped_newlines(value: &str) -> String {
    if value.contains('\n') {
        value.to_owned()
    } else {
        value.replace("\\n", "\n")
    }
}
