use crate::error::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

pub const DEFAULT_SCHEME: &str = "http";
pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 10101;

/// `[scheme[+variant]://][host][:port]`
static ADDRESS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(([+a-z]+)://)?([0-9a-z.-]+)?(:([0-9]+))?$").expect("valid address pattern")
});

/// A server address. Two endpoints are equal when their normalized forms are equal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Endpoint {
    scheme: String,
    host: String,
    port: u16,
}

impl Endpoint {
    pub fn new(scheme: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        Self {
            scheme: scheme.into(),
            host: host.into(),
            port,
        }
    }

    /// Parses a host address, filling in the default scheme, host and port for omitted parts.
    ///
    /// The empty string omits every part and therefore yields the default endpoint.
    pub fn parse(address: &str) -> Result<Self> {
        let captures = ADDRESS
            .captures(address)
            .ok_or_else(|| Error::Validation(format!("Invalid address {}", address)))?;

        let scheme = captures
            .get(2)
            .map(|m| m.as_str().split('+').next().unwrap_or_default())
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SCHEME);
        let host = captures.get(3).map_or(DEFAULT_HOST, |m| m.as_str());
        let port = match captures.get(5) {
            Some(m) => m
                .as_str()
                .parse::<u16>()
                .map_err(|_| Error::Validation(format!("Invalid port in address {}", address)))?,
            None => DEFAULT_PORT,
        };

        Ok(Self::new(scheme, host, port))
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// `scheme://host:port`
    pub fn normalized(&self) -> String {
        format!("{}://{}:{}", self.scheme, self.host, self.port)
    }

    /// Absolute URL for `path` on this endpoint.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.normalized(), path)
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(DEFAULT_SCHEME, DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl FromStr for Endpoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}:{}", self.scheme, self.host, self.port)
    }
}
