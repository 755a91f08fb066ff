//! Resolver configuration

use crate::error::{Error, Result};
use std::env;

/// Environment variable holding the JWKS endpoint
pub const JWKS_URI_ENV: &str = "JWKS_URI";

/// Environment variable toggling the key cache
pub const JWKS_CACHE_ENV: &str = "JWKS_CACHE";

/// Configuration for a [`KeyResolver`](crate::KeyResolver)
///
/// ```
/// use jwks_resolver::ResolverConfig;
///
/// let mut config = ResolverConfig::new("https://auth.example.com/.well-known/jwks.json");
/// config.cache(false).header("User-Agent", "my-service/1.0");
///
/// assert!(!config.cache);
/// assert_eq!(config.request_headers.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Consult and populate the per-kid cache
    pub cache: bool,
    /// Location of the JWKS document
    pub jwks_uri: String,
    /// Extra headers sent with every JWKS request
    pub request_headers: Vec<(String, String)>,
}

impl ResolverConfig {
    /// Configuration for `jwks_uri` with caching enabled
    pub fn new(jwks_uri: impl Into<String>) -> Self {
        Self {
            cache: true,
            jwks_uri: jwks_uri.into(),
            request_headers: Vec::new(),
        }
    }

    /// Enable or disable the key cache
    pub fn cache(&mut self, enabled: bool) -> &mut Self {
        self.cache = enabled;
        self
    }

    /// Add a request header
    pub fn header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.request_headers.push((name.into(), value.into()));
        self
    }

    /// Read configuration from `JWKS_URI` and `JWKS_CACHE`
    ///
    /// `JWKS_URI` is required. `JWKS_CACHE` is optional; `false`, `0`, `no`
    /// and `off` disable the cache, anything else enables it.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let jwks_uri = match lookup(JWKS_URI_ENV) {
            Some(uri) if !uri.trim().is_empty() => uri,
            _ => {
                return Err(Error::Configuration(format!(
                    "missing environment variable {JWKS_URI_ENV}"
                )));
            }
        };

        let cache = match lookup(JWKS_CACHE_ENV) {
            Some(value) => !matches!(
                value.trim().to_ascii_lowercase().as_str(),
                "false" | "0" | "no" | "off"
            ),
            None => true,
        };

        Ok(Self {
            cache,
            jwks_uri,
            request_headers: Vec::new(),
        })
    }
}
