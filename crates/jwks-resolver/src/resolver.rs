//! Key resolution with a per-kid cache
//!
//! ```text
//! resolve(kid)
//!     │ cache hit? ──────────────► cached SigningKey (no network)
//!     ▼ miss
//! fetch JWKS ── transport / status error ──► Err (cache untouched)
//!     │ parse
//!     ▼
//! find signing key by kid ── absent ──► Err(KeyNotFound) (cache untouched)
//!     │
//!     ▼
//! insert {kid → SigningKey} ──► SigningKey
//! ```
//!
//! Failures are never cached. Only the single resolved key is inserted,
//! never the rest of the document, so a different kid always triggers its
//! own fetch. Concurrent misses for the same kid are not coalesced; each
//! performs its own fetch and the last insert wins.

use crate::config::ResolverConfig;
use crate::error::{Error, Result};
use crate::jwks::fetch_jwks;
use crate::key::SigningKey;
use crate::limits::MAX_JWK_KID_SIZE;
use crate::transport::{HttpFetch, ReqwestFetch};
use crate::url::validate_jwks_uri;
use moka::future::Cache;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves signing keys by kid from a remote JWKS endpoint
///
/// Clones share the transport and the cache.
///
/// ```no_run
/// use jwks_resolver::{KeyResolver, ResolverConfig};
///
/// # async fn example() -> jwks_resolver::Result<()> {
/// let resolver = KeyResolver::new(ResolverConfig::new(
///     "https://auth.example.com/.well-known/jwks.json",
/// ))?;
///
/// let key = resolver.resolve("NkFCNEE1NDFDNTQ5RTQ5OTE1QzRBMjYyMzY0NEJCQTJBMjJBQkZCMA").await?;
/// println!("{}", key.public_key_pem());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct KeyResolver {
    jwks_uri: Arc<str>,
    transport: Arc<dyn HttpFetch>,
    cache: Option<Cache<String, SigningKey>>,
}

impl KeyResolver {
    /// Build a resolver fetching with a default `reqwest::Client`
    pub fn new(config: ResolverConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Configuration(format!("failed to build HTTP client: {e}")))?;
        Self::with_http_client(config, client)
    }

    /// Build a resolver fetching with the given `reqwest::Client`
    pub fn with_http_client(config: ResolverConfig, client: reqwest::Client) -> Result<Self> {
        let transport = ReqwestFetch::with_headers(client, &config.request_headers)?;
        Self::with_transport(config, transport)
    }

    /// Build a resolver fetching through a custom transport
    ///
    /// `config.request_headers` are not applied; the transport owns its requests.
    pub fn with_transport(config: ResolverConfig, transport: impl HttpFetch + 'static) -> Result<Self> {
        validate_jwks_uri(&config.jwks_uri)?;

        // No capacity or TTL: entries live as long as the resolver
        let cache = config.cache.then(|| Cache::builder().build());

        Ok(Self {
            jwks_uri: config.jwks_uri.into(),
            transport: Arc::new(transport),
            cache,
        })
    }

    pub fn jwks_uri(&self) -> &str {
        &self.jwks_uri
    }

    pub fn cache_enabled(&self) -> bool {
        self.cache.is_some()
    }

    /// Resolve the signing key for `kid`
    ///
    /// Returns the cached key without network access when present. Otherwise
    /// fetches the JWKS document, and on success caches and returns the
    /// matching key. Errors leave the cache unchanged.
    pub async fn resolve(&self, kid: &str) -> Result<SigningKey> {
        validate_kid(kid)?;

        if let Some(cache) = &self.cache {
            if let Some(key) = cache.get(kid).await {
                debug!(kid, "signing key cache hit");
                return Ok(key);
            }
        }

        debug!(kid, jwks_uri = %self.jwks_uri, "fetching JWKS for signing key");

        let key = self.fetch_signing_key(kid).await.inspect_err(|e| {
            warn!(kid, jwks_uri = %self.jwks_uri, status = ?e.status(), error = %e, "signing key resolution failed");
        })?;

        if let Some(cache) = &self.cache {
            cache.insert(kid.to_string(), key.clone()).await;
            debug!(kid, "signing key cached");
        }

        Ok(key)
    }

    /// Fetch the JWKS document and return every usable signing key
    ///
    /// Always hits the network and never touches the cache.
    pub async fn signing_keys(&self) -> Result<Vec<SigningKey>> {
        debug!(jwks_uri = %self.jwks_uri, "fetching JWKS");

        let jwks = fetch_jwks(self.transport.as_ref(), &self.jwks_uri)
            .await
            .inspect_err(|e| {
                warn!(jwks_uri = %self.jwks_uri, status = ?e.status(), error = %e, "JWKS fetch failed");
            })?;

        jwks.to_signing_keys()
    }

    /// Kids currently held in the cache, sorted
    pub fn cached_kids(&self) -> Vec<String> {
        let mut kids: Vec<String> = self
            .cache
            .iter()
            .flat_map(|cache| cache.iter().map(|(kid, _)| kid.to_string()))
            .collect();
        kids.sort();
        kids
    }

    /// Number of cached keys
    pub fn cache_len(&self) -> usize {
        self.cache.as_ref().map_or(0, |cache| cache.iter().count())
    }

    async fn fetch_signing_key(&self, kid: &str) -> Result<SigningKey> {
        let jwks = fetch_jwks(self.transport.as_ref(), &self.jwks_uri).await?;
        jwks.find_signing_key(kid)?.to_signing_key()
    }
}

impl fmt::Debug for KeyResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyResolver")
            .field("jwks_uri", &self.jwks_uri)
            .field("cache_enabled", &self.cache_enabled())
            .field("cache_len", &self.cache_len())
            .finish()
    }
}

fn validate_kid(kid: &str) -> Result<()> {
    if kid.is_empty() {
        return Err(Error::InvalidKeyId("kid cannot be empty".into()));
    }
    if kid.len() > MAX_JWK_KID_SIZE {
        return Err(Error::InvalidKeyId(format!(
            "kid too long: {} bytes (maximum: {MAX_JWK_KID_SIZE} bytes)",
            kid.len()
        )));
    }
    Ok(())
}
