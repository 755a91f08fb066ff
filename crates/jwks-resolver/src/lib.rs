//! Resolve JWT signing keys from a remote JWKS endpoint, with a per-kid cache.
//!
//! ```no_run
//! use jwks_resolver::{KeyResolver, ResolverConfig};
//!
//! # async fn example() -> jwks_resolver::Result<()> {
//! let resolver = KeyResolver::new(ResolverConfig::from_env()?)?;
//!
//! match resolver.resolve("my-key-id").await {
//!     Ok(key) => println!("{}", key.public_key_pem()),
//!     Err(e) if e.is_key_not_found() => eprintln!("unknown kid"),
//!     Err(e) => eprintln!("JWKS endpoint unavailable: {e}"),
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod jwks;
mod key;
mod resolver;
pub mod transport;

// Internal modules
pub(crate) mod url;
pub(crate) mod utils;

// Public Interface
pub use config::{JWKS_CACHE_ENV, JWKS_URI_ENV, ResolverConfig};
pub use error::{Error, Result, TransportErrorKind};
pub use key::{EcCurve, KeyMaterial, SigningKey};
pub use resolver::KeyResolver;
pub use transport::{FetchFuture, HttpFetch, ReqwestFetch};

pub(crate) mod limits;
