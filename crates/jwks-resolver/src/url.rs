//! URL validation utilities
//!
//! The JWKS endpoint is checked once when a resolver is built, so a
//! malformed or oversized URI is reported as configuration error instead
//! of surfacing on the first lookup.

use crate::error::{Error, Result};
use crate::limits::MAX_JWKS_URI_LENGTH;

/// Validate JWKS URI format and size
pub(crate) fn validate_jwks_uri(uri: &str) -> Result<url::Url> {
    if uri.trim().is_empty() {
        return Err(Error::Configuration("JWKS URI cannot be empty".into()));
    }

    if uri.len() > MAX_JWKS_URI_LENGTH {
        return Err(Error::RemoteUrlTooLong {
            length: uri.len(),
            max: MAX_JWKS_URI_LENGTH,
        });
    }

    let parsed = uri
        .parse::<url::Url>()
        .map_err(|e| Error::Configuration(format!("invalid JWKS URI: {e}")))?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(Error::Configuration(
            "JWKS URI must use http or https scheme".into(),
        ));
    }

    if parsed.host_str().is_none() {
        return Err(Error::Configuration("JWKS URI must have a valid host".into()));
    }

    Ok(parsed)
}
