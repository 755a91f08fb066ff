//! JSON Web Key Set (JWKS) module
//!
//! Fetches and parses JWKS documents ([RFC 7517](https://datatracker.ietf.org/doc/html/rfc7517))
//! and locates signing keys by key ID (`kid`). A document is parsed fresh on
//! every fetch; only resolved keys are ever cached, by the resolver.

pub(crate) mod jwk;

use crate::error::{Error, Result};
use crate::jwks::jwk::Jwk;
use crate::key::SigningKey;
use crate::limits::{MAX_JWK_SET_SIZE, MAX_JWKS_RESPONSE_SIZE};
use crate::transport::HttpFetch;
use miniserde::Deserialize;

/// JSON Web Key Set (JWKS)
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct JwkSet {
    /// The keys in the set
    pub keys: Vec<Jwk>,
}

impl JwkSet {
    /// Parse a JWKS response body
    pub(crate) fn from_slice(bytes: &[u8]) -> Result<Self> {
        // ReqwestFetch stops reading at this bound; custom transports may not
        if bytes.len() > MAX_JWKS_RESPONSE_SIZE {
            return Err(Error::RemoteResponseTooLarge {
                size: bytes.len(),
                max: MAX_JWKS_RESPONSE_SIZE,
            });
        }

        let body = std::str::from_utf8(bytes)
            .map_err(|e| Error::InvalidJwks(format!("utf8 decode failed: {e}")))?;

        let set: JwkSet = miniserde::json::from_str(body)
            .map_err(|_| Error::InvalidJwks("invalid jwks json".into()))?;

        if set.keys.len() > MAX_JWK_SET_SIZE {
            return Err(Error::RemoteJwkSetTooLarge {
                key_count: set.keys.len(),
                max: MAX_JWK_SET_SIZE,
            });
        }

        Ok(set)
    }

    /// Entries usable for signature verification, in document order
    pub(crate) fn signing_keys(&self) -> impl Iterator<Item = &Jwk> {
        self.keys.iter().filter(|k| k.is_signing_key())
    }

    /// Find the signing key with the given kid
    ///
    /// Returns an error if:
    /// - No signing key carries this kid
    /// - Multiple signing keys carry this kid (ambiguous)
    pub(crate) fn find_signing_key(&self, kid: &str) -> Result<&Jwk> {
        let matches: Vec<_> = self
            .signing_keys()
            .filter(|k| k.key_id() == Some(kid))
            .collect();

        // A duplicated kid fails the lookup rather than picking the first match
        match matches.as_slice() {
            [] => Err(Error::KeyNotFound { kid: kid.into() }),
            [jwk] => Ok(*jwk),
            _ => Err(Error::MultipleKeysFound {
                kid: kid.into(),
                count: matches.len(),
            }),
        }
    }

    /// Convert every signing entry into a [`SigningKey`]
    pub(crate) fn to_signing_keys(&self) -> Result<Vec<SigningKey>> {
        let keys = self
            .signing_keys()
            .map(Jwk::to_signing_key)
            .collect::<Result<Vec<_>>>()?;

        if keys.is_empty() {
            return Err(Error::NoSigningKeys);
        }

        Ok(keys)
    }
}

/// Fetch and parse a JWKS document from the given URI
pub(crate) async fn fetch_jwks(transport: &dyn HttpFetch, jwks_uri: &str) -> Result<JwkSet> {
    let bytes = transport.fetch(jwks_uri).await?;
    JwkSet::from_slice(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::ReqwestFetch;

    const TWO_KEYS: &str = r#"{
        "keys": [
            {"kty":"RSA","kid":"k1","use":"sig","n":"AAECAw","e":"AQAB"},
            {"kty":"EC","kid":"k2","crv":"P-256",
             "x":"AQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQE",
             "y":"AgICAgICAgICAgICAgICAgICAgICAgICAgICAgICAgI"}
        ]
    }"#;

    #[tokio::test]
    async fn test_fetch_jwks() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/jwks.json")
            .with_status(200)
            .with_body(TWO_KEYS)
            .create_async()
            .await;

        let transport = ReqwestFetch::new(reqwest::Client::new());
        let uri = format!("{}/jwks.json", server.url());

        let set = fetch_jwks(&transport, &uri).await.expect("jwks parse");
        assert_eq!(set.keys.len(), 2);
        assert_eq!(set.keys[0].kid.as_deref(), Some("k1"));
        assert_eq!(set.keys[1].kid.as_deref(), Some("k2"));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            JwkSet::from_slice(b"{ invalid json }"),
            Err(Error::InvalidJwks(msg)) if msg.contains("invalid jwks json")
        ));
    }

    #[test]
    fn test_missing_keys_member() {
        assert!(matches!(
            JwkSet::from_slice(br#"{"issuer":"https://example.com"}"#),
            Err(Error::InvalidJwks(_))
        ));
    }

    #[test]
    fn test_invalid_utf8() {
        assert!(matches!(
            JwkSet::from_slice(&[0xff, 0xfe, 0xfd]),
            Err(Error::InvalidJwks(msg)) if msg.contains("utf8")
        ));
    }

    #[test]
    fn test_optional_fields() {
        let set = JwkSet::from_slice(br#"{"keys": [{"kty":"RSA","x5t":"ignored"}]}"#).expect("parse");
        assert_eq!(set.keys.len(), 1);
        assert_eq!(set.keys[0].kty.as_deref(), Some("RSA"));
        assert_eq!(set.keys[0].kid, None);
        assert_eq!(set.keys[0].x5c, None);
    }

    #[test]
    fn test_oversized_response() {
        let oversized = vec![b'a'; MAX_JWKS_RESPONSE_SIZE + 1];
        assert!(matches!(
            JwkSet::from_slice(&oversized),
            Err(Error::RemoteResponseTooLarge { size, max }) if size > max && max == MAX_JWKS_RESPONSE_SIZE
        ));
    }

    #[test]
    fn test_too_many_keys() {
        let entries = vec![r#"{"kty":"RSA"}"#; MAX_JWK_SET_SIZE + 1].join(",");
        let body = format!(r#"{{"keys":[{entries}]}}"#);
        assert!(matches!(
            JwkSet::from_slice(body.as_bytes()),
            Err(Error::RemoteJwkSetTooLarge { key_count, .. }) if key_count == MAX_JWK_SET_SIZE + 1
        ));
    }

    #[test]
    fn test_find_signing_key() {
        let set = JwkSet::from_slice(TWO_KEYS.as_bytes()).expect("parse");

        assert_eq!(set.find_signing_key("k1").expect("k1").kty.as_deref(), Some("RSA"));
        assert_eq!(set.find_signing_key("k2").expect("k2").kty.as_deref(), Some("EC"));
        assert_eq!(
            set.find_signing_key("k3").map(|_| ()),
            Err(Error::KeyNotFound { kid: "k3".into() })
        );
    }

    #[test]
    fn test_find_ignores_encryption_keys() {
        let set = JwkSet::from_slice(
            br#"{"keys":[{"kty":"RSA","kid":"enc","use":"enc","n":"AAECAw","e":"AQAB"}]}"#,
        )
        .expect("parse");

        assert!(matches!(
            set.find_signing_key("enc"),
            Err(Error::KeyNotFound { kid }) if kid == "enc"
        ));
    }

    #[test]
    fn test_find_multiple_matches() {
        let set = JwkSet::from_slice(
            br#"{"keys":[
                {"kty":"RSA","kid":"same","n":"AAECAw","e":"AQAB"},
                {"kty":"RSA","kid":"same","n":"BAUGBw","e":"AQAB"}
            ]}"#,
        )
        .expect("parse");

        assert!(matches!(
            set.find_signing_key("same"),
            Err(Error::MultipleKeysFound { kid, count: 2 }) if kid == "same"
        ));
    }

    #[test]
    fn test_to_signing_keys() {
        let set = JwkSet::from_slice(TWO_KEYS.as_bytes()).expect("parse");
        let keys = set.to_signing_keys().expect("keys");
        let kids: Vec<_> = keys.iter().map(SigningKey::kid).collect();
        assert_eq!(kids, ["k1", "k2"]);
    }

    #[test]
    fn test_to_signing_keys_empty() {
        let set = JwkSet::from_slice(br#"{"keys":[{"kty":"oct","kid":"hmac","k":"c2VjcmV0"}]}"#)
            .expect("parse");
        assert_eq!(set.to_signing_keys(), Err(Error::NoSigningKeys));
    }
}
