//! JWK (JSON Web Key) struct and conversion

use crate::error::{Error, Result};
use crate::key::{EcCurve, KeyMaterial, SigningKey};
use crate::limits::{
    MAX_JWK_ALG_SIZE, MAX_JWK_CRV_SIZE, MAX_JWK_E_SIZE, MAX_JWK_KID_SIZE, MAX_JWK_N_SIZE,
    MAX_JWK_X_SIZE, MAX_JWK_Y_SIZE, MAX_X5C_CERT_SIZE, MAX_X5C_CHAIN_LENGTH,
};
use crate::utils::base64url;
use crate::utils::bounds::validate_field_size;
use miniserde::Deserialize;

/// JSON Web Key (JWK) structure
///
/// Every member is optional so that one odd entry does not make the whole
/// document unparseable; usability is decided by [`Jwk::is_signing_key`].
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Jwk {
    /// Key type (e.g., "RSA")
    pub kty: Option<String>,
    /// Key ID
    pub kid: Option<String>,
    /// Algorithm (advisory field per RFC 7517)
    pub alg: Option<String>,
    /// Key use (RFC 7517 Section 4.2), "sig" or "enc"
    #[serde(rename = "use")]
    pub key_use: Option<String>,
    /// X.509 certificate chain, standard Base64 DER, leaf first
    pub x5c: Option<Vec<String>>,
    // RSA fields
    pub n: Option<String>,
    pub e: Option<String>,
    // EC fields
    pub crv: Option<String>,
    pub x: Option<String>,
    pub y: Option<String>,
}

impl Jwk {
    /// The key ID, treating an empty string as absent
    pub(crate) fn key_id(&self) -> Option<&str> {
        self.kid.as_deref().filter(|kid| !kid.is_empty())
    }

    /// Whether this entry can serve as a signing key
    ///
    /// Requires a kid, a `use` of "sig" (or none), and key material: a
    /// non-empty `x5c` chain, RSA `n`/`e`, or EC `crv`/`x`/`y`.
    pub(crate) fn is_signing_key(&self) -> bool {
        if self.key_id().is_none() {
            return false;
        }

        if self.key_use.as_deref().is_some_and(|u| u != "sig") {
            return false;
        }

        self.has_certificate_chain() || self.has_rsa_components() || self.has_ec_components()
    }

    fn has_certificate_chain(&self) -> bool {
        self.x5c.as_ref().is_some_and(|chain| !chain.is_empty())
    }

    fn has_rsa_components(&self) -> bool {
        self.kty.as_deref() == Some("RSA") && self.n.is_some() && self.e.is_some()
    }

    fn has_ec_components(&self) -> bool {
        self.kty.as_deref() == Some("EC")
            && self.crv.is_some()
            && self.x.is_some()
            && self.y.is_some()
    }

    /// Convert a signing entry into a [`SigningKey`]
    ///
    /// The certificate chain wins over raw components when both are present.
    pub(crate) fn to_signing_key(&self) -> Result<SigningKey> {
        let kid = self
            .key_id()
            .ok_or_else(|| Error::InvalidJwks("signing key without kid".into()))?;

        validate_field_size("kid", kid, MAX_JWK_KID_SIZE)?;
        if let Some(alg) = &self.alg {
            validate_field_size("alg", alg, MAX_JWK_ALG_SIZE)?;
        }

        let material = if self.has_certificate_chain() {
            self.certificate_material(kid)?
        } else if self.has_rsa_components() {
            self.rsa_material(kid)?
        } else if self.has_ec_components() {
            self.ec_material(kid)?
        } else {
            return Err(invalid_key(kid, "no usable key material"));
        };

        SigningKey::new(kid.to_string(), self.alg.clone(), material)
            .map_err(|reason| invalid_key(kid, reason))
    }

    fn certificate_material(&self, kid: &str) -> Result<KeyMaterial> {
        const MAX_DECODED_CERT: usize = (MAX_X5C_CERT_SIZE * 3) / 4;

        let encoded = self.x5c.as_deref().unwrap_or_default();
        if encoded.len() > MAX_X5C_CHAIN_LENGTH {
            return Err(invalid_key(
                kid,
                format!(
                    "x5c chain has {} certificates (maximum: {MAX_X5C_CHAIN_LENGTH})",
                    encoded.len()
                ),
            ));
        }

        let chain = encoded
            .iter()
            .map(|cert| {
                validate_field_size("x5c", cert, MAX_X5C_CERT_SIZE)?;
                base64url::decode_standard(cert, MAX_DECODED_CERT)
                    .map_err(|e| invalid_key(kid, format!("failed to decode x5c: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(KeyMaterial::Certificate { chain })
    }

    fn rsa_material(&self, kid: &str) -> Result<KeyMaterial> {
        // Base64URL: 4 chars → 3 bytes
        const MAX_DECODED_JWK_N: usize = (MAX_JWK_N_SIZE * 3) / 4;
        const MAX_DECODED_JWK_E: usize = (MAX_JWK_E_SIZE * 3) / 4;

        let n = self.n.as_deref().unwrap_or_default();
        let e = self.e.as_deref().unwrap_or_default();
        validate_field_size("n", n, MAX_JWK_N_SIZE)?;
        validate_field_size("e", e, MAX_JWK_E_SIZE)?;

        let n = base64url::decode_bytes(n, MAX_DECODED_JWK_N)
            .map_err(|err| invalid_key(kid, format!("failed to decode n: {err}")))?;
        let e = base64url::decode_bytes(e, MAX_DECODED_JWK_E)
            .map_err(|err| invalid_key(kid, format!("failed to decode e: {err}")))?;

        Ok(KeyMaterial::Rsa { n, e })
    }

    fn ec_material(&self, kid: &str) -> Result<KeyMaterial> {
        const MAX_DECODED_JWK_X: usize = (MAX_JWK_X_SIZE * 3) / 4;
        const MAX_DECODED_JWK_Y: usize = (MAX_JWK_Y_SIZE * 3) / 4;

        let crv = self.crv.as_deref().unwrap_or_default();
        let x = self.x.as_deref().unwrap_or_default();
        let y = self.y.as_deref().unwrap_or_default();
        validate_field_size("crv", crv, MAX_JWK_CRV_SIZE)?;
        validate_field_size("x", x, MAX_JWK_X_SIZE)?;
        validate_field_size("y", y, MAX_JWK_Y_SIZE)?;

        let curve = EcCurve::from_name(crv)
            .ok_or_else(|| invalid_key(kid, format!("unsupported curve '{crv}'")))?;
        let x = base64url::decode_bytes(x, MAX_DECODED_JWK_X)
            .map_err(|err| invalid_key(kid, format!("failed to decode x: {err}")))?;
        let y = base64url::decode_bytes(y, MAX_DECODED_JWK_Y)
            .map_err(|err| invalid_key(kid, format!("failed to decode y: {err}")))?;

        Ok(KeyMaterial::Ec { curve, x, y })
    }
}

fn invalid_key(kid: &str, reason: impl Into<String>) -> Error {
    Error::InvalidKey {
        kid: kid.to_string(),
        reason: reason.into(),
    }
}
