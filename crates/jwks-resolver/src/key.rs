//! Resolved signing keys
//!
//! A [`SigningKey`] is built from one usable entry of a JWKS document. Its
//! key material is decoded once at construction, so every accessor is
//! infallible and a cached key never has to be re-validated.

use crate::utils::{der, pem};
use spki::ObjectIdentifier;
use std::fmt;
use std::sync::Arc;

/// Named elliptic curves accepted in EC JWKs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EcCurve {
    P256,
    P384,
    P521,
}

impl EcCurve {
    /// Parse the JWK `crv` member
    pub fn from_name(crv: &str) -> Option<Self> {
        match crv {
            "P-256" => Some(EcCurve::P256),
            "P-384" => Some(EcCurve::P384),
            "P-521" => Some(EcCurve::P521),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EcCurve::P256 => "P-256",
            EcCurve::P384 => "P-384",
            EcCurve::P521 => "P-521",
        }
    }

    /// Byte length of one affine coordinate
    pub(crate) fn coordinate_size(&self) -> usize {
        match self {
            EcCurve::P256 => 32,
            EcCurve::P384 => 48,
            EcCurve::P521 => 66,
        }
    }

    pub(crate) fn oid(&self) -> ObjectIdentifier {
        match self {
            EcCurve::P256 => ObjectIdentifier::new_unwrap("1.2.840.10045.3.1.7"),
            EcCurve::P384 => ObjectIdentifier::new_unwrap("1.3.132.0.34"),
            EcCurve::P521 => ObjectIdentifier::new_unwrap("1.3.132.0.35"),
        }
    }
}

impl fmt::Display for EcCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded public key material of a signing key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyMaterial {
    /// X.509 certificate chain (`x5c`), DER-encoded, leaf first
    Certificate { chain: Vec<Vec<u8>> },
    /// RSA modulus and exponent, big-endian
    Rsa { n: Vec<u8>, e: Vec<u8> },
    /// EC public point coordinates, big-endian
    Ec { curve: EcCurve, x: Vec<u8>, y: Vec<u8> },
}

impl KeyMaterial {
    /// Short name of the material kind (`x5c`, `RSA`, `EC`)
    pub fn kind(&self) -> &'static str {
        match self {
            KeyMaterial::Certificate { .. } => "x5c",
            KeyMaterial::Rsa { .. } => "RSA",
            KeyMaterial::Ec { .. } => "EC",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
struct SigningKeyInner {
    kid: String,
    algorithm: Option<String>,
    material: KeyMaterial,
    public_key_der: Vec<u8>,
    public_key_pem: String,
}

/// Public key resolved from a JWKS document
///
/// Cheap to clone: clones share the decoded material, so a key returned
/// from the cache is the identical value that was inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningKey {
    inner: Arc<SigningKeyInner>,
}

impl SigningKey {
    /// Build a key from decoded material
    ///
    /// Encodes the public key DER and PEM up front and fails with a reason
    /// string if the material cannot be encoded (empty chain, wrong
    /// coordinate size).
    pub(crate) fn new(
        kid: String,
        algorithm: Option<String>,
        material: KeyMaterial,
    ) -> Result<Self, String> {
        let public_key_der = match &material {
            KeyMaterial::Certificate { chain } => chain
                .first()
                .cloned()
                .ok_or_else(|| "x5c chain is empty".to_string())?,
            KeyMaterial::Rsa { n, e } => der::rsa_spki_from_n_e(n, e)?,
            KeyMaterial::Ec { curve, x, y } => der::ec_spki_from_xy(x, y, *curve)?,
        };

        let label = match material {
            KeyMaterial::Certificate { .. } => "CERTIFICATE",
            KeyMaterial::Rsa { .. } | KeyMaterial::Ec { .. } => "PUBLIC KEY",
        };
        let public_key_pem = pem::encode(label, &public_key_der)?;

        Ok(Self {
            inner: Arc::new(SigningKeyInner {
                kid,
                algorithm,
                material,
                public_key_der,
                public_key_pem,
            }),
        })
    }

    /// Key ID (`kid`)
    pub fn kid(&self) -> &str {
        &self.inner.kid
    }

    /// Algorithm hint (`alg`), advisory only
    pub fn algorithm(&self) -> Option<&str> {
        self.inner.algorithm.as_deref()
    }

    pub fn material(&self) -> &KeyMaterial {
        &self.inner.material
    }

    /// DER of the leaf certificate for `x5c` keys, SubjectPublicKeyInfo otherwise
    pub fn public_key_der(&self) -> &[u8] {
        &self.inner.public_key_der
    }

    /// PEM of [`public_key_der`](Self::public_key_der)
    ///
    /// `CERTIFICATE` for `x5c` keys, `PUBLIC KEY` for RSA and EC keys.
    pub fn public_key_pem(&self) -> &str {
        &self.inner.public_key_pem
    }

    /// True if both handles point at the same cached key
    pub fn ptr_eq(&self, other: &SigningKey) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}
