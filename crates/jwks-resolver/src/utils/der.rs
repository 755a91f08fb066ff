//! DER encoding utilities for converting JWK formats to DER SubjectPublicKeyInfo
//!
//! This module uses the RustCrypto `spki` and `der` crates for standards-compliant
//! DER encoding.

use crate::key::EcCurve;
use der::{
    Encode, Sequence,
    asn1::{AnyRef, BitString, UintRef},
};
use spki::{AlgorithmIdentifierOwned, ObjectIdentifier, SubjectPublicKeyInfoOwned};

/// rsaEncryption (RFC 8017)
const RSA_ENCRYPTION_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.113549.1.1.1");

/// id-ecPublicKey (RFC 5480)
const EC_PUBLIC_KEY_OID: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");

/// Build the failure reason for a key encoding step
fn der_error(operation: &str, details: impl std::fmt::Display) -> String {
    format!("{operation}: {details}")
}

/// RSA public key structure for DER encoding
///
/// Represents RSAPublicKey as defined in RFC 3447:
/// RSAPublicKey ::= SEQUENCE {
///     modulus           INTEGER,  -- n
///     publicExponent    INTEGER   -- e
/// }
#[derive(Sequence)]
struct RsaPublicKey<'a> {
    modulus: UintRef<'a>,
    public_exponent: UintRef<'a>,
}

/// Build DER-encoded RSA public key from modulus (n) and exponent (e) bytes
pub(crate) fn rsa_spki_from_n_e(n: &[u8], e: &[u8]) -> Result<Vec<u8>, String> {
    if n.is_empty() || e.is_empty() {
        return Err("rsa key missing n or e".into());
    }

    // 8192 bytes modulus (65536 bits) is far beyond any practical key
    const MAX_RSA_MODULUS_SIZE: usize = 8192;
    if n.len() > MAX_RSA_MODULUS_SIZE {
        return Err(der_error(
            "RSA modulus too large",
            format!(
                "{} bytes (maximum: {} bytes)",
                n.len(),
                MAX_RSA_MODULUS_SIZE
            ),
        ));
    }

    // UintRef handles INTEGER encoding including leading zero for positive values
    let n_uint = UintRef::new(n).map_err(|e| der_error("failed to encode RSA modulus", e))?;
    let e_uint = UintRef::new(e).map_err(|e| der_error("failed to encode RSA exponent", e))?;

    let rsa_pubkey_der = RsaPublicKey {
        modulus: n_uint,
        public_exponent: e_uint,
    }
    .to_der()
    .map_err(|e| der_error("failed to encode RSA public key", e))?;

    let algorithm = AlgorithmIdentifierOwned {
        oid: RSA_ENCRYPTION_OID,
        parameters: Some(AnyRef::NULL.into()),
    };

    encode_spki(algorithm, rsa_pubkey_der)
}

/// Build DER-encoded EC public key from affine coordinates
///
/// The point is encoded uncompressed (`04 || x || y`). Coordinates must have
/// the full field length of the curve (RFC 7518 Section 6.2.1.2).
pub(crate) fn ec_spki_from_xy(x: &[u8], y: &[u8], curve: EcCurve) -> Result<Vec<u8>, String> {
    let size = curve.coordinate_size();
    if x.len() != size || y.len() != size {
        return Err(format!(
            "ec coordinates must be {size} bytes for {}, found x={} y={}",
            curve.as_str(),
            x.len(),
            y.len()
        ));
    }

    let mut point = Vec::with_capacity(1 + 2 * size);
    point.push(0x04);
    point.extend_from_slice(x);
    point.extend_from_slice(y);

    let curve_oid = curve.oid();
    let algorithm = AlgorithmIdentifierOwned {
        oid: EC_PUBLIC_KEY_OID,
        parameters: Some(AnyRef::from(&curve_oid).into()),
    };

    encode_spki(algorithm, point)
}

fn encode_spki(algorithm: AlgorithmIdentifierOwned, public_key: Vec<u8>) -> Result<Vec<u8>, String> {
    let subject_public_key = BitString::new(0, public_key)
        .map_err(|e| der_error("failed to create bit string", e))?;

    SubjectPublicKeyInfoOwned {
        algorithm,
        subject_public_key,
    }
    .to_der()
    .map_err(|e| der_error("failed to encode SPKI", e))
}
