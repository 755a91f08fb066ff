//! Encoding helpers shared by the JWKS parser and key export

pub(crate) mod base64url;
pub(crate) mod bounds;
pub(crate) mod der;
pub(crate) mod pem;
