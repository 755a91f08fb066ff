//! PEM armoring (RFC 7468)

use der::pem::{self, LineEnding};

/// Wrap DER bytes in `-----BEGIN {label}-----` / `-----END {label}-----`
pub(crate) fn encode(label: &str, der: &[u8]) -> Result<String, String> {
    pem::encode_string(label, LineEnding::LF, der).map_err(|e| format!("PEM encoding failed: {e}"))
}
