//! Bounds validation utilities

use crate::error::{Error, Result};

/// Reject a JWK member whose encoded form exceeds `max` bytes
pub(crate) fn validate_field_size(field: &str, value: &str, max: usize) -> Result<()> {
    if value.len() > max {
        return Err(Error::JwkFieldTooLarge {
            field: field.into(),
            size: value.len(),
            max,
        });
    }
    Ok(())
}
