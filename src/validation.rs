//! Input checks shared by the entity services.

use crate::{BulletinError, Result};

/// Reject empty or whitespace-only text for `field`.
pub fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BulletinError::Validation(format!(
            "{field} must not be blank"
        )));
    }
    Ok(())
}
