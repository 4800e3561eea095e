#![forbid(unsafe_code)]

use super::super::StoreError;

pub(in crate::store) fn required_text(
    value: &str,
    empty_message: &'static str,
) -> Result<String, StoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StoreError::InvalidInput(empty_message));
    }
    Ok(trimmed.to_string())
}

/// Blank optional text is stored as NULL.
pub(in crate::store) fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_string)
}
