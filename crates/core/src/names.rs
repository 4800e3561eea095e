#![forbid(unsafe_code)]

const MAX_REFERENCE_TYPE_NAME_LEN: usize = 64;

/// Canonical form of a reference type name: trimmed and uppercased.
/// Two names that canonicalize equally denote the same type.
pub fn canonical_reference_type(value: &str) -> Result<String, NameError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(NameError::Empty);
    }
    if trimmed.len() > MAX_REFERENCE_TYPE_NAME_LEN {
        return Err(NameError::TooLong);
    }
    if trimmed.chars().any(|c| c.is_control()) {
        return Err(NameError::ContainsControl);
    }
    Ok(trimmed.to_uppercase())
}

pub fn auto_reference_type_description(canonical: &str) -> String {
    format!("Auto-created reference type: {canonical}")
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    #[error("reference type name must not be empty")]
    Empty,
    #[error("reference type name is too long")]
    TooLong,
    #[error("reference type name contains control characters")]
    ContainsControl,
}
