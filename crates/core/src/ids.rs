#![forbid(unsafe_code)]

/// Validates a persistence-assigned id. Ids are opaque, strictly positive
/// integers; anything else is rejected before it reaches a query.
pub fn record_id(field: &'static str, value: i64) -> Result<i64, IdError> {
    if value < 1 {
        return Err(IdError { field, value });
    }
    Ok(value)
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field}: {value} (ids are positive integers)")]
pub struct IdError {
    pub field: &'static str,
    pub value: i64,
}
