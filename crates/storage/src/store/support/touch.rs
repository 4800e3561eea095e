#![forbid(unsafe_code)]

/// Collects the tracked columns whose value differs between the stored row
/// and the requested update. A row is only written, and its `updated_at_ms`
/// bumped, when at least one column changed.
#[derive(Debug, Default)]
pub(in crate::store) struct Changes {
    columns: Vec<&'static str>,
}

impl Changes {
    pub(in crate::store) fn track<T: PartialEq + ?Sized>(
        &mut self,
        column: &'static str,
        stored: &T,
        next: &T,
    ) -> bool {
        if stored == next {
            return false;
        }
        self.columns.push(column);
        true
    }

    pub(in crate::store) fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub(in crate::store) fn columns(&self) -> &[&'static str] {
        &self.columns
    }
}
