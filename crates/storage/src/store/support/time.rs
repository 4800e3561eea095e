#![forbid(unsafe_code)]

pub(in crate::store) fn now_ms() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(duration) => duration,
        Err(_) => return 0,
    };

    i64::try_from(now.as_millis()).unwrap_or(i64::MAX)
}

/// Who and when, stamped onto every row a write touches.
#[derive(Clone, Copy, Debug)]
pub(in crate::store) struct Stamp<'a> {
    pub(in crate::store) now_ms: i64,
    pub(in crate::store) by: &'a str,
}

impl<'a> Stamp<'a> {
    pub(in crate::store) fn now(by: &'a str) -> Self {
        Self {
            now_ms: now_ms(),
            by,
        }
    }
}
