#![forbid(unsafe_code)]

//! Order-index arithmetic for the steps of one template.
//!
//! A template holding `count` steps always carries the indices `1..=count`.
//! Each plan below describes the single contiguous block of neighbours that
//! has to move by one slot, and in which order the rows must be rewritten so
//! that no two steps ever share an index, even transiently.

/// Index a step occupies while its neighbours are being shifted around it.
/// Outside the valid range, so it never collides with a live position.
pub const PARKING_INDEX: i64 = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShiftOrder {
    Ascending,
    Descending,
}

/// Every step with `first <= order_index <= last` moves by `delta` (±1).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shift {
    pub first: i64,
    pub last: i64,
    pub delta: i64,
}

impl Shift {
    /// Shifting up must start from the top and shifting down from the
    /// bottom, otherwise a row lands on a slot that is still occupied.
    pub fn processing_order(&self) -> ShiftOrder {
        if self.delta > 0 {
            ShiftOrder::Descending
        } else {
            ShiftOrder::Ascending
        }
    }

    pub fn contains(&self, order_index: i64) -> bool {
        order_index >= self.first && order_index <= self.last
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InsertPlan {
    pub position: i64,
    pub shift: Option<Shift>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MovePlan {
    pub from: i64,
    pub to: i64,
    pub shift: Shift,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("position {position} out of range [{min}, {max}]")]
    OutOfRange { position: i64, min: i64, max: i64 },
    #[error("step is at position {actual}, caller expected {expected}")]
    Mismatch { expected: i64, actual: i64 },
}

/// Plans an insert into a template currently holding `count` steps.
/// `None` appends; an explicit position must lie in `[1, count + 1]`.
pub fn plan_insert(count: i64, requested: Option<i64>) -> Result<InsertPlan, OrderError> {
    let Some(position) = requested else {
        return Ok(InsertPlan {
            position: count + 1,
            shift: None,
        });
    };

    if position < 1 || position > count + 1 {
        return Err(OrderError::OutOfRange {
            position,
            min: 1,
            max: count + 1,
        });
    }

    let shift = (position <= count).then_some(Shift {
        first: position,
        last: count,
        delta: 1,
    });
    Ok(InsertPlan { position, shift })
}

/// Plans moving the step currently at `current` from `from` to `to`.
/// Returns `None` for a no-op move.
pub fn plan_move(
    count: i64,
    current: i64,
    from: i64,
    to: i64,
) -> Result<Option<MovePlan>, OrderError> {
    if from != current {
        return Err(OrderError::Mismatch {
            expected: from,
            actual: current,
        });
    }
    if to < 1 || to > count {
        return Err(OrderError::OutOfRange {
            position: to,
            min: 1,
            max: count,
        });
    }
    if to == from {
        return Ok(None);
    }

    let shift = if to > from {
        Shift {
            first: from + 1,
            last: to,
            delta: -1,
        }
    } else {
        Shift {
            first: to,
            last: from - 1,
            delta: 1,
        }
    };
    Ok(Some(MovePlan { from, to, shift }))
}

/// Plans closing the gap left by removing the step at `removed` from a
/// template that held `count` steps before the removal.
pub fn plan_remove(count: i64, removed: i64) -> Option<Shift> {
    (removed < count).then_some(Shift {
        first: removed + 1,
        last: count,
        delta: -1,
    })
}

pub fn is_dense(indices: &[i64]) -> bool {
    let mut sorted = indices.to_vec();
    sorted.sort_unstable();
    sorted
        .iter()
        .enumerate()
        .all(|(slot, index)| *index == slot as i64 + 1)
}
