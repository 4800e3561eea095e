#![forbid(unsafe_code)]

use crate::model::Status;
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregate progress of one instance, computed from its step states.
///
/// This is a snapshot: nothing recomputes it when a step state changes, and
/// persisting the derived status is a separate, explicit step.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Rollup {
    pub percentage: f64,
    pub counts: BTreeMap<Status, usize>,
    pub total: usize,
}

impl Rollup {
    pub fn from_statuses<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = Status>,
    {
        let mut counts: BTreeMap<Status, usize> =
            Status::ALL.iter().map(|status| (*status, 0)).collect();
        let mut total = 0usize;
        for status in statuses {
            *counts.entry(status).or_insert(0) += 1;
            total += 1;
        }

        let completed = counts.get(&Status::Completed).copied().unwrap_or(0);
        let percentage = if total == 0 {
            0.0
        } else {
            100.0 * completed as f64 / total as f64
        };

        Self {
            percentage,
            counts,
            total,
        }
    }

    pub fn count(&self, status: Status) -> usize {
        self.counts.get(&status).copied().unwrap_or(0)
    }

    pub fn derive_status(&self) -> Status {
        if self.total > 0 && self.count(Status::Completed) == self.total {
            return Status::Completed;
        }
        if self.total == 0 || self.count(Status::NotStarted) == self.total {
            return Status::NotStarted;
        }
        Status::InProgress
    }

    pub fn is_all_completed(&self) -> bool {
        self.total > 0 && self.count(Status::Completed) == self.total
    }
}
