#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

/// Progress state shared by instance step states and instances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::NotStarted, Status::InProgress, Status::Completed];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::NotStarted => "Not Started",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
        }
    }

    /// Accepts the stored form ("Not Started") and the snake form
    /// ("not_started"), case-insensitively.
    pub fn parse(value: &str) -> Result<Self, StatusError> {
        let normalized = value.trim().to_ascii_lowercase().replace('_', " ");
        match normalized.as_str() {
            "not started" => Ok(Status::NotStarted),
            "in progress" => Ok(Status::InProgress),
            "completed" => Ok(Status::Completed),
            _ => Err(StatusError {
                value: value.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown status {value:?} (expected Not Started, In Progress or Completed)")]
pub struct StatusError {
    pub value: String,
}
