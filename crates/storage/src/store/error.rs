#![forbid(unsafe_code)]

use chk_core::dates::DateError;
use chk_core::ids::IdError;
use chk_core::model::StatusError;
use chk_core::names::NameError;
use chk_core::ordering::OrderError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("sqlite: {0}")]
    Sql(#[from] rusqlite::Error),
    #[error("config: {0}")]
    Config(String),
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),
    #[error(transparent)]
    InvalidId(#[from] IdError),
    #[error(transparent)]
    InvalidStatus(#[from] StatusError),
    #[error(transparent)]
    InvalidName(#[from] NameError),
    #[error(transparent)]
    InvalidDate(#[from] DateError),
    #[error(transparent)]
    Order(#[from] OrderError),
    #[error("unknown template {0}")]
    UnknownTemplate(i64),
    #[error("unknown step {0}")]
    UnknownStep(i64),
    #[error("unknown instance {0}")]
    UnknownInstance(i64),
    #[error("unknown reference {0}")]
    UnknownReference(i64),
    #[error("step {step_id} does not belong to template {template_id}")]
    StepNotInTemplate { template_id: i64, step_id: i64 },
    #[error("step {step_id} is not tracked by instance {instance_id}")]
    StepNotInInstance { instance_id: i64, step_id: i64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or out-of-range input.
    Validation,
    /// A referenced template, step, instance or reference does not exist.
    NotFound,
    /// The database or filesystem failed underneath the operation.
    Storage,
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Io(_) | Self::Sql(_) => ErrorKind::Storage,
            Self::Config(_)
            | Self::InvalidInput(_)
            | Self::InvalidId(_)
            | Self::InvalidStatus(_)
            | Self::InvalidName(_)
            | Self::InvalidDate(_)
            | Self::Order(_) => ErrorKind::Validation,
            Self::UnknownTemplate(_)
            | Self::UnknownStep(_)
            | Self::UnknownInstance(_)
            | Self::UnknownReference(_)
            | Self::StepNotInTemplate { .. }
            | Self::StepNotInInstance { .. } => ErrorKind::NotFound,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_validation(&self) -> bool {
        self.kind() == ErrorKind::Validation
    }
}
