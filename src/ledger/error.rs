use thiserror::Error;

/// Every way a ledger call can be rejected.
///
/// All variants are definite, caller-correctable rejections. A failed call
/// leaves the ledger exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Unauthorized: only admin can perform this action")]
    Unauthorized,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Expired: voting period has ended")]
    Expired,

    #[error("Already done: you have already voted")]
    AlreadyDone,
}

/// Coarse classification of a [`LedgerError`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Unauthorized,
    InvalidArgument,
    NotFound,
    Expired,
    AlreadyDone,
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::Unauthorized => ErrorKind::Unauthorized,
            LedgerError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            LedgerError::NotFound(_) => ErrorKind::NotFound,
            LedgerError::Expired => ErrorKind::Expired,
            LedgerError::AlreadyDone => ErrorKind::AlreadyDone,
        }
    }

    pub(crate) fn empty_description() -> Self {
        LedgerError::InvalidArgument("description cannot be empty".into())
    }

    pub(crate) fn zero_duration() -> Self {
        LedgerError::InvalidArgument("duration must be greater than 0".into())
    }

    pub(crate) fn duration_overflow() -> Self {
        LedgerError::InvalidArgument("duration too large".into())
    }

    pub(crate) fn no_such_proposal() -> Self {
        LedgerError::NotFound("proposal does not exist".into())
    }

    pub(crate) fn no_proposals() -> Self {
        LedgerError::NotFound("no proposals exist".into())
    }

    pub(crate) fn no_completed_proposals() -> Self {
        LedgerError::NotFound("no completed proposals found".into())
    }
}
