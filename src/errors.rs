use thiserror::Error;

use crate::decimal::Money;
use crate::types::StudentId;

#[derive(Error, Debug)]
pub enum FeeError {
    #[error("student not found: {id}")]
    StudentNotFound {
        id: StudentId,
    },

    #[error("no amount received: {amount}")]
    NothingReceived {
        amount: Money,
    },

    #[error("invalid amount for {item}: {amount}")]
    InvalidAmount {
        item: String,
        amount: Money,
    },

    #[error("store version conflict: expected {expected}, found {actual}")]
    VersionConflict {
        expected: u64,
        actual: u64,
    },

    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FeeError>;
