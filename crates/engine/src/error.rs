//! The module contains the errors the engine can throw.
//!
//! Every [`EngineError`] belongs to exactly one [`ErrorKind`]:
//!
//! - [`Validation`] caller input violates a precondition; nothing was stored.
//! - [`NotFound`] the requested incomes do not exist (only under
//!   [`EmptyPeriod::NotFound`]).
//! - [`Storage`] the repository failed; the cause is kept as `source()`.
//!
//! Callers branch on [`EngineError::kind`], never on the message text.
//!
//!  [`Validation`]: ErrorKind::Validation
//!  [`NotFound`]: ErrorKind::NotFound
//!  [`Storage`]: ErrorKind::Storage
//!  [`EmptyPeriod::NotFound`]: crate::EmptyPeriod::NotFound
use std::fmt;

use thiserror::Error;

use crate::{IncomeViolation, StorageError};

/// Closed set of error classes exposed to the transport layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Storage,
}

/// Use-case step a storage failure happened in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    AddIncome,
    GetIncomes,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddIncome => f.write_str("add income"),
            Self::GetIncomes => f.write_str("get incomes"),
        }
    }
}

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("validation failed: {0}")]
    InvalidIncome(#[from] IncomeViolation),
    #[error("validation failed: {0}")]
    InvalidPeriod(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("failed to {stage}: {source}")]
    Storage {
        stage: Stage,
        #[source]
        source: StorageError,
    },
    #[error("amount overflow: {0}")]
    Overflow(String),
}

impl EngineError {
    pub(crate) fn storage(stage: Stage, source: StorageError) -> Self {
        Self::Storage { stage, source }
    }

    /// Returns the class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidIncome(_) | Self::InvalidPeriod(_) | Self::InvalidAmount(_) => {
                ErrorKind::Validation
            }
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Storage { .. } | Self::Overflow(_) => ErrorKind::Storage,
        }
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidIncome(a), Self::InvalidIncome(b)) => a == b,
            (Self::InvalidPeriod(a), Self::InvalidPeriod(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (
                Self::Storage {
                    stage: a,
                    source: sa,
                },
                Self::Storage {
                    stage: b,
                    source: sb,
                },
            ) => a == b && sa.to_string() == sb.to_string(),
            (Self::Overflow(a), Self::Overflow(b)) => a == b,
            _ => false,
        }
    }
}
