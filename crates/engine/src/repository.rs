//! Storage abstraction the use case depends on.
//!
//! The repository is a thin sink: it receives primitives, not domain types,
//! and returns raw rows. Implementations must be cancel-safe, i.e. dropping a
//! pending call must not leave a partial write behind.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use thiserror::Error;

use crate::IncomeRow;

/// Failures reported by a repository.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("user {0} does not exist")]
    UserNotFound(i64),
    #[error("amount must be positive, got {0} minor units")]
    NonPositiveAmount(i64),
    #[error("end date precedes start date")]
    InvalidRange,
    #[error("{0}")]
    Backend(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

#[async_trait]
pub trait IncomeRepository: Send + Sync {
    /// Store a new income.
    async fn add_income(
        &self,
        user_id: i64,
        category_id: i32,
        amount_minor: i64,
        description: &str,
    ) -> Result<(), StorageError>;

    /// Incomes of `user_id` recorded in `[start, end]` (both inclusive).
    ///
    /// The returned order is the order callers see.
    async fn incomes_for_period(
        &self,
        user_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<IncomeRow>, StorageError>;
}
