//! Income ledger engine.
//!
//! Validates income entries, stores them through an [`IncomeRepository`] and
//! answers period queries (flat, grouped per category, or totalled).
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use engine::{EmptyPeriod, IncomeUseCase, SqlIncomeRepository};
//!
//! # async fn run(db: sea_orm::DatabaseConnection) -> Result<(), engine::EngineError> {
//! let incomes = IncomeUseCase::new(Arc::new(SqlIncomeRepository::new(db)))
//!     .empty_period(EmptyPeriod::Empty);
//! incomes.add_income(1, 2, 100_50, "salary").await?;
//! # Ok(())
//! # }
//! ```

pub use error::{EngineError, ErrorKind, Stage};
pub use income::{CategoryIncome, Income, IncomeRow, IncomeViolation, group_by_category};
pub use money::Money;
pub use ops::{EmptyPeriod, IncomeUseCase};
pub use repository::{IncomeRepository, StorageError};
pub use storage::SqlIncomeRepository;

mod error;
pub mod income;
mod money;
mod ops;
mod repository;
mod storage;
pub mod users;

type ResultEngine<T> = Result<T, EngineError>;
