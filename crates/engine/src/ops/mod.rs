use std::{fmt, sync::Arc};

use serde::Deserialize;

use crate::IncomeRepository;

mod add;
mod period;

/// What a period query answers when the repository returns no rows.
///
/// Pick one per deployment; an instance never mixes both.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyPeriod {
    /// An empty period is a normal, empty result.
    #[default]
    Empty,
    /// An empty period is reported as [`EngineError::NotFound`].
    ///
    /// [`EngineError::NotFound`]: crate::EngineError::NotFound
    NotFound,
}

/// Income use cases: validation and orchestration on top of an
/// [`IncomeRepository`].
///
/// Holds no mutable state, so one instance can serve concurrent callers.
/// Deadlines are the caller's business: dropping a pending future cancels the
/// repository call underneath it.
#[derive(Clone)]
pub struct IncomeUseCase {
    repository: Arc<dyn IncomeRepository>,
    empty_period: EmptyPeriod,
}

impl IncomeUseCase {
    pub fn new(repository: Arc<dyn IncomeRepository>) -> Self {
        Self {
            repository,
            empty_period: EmptyPeriod::default(),
        }
    }

    #[must_use]
    pub fn empty_period(mut self, policy: EmptyPeriod) -> Self {
        self.empty_period = policy;
        self
    }
}

impl fmt::Debug for IncomeUseCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IncomeUseCase")
            .field("empty_period", &self.empty_period)
            .finish_non_exhaustive()
    }
}
