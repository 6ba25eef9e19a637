use chrono::{DateTime, Utc};

use crate::{
    CategoryIncome, EngineError, Income, IncomeRow, Money, ResultEngine, error::Stage,
    group_by_category,
};

use super::{EmptyPeriod, IncomeUseCase};

/// Checks a period query, reporting every failed check at once.
///
/// The Unix epoch counts as unset: it is what a missing wire timestamp
/// decodes to.
fn validate_period(
    user_id: i64,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> ResultEngine<(DateTime<Utc>, DateTime<Utc>)> {
    let start = start.filter(|instant| *instant != DateTime::UNIX_EPOCH);
    let end = end.filter(|instant| *instant != DateTime::UNIX_EPOCH);

    let mut problems = Vec::new();
    if user_id <= 0 {
        problems.push("user ID must be valid");
    }
    if start.is_none() {
        problems.push("start date is required");
    }
    if end.is_none() {
        problems.push("end date is required");
    }
    if let (Some(start), Some(end)) = (start, end)
        && start > end
    {
        problems.push("start date must not be after end date");
    }

    match (start, end) {
        (Some(start), Some(end)) if problems.is_empty() => Ok((start, end)),
        _ => Err(EngineError::InvalidPeriod(problems.join("; "))),
    }
}

impl IncomeUseCase {
    /// Incomes of a user recorded between `start` and `end` (inclusive), in
    /// repository order.
    pub async fn incomes_for_period(
        &self,
        user_id: i64,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> ResultEngine<Vec<Income>> {
        let rows = self.period_rows(user_id, start, end).await?;
        Ok(rows.into_iter().map(Income::from).collect())
    }

    /// Same query as [`incomes_for_period`](Self::incomes_for_period),
    /// grouped per category.
    pub async fn category_incomes_for_period(
        &self,
        user_id: i64,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> ResultEngine<Vec<CategoryIncome>> {
        let rows = self.period_rows(user_id, start, end).await?;
        Ok(group_by_category(rows))
    }

    /// Sum of the incomes recorded in the period.
    pub async fn income_total_for_period(
        &self,
        user_id: i64,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> ResultEngine<Money> {
        let rows = self.period_rows(user_id, start, end).await?;
        rows.iter().try_fold(Money::ZERO, |total, row| {
            total
                .checked_add(Money::new(row.amount_minor))
                .ok_or_else(|| EngineError::Overflow(format!("total of user {user_id}")))
        })
    }

    async fn period_rows(
        &self,
        user_id: i64,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> ResultEngine<Vec<IncomeRow>> {
        let (start, end) = validate_period(user_id, start, end)?;

        let rows = self
            .repository
            .incomes_for_period(user_id, start, end)
            .await
            .map_err(|err| EngineError::storage(Stage::GetIncomes, err))?;

        if rows.is_empty() && self.empty_period == EmptyPeriod::NotFound {
            return Err(EngineError::NotFound("incomes".to_string()));
        }

        tracing::debug!(user_id, rows = rows.len(), "loaded incomes for period");
        Ok(rows)
    }
}
