use crate::{EngineError, Income, Money, ResultEngine, error::Stage};

use super::IncomeUseCase;

impl IncomeUseCase {
    /// Validates and stores a new income.
    ///
    /// `amount_minor` is in cents. Invalid input never reaches the repository.
    pub async fn add_income(
        &self,
        user_id: i64,
        category_id: i32,
        amount_minor: i64,
        description: &str,
    ) -> ResultEngine<()> {
        let income = Income::new(user_id, category_id, Money::new(amount_minor), description);
        income.validate()?;

        tracing::debug!(user_id, category_id, amount = %income.amount, "recording income");

        self.repository
            .add_income(user_id, category_id, amount_minor, description)
            .await
            .map_err(|err| EngineError::storage(Stage::AddIncome, err))
    }
}
