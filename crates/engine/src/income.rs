//! Income entries.
//!
//! An [`Income`] is one recorded earning event. It has no identity of its
//! own: every add creates a new, independent row and rows read back are
//! immutable snapshots.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use thiserror::Error;

use crate::Money;

/// Business rule an [`Income`] breaks. Checked in declaration order.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum IncomeViolation {
    #[error("amount must be greater than 0")]
    NonPositiveAmount,
    #[error("user ID must be valid")]
    InvalidUserId,
    #[error("category ID must be valid")]
    InvalidCategoryId,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Income {
    pub user_id: i64,
    pub category_id: i32,
    pub amount: Money,
    pub description: String,
}

impl Income {
    pub fn new(
        user_id: i64,
        category_id: i32,
        amount: Money,
        description: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            category_id,
            amount,
            description: description.into(),
        }
    }

    /// Checks the income against its business rules, stopping at the first
    /// violation.
    pub fn validate(&self) -> Result<(), IncomeViolation> {
        if !self.amount.is_positive() {
            return Err(IncomeViolation::NonPositiveAmount);
        }
        if self.user_id <= 0 {
            return Err(IncomeViolation::InvalidUserId);
        }
        if self.category_id <= 0 {
            return Err(IncomeViolation::InvalidCategoryId);
        }
        Ok(())
    }
}

/// A stored income as the repository returns it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IncomeRow {
    pub user_id: i64,
    pub category_id: i32,
    pub amount_minor: i64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<IncomeRow> for Income {
    fn from(row: IncomeRow) -> Self {
        Self {
            user_id: row.user_id,
            category_id: row.category_id,
            amount: Money::new(row.amount_minor),
            description: row.description,
        }
    }
}

/// Incomes of a period recorded under one category, in row order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryIncome {
    pub category_id: i32,
    pub incomes: Vec<Income>,
}

/// Groups rows by category.
///
/// Inside a category incomes keep the row order; the order of the categories
/// themselves is unspecified.
pub fn group_by_category(rows: Vec<IncomeRow>) -> Vec<CategoryIncome> {
    let mut by_category: HashMap<i32, Vec<Income>> = HashMap::new();
    for row in rows {
        by_category
            .entry(row.category_id)
            .or_default()
            .push(Income::from(row));
    }

    by_category
        .into_iter()
        .map(|(category_id, incomes)| CategoryIncome {
            category_id,
            incomes,
        })
        .collect()
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "incomes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub category_id: i32,
    pub amount_minor: i64,
    pub description: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for IncomeRow {
    fn from(model: Model) -> Self {
        Self {
            user_id: model.user_id,
            category_id: model.category_id,
            amount_minor: model.amount_minor,
            description: model.description,
            created_at: model.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(category_id: i32, amount_minor: i64, description: &str) -> IncomeRow {
        IncomeRow {
            user_id: 1,
            category_id,
            amount_minor,
            description: description.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn valid_income_passes() {
        let income = Income::new(1, 2, Money::from_decimal(100.50), "groceries");
        assert_eq!(income.validate(), Ok(()));
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        for cents in [0, -1, -500, i64::MIN] {
            let income = Income::new(1, 2, Money::new(cents), "x");
            assert_eq!(income.validate(), Err(IncomeViolation::NonPositiveAmount));
        }
    }

    #[test]
    fn invalid_ids_are_rejected() {
        for user_id in [0, -1] {
            let income = Income::new(user_id, 2, Money::new(100), "x");
            assert_eq!(income.validate(), Err(IncomeViolation::InvalidUserId));
        }
        for category_id in [0, -3] {
            let income = Income::new(1, category_id, Money::new(100), "x");
            assert_eq!(income.validate(), Err(IncomeViolation::InvalidCategoryId));
        }
    }

    #[test]
    fn amount_is_checked_first() {
        let income = Income::new(0, 0, Money::ZERO, "");
        assert_eq!(income.validate(), Err(IncomeViolation::NonPositiveAmount));
        let income = Income::new(0, 0, Money::new(1), "");
        assert_eq!(income.validate(), Err(IncomeViolation::InvalidUserId));
    }

    #[test]
    fn grouping_keeps_row_order_inside_a_category() {
        let rows = vec![row(1, 100, "a"), row(1, 33, "b"), row(2, 200, "c")];

        let mut groups = group_by_category(rows);
        groups.sort_by_key(|g| g.category_id);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category_id, 1);
        let amounts: Vec<i64> = groups[0].incomes.iter().map(|i| i.amount.cents()).collect();
        assert_eq!(amounts, vec![100, 33]);
        assert_eq!(groups[1].category_id, 2);
        assert_eq!(groups[1].incomes.len(), 1);
        assert_eq!(groups[1].incomes[0].amount.cents(), 200);
    }

    #[test]
    fn grouping_no_rows() {
        assert!(group_by_category(Vec::new()).is_empty());
    }
}
