//! SeaORM implementation of [`IncomeRepository`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveValue, ConnectionTrait, DatabaseConnection, QueryFilter, QueryOrder, TransactionTrait,
    prelude::*,
};

use crate::{IncomeRepository, IncomeRow, StorageError, income, users};

/// Run a block inside a DB transaction, committing on success.
///
/// On error the transaction is dropped, which rolls it back. The same happens
/// when the surrounding future is dropped before the commit.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

#[derive(Clone, Debug)]
pub struct SqlIncomeRepository {
    database: DatabaseConnection,
}

impl SqlIncomeRepository {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

async fn ensure_user<C: ConnectionTrait>(db: &C, user_id: i64) -> Result<(), StorageError> {
    match users::Entity::find_by_id(user_id).one(db).await? {
        Some(_) => Ok(()),
        None => Err(StorageError::UserNotFound(user_id)),
    }
}

#[async_trait]
impl IncomeRepository for SqlIncomeRepository {
    async fn add_income(
        &self,
        user_id: i64,
        category_id: i32,
        amount_minor: i64,
        description: &str,
    ) -> Result<(), StorageError> {
        if amount_minor <= 0 {
            return Err(StorageError::NonPositiveAmount(amount_minor));
        }

        with_tx!(self, |db_tx| {
            async {
                ensure_user(&db_tx, user_id).await?;

                let active = income::ActiveModel {
                    id: ActiveValue::NotSet,
                    user_id: ActiveValue::Set(user_id),
                    category_id: ActiveValue::Set(category_id),
                    amount_minor: ActiveValue::Set(amount_minor),
                    description: ActiveValue::Set(description.to_string()),
                    created_at: ActiveValue::Set(Utc::now()),
                };
                income::Entity::insert(active).exec(&db_tx).await?;
                Ok::<(), StorageError>(())
            }
            .await
        })
    }

    async fn incomes_for_period(
        &self,
        user_id: i64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<IncomeRow>, StorageError> {
        if end < start {
            return Err(StorageError::InvalidRange);
        }
        ensure_user(&self.database, user_id).await?;

        let models = income::Entity::find()
            .filter(income::Column::UserId.eq(user_id))
            .filter(income::Column::CreatedAt.between(start, end))
            .order_by_asc(income::Column::CreatedAt)
            .order_by_asc(income::Column::Id)
            .all(&self.database)
            .await?;

        Ok(models.into_iter().map(IncomeRow::from).collect())
    }
}
