use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

pub mod income {
    use super::*;

    /// Request body for recording an income.
    ///
    /// `amount` is a decimal (`100.50`); the server converts it to minor units
    /// on arrival.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct IncomeNew {
        pub user_id: i64,
        pub category_id: i32,
        pub amount: f64,
        #[serde(default)]
        pub description: String,
    }

    /// Request body for period queries.
    ///
    /// Both dates are RFC 3339 timestamps and inclusive. Missing dates are
    /// rejected by the server.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct IncomePeriod {
        pub user_id: i64,
        pub start_date: Option<DateTime<FixedOffset>>,
        pub end_date: Option<DateTime<FixedOffset>>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct IncomeView {
        pub category_id: i32,
        pub amount_minor: i64,
        pub description: String,
    }

    /// Flat answer to a period query, in storage order.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct IncomeListResponse {
        pub incomes: Vec<IncomeView>,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct CategoryIncomeView {
        pub category_id: i32,
        pub incomes: Vec<IncomeView>,
    }

    /// Per-category answer to a period query. Category order is unspecified.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryIncomeListResponse {
        pub categories: Vec<CategoryIncomeView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct IncomeTotal {
        pub total_minor: i64,
        /// Fixed two-decimal rendering of `total_minor`.
        pub total: String,
    }
}
