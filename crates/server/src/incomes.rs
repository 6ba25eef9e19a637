//! Income API endpoints

use api_types::income::{
    CategoryIncomeListResponse, CategoryIncomeView, IncomeListResponse, IncomeNew, IncomePeriod,
    IncomeTotal, IncomeView,
};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use engine::{CategoryIncome, Income, Money};

use crate::{
    ServerError,
    server::{PeriodView, ServerState},
};

fn map_income(income: &Income) -> IncomeView {
    IncomeView {
        category_id: income.category_id,
        amount_minor: income.amount.cents(),
        description: income.description.clone(),
    }
}

fn map_category(category: &CategoryIncome) -> CategoryIncomeView {
    CategoryIncomeView {
        category_id: category.category_id,
        incomes: category.incomes.iter().map(map_income).collect(),
    }
}

fn period_bounds(payload: &IncomePeriod) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
    (
        payload.start_date.map(|dt| dt.with_timezone(&Utc)),
        payload.end_date.map(|dt| dt.with_timezone(&Utc)),
    )
}

pub async fn income_new(
    State(state): State<ServerState>,
    Json(payload): Json<IncomeNew>,
) -> Result<StatusCode, ServerError> {
    let amount = Money::from_decimal(payload.amount);

    state
        .within_deadline(state.incomes.add_income(
            payload.user_id,
            payload.category_id,
            amount.cents(),
            &payload.description,
        ))
        .await?;

    tracing::info!(
        user_id = payload.user_id,
        category_id = payload.category_id,
        %amount,
        "income recorded"
    );
    Ok(StatusCode::CREATED)
}

pub async fn list(
    State(state): State<ServerState>,
    Json(payload): Json<IncomePeriod>,
) -> Result<Response, ServerError> {
    let (start, end) = period_bounds(&payload);

    let response = match state.options.view {
        PeriodView::Flat => {
            let incomes = state
                .within_deadline(state.incomes.incomes_for_period(payload.user_id, start, end))
                .await?;
            Json(IncomeListResponse {
                incomes: incomes.iter().map(map_income).collect(),
            })
            .into_response()
        }
        PeriodView::ByCategory => {
            let categories = state
                .within_deadline(
                    state
                        .incomes
                        .category_incomes_for_period(payload.user_id, start, end),
                )
                .await?;
            Json(CategoryIncomeListResponse {
                categories: categories.iter().map(map_category).collect(),
            })
            .into_response()
        }
    };

    Ok(response)
}

pub async fn total(
    State(state): State<ServerState>,
    Json(payload): Json<IncomePeriod>,
) -> Result<Json<IncomeTotal>, ServerError> {
    let (start, end) = period_bounds(&payload);

    let total = state
        .within_deadline(
            state
                .incomes
                .income_total_for_period(payload.user_id, start, end),
        )
        .await?;

    Ok(Json(IncomeTotal {
        total_minor: total.cents(),
        total: total.to_string(),
    }))
}
