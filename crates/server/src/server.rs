use std::{future::Future, sync::Arc, time::Duration};

use axum::{
    Router,
    routing::{get, post},
};
use engine::{EngineError, IncomeUseCase};
use serde::Deserialize;

use crate::{ServerError, incomes};

/// Shape of the answer to a period query. One per deployment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodView {
    #[default]
    Flat,
    ByCategory,
}

#[derive(Clone, Debug, Default)]
pub struct ServerOptions {
    pub view: PeriodView,
    /// Deadline applied to every use-case call. `None` waits forever.
    pub request_timeout: Option<Duration>,
}

#[derive(Clone)]
pub struct ServerState {
    pub incomes: Arc<IncomeUseCase>,
    pub options: ServerOptions,
}

impl ServerState {
    /// Awaits `operation`, dropping it when the request deadline fires.
    pub(crate) async fn within_deadline<T>(
        &self,
        operation: impl Future<Output = Result<T, EngineError>>,
    ) -> Result<T, ServerError> {
        let Some(limit) = self.options.request_timeout else {
            return Ok(operation.await?);
        };

        match tokio::time::timeout(limit, operation).await {
            Ok(result) => Ok(result?),
            Err(_) => {
                tracing::warn!("request deadline of {limit:?} exceeded");
                Err(ServerError::Timeout)
            }
        }
    }
}

pub fn router(use_case: IncomeUseCase, options: ServerOptions) -> Router {
    let state = ServerState {
        incomes: Arc::new(use_case),
        options,
    };

    Router::new()
        .route("/income", post(incomes::income_new))
        .route("/incomes", get(incomes::list))
        .route("/incomes/total", get(incomes::total))
        .with_state(state)
}

pub async fn run_with_listener(
    use_case: IncomeUseCase,
    options: ServerOptions,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(use_case, options)).await
}
