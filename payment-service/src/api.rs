use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Serialize;
use shared::*;
use tracing::{error, warn};

use crate::handlers::{CommandHandler, QueryHandler};

const STORAGE_FAILURE_MESSAGE: &str = "failed to access payment store";

#[derive(Clone)]
pub struct AppState {
    pub commands: CommandHandler,
    pub queries: QueryHandler,
}

impl AppState {
    pub fn new(repository: Arc<dyn PaymentRepository>) -> Self {
        Self {
            commands: CommandHandler::new(repository.clone()),
            queries: QueryHandler::new(repository),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TakeMoneyResponse {
    pub message: String,
    pub id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindPaymentsResponse {
    pub item_count: usize,
    pub items: Vec<PaymentRecord>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payment", post(take_money).get(find_payments))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(
            tower_http::cors::CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::Any)
                .allow_headers(tower_http::cors::Any),
        )
}

pub async fn take_money(
    State(state): State<AppState>,
    payload: Result<Json<PaymentRequest>, JsonRejection>,
) -> Result<Json<TakeMoneyResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Unreadable payment body: {}", rejection);
        error_response(StatusCode::BAD_REQUEST, rejection.body_text())
    })?;

    // Runs detached so a dropped client connection cannot abort the save midway
    let commands = state.commands.clone();
    let outcome = tokio::spawn(async move { commands.take_money(request).await }).await;

    match outcome {
        Ok(Ok(record)) => Ok(Json(TakeMoneyResponse {
            message: format!("Payment {} recorded", record.id),
            id: record.id,
        })),
        Ok(Err(CommandError::Validation(e))) => {
            Err(error_response(StatusCode::BAD_REQUEST, e.to_string()))
        }
        Ok(Err(CommandError::StorageFailure(_))) => Err(storage_failure()),
        Err(e) => {
            error!("Take-money task did not complete: {}", e);
            Err(storage_failure())
        }
    }
}

pub async fn find_payments(
    State(state): State<AppState>,
    params: Result<Query<PaymentQuery>, QueryRejection>,
) -> Result<Json<FindPaymentsResponse>, ApiError> {
    // e.g. a repeated `id` parameter, which no single filter can represent
    let Query(query) = params.map_err(|rejection| {
        warn!("Unreadable payment query: {}", rejection);
        query_error(QueryError::Validation(ValidationError::new(
            "query",
            rejection.body_text(),
        )))
    })?;

    let result = state.queries.find_payments(query).await.map_err(query_error)?;

    Ok(Json(FindPaymentsResponse {
        item_count: result.count(),
        items: result.into_items(),
    }))
}

pub async fn health_check() -> &'static str {
    "OK"
}

fn query_error(e: QueryError) -> ApiError {
    match e {
        QueryError::Validation(e) => error_response(StatusCode::BAD_REQUEST, e.to_string()),
        QueryError::StorageFailure(_) => storage_failure(),
    }
}

fn error_response(status: StatusCode, error: String) -> ApiError {
    (status, Json(ErrorResponse { error }))
}

// Causes are logged by the handlers; callers only get a stable message.
fn storage_failure() -> ApiError {
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        STORAGE_FAILURE_MESSAGE.to_string(),
    )
}
