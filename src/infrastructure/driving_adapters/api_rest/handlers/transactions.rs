//! Transaction Handlers
//!
//! HTTP handlers for transaction lookup and submission.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use validator::Validate;

use crate::infrastructure::driving_adapters::api_rest::dto::transaction::{
    GetTransactionParams, SubmitTransactionDto, TransactionQueryDto, TransactionResponseDto,
};
use crate::infrastructure::driving_adapters::api_rest::AppState;
use crate::shared::errors::ApiError;

/// Create the router for transaction endpoints
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(submit_transaction))
        .route("/query", post(query_transactions))
        .route("/:id", get(get_transaction))
}

/// POST /transactions/query - Fetch all transactions of a set of addresses
///
/// # Responses
///
/// * 200 OK - Transactions of every address chunk, joined
/// * 400 Bad Request - Validation error
/// * 502 Bad Gateway - Any chunk failed against the blockchain database
#[axum::debug_handler]
async fn query_transactions(
    State(state): State<AppState>,
    Json(dto): Json<TransactionQueryDto>,
) -> Result<Json<Vec<TransactionResponseDto>>, ApiError> {
    dto.validate()?;

    let transactions = state.get_transactions_use_case.execute(dto.into()).await?;

    Ok(Json(transactions.into_iter().map(TransactionResponseDto::from).collect()))
}

/// GET /transactions/:id - Get one transaction
///
/// # Responses
///
/// * 200 OK - Transaction found
/// * 400 Bad Request - Validation error
/// * 404 Not Found - Unknown transaction
/// * 502 Bad Gateway - Blockchain database failure
#[axum::debug_handler]
async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<GetTransactionParams>,
) -> Result<Json<TransactionResponseDto>, ApiError> {
    params.validate()?;

    let transaction = state
        .get_transaction_use_case
        .execute(&params.blockchain_id, &id, params.include_raw, params.include_proof)
        .await?;

    Ok(Json(TransactionResponseDto::from(transaction)))
}

/// POST /transactions - Submit a signed transaction
///
/// # Responses
///
/// * 202 Accepted - Handed to the blockchain database
/// * 400 Bad Request - Validation error
/// * 502 Bad Gateway - Blockchain database failure
#[axum::debug_handler]
async fn submit_transaction(
    State(state): State<AppState>,
    Json(dto): Json<SubmitTransactionDto>,
) -> Result<StatusCode, ApiError> {
    dto.validate()?;
    let raw = dto
        .raw()
        .ok_or_else(|| ApiError::BadRequest("data must be standard base64".to_string()))?;

    state
        .submit_transaction_use_case
        .execute(&dto.blockchain_id, &dto.transaction_id, &raw)
        .await?;

    Ok(StatusCode::ACCEPTED)
}
