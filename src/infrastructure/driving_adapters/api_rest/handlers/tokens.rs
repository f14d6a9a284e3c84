//! Token Handlers
//!
//! HTTP handlers for the ERC-20 token catalog.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use validator::Validate;

use crate::infrastructure::driving_adapters::api_rest::dto::token::{TokenResponseDto, TokensParams};
use crate::infrastructure::driving_adapters::api_rest::AppState;
use crate::shared::errors::ApiError;

/// Create the router for token endpoints
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_tokens))
}

/// GET /tokens - List ERC-20 tokens
///
/// # Responses
///
/// * 200 OK - Tokens sorted by id
/// * 400 Bad Request - Validation error
/// * 502 Bad Gateway - Blockchain database failure
#[axum::debug_handler]
async fn list_tokens(
    State(state): State<AppState>,
    Query(params): Query<TokensParams>,
) -> Result<Json<Vec<TokenResponseDto>>, ApiError> {
    params.validate()?;

    let tokens = state.list_tokens_use_case.execute(params.blockchain_id.as_deref()).await?;

    Ok(Json(tokens.into_iter().map(TokenResponseDto::from).collect()))
}
