//! Network Handlers
//!
//! HTTP handlers for network discovery.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::infrastructure::driving_adapters::api_rest::dto::network::{NetworkResponseDto, NetworksParams};
use crate::infrastructure::driving_adapters::api_rest::AppState;
use crate::shared::errors::ApiError;

/// Create the router for network endpoints
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(discover_networks))
}

/// GET /networks - Discover the network catalog
///
/// Runs a fresh discovery on every call. Blockchain database outages degrade
/// to the built-in defaults, so this endpoint does not fail on upstream errors.
///
/// # Responses
///
/// * 200 OK - Discovered networks, sorted by uids
#[axum::debug_handler]
async fn discover_networks(
    State(state): State<AppState>,
    Query(params): Query<NetworksParams>,
) -> Result<Json<Vec<NetworkResponseDto>>, ApiError> {
    let mainnet = params.mainnet.unwrap_or(state.config.discovery.mainnet);

    let networks = state.discover_networks_use_case.execute(mainnet).await;

    let mut response: Vec<NetworkResponseDto> = networks.iter().map(NetworkResponseDto::from).collect();
    response.sort_by(|a, b| a.uids.cmp(&b.uids));
    Ok(Json(response))
}
