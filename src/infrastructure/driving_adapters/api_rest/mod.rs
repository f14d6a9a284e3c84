//! REST API Module
//!
//! Contains HTTP handlers, DTOs, and middleware for the REST API.

pub mod dto;
pub mod handlers;
pub mod middleware;

use std::sync::Arc;

use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::application::use_cases::networks::DiscoverNetworksUseCase;
use crate::application::use_cases::tokens::ListTokensUseCase;
use crate::application::use_cases::transactions::{
    GetTransactionUseCase, GetTransactionsUseCase, SubmitTransactionUseCase,
};
use crate::domain::gateways::BlockchainQuery;
use crate::infrastructure::driven_adapters::config::AppConfig;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub discover_networks_use_case: Arc<DiscoverNetworksUseCase>,
    pub list_tokens_use_case: Arc<ListTokensUseCase>,
    pub get_transactions_use_case: Arc<GetTransactionsUseCase>,
    pub get_transaction_use_case: Arc<GetTransactionUseCase>,
    pub submit_transaction_use_case: Arc<SubmitTransactionUseCase>,
}

impl AppState {
    /// Wire every use case to one `BlockchainQuery`
    #[must_use]
    pub fn new(config: AppConfig, blockchain_query: Arc<dyn BlockchainQuery>) -> Self {
        let chunk_size = config.discovery.address_chunk_size;
        Self {
            config: Arc::new(config),
            discover_networks_use_case: Arc::new(DiscoverNetworksUseCase::new(blockchain_query.clone())),
            list_tokens_use_case: Arc::new(ListTokensUseCase::new(blockchain_query.clone())),
            get_transactions_use_case: Arc::new(GetTransactionsUseCase::with_chunk_size(
                blockchain_query.clone(),
                chunk_size,
            )),
            get_transaction_use_case: Arc::new(GetTransactionUseCase::new(blockchain_query.clone())),
            submit_transaction_use_case: Arc::new(SubmitTransactionUseCase::new(blockchain_query)),
        }
    }
}

/// Build the application router with its middleware stack
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/networks", handlers::networks::router())
        .nest("/tokens", handlers::tokens::router())
        .nest("/transactions", handlers::transactions::router())
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(state)
}
