//! Transaction DTOs
//!
//! Data transfer objects for transaction API endpoints.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::models::transaction::{Transaction, TransactionQuery};

lazy_static! {
    /// Blockchain ids look like `bitcoin-mainnet` or `ethereum-ropsten`
    static ref BLOCKCHAIN_ID_REGEX: Regex = Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("valid regex");
}

/// Validates a blockchain id
pub(crate) fn validate_blockchain_id(blockchain_id: &str) -> Result<(), ValidationError> {
    if BLOCKCHAIN_ID_REGEX.is_match(blockchain_id) {
        Ok(())
    } else {
        let mut error = ValidationError::new("blockchain_id");
        error.message = Some("Invalid blockchain id (lowercase alphanumeric words joined by '-')".into());
        Err(error)
    }
}

/// Validates that no address is blank
fn validate_addresses(addresses: &[String]) -> Result<(), ValidationError> {
    if addresses.iter().any(|a| a.trim().is_empty()) {
        let mut error = ValidationError::new("addresses");
        error.message = Some("Addresses must not be blank".into());
        return Err(error);
    }
    Ok(())
}

/// Validates a base64 payload
fn validate_base64(data: &str) -> Result<(), ValidationError> {
    if STANDARD.decode(data).is_err() {
        let mut error = ValidationError::new("base64");
        error.message = Some("Data must be standard base64".into());
        return Err(error);
    }
    Ok(())
}

fn validate_height_range(dto: &TransactionQueryDto) -> Result<(), ValidationError> {
    if dto.start_height > dto.end_height {
        let mut error = ValidationError::new("height_range");
        error.message = Some("startHeight must not exceed endHeight".into());
        return Err(error);
    }
    Ok(())
}

/// DTO for a bulk transaction lookup
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_height_range"))]
pub struct TransactionQueryDto {
    #[validate(length(min = 1, max = 100, message = "blockchainId must be between 1 and 100 characters"))]
    #[validate(custom(function = "validate_blockchain_id"))]
    pub blockchain_id: String,

    #[validate(length(max = 10000, message = "addresses can have at most 10000 items"))]
    #[validate(custom(function = "validate_addresses"))]
    pub addresses: Vec<String>,

    #[serde(default)]
    pub start_height: u64,

    pub end_height: u64,

    #[serde(default)]
    pub include_raw: bool,

    #[serde(default)]
    pub include_proof: bool,

    #[validate(range(min = 1, max = 1000, message = "maxPageSize must be between 1 and 1000"))]
    pub max_page_size: Option<u32>,
}

impl From<TransactionQueryDto> for TransactionQuery {
    fn from(dto: TransactionQueryDto) -> Self {
        Self {
            blockchain_id: dto.blockchain_id,
            addresses: dto.addresses,
            start_height: dto.start_height,
            end_height: dto.end_height,
            include_raw: dto.include_raw,
            include_proof: dto.include_proof,
            max_page_size: dto.max_page_size,
        }
    }
}

/// Query parameters for `GET /transactions/:id`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GetTransactionParams {
    #[validate(custom(function = "validate_blockchain_id"))]
    pub blockchain_id: String,

    #[serde(default)]
    pub include_raw: bool,

    #[serde(default)]
    pub include_proof: bool,
}

/// DTO for submitting a signed transaction
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitTransactionDto {
    #[validate(custom(function = "validate_blockchain_id"))]
    pub blockchain_id: String,

    #[validate(length(min = 1, max = 200, message = "transactionId must be between 1 and 200 characters"))]
    pub transaction_id: String,

    /// Base64 encoded signed transaction
    #[validate(length(min = 1, message = "data must not be empty"))]
    #[validate(custom(function = "validate_base64"))]
    pub data: String,
}

impl SubmitTransactionDto {
    /// Decoded transaction bytes; `None` unless `validate()` passed
    #[must_use]
    pub fn raw(&self) -> Option<Vec<u8>> {
        STANDARD.decode(&self.data).ok()
    }
}

/// Transaction response DTO
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponseDto {
    pub id: String,
    pub blockchain_id: String,
    pub hash: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_height: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmations: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Base64 encoded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proof: Option<String>,
}

impl From<Transaction> for TransactionResponseDto {
    fn from(transaction: Transaction) -> Self {
        Self {
            id: transaction.id,
            blockchain_id: transaction.blockchain_id,
            hash: transaction.hash,
            status: transaction.status,
            block_height: transaction.block_height,
            confirmations: transaction.confirmations,
            timestamp: transaction.timestamp,
            raw: transaction.raw.map(|raw| STANDARD.encode(raw)),
            proof: transaction.proof,
        }
    }
}
