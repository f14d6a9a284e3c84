//! Token DTOs
//!
//! Data transfer objects for the token catalog endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::transaction::validate_blockchain_id;
use crate::domain::models::currency::{CurrencyDescriptor, Denomination};

/// Query parameters for `GET /tokens`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TokensParams {
    #[validate(custom(function = "validate_blockchain_id"))]
    pub blockchain_id: Option<String>,
}

/// Denomination response DTO
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DenominationDto {
    pub name: String,
    pub code: String,
    pub symbol: String,
    pub decimals: u8,
}

impl From<Denomination> for DenominationDto {
    fn from(denomination: Denomination) -> Self {
        Self {
            name: denomination.name,
            code: denomination.code,
            symbol: denomination.symbol,
            decimals: denomination.decimals,
        }
    }
}

/// Token response DTO
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponseDto {
    pub id: String,
    pub blockchain_id: String,
    pub name: String,
    pub code: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub denominations: Vec<DenominationDto>,
}

impl From<CurrencyDescriptor> for TokenResponseDto {
    fn from(token: CurrencyDescriptor) -> Self {
        Self {
            id: token.id,
            blockchain_id: token.blockchain_id,
            name: token.name,
            code: token.code,
            kind: token.kind,
            address: token.address,
            denominations: token.denominations.into_iter().map(DenominationDto::from).collect(),
        }
    }
}
