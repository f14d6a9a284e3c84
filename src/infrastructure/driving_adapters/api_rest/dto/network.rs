//! Network DTOs
//!
//! Data transfer objects for network API endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::models::network::{Currency, Network, NetworkAssociation, NetworkFee, Unit};

/// Query parameters for `GET /networks`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworksParams {
    /// Falls back to `discovery.mainnet` from configuration when absent
    pub mainnet: Option<bool>,
}

/// Currency response DTO
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyDto {
    pub uids: String,
    pub name: String,
    pub code: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
}

impl From<&Currency> for CurrencyDto {
    fn from(currency: &Currency) -> Self {
        Self {
            uids: currency.uids().to_string(),
            name: currency.name().to_string(),
            code: currency.code().to_string(),
            kind: currency.kind().to_string(),
            issuer: currency.issuer().map(str::to_string),
        }
    }
}

/// Unit response DTO
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitDto {
    pub uids: String,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
}

impl From<&Unit> for UnitDto {
    fn from(unit: &Unit) -> Self {
        Self {
            uids: unit.uids().to_string(),
            name: unit.name().to_string(),
            symbol: unit.symbol().to_string(),
            decimals: unit.decimals(),
        }
    }
}

/// A currency with its units on one network
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationDto {
    pub currency: CurrencyDto,
    pub base_unit: String,
    pub default_unit: String,
    /// Sorted by decimals, largest first
    pub units: Vec<UnitDto>,
}

impl AssociationDto {
    fn new(currency: &Currency, association: &NetworkAssociation) -> Self {
        let mut units: Vec<UnitDto> = association.units().iter().map(UnitDto::from).collect();
        units.sort_by(|a, b| b.decimals.cmp(&a.decimals).then_with(|| a.uids.cmp(&b.uids)));

        Self {
            currency: CurrencyDto::from(currency),
            base_unit: association.base_unit().uids().to_string(),
            default_unit: association.default_unit().uids().to_string(),
            units,
        }
    }
}

/// Fee tier response DTO; `amount` is in base units
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkFeeDto {
    pub time_interval_ms: u64,
    pub amount: String,
    pub unit: String,
}

impl From<&NetworkFee> for NetworkFeeDto {
    fn from(fee: &NetworkFee) -> Self {
        let amount = fee.price_per_cost_factor();
        Self {
            time_interval_ms: fee.time_interval_ms(),
            amount: amount.base_value().to_string(),
            unit: amount.unit().base_unit().unwrap_or(amount.unit()).uids().to_string(),
        }
    }
}

/// Network response DTO
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkResponseDto {
    pub uids: String,
    pub name: String,
    pub is_mainnet: bool,
    pub height: u64,
    pub confirmations_until_final: u32,
    pub currency: CurrencyDto,
    pub associations: Vec<AssociationDto>,
    pub fees: Vec<NetworkFeeDto>,
}

impl From<&Network> for NetworkResponseDto {
    fn from(network: &Network) -> Self {
        let mut associations: Vec<AssociationDto> = network
            .associations()
            .iter()
            .map(|(currency, association)| AssociationDto::new(currency, association))
            .collect();
        associations.sort_by(|a, b| a.currency.uids.cmp(&b.currency.uids));

        Self {
            uids: network.uids().to_string(),
            name: network.name().to_string(),
            is_mainnet: network.is_mainnet(),
            height: network.height(),
            confirmations_until_final: network.confirmations_until_final(),
            currency: CurrencyDto::from(network.currency()),
            associations,
            fees: network.fees().iter().map(NetworkFeeDto::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::networks::assembler::assemble_network;
    use crate::domain::models::defaults::{default_blockchains, default_currencies};

    fn ethereum_mainnet() -> Network {
        let blockchain = default_blockchains(true)
            .into_iter()
            .find(|b| b.id == "ethereum-mainnet")
            .unwrap();
        assemble_network(&blockchain, default_currencies("ethereum-mainnet")).unwrap()
    }

    #[test]
    fn test_network_dto_shape() {
        let dto = NetworkResponseDto::from(&ethereum_mainnet());
        let json = serde_json::to_value(&dto).unwrap();

        assert_eq!(json["uids"], "ethereum-mainnet");
        assert_eq!(json["isMainnet"], true);
        assert_eq!(json["confirmationsUntilFinal"], 6);
        assert_eq!(json["currency"]["type"], "native");
        assert!(json["currency"].get("issuer").is_none());
        assert_eq!(json["fees"][0]["timeIntervalMs"], 600_000);
    }

    #[test]
    fn test_units_sorted_by_decimals_descending() {
        let dto = NetworkResponseDto::from(&ethereum_mainnet());
        let association = &dto.associations[0];

        let decimals: Vec<u8> = association.units.iter().map(|u| u.decimals).collect();
        assert_eq!(decimals, vec![18, 9, 0]);
        assert_eq!(association.default_unit, association.units[0].uids);
    }

    #[test]
    fn test_fee_amount_is_in_base_unit() {
        let dto = NetworkResponseDto::from(&ethereum_mainnet());
        let fee = &dto.fees[0];
        let base = &dto.associations[0].base_unit;

        assert_eq!(&fee.unit, base);
        assert!(!fee.amount.contains('.'));
    }
}
