//! Network Assembler
//!
//! Turns merged currency descriptors and a blockchain descriptor into a
//! `Network`: one association per currency, the native currency, and the fee
//! schedule. Incomplete blockchains produce no network at all.

use std::collections::HashMap;

use crate::domain::models::blockchain::{BlockchainDescriptor, BlockchainFee};
use crate::domain::models::currency::{CurrencyDescriptor, Denomination};
use crate::domain::models::network::{
    Amount, CreateNetworkData, Currency, Network, NetworkAssociation, NetworkFee, Unit,
};

const MILLIS_PER_MINUTE: u64 = 60_000;

/// Build the currency and its association from a descriptor.
///
/// The base unit comes from the first zero-decimal denomination, or is
/// synthesized as `<CODE>_INTEGER` when there is none. The default unit is the
/// unit with the most decimals; the base unit wins ties, then declaration order.
#[must_use]
pub fn assemble_currency(descriptor: &CurrencyDescriptor) -> (Currency, NetworkAssociation) {
    let currency = Currency::new(
        descriptor.id.clone(),
        descriptor.name.clone(),
        descriptor.code.clone(),
        descriptor.kind.clone(),
        descriptor.address.clone(),
    );

    let (base_denominations, other_denominations): (Vec<&Denomination>, Vec<&Denomination>) =
        descriptor.denominations.iter().partition(|d| d.is_base());

    let base_unit = match base_denominations.first() {
        Some(denomination) => Unit::base(
            currency.clone(),
            unit_uids(&currency, &denomination.code),
            denomination.name.clone(),
            denomination.symbol.clone(),
        ),
        None => synthesized_base_unit(&currency),
    };

    let mut units = Vec::with_capacity(other_denominations.len() + 1);
    units.push(base_unit.clone());
    units.extend(other_denominations.into_iter().map(|denomination| {
        Unit::derived(
            currency.clone(),
            unit_uids(&currency, &denomination.code),
            denomination.name.clone(),
            denomination.symbol.clone(),
            &base_unit,
            denomination.decimals,
        )
    }));

    // stable: base first, then declaration order
    units.sort_by(|a, b| b.decimals().cmp(&a.decimals()));
    let default_unit = units[0].clone();

    let association = NetworkAssociation::new(base_unit, default_unit, units);
    (currency, association)
}

/// Assemble the network for one blockchain, or `None` if it is incomplete
#[must_use]
pub fn assemble_network(
    blockchain: &BlockchainDescriptor,
    currencies: impl IntoIterator<Item = CurrencyDescriptor>,
) -> Option<Network> {
    let associations: HashMap<Currency, NetworkAssociation> = currencies
        .into_iter()
        .filter(|descriptor| descriptor.blockchain_id == blockchain.id)
        .map(|descriptor| assemble_currency(&descriptor))
        .collect();

    let Some(currency) = find_native_currency(&associations, &blockchain.currency) else {
        tracing::debug!(
            blockchain_id = %blockchain.id,
            currency = %blockchain.currency,
            "Missed currency, dropping network"
        );
        return None;
    };

    let Some(association) = associations.get(&currency) else {
        tracing::debug!(
            blockchain_id = %blockchain.id,
            currency = %blockchain.currency,
            "Missed currency association, dropping network"
        );
        return None;
    };

    let fees = parse_fees(&blockchain.id, &blockchain.fee_estimates, association.base_unit());
    if fees.is_empty() {
        tracing::debug!(blockchain_id = %blockchain.id, name = %blockchain.name, "Missed fees, dropping network");
        return None;
    }

    let data = CreateNetworkData {
        uids: blockchain.id.clone(),
        name: blockchain.name.clone(),
        is_mainnet: blockchain.is_mainnet,
        currency,
        height: blockchain.block_height,
        confirmations_until_final: blockchain.confirmations_until_final,
        associations,
        fees,
    };

    match Network::new(data) {
        Ok(network) => Some(network),
        Err(error) => {
            tracing::debug!(blockchain_id = %blockchain.id, error = %error, "Invalid network, dropping");
            None
        }
    }
}

/// Parse fee tiers, skipping any tier whose interval or amount does not parse
#[must_use]
pub fn parse_fees(blockchain_id: &str, estimates: &[BlockchainFee], fee_unit: &Unit) -> Vec<NetworkFee> {
    estimates
        .iter()
        .filter_map(|estimate| {
            let Some(interval_ms) = parse_tier(&estimate.tier) else {
                tracing::debug!(blockchain_id, tier = %estimate.tier, "Skipping unparsable fee tier");
                return None;
            };
            match Amount::parse(&estimate.amount, fee_unit) {
                Ok(amount) => Some(NetworkFee::new(interval_ms, amount)),
                Err(error) => {
                    tracing::debug!(blockchain_id, error = %error, "Skipping unparsable fee amount");
                    None
                }
            }
        })
        .collect()
}

/// `"10m"` -> 600000: drop the unit suffix, read minutes, convert to milliseconds
fn parse_tier(tier: &str) -> Option<u64> {
    let mut chars = tier.chars();
    chars.next_back()?;
    let minutes: u64 = chars.as_str().trim().parse().ok()?;
    minutes.checked_mul(MILLIS_PER_MINUTE)
}

/// Case-insensitive code match; native currencies win over tokens sharing the code
fn find_native_currency(associations: &HashMap<Currency, NetworkAssociation>, code: &str) -> Option<Currency> {
    associations
        .keys()
        .filter(|currency| currency.code().eq_ignore_ascii_case(code))
        .min_by(|a, b| {
            (a.kind() != "native", a.uids()).cmp(&(b.kind() != "native", b.uids()))
        })
        .cloned()
}

fn unit_uids(currency: &Currency, code: &str) -> String {
    format!("{}-{}", currency.name(), code)
}

fn synthesized_base_unit(currency: &Currency) -> Unit {
    let upper = currency.code().to_uppercase();
    let name = format!("{upper}_INTEGER");
    let symbol = format!("{upper}I");
    Unit::base(currency.clone(), unit_uids(currency, &name), name, symbol)
}
