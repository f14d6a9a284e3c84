//! Blockchain Descriptor
//!
//! Raw blockchain record as received from the blockchain database or the
//! built-in defaults, before any network assembly takes place.

/// A fee estimate tier declared by a blockchain.
///
/// `tier` is an interval such as `"10m"`: an integer count of minutes followed
/// by a one character unit suffix. `amount` is expressed in the base unit of the
/// blockchain's native currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockchainFee {
    pub amount: String,
    pub tier: String,
}

impl BlockchainFee {
    #[must_use]
    pub fn new(amount: impl Into<String>, tier: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            tier: tier.into(),
        }
    }
}

/// Blockchain descriptor (immutable once received)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockchainDescriptor {
    pub id: String,
    pub name: String,
    pub network: String,
    pub is_mainnet: bool,
    /// Code of the native currency, matched case-insensitively against currency codes
    pub currency: String,
    pub block_height: u64,
    pub fee_estimates: Vec<BlockchainFee>,
    pub confirmations_until_final: u32,
}
