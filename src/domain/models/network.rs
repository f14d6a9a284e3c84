//! Network Domain Model
//!
//! Assembled, typed representation of a blockchain network: its currencies,
//! their units, and the fee schedule. All values are immutable once built.

use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::shared::errors::DomainError;

/// A currency known to a network. Identity is `uids`.
#[derive(Debug, Clone)]
pub struct Currency {
    uids: String,
    name: String,
    code: String,
    kind: String,
    issuer: Option<String>,
}

impl Currency {
    #[must_use]
    pub fn new(uids: String, name: String, code: String, kind: String, issuer: Option<String>) -> Self {
        Self {
            uids,
            name,
            code,
            kind,
            issuer,
        }
    }

    #[must_use]
    pub fn uids(&self) -> &str {
        &self.uids
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[must_use]
    pub fn issuer(&self) -> Option<&str> {
        self.issuer.as_deref()
    }
}

impl PartialEq for Currency {
    fn eq(&self, other: &Self) -> bool {
        self.uids == other.uids
    }
}

impl Eq for Currency {}

impl Hash for Currency {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uids.hash(state);
    }
}

/// A currency-scoped unit of account. Identity is `uids`.
///
/// Base units have no `base` reference and zero decimals; every other unit
/// references its base and carries its decimal exponent relative to it.
#[derive(Debug, Clone)]
pub struct Unit {
    currency: Currency,
    uids: String,
    name: String,
    symbol: String,
    base: Option<Arc<Unit>>,
    decimals: u8,
}

impl Unit {
    /// Create a base unit
    #[must_use]
    pub fn base(currency: Currency, uids: String, name: String, symbol: String) -> Self {
        Self {
            currency,
            uids,
            name,
            symbol,
            base: None,
            decimals: 0,
        }
    }

    /// Create a unit derived from `base`
    #[must_use]
    pub fn derived(currency: Currency, uids: String, name: String, symbol: String, base: &Unit, decimals: u8) -> Self {
        Self {
            currency,
            uids,
            name,
            symbol,
            base: Some(Arc::new(base.clone())),
            decimals,
        }
    }

    #[must_use]
    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    #[must_use]
    pub fn uids(&self) -> &str {
        &self.uids
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The base unit this unit is scaled from (`None` for base units)
    #[must_use]
    pub fn base_unit(&self) -> Option<&Unit> {
        self.base.as_deref()
    }

    #[must_use]
    pub fn is_base(&self) -> bool {
        self.base.is_none()
    }

    #[must_use]
    pub fn decimals(&self) -> u8 {
        self.decimals
    }
}

impl PartialEq for Unit {
    fn eq(&self, other: &Self) -> bool {
        self.uids == other.uids
    }
}

impl Eq for Unit {}

impl Hash for Unit {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uids.hash(state);
    }
}

/// A non-negative quantity, held as an integral count of base units
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Amount {
    value: Decimal,
    unit: Unit,
}

impl Amount {
    /// Parse a decimal string expressed in `unit`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidAmount` when the text is not a number, is
    /// negative, overflows, or is not a whole number of base units.
    pub fn parse(text: &str, unit: &Unit) -> Result<Self, DomainError> {
        let invalid = || DomainError::InvalidAmount {
            value: text.to_string(),
            unit: unit.uids().to_string(),
        };

        let parsed = Decimal::from_str(text.trim()).map_err(|_| invalid())?;
        if parsed.is_sign_negative() && !parsed.is_zero() {
            return Err(invalid());
        }

        let mut value = parsed;
        for _ in 0..unit.decimals() {
            value = value.checked_mul(Decimal::TEN).ok_or_else(invalid)?;
        }
        if !value.fract().is_zero() {
            return Err(invalid());
        }

        Ok(Self {
            value: value.normalize(),
            unit: unit.clone(),
        })
    }

    /// Integral count of base units
    #[must_use]
    pub fn base_value(&self) -> Decimal {
        self.value
    }

    #[must_use]
    pub fn unit(&self) -> &Unit {
        &self.unit
    }
}

/// Per-currency bundle of base unit, default display unit and all units
#[derive(Debug, Clone)]
pub struct NetworkAssociation {
    base_unit: Unit,
    default_unit: Unit,
    units: HashSet<Unit>,
}

impl NetworkAssociation {
    /// Create an association; `base_unit` and `default_unit` are always members of the unit set.
    #[must_use]
    pub fn new(base_unit: Unit, default_unit: Unit, units: impl IntoIterator<Item = Unit>) -> Self {
        let mut units: HashSet<Unit> = units.into_iter().collect();
        units.insert(base_unit.clone());
        units.insert(default_unit.clone());
        Self {
            base_unit,
            default_unit,
            units,
        }
    }

    #[must_use]
    pub fn base_unit(&self) -> &Unit {
        &self.base_unit
    }

    #[must_use]
    pub fn default_unit(&self) -> &Unit {
        &self.default_unit
    }

    #[must_use]
    pub fn units(&self) -> &HashSet<Unit> {
        &self.units
    }
}

/// A fee tier: confirmation interval paired with a price in the fee unit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkFee {
    time_interval_ms: u64,
    price_per_cost_factor: Amount,
}

impl NetworkFee {
    #[must_use]
    pub fn new(time_interval_ms: u64, price_per_cost_factor: Amount) -> Self {
        Self {
            time_interval_ms,
            price_per_cost_factor,
        }
    }

    #[must_use]
    pub fn time_interval_ms(&self) -> u64 {
        self.time_interval_ms
    }

    #[must_use]
    pub fn price_per_cost_factor(&self) -> &Amount {
        &self.price_per_cost_factor
    }
}

/// Data required to create a new Network
#[derive(Debug, Clone)]
pub struct CreateNetworkData {
    pub uids: String,
    pub name: String,
    pub is_mainnet: bool,
    pub currency: Currency,
    pub height: u64,
    pub confirmations_until_final: u32,
    pub associations: HashMap<Currency, NetworkAssociation>,
    pub fees: Vec<NetworkFee>,
}

/// Network domain entity representing an assembled blockchain network
#[derive(Debug, Clone)]
pub struct Network {
    uids: String,
    name: String,
    is_mainnet: bool,
    currency: Currency,
    height: u64,
    confirmations_until_final: u32,
    associations: HashMap<Currency, NetworkAssociation>,
    fees: Vec<NetworkFee>,
}

impl Network {
    /// Create a new Network from creation data
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidState` if the default currency has no
    /// association or if there are no fees.
    pub fn new(data: CreateNetworkData) -> Result<Self, DomainError> {
        if !data.associations.contains_key(&data.currency) {
            return Err(DomainError::InvalidState(format!(
                "network {} has no association for its currency {}",
                data.uids,
                data.currency.code()
            )));
        }
        if data.fees.is_empty() {
            return Err(DomainError::InvalidState(format!("network {} has no fees", data.uids)));
        }

        Ok(Self {
            uids: data.uids,
            name: data.name,
            is_mainnet: data.is_mainnet,
            currency: data.currency,
            height: data.height,
            confirmations_until_final: data.confirmations_until_final,
            associations: data.associations,
            fees: data.fees,
        })
    }

    // Getters

    #[must_use]
    pub fn uids(&self) -> &str {
        &self.uids
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn is_mainnet(&self) -> bool {
        self.is_mainnet
    }

    /// The network's native (default) currency
    #[must_use]
    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    #[must_use]
    pub fn height(&self) -> u64 {
        self.height
    }

    /// Confirmations after which a transaction is considered final
    #[must_use]
    pub fn confirmations_until_final(&self) -> u32 {
        self.confirmations_until_final
    }

    #[must_use]
    pub fn associations(&self) -> &HashMap<Currency, NetworkAssociation> {
        &self.associations
    }

    #[must_use]
    pub fn fees(&self) -> &[NetworkFee] {
        &self.fees
    }

    #[must_use]
    pub fn association(&self, currency: &Currency) -> Option<&NetworkAssociation> {
        self.associations.get(currency)
    }

    /// Association of the native currency (always present)
    #[must_use]
    pub fn default_association(&self) -> Option<&NetworkAssociation> {
        self.association(&self.currency)
    }

    #[must_use]
    pub fn currency_by_code(&self, code: &str) -> Option<&Currency> {
        self.associations.keys().find(|c| c.code().eq_ignore_ascii_case(code))
    }
}
