//! Currency Descriptor
//!
//! Raw currency record and its denominations.

/// A named scale of a currency.
///
/// `decimals == 0` marks a base denomination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Denomination {
    pub name: String,
    pub code: String,
    pub symbol: String,
    pub decimals: u8,
}

impl Denomination {
    #[must_use]
    pub fn new(name: impl Into<String>, code: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            symbol: symbol.into(),
            decimals,
        }
    }

    #[must_use]
    pub fn is_base(&self) -> bool {
        self.decimals == 0
    }
}

/// Currency descriptor. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyDescriptor {
    pub id: String,
    pub blockchain_id: String,
    pub name: String,
    pub code: String,
    /// Currency kind, e.g. `native` or `erc20`
    pub kind: String,
    /// Contract address for token currencies
    pub address: Option<String>,
    pub denominations: Vec<Denomination>,
}
