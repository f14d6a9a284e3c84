//! Domain Models
//!
//! Raw descriptors received from remote sources and the typed network
//! entities assembled from them.

pub mod blockchain;
pub mod currency;
pub mod defaults;
pub mod network;
pub mod transaction;

pub use blockchain::{BlockchainDescriptor, BlockchainFee};
pub use currency::{CurrencyDescriptor, Denomination};
pub use network::{Amount, CreateNetworkData, Currency, Network, NetworkAssociation, NetworkFee, Unit};
pub use transaction::{Page, Transaction, TransactionQuery};
