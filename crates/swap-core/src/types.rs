//! Shared value types for the engine.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use chain_registry::ChainFamily;

/// A token as the engine sees it: enough to quote, validate and transfer.
///
/// `address` is the token contract (EVM) or mint (Solana); native assets
/// use the per-family sentinel addresses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub symbol: String,
    pub address: String,
    pub chain_id: u64,
    pub decimals: u8,
    /// Last known USD price, if the host application tracks one.
    pub price_usd: Option<f64>,
}

impl Token {
    pub fn family(&self) -> ChainFamily {
        chain_registry::classify_chain(self.chain_id)
    }

    /// Whether two tokens are the same asset on the same chain. Address
    /// comparison is case-insensitive because EVM addresses circulate in
    /// mixed checksum casings.
    pub fn is_same_asset(&self, other: &Token) -> bool {
        self.chain_id == other.chain_id && self.address.eq_ignore_ascii_case(&other.address)
    }
}

/// How the current recipient address came to be set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecipientSource {
    /// Mirrors the connected sender wallet; follows wallet changes.
    AutoSynced,
    /// Explicitly entered by the user; survives wallet changes.
    UserOverridden,
}

/// A validated recipient, tagged with the chain family it was validated
/// against so later compatibility re-checks are cheap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientAddress {
    pub address: String,
    pub family: ChainFamily,
}

/// A point-in-time balance readout for one token.
#[derive(Debug, Clone, PartialEq)]
pub struct BalanceView {
    /// Human-readable decimal balance, e.g. "1.5".
    pub formatted: String,
    /// True while the balance is still being fetched; a loading balance
    /// must not be used for max-fill.
    pub is_loading: bool,
}

/// Host-provided balance lookups. The engine never queries chains for
/// balances itself.
#[async_trait]
pub trait BalanceSource: Send + Sync {
    async fn balance_of(&self, owner: &str, token: &Token) -> BalanceView;
}
