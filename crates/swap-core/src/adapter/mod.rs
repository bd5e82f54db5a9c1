//! Chain adapters.
//!
//! One adapter per chain family, behind a common async trait. Adapters
//! translate the orchestrator's chain-agnostic work items (direct
//! transfer, routed swap payload, confirmation wait) into family-specific
//! wallet calls.

mod evm;
mod sol;

pub use evm::EvmAdapter;
pub use sol::SolAdapter;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use chain_registry::ChainFamily;

use crate::wallet::WalletError;

/// Bound on the confirmation wait. Exceeding it is a terminal failure,
/// never a retry.
pub const DEFAULT_CONFIRM_TIMEOUT: Duration = Duration::from_secs(60);

/// A direct transfer, chain-agnostic. Amount is in base units.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferPlan {
    pub chain_id: u64,
    pub token_address: String,
    pub token_decimals: u8,
    pub sender: String,
    pub recipient: String,
    pub amount: u128,
}

/// Outcome of a confirmation wait that found the transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation {
    /// The transaction landed on chain but reverted.
    pub reverted: bool,
}

#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("unsupported chain: {0}")]
    UnsupportedChain(u64),

    #[error("wallet rejected the request")]
    UserRejected,

    #[error("transaction reverted on chain")]
    TransactionReverted,

    #[error("transaction not found or confirmation timed out")]
    ConfirmationTimeout,

    /// The route payload did not match this family's expected shape.
    #[error("invalid route payload: {0}")]
    InvalidPayload(String),

    /// Building the unsigned operation failed (bad address, bad amount).
    #[error("transfer build error: {0}")]
    Build(String),

    #[error("network error: {0}")]
    Network(String),
}

impl From<WalletError> for AdapterError {
    fn from(err: WalletError) -> Self {
        match err {
            WalletError::UserRejected => AdapterError::UserRejected,
            WalletError::Network(msg) | WalletError::Other(msg) => AdapterError::Network(msg),
        }
    }
}

/// Family-specific execution behind a common interface.
#[async_trait]
pub trait ChainAdapter: Send + Sync {
    /// Build, sign and broadcast a direct transfer. Returns the
    /// transaction hash or signature.
    async fn transfer(&self, plan: &TransferPlan) -> Result<String, AdapterError>;

    /// Sign and broadcast a routed swap from its opaque backend payload.
    async fn execute_route(
        &self,
        chain_id: u64,
        sender: &str,
        payload: &serde_json::Value,
    ) -> Result<String, AdapterError>;

    /// Wait for ledger finality, bounded by `timeout`.
    async fn confirm(
        &self,
        chain_id: u64,
        tx_hash: &str,
        timeout: Duration,
    ) -> Result<Confirmation, AdapterError>;
}

/// Static adapter lookup by chain family. Built once at engine
/// construction; an unsupported chain id fails classification before any
/// adapter is touched.
#[derive(Clone)]
pub struct AdapterRegistry {
    evm: Arc<dyn ChainAdapter>,
    solana: Arc<dyn ChainAdapter>,
}

impl AdapterRegistry {
    pub fn new(evm: Arc<dyn ChainAdapter>, solana: Arc<dyn ChainAdapter>) -> Self {
        AdapterRegistry { evm, solana }
    }

    pub fn get(&self, family: ChainFamily) -> &Arc<dyn ChainAdapter> {
        match family {
            ChainFamily::Evm => &self.evm,
            ChainFamily::Solana => &self.solana,
        }
    }
}
