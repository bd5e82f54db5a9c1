//! Wallet capability traits.
//!
//! Key management lives in the host wallet. The engine hands it unsigned
//! material and gets back a transaction hash or signature; it also asks
//! the wallet's RPC connection about confirmation status, so the engine
//! itself needs no chain endpoints.

use async_trait::async_trait;
use thiserror::Error;

use chain_evm::transfer::EvmTransactionRequest;
use chain_sol::instruction::SolInstruction;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WalletError {
    /// The user declined the signing prompt. Kept distinct so callers can
    /// avoid alarming error language for a deliberate choice.
    #[error("user rejected the request")]
    UserRejected,

    #[error("network error: {0}")]
    Network(String),

    #[error("wallet error: {0}")]
    Other(String),
}

/// An EVM transaction receipt, reduced to what execution tracking needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TxReceipt {
    /// True if the transaction was included but reverted.
    pub reverted: bool,
}

/// Solana signature status as reported by the cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureStatus {
    /// Reached finalized commitment.
    pub finalized: bool,
    /// On-chain error, if the transaction failed at the ledger level.
    pub err: Option<String>,
}

/// Signing and chain-query capability for EVM-family chains.
#[async_trait]
pub trait EvmWallet: Send + Sync {
    /// Ask the wallet to sign and broadcast. Returns the transaction hash.
    async fn sign_and_broadcast(
        &self,
        request: &EvmTransactionRequest,
    ) -> Result<String, WalletError>;

    /// Look up a receipt; `None` while the transaction is still pending.
    async fn transaction_receipt(
        &self,
        chain_id: u64,
        tx_hash: &str,
    ) -> Result<Option<TxReceipt>, WalletError>;
}

/// Signing and chain-query capability for Solana.
#[async_trait]
pub trait SolWallet: Send + Sync {
    /// Compile the instructions into a transaction for `payer`, sign and
    /// broadcast. Returns the signature.
    async fn sign_and_broadcast(
        &self,
        payer: &str,
        instructions: &[SolInstruction],
    ) -> Result<String, WalletError>;

    /// Sign and broadcast a pre-built transaction (base64-encoded), as
    /// produced by the routing backend. Returns the signature.
    async fn sign_and_broadcast_encoded(
        &self,
        transaction_base64: &str,
    ) -> Result<String, WalletError>;

    /// Look up a signature's status; `None` if the cluster has not seen it.
    async fn signature_status(
        &self,
        signature: &str,
    ) -> Result<Option<SignatureStatus>, WalletError>;
}
