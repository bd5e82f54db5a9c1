//! Engine-level error taxonomy.
//!
//! Every failure that can surface to a caller maps to one of these
//! variants, so the embedding application can branch on the kind of
//! failure rather than scraping message strings.

use thiserror::Error;

use crate::adapter::AdapterError;
use crate::quote::QuoteError;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Inputs failed a precondition check before anything touched a chain.
    #[error("validation error: {0}")]
    Validation(String),

    /// The selected route quote passed its expiry timestamp. A fresh
    /// quote must be requested; the engine never auto-refreshes.
    #[error("route quote expired")]
    RouteExpired,

    /// The token's chain id is not in the supported-chain registry.
    #[error("unsupported chain: {0}")]
    UnsupportedChain(u64),

    /// The user declined the signing prompt in their wallet.
    #[error("wallet rejected the request")]
    UserRejected,

    /// The transaction was included on chain but reverted.
    #[error("transaction reverted on chain")]
    TransactionReverted,

    /// The transaction was broadcast but never confirmed within the
    /// confirmation window.
    #[error("transaction not found or confirmation timed out")]
    ConfirmationTimeout,

    /// The quote backend returned an error or was unreachable.
    #[error(transparent)]
    Quote(#[from] QuoteError),

    /// A transfer is already in flight; terminal state required first.
    #[error("another transfer is already in progress")]
    SessionActive,

    /// Transport or RPC failure outside the cases above.
    #[error("network error: {0}")]
    Network(String),
}

impl From<AdapterError> for EngineError {
    fn from(err: AdapterError) -> Self {
        match err {
            AdapterError::UnsupportedChain(id) => EngineError::UnsupportedChain(id),
            AdapterError::UserRejected => EngineError::UserRejected,
            AdapterError::TransactionReverted => EngineError::TransactionReverted,
            AdapterError::ConfirmationTimeout => EngineError::ConfirmationTimeout,
            AdapterError::InvalidPayload(msg) | AdapterError::Build(msg) => {
                EngineError::Validation(msg)
            }
            AdapterError::Network(msg) => EngineError::Network(msg),
        }
    }
}
