use thiserror::Error;

/// EVM chain operation errors.
#[derive(Debug, Error)]
pub enum EvmError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("transfer build error: {0}")]
    TransferBuildError(String),

    #[error("unsupported chain: {0}")]
    UnsupportedChain(u64),
}
