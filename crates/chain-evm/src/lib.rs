//! EVM chain support for the swap engine.
//!
//! This crate provides the pure, synchronous building blocks the EVM chain
//! adapter needs:
//! - Address validation with EIP-55 checksum verification
//! - Unsigned transfer request construction (native coin and ERC-20)
//! - ERC-20 calldata encoding via a minimal ABI encoder
//! - The native-coin pseudo-address sentinel used by routing backends
//!
//! Signing and broadcasting are deliberately absent: the engine hands
//! unsigned requests to a wallet capability that owns the keys.

pub mod abi;
pub mod address;
pub mod erc20;
pub mod error;
pub mod transfer;

// Re-export key public types for ergonomic imports.
pub use address::{checksum_address, validate_address};
pub use error::EvmError;
pub use transfer::{
    build_erc20_transfer, build_native_transfer, is_native_token, EvmTransactionRequest,
    NATIVE_TOKEN_ADDRESS,
};
