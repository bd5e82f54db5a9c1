//! Chain identity and compatibility rules for the swap engine.
//!
//! This crate provides:
//! - Chain family classification (EVM-style chains vs Solana)
//! - Address/chain compatibility checks used to validate recipients
//! - A static registry of supported EVM networks plus the Solana sentinel
//!
//! Everything here is pure: no I/O, no shared state, order-independent.

pub mod family;
pub mod registry;

// Re-export key public types for ergonomic imports.
pub use family::{
    classify_chain, is_address_chain_compatible, is_evm_address, is_solana_address, ChainFamily,
    SOLANA_CHAIN_ID,
};
pub use registry::{get_chain, is_supported_chain, supported_chains, EvmChain};
