//! Solana chain support for the swap engine.
//!
//! This crate provides the pure building blocks the Solana chain adapter
//! needs: address validation, System Program and SPL Token transfer
//! instruction construction, and associated token account derivation.
//! It deliberately avoids `solana-sdk`, which drags in tokio and 200+
//! transitive dependencies.
//!
//! Signing, blockhash management and broadcasting belong to the connected
//! wallet capability; this crate only describes what to execute.

pub mod address;
pub mod error;
pub mod instruction;
pub mod spl;

// Re-export key public types for ergonomic imports.
pub use address::{address_to_bytes, bytes_to_address, validate_address};
pub use error::SolError;
pub use instruction::{
    build_sol_transfer, is_native_mint, SolAccountMeta, SolInstruction, NATIVE_MINT,
    SYSTEM_PROGRAM_ID,
};
pub use spl::{
    build_spl_transfer_checked, derive_associated_token_address, ASSOCIATED_TOKEN_PROGRAM_ID,
    TOKEN_PROGRAM_ID,
};
