//! Chain family classification and address/chain compatibility.
//!
//! The swap engine supports two structurally different chain families:
//! EVM-style chains (hex addresses, numeric chain ids) and Solana (base58
//! addresses). Solana is identified by a single reserved sentinel chain id;
//! every other id is treated as EVM-family.

use serde::{Deserialize, Serialize};

/// Reserved sentinel chain id for Solana.
///
/// Routing backends address Solana with this value alongside the numeric
/// EVM chain ids. It must never collide with a real EVM chain id.
pub const SOLANA_CHAIN_ID: u64 = 1_151_111_081_099_710;

/// The structural class of a blockchain, determining address format and
/// transfer mechanics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainFamily {
    Evm,
    Solana,
}

/// Classify a chain id into its family.
///
/// The Solana sentinel id maps to [`ChainFamily::Solana`]; all other ids
/// are EVM-family.
pub fn classify_chain(chain_id: u64) -> ChainFamily {
    if chain_id == SOLANA_CHAIN_ID {
        ChainFamily::Solana
    } else {
        ChainFamily::Evm
    }
}

/// Whether a string is shaped like an EVM address: `0x` followed by exactly
/// 40 hexadecimal characters.
pub fn is_evm_address(address: &str) -> bool {
    let Some(hex_part) = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
    else {
        return false;
    };

    hex_part.len() == 40 && hex_part.chars().all(|c| c.is_ascii_hexdigit())
}

/// Whether a string is shaped like a Solana address: base58 decoding to
/// exactly 32 bytes, and not an EVM hex address.
///
/// The EVM exclusion matters because a 0x-prefixed hex string can never be
/// a valid public key, and base58 would reject the `0` and `x` characters
/// anyway; the explicit check keeps the rule auditable.
pub fn is_solana_address(address: &str) -> bool {
    if is_evm_address(address) {
        return false;
    }

    match bs58::decode(address).into_vec() {
        Ok(bytes) => bytes.len() == 32,
        Err(_) => false,
    }
}

/// Whether an address is usable as a recipient on the given chain.
///
/// A mismatch (e.g. an EVM hex address checked against the Solana sentinel
/// id) returns false; the caller reacts, typically by clearing the
/// incompatible selection.
pub fn is_address_chain_compatible(address: &str, chain_id: u64) -> bool {
    match classify_chain(chain_id) {
        ChainFamily::Evm => is_evm_address(address),
        ChainFamily::Solana => is_solana_address(address),
    }
}
