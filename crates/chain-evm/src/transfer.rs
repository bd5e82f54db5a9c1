//! Unsigned EVM transfer request construction.
//!
//! The adapter decides between a native-coin transfer and an ERC-20
//! transfer by comparing the token address against the native pseudo-address
//! sentinel that routing backends use for the chain's own coin.

use serde::{Deserialize, Serialize};

use crate::address::validate_address;
use crate::erc20;
use crate::error::EvmError;

/// Pseudo-address routing backends use for a chain's native coin.
pub const NATIVE_TOKEN_ADDRESS: &str = "0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee";

/// Whether a token address denotes the chain's native coin.
pub fn is_native_token(token_address: &str) -> bool {
    token_address.eq_ignore_ascii_case(NATIVE_TOKEN_ADDRESS)
}

/// An unsigned EVM transaction request, ready for a wallet capability to
/// sign and broadcast.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvmTransactionRequest {
    pub chain_id: u64,
    /// Sender address as a 0x-prefixed hex string.
    pub from: String,
    /// Recipient (or token contract) address as a 0x-prefixed hex string.
    pub to: String,
    /// Transfer value in wei (zero for token transfers).
    pub value: u128,
    /// Calldata (empty for native transfers).
    pub data: Vec<u8>,
}

/// Builds an unsigned native-coin transfer request.
pub fn build_native_transfer(
    chain_id: u64,
    from: &str,
    to: &str,
    amount_wei: u128,
) -> Result<EvmTransactionRequest, EvmError> {
    if chain_registry::get_chain(chain_id).is_none() {
        return Err(EvmError::UnsupportedChain(chain_id));
    }
    if amount_wei == 0 {
        return Err(EvmError::TransferBuildError("amount must be > 0".into()));
    }
    validate_address(from)?;
    validate_address(to)?;

    Ok(EvmTransactionRequest {
        chain_id,
        from: from.to_string(),
        to: to.to_string(),
        value: amount_wei,
        data: Vec::new(),
    })
}

/// Builds an unsigned ERC-20 token transfer request.
///
/// The calldata is encoded as `transfer(address,uint256)`; the request is
/// addressed to the token contract with zero native value.
pub fn build_erc20_transfer(
    chain_id: u64,
    token_contract: &str,
    from: &str,
    to: &str,
    amount: u128,
) -> Result<EvmTransactionRequest, EvmError> {
    if chain_registry::get_chain(chain_id).is_none() {
        return Err(EvmError::UnsupportedChain(chain_id));
    }
    if amount == 0 {
        return Err(EvmError::TransferBuildError("amount must be > 0".into()));
    }
    validate_address(token_contract)?;
    validate_address(from)?;

    let calldata = erc20::encode_transfer(to, amount)?;

    Ok(EvmTransactionRequest {
        chain_id,
        from: from.to_string(),
        to: token_contract.to_string(),
        value: 0,
        data: calldata,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SENDER: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";
    const RECIPIENT: &str = "0x000000000000000000000000000000000000dEaD";
    const USDC: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";

    #[test]
    fn native_sentinel_matches_case_insensitively() {
        assert!(is_native_token(NATIVE_TOKEN_ADDRESS));
        assert!(is_native_token("0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE"));
        assert!(!is_native_token(USDC));
    }

    #[test]
    fn build_native_transfer_creates_valid_request() {
        let req = build_native_transfer(1, SENDER, RECIPIENT, 1_000_000_000_000_000_000).unwrap();

        assert_eq!(req.chain_id, 1);
        assert_eq!(req.to, RECIPIENT);
        assert_eq!(req.value, 1_000_000_000_000_000_000);
        assert!(req.data.is_empty());
    }

    #[test]
    fn build_native_transfer_unsupported_chain() {
        let result = build_native_transfer(999_999, SENDER, RECIPIENT, 1);
        assert!(matches!(result, Err(EvmError::UnsupportedChain(999_999))));
    }

    #[test]
    fn build_native_transfer_zero_amount_fails() {
        assert!(build_native_transfer(1, SENDER, RECIPIENT, 0).is_err());
    }

    #[test]
    fn build_native_transfer_invalid_recipient() {
        assert!(build_native_transfer(1, SENDER, "bad-address", 1).is_err());
    }

    #[test]
    fn build_erc20_transfer_creates_valid_request() {
        let req = build_erc20_transfer(56, USDC, SENDER, RECIPIENT, 1_000_000).unwrap();

        assert_eq!(req.chain_id, 56);
        assert_eq!(req.to, USDC);
        assert_eq!(req.value, 0);
        // Calldata: 4 selector + 32 address + 32 amount.
        assert_eq!(req.data.len(), 68);
        assert_eq!(&req.data[..4], &[0xa9, 0x05, 0x9c, 0xbb]);
    }

    #[test]
    fn build_erc20_transfer_invalid_contract() {
        assert!(build_erc20_transfer(1, "not-an-address", SENDER, RECIPIENT, 1).is_err());
    }

    #[test]
    fn build_erc20_transfer_invalid_recipient() {
        assert!(build_erc20_transfer(1, USDC, SENDER, "bad", 1).is_err());
    }

    #[test]
    fn build_erc20_transfer_unsupported_chain() {
        let result = build_erc20_transfer(424242, USDC, SENDER, RECIPIENT, 1);
        assert!(matches!(result, Err(EvmError::UnsupportedChain(424242))));
    }
}
