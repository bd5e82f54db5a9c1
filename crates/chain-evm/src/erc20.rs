//! ERC-20 calldata encoding.

use crate::abi::{encode_function_call, u128_to_uint256, AbiParam};
use crate::address::parse_address;
use crate::error::EvmError;

/// Function selector for `transfer(address,uint256)`: `0xa9059cbb`.
const TRANSFER_SELECTOR: [u8; 4] = [0xa9, 0x05, 0x9c, 0xbb];

/// Encodes an ERC-20 `transfer(address,uint256)` call.
///
/// # Parameters
///
/// - `to`: The recipient address (0x-prefixed hex string).
/// - `amount`: The transfer amount in the token's smallest unit.
///
/// # Returns
///
/// The complete calldata (4-byte selector + 64 bytes of ABI-encoded params).
pub fn encode_transfer(to: &str, amount: u128) -> Result<Vec<u8>, EvmError> {
    let addr = parse_address(to)?;
    let params = [
        AbiParam::Address(addr),
        AbiParam::Uint256(u128_to_uint256(amount)),
    ];
    Ok(encode_function_call(TRANSFER_SELECTOR, &params))
}
