//! Minimal ABI encoding for EVM function calls.
//!
//! Just enough encoding to build ERC-20 calldata without a full ABI parser:
//! a 4-byte selector followed by 32-byte static words.

/// A single ABI-encoded parameter.
#[derive(Debug, Clone)]
pub enum AbiParam {
    /// A 20-byte EVM address, left-padded to 32 bytes.
    Address([u8; 20]),
    /// A 256-bit unsigned integer as a big-endian 32-byte array.
    Uint256([u8; 32]),
}

/// Encodes a function call with the given 4-byte selector and ABI
/// parameters.
///
/// The output is `selector || encode(params[0]) || encode(params[1]) || ...`
/// where each parameter is encoded as a 32-byte ABI word.
pub fn encode_function_call(selector: [u8; 4], params: &[AbiParam]) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + params.len() * 32);
    data.extend_from_slice(&selector);

    for param in params {
        data.extend_from_slice(&encode_param(param));
    }

    data
}

/// Encodes a single [`AbiParam`] as a 32-byte ABI word.
fn encode_param(param: &AbiParam) -> [u8; 32] {
    match param {
        AbiParam::Address(addr) => {
            // Left-pad: 12 zero bytes + 20 address bytes.
            let mut word = [0u8; 32];
            word[12..].copy_from_slice(addr);
            word
        }
        AbiParam::Uint256(value) => *value,
    }
}

/// Encodes a u128 amount as a big-endian 32-byte uint256 word.
pub fn u128_to_uint256(amount: u128) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[16..].copy_from_slice(&amount.to_be_bytes());
    word
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_address_param() {
        let mut addr = [0u8; 20];
        addr[0] = 0xde;
        addr[19] = 0xad;

        let word = encode_param(&AbiParam::Address(addr));

        assert_eq!(&word[..12], &[0u8; 12]);
        assert_eq!(&word[12..], &addr);
    }

    #[test]
    fn encode_uint256_param_is_identity() {
        let mut value = [0u8; 32];
        value[31] = 42;

        assert_eq!(encode_param(&AbiParam::Uint256(value)), value);
    }

    #[test]
    fn encode_function_call_with_selector_only() {
        let selector = [0xa9, 0x05, 0x9c, 0xbb];
        let data = encode_function_call(selector, &[]);

        assert_eq!(data, selector.to_vec());
    }

    #[test]
    fn encode_function_call_with_params() {
        let selector = [0xa9, 0x05, 0x9c, 0xbb];
        let mut addr = [0u8; 20];
        addr[19] = 0x01;

        let params = [
            AbiParam::Address(addr),
            AbiParam::Uint256(u128_to_uint256(100)),
        ];
        let data = encode_function_call(selector, &params);

        // 4-byte selector + 2 * 32-byte params = 68 bytes.
        assert_eq!(data.len(), 68);
        assert_eq!(&data[..4], &selector);
        assert_eq!(&data[4..16], &[0u8; 12]);
        assert_eq!(data[35], 0x01);
        assert_eq!(data[67], 100);
    }

    #[test]
    fn u128_to_uint256_big_endian() {
        let word = u128_to_uint256(1);
        assert_eq!(word[31], 1);
        assert_eq!(&word[..31], &[0u8; 31]);
    }

    #[test]
    fn u128_to_uint256_max_value() {
        let word = u128_to_uint256(u128::MAX);
        assert_eq!(&word[..16], &[0u8; 16]);
        assert_eq!(&word[16..], &[0xffu8; 16]);
    }
}
