//! Solana instruction types and System Program transfers.
//!
//! Instructions are handed to the connected wallet capability, which
//! compiles them into a transaction, attaches a recent blockhash, signs and
//! broadcasts. This crate never sees key material.

use crate::error::SolError;

/// The Solana System Program public key: 32 zero bytes.
/// Base58: `11111111111111111111111111111111`
pub const SYSTEM_PROGRAM_ID: [u8; 32] = [0u8; 32];

/// The wrapped-SOL mint address routing backends use as the native-SOL
/// sentinel: `So11111111111111111111111111111111111111112`.
pub const NATIVE_MINT: &str = "So11111111111111111111111111111111111111112";

/// System Program `Transfer` instruction index (little-endian u32).
const SYSTEM_TRANSFER_IX_INDEX: u32 = 2;

/// Whether a mint address denotes native SOL rather than an SPL token.
pub fn is_native_mint(mint_address: &str) -> bool {
    mint_address == NATIVE_MINT
}

/// A single account reference in a Solana instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolAccountMeta {
    pub pubkey: [u8; 32],
    pub is_signer: bool,
    pub is_writable: bool,
}

/// A Solana instruction, before the wallet compiles it into a transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolInstruction {
    pub program_id: [u8; 32],
    pub accounts: Vec<SolAccountMeta>,
    pub data: Vec<u8>,
}

/// Build a native SOL transfer instruction.
///
/// Creates a System Program `Transfer` instruction that moves `lamports`
/// from `from_pubkey` to `to_pubkey`.
///
/// # Wire format
///
/// u32 LE instruction index (2) followed by u64 LE lamports. Total data:
/// 12 bytes.
pub fn build_sol_transfer(
    from_pubkey: &[u8; 32],
    to_pubkey: &[u8; 32],
    lamports: u64,
) -> Result<SolInstruction, SolError> {
    if lamports == 0 {
        return Err(SolError::InstructionBuildError(
            "lamports must be > 0".into(),
        ));
    }

    let mut data = Vec::with_capacity(12);
    data.extend_from_slice(&SYSTEM_TRANSFER_IX_INDEX.to_le_bytes());
    data.extend_from_slice(&lamports.to_le_bytes());

    Ok(SolInstruction {
        program_id: SYSTEM_PROGRAM_ID,
        accounts: vec![
            SolAccountMeta {
                pubkey: *from_pubkey,
                is_signer: true,
                is_writable: true,
            },
            SolAccountMeta {
                pubkey: *to_pubkey,
                is_signer: false,
                is_writable: true,
            },
        ],
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address;

    #[test]
    fn native_mint_roundtrips_as_address() {
        // The sentinel is itself a valid 32-byte address.
        assert!(address::validate_address(NATIVE_MINT).unwrap());
    }

    #[test]
    fn native_mint_detection() {
        assert!(is_native_mint(NATIVE_MINT));
        assert!(!is_native_mint("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v"));
    }

    #[test]
    fn sol_transfer_data_layout() {
        let from = [1u8; 32];
        let to = [2u8; 32];

        let ix = build_sol_transfer(&from, &to, 1_500_000_000).unwrap();

        assert_eq!(ix.program_id, SYSTEM_PROGRAM_ID);
        assert_eq!(ix.data.len(), 12);
        // u32 LE instruction index 2.
        assert_eq!(&ix.data[..4], &[2, 0, 0, 0]);
        // u64 LE lamports.
        assert_eq!(&ix.data[4..], &1_500_000_000u64.to_le_bytes());
    }

    #[test]
    fn sol_transfer_account_metas() {
        let from = [1u8; 32];
        let to = [2u8; 32];

        let ix = build_sol_transfer(&from, &to, 1).unwrap();

        assert_eq!(ix.accounts.len(), 2);
        assert!(ix.accounts[0].is_signer);
        assert!(ix.accounts[0].is_writable);
        assert!(!ix.accounts[1].is_signer);
        assert!(ix.accounts[1].is_writable);
    }

    #[test]
    fn sol_transfer_zero_lamports_fails() {
        let result = build_sol_transfer(&[1u8; 32], &[2u8; 32], 0);
        assert!(result.is_err());
    }
}
