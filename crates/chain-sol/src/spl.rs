//! SPL Token transfers and associated token account derivation.
//!
//! Implements the SPL `TransferChecked` instruction and ATA address
//! derivation without the `spl-token` crates.

use sha2::{Digest, Sha256};

use crate::error::SolError;
use crate::instruction::{SolAccountMeta, SolInstruction};

// ---------------------------------------------------------------------------
// Well-known program IDs
// ---------------------------------------------------------------------------

/// SPL Token Program ID: `TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA`
pub const TOKEN_PROGRAM_ID: [u8; 32] = [
    0x06, 0xdd, 0xf6, 0xe1, 0xd7, 0x65, 0xa1, 0x93, 0xd9, 0xcb, 0xe1, 0x46, 0xce, 0xeb, 0x79,
    0xac, 0x1c, 0xb4, 0x85, 0xed, 0x5f, 0x5b, 0x37, 0x91, 0x3a, 0x8c, 0xf5, 0x85, 0x7e, 0xff,
    0x00, 0xa9,
];

/// Associated Token Account Program ID: `ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL`
pub const ASSOCIATED_TOKEN_PROGRAM_ID: [u8; 32] = [
    0x8c, 0x97, 0x25, 0x8f, 0x4e, 0x24, 0x89, 0xf1, 0xbb, 0x3d, 0x10, 0x29, 0x14, 0x8e, 0x0d,
    0x83, 0x0b, 0x5a, 0x13, 0x99, 0xda, 0xff, 0x10, 0x84, 0x04, 0x8e, 0x7b, 0xd8, 0xdb, 0xe9,
    0xf8, 0x59,
];

/// The string appended to PDA derivation: "ProgramDerivedAddress".
const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// SPL Token `TransferChecked` instruction index.
const TRANSFER_CHECKED_IX_INDEX: u8 = 12;

// ---------------------------------------------------------------------------
// SPL TransferChecked
// ---------------------------------------------------------------------------

/// Build an SPL Token `TransferChecked` instruction.
///
/// Transfers `amount` of the smallest token unit (e.g. for a token with 6
/// decimals, `amount = 1_000_000` transfers 1 whole token). `TransferChecked`
/// is preferred over plain `Transfer` because the on-chain program verifies
/// the mint and decimals, catching wrong-token mistakes at execution time.
///
/// # Arguments
///
/// * `from_token_account` - Sender's associated token account (writable).
/// * `mint` - The token mint (read-only, verified on chain).
/// * `to_token_account` - Recipient's associated token account (writable).
/// * `owner` - The wallet that owns `from_token_account` (signer).
/// * `amount` - Number of token base units to transfer.
/// * `decimals` - Token decimals, verified against the mint on chain.
pub fn build_spl_transfer_checked(
    from_token_account: &[u8; 32],
    mint: &[u8; 32],
    to_token_account: &[u8; 32],
    owner: &[u8; 32],
    amount: u64,
    decimals: u8,
) -> Result<SolInstruction, SolError> {
    if amount == 0 {
        return Err(SolError::InstructionBuildError(
            "SPL transfer amount must be > 0".into(),
        ));
    }

    // Instruction data: [12] + u64 LE amount + decimals = 10 bytes.
    let mut data = Vec::with_capacity(10);
    data.push(TRANSFER_CHECKED_IX_INDEX);
    data.extend_from_slice(&amount.to_le_bytes());
    data.push(decimals);

    Ok(SolInstruction {
        program_id: TOKEN_PROGRAM_ID,
        accounts: vec![
            SolAccountMeta {
                pubkey: *from_token_account,
                is_signer: false,
                is_writable: true,
            },
            SolAccountMeta {
                pubkey: *mint,
                is_signer: false,
                is_writable: false,
            },
            SolAccountMeta {
                pubkey: *to_token_account,
                is_signer: false,
                is_writable: true,
            },
            SolAccountMeta {
                pubkey: *owner,
                is_signer: true,
                is_writable: false,
            },
        ],
        data,
    })
}

// ---------------------------------------------------------------------------
// Associated Token Account (PDA) derivation
// ---------------------------------------------------------------------------

/// Derive the associated token account address for a wallet + mint pair.
///
/// The ATA is a Program Derived Address (PDA) with seeds
/// `[wallet_address, token_program_id, mint_address]` derived from the
/// Associated Token Account program.
pub fn derive_associated_token_address(
    wallet: &[u8; 32],
    mint: &[u8; 32],
) -> Result<[u8; 32], SolError> {
    find_program_address(
        &[wallet.as_ref(), &TOKEN_PROGRAM_ID, mint.as_ref()],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    )
    .map(|(address, _bump)| address)
}

/// Find a valid Program Derived Address (PDA) for the given seeds and
/// program.
///
/// Iterates bump seeds from 255 down to 0, computing
/// `SHA-256(seeds || bump || program_id || "ProgramDerivedAddress")` and
/// returning the first result that is NOT a valid Ed25519 point.
fn find_program_address(
    seeds: &[&[u8]],
    program_id: &[u8; 32],
) -> Result<([u8; 32], u8), SolError> {
    for bump in (0u8..=255).rev() {
        if let Some(address) = try_create_program_address(seeds, &[bump], program_id) {
            return Ok((address, bump));
        }
    }

    Err(SolError::InvalidAddress(
        "could not find valid PDA bump seed".into(),
    ))
}

/// Attempt to create a PDA from seeds + bump + program_id.
///
/// Returns `Some(address)` if the derived point is OFF the Ed25519 curve,
/// `None` if it falls on the curve (invalid PDA, try the next bump).
fn try_create_program_address(
    seeds: &[&[u8]],
    bump_seed: &[u8],
    program_id: &[u8; 32],
) -> Option<[u8; 32]> {
    let mut hasher = Sha256::new();

    for seed in seeds {
        hasher.update(seed);
    }
    hasher.update(bump_seed);
    hasher.update(program_id);
    hasher.update(PDA_MARKER);

    let hash: [u8; 32] = hasher.finalize().into();

    // A valid PDA must NOT be on the Ed25519 curve.
    if is_on_curve(&hash) {
        return None;
    }

    Some(hash)
}

/// Check if 32 bytes represent a valid Ed25519 curve point.
fn is_on_curve(bytes: &[u8; 32]) -> bool {
    curve25519_dalek::edwards::CompressedEdwardsY(*bytes)
        .decompress()
        .is_some()
}
