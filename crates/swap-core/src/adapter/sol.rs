//! Solana chain adapter.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::time::Instant;
use tracing::{debug, info};

use chain_registry::SOLANA_CHAIN_ID;
use chain_sol::address::address_to_bytes;
use chain_sol::instruction::{build_sol_transfer, is_native_mint};
use chain_sol::spl::{build_spl_transfer_checked, derive_associated_token_address};

use crate::adapter::{AdapterError, ChainAdapter, Confirmation, TransferPlan};
use crate::wallet::SolWallet;

/// Signature status poll cadence. Solana slots are sub-second, so this is
/// tighter than the EVM receipt poll.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Route payload shape for Solana swaps: a fully built transaction the
/// wallet only needs to sign.
#[derive(Debug, Deserialize)]
struct SolRoutePayload {
    /// Base64-encoded serialized transaction.
    transaction: String,
}

pub struct SolAdapter {
    wallet: Arc<dyn SolWallet>,
    poll_interval: Duration,
}

impl SolAdapter {
    pub fn new(wallet: Arc<dyn SolWallet>) -> Self {
        SolAdapter {
            wallet,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

fn require_solana_chain(chain_id: u64) -> Result<(), AdapterError> {
    if chain_id != SOLANA_CHAIN_ID {
        return Err(AdapterError::UnsupportedChain(chain_id));
    }
    Ok(())
}

fn decode_pubkey(address: &str) -> Result<[u8; 32], AdapterError> {
    address_to_bytes(address).map_err(|e| AdapterError::Build(e.to_string()))
}

#[async_trait]
impl ChainAdapter for SolAdapter {
    async fn transfer(&self, plan: &TransferPlan) -> Result<String, AdapterError> {
        require_solana_chain(plan.chain_id)?;

        let amount: u64 = plan
            .amount
            .try_into()
            .map_err(|_| AdapterError::Build("amount exceeds u64 range".into()))?;

        let sender = decode_pubkey(&plan.sender)?;
        let recipient = decode_pubkey(&plan.recipient)?;

        let instruction = if is_native_mint(&plan.token_address) {
            build_sol_transfer(&sender, &recipient, amount)
        } else {
            let mint = decode_pubkey(&plan.token_address)?;
            let source = derive_associated_token_address(&sender, &mint)
                .map_err(|e| AdapterError::Build(e.to_string()))?;
            let destination = derive_associated_token_address(&recipient, &mint)
                .map_err(|e| AdapterError::Build(e.to_string()))?;

            build_spl_transfer_checked(
                &source,
                &mint,
                &destination,
                &sender,
                amount,
                plan.token_decimals,
            )
        }
        .map_err(|e| AdapterError::Build(e.to_string()))?;

        info!(to = %plan.recipient, "broadcasting Solana transfer");
        Ok(self
            .wallet
            .sign_and_broadcast(&plan.sender, &[instruction])
            .await?)
    }

    async fn execute_route(
        &self,
        chain_id: u64,
        _sender: &str,
        payload: &serde_json::Value,
    ) -> Result<String, AdapterError> {
        require_solana_chain(chain_id)?;

        let route: SolRoutePayload = serde_json::from_value(payload.clone())
            .map_err(|e| AdapterError::InvalidPayload(e.to_string()))?;

        info!("broadcasting Solana swap");
        Ok(self
            .wallet
            .sign_and_broadcast_encoded(&route.transaction)
            .await?)
    }

    async fn confirm(
        &self,
        chain_id: u64,
        tx_hash: &str,
        timeout: Duration,
    ) -> Result<Confirmation, AdapterError> {
        require_solana_chain(chain_id)?;

        let deadline = Instant::now() + timeout;

        loop {
            if let Some(status) = self.wallet.signature_status(tx_hash).await? {
                if let Some(err) = status.err {
                    debug!(signature = tx_hash, %err, "transaction failed on chain");
                    return Ok(Confirmation { reverted: true });
                }
                if status.finalized {
                    return Ok(Confirmation { reverted: false });
                }
            }

            if Instant::now() + self.poll_interval > deadline {
                return Err(AdapterError::ConfirmationTimeout);
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
