//! EVM-family chain adapter.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::time::Instant;
use tracing::{debug, info};

use chain_evm::error::EvmError;
use chain_evm::transfer::{
    build_erc20_transfer, build_native_transfer, is_native_token, EvmTransactionRequest,
};

use crate::adapter::{AdapterError, ChainAdapter, Confirmation, TransferPlan};
use crate::wallet::EvmWallet;

/// Receipt poll cadence while waiting for confirmation.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);

/// Route payload shape for EVM swaps: a contract call prepared by the
/// routing backend.
#[derive(Debug, Deserialize)]
struct EvmRoutePayload {
    /// Router contract address.
    to: String,
    /// 0x-prefixed calldata hex.
    data: String,
    /// Native value in wei, as a decimal string. Absent for token-in swaps.
    #[serde(default)]
    value: Option<String>,
}

pub struct EvmAdapter {
    wallet: Arc<dyn EvmWallet>,
    poll_interval: Duration,
}

impl EvmAdapter {
    pub fn new(wallet: Arc<dyn EvmWallet>) -> Self {
        EvmAdapter {
            wallet,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

fn map_build_error(err: EvmError) -> AdapterError {
    match err {
        EvmError::UnsupportedChain(id) => AdapterError::UnsupportedChain(id),
        other => AdapterError::Build(other.to_string()),
    }
}

fn decode_calldata(data: &str) -> Result<Vec<u8>, AdapterError> {
    let stripped = data.strip_prefix("0x").unwrap_or(data);
    hex::decode(stripped).map_err(|e| AdapterError::InvalidPayload(format!("bad calldata: {e}")))
}

#[async_trait]
impl ChainAdapter for EvmAdapter {
    async fn transfer(&self, plan: &TransferPlan) -> Result<String, AdapterError> {
        let request = if is_native_token(&plan.token_address) {
            build_native_transfer(plan.chain_id, &plan.sender, &plan.recipient, plan.amount)
        } else {
            build_erc20_transfer(
                plan.chain_id,
                &plan.token_address,
                &plan.sender,
                &plan.recipient,
                plan.amount,
            )
        }
        .map_err(map_build_error)?;

        info!(chain_id = plan.chain_id, to = %plan.recipient, "broadcasting EVM transfer");
        Ok(self.wallet.sign_and_broadcast(&request).await?)
    }

    async fn execute_route(
        &self,
        chain_id: u64,
        sender: &str,
        payload: &serde_json::Value,
    ) -> Result<String, AdapterError> {
        if chain_registry::get_chain(chain_id).is_none() {
            return Err(AdapterError::UnsupportedChain(chain_id));
        }

        let route: EvmRoutePayload = serde_json::from_value(payload.clone())
            .map_err(|e| AdapterError::InvalidPayload(e.to_string()))?;

        let value: u128 = match &route.value {
            Some(v) => v
                .parse()
                .map_err(|_| AdapterError::InvalidPayload("bad value field".into()))?,
            None => 0,
        };

        let request = EvmTransactionRequest {
            chain_id,
            from: sender.to_owned(),
            to: route.to,
            value,
            data: decode_calldata(&route.data)?,
        };

        info!(chain_id, router = %request.to, "broadcasting EVM swap");
        Ok(self.wallet.sign_and_broadcast(&request).await?)
    }

    async fn confirm(
        &self,
        chain_id: u64,
        tx_hash: &str,
        timeout: Duration,
    ) -> Result<Confirmation, AdapterError> {
        let deadline = Instant::now() + timeout;

        loop {
            if let Some(receipt) = self.wallet.transaction_receipt(chain_id, tx_hash).await? {
                debug!(tx_hash, reverted = receipt.reverted, "receipt found");
                return Ok(Confirmation {
                    reverted: receipt.reverted,
                });
            }

            if Instant::now() + self.poll_interval > deadline {
                return Err(AdapterError::ConfirmationTimeout);
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
