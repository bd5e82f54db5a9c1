//! Execution orchestrator.
//!
//! Drives one execution session at a time through the stage machine,
//! delegating chain work to the adapter registry. Inputs are snapshotted
//! into an [`OrchestrationContext`] at submit time, so token or amount
//! edits made while a session is in flight cannot reclassify or corrupt
//! it.

use std::sync::Arc;
use std::time::Duration;

use chain_registry::ChainFamily;
use tracing::warn;

use crate::adapter::{AdapterRegistry, TransferPlan, DEFAULT_CONFIRM_TIMEOUT};
use crate::amount;
use crate::error::EngineError;
use crate::route::{unix_now, Route};
use crate::session::{ExecutionSession, Stage, StatusSink, StatusUpdate, TransferMode};
use crate::types::{RecipientAddress, Token};

/// Submit-time snapshot of everything an execution needs. Built once,
/// never re-read from live state.
#[derive(Debug, Clone)]
pub struct OrchestrationContext {
    pub from_token: Token,
    pub to_token: Token,
    /// Source amount as the user-facing decimal string.
    pub amount: String,
    pub sender: String,
    pub recipient: Option<RecipientAddress>,
    pub route: Option<Route>,
}

/// Decide whether this is a routed swap or a direct transfer.
///
/// Direct transfer requires the exact same asset on both sides and a
/// recipient that is not the sender; everything else is a swap. Pure
/// function of its inputs.
pub fn classify_mode(
    from_token: &Token,
    to_token: &Token,
    recipient: Option<&str>,
    sender: &str,
) -> TransferMode {
    if !from_token.is_same_asset(to_token) {
        return TransferMode::Swap;
    }

    // EVM addresses compare case-insensitively; base58 is case-sensitive.
    let same_as_sender = |addr: &str| match from_token.family() {
        ChainFamily::Evm => addr.eq_ignore_ascii_case(sender),
        ChainFamily::Solana => addr == sender,
    };

    match recipient {
        Some(addr) if !same_as_sender(addr) => TransferMode::DirectTransfer,
        _ => TransferMode::Swap,
    }
}

pub struct Orchestrator {
    registry: AdapterRegistry,
    sink: Arc<dyn StatusSink>,
    session: Option<ExecutionSession>,
    confirm_timeout: Duration,
}

impl Orchestrator {
    pub fn new(registry: AdapterRegistry, sink: Arc<dyn StatusSink>) -> Self {
        Orchestrator {
            registry,
            sink,
            session: None,
            confirm_timeout: DEFAULT_CONFIRM_TIMEOUT,
        }
    }

    pub fn with_confirm_timeout(mut self, timeout: Duration) -> Self {
        self.confirm_timeout = timeout;
        self
    }

    /// The most recent session, active or terminal.
    pub fn session(&self) -> Option<&ExecutionSession> {
        self.session.as_ref()
    }

    /// Dismiss the current session.
    ///
    /// A terminal session is simply dropped. A still-active session can
    /// only be observed here after the future driving [`Self::submit`] was
    /// dropped mid-flight, since `submit` holds `&mut self` until it
    /// resolves; such an orphaned session is failed (the on-chain outcome
    /// is unknown) and dropped, instead of blocking every later submit.
    pub fn acknowledge(&mut self) {
        let Some(mut session) = self.session.take() else {
            return;
        };
        if session.stage.is_active() {
            warn!("dismissing a session whose driving task was dropped");
            session.fail("transfer interrupted before completion");
            self.publish(&session);
        }
    }

    /// Run one execution to a terminal stage.
    ///
    /// Precondition failures return an error without creating a session.
    /// Failures after the session starts are recorded on the session as
    /// `Failed` and also returned.
    pub async fn submit(
        &mut self,
        ctx: OrchestrationContext,
    ) -> Result<ExecutionSession, EngineError> {
        if self.session.as_ref().is_some_and(|s| s.stage.is_active()) {
            return Err(EngineError::SessionActive);
        }

        // ---- synchronous preconditions, no adapter involvement ----

        if ctx.sender.is_empty() {
            return Err(EngineError::Validation("wallet not connected".into()));
        }

        let base_units = amount::to_base_units(&ctx.amount, ctx.from_token.decimals)
            .ok()
            .filter(|v| *v > 0)
            .ok_or_else(|| EngineError::Validation("invalid amount".into()))?;

        if !chain_registry::is_supported_chain(ctx.from_token.chain_id) {
            return Err(EngineError::UnsupportedChain(ctx.from_token.chain_id));
        }

        let mode = classify_mode(
            &ctx.from_token,
            &ctx.to_token,
            ctx.recipient.as_ref().map(|r| r.address.as_str()),
            &ctx.sender,
        );

        let route = match mode {
            TransferMode::Swap => {
                let route = ctx
                    .route
                    .clone()
                    .ok_or_else(|| EngineError::Validation("quote not ready".into()))?;
                if route.is_expired(unix_now()) {
                    return Err(EngineError::RouteExpired);
                }
                Some(route)
            }
            TransferMode::DirectTransfer => None,
        };

        // ---- session starts ----

        let mut session = ExecutionSession::new(mode, ctx.from_token.chain_id);
        session.advance(Stage::Preparing, "preparing transaction");
        self.record(&session);

        match self.run(&ctx, mode, route, base_units, &mut session).await {
            Ok(()) => Ok(session),
            Err(err) => {
                warn!(error = %err, "execution failed");
                session.fail(err.to_string());
                self.record(&session);
                Err(err)
            }
        }
    }

    async fn run(
        &mut self,
        ctx: &OrchestrationContext,
        mode: TransferMode,
        route: Option<Route>,
        base_units: u128,
        session: &mut ExecutionSession,
    ) -> Result<(), EngineError> {
        let chain_id = ctx.from_token.chain_id;
        let adapter = self.registry.get(ctx.from_token.family()).clone();

        session.advance(Stage::Signing, "awaiting wallet signature");
        self.record(session);

        let tx_hash = match (mode, &route) {
            (TransferMode::DirectTransfer, _) => {
                let recipient = ctx
                    .recipient
                    .as_ref()
                    .ok_or_else(|| EngineError::Validation("recipient required".into()))?;

                let plan = TransferPlan {
                    chain_id,
                    token_address: ctx.from_token.address.clone(),
                    token_decimals: ctx.from_token.decimals,
                    sender: ctx.sender.clone(),
                    recipient: recipient.address.clone(),
                    amount: base_units,
                };
                adapter.transfer(&plan).await?
            }
            (TransferMode::Swap, Some(route)) => {
                adapter
                    .execute_route(chain_id, &ctx.sender, &route.payload)
                    .await?
            }
            // Unreachable: submit() resolves a route before entering Swap.
            (TransferMode::Swap, None) => {
                return Err(EngineError::Validation("quote not ready".into()));
            }
        };

        session.tx_hash = Some(tx_hash.clone());
        session.advance(Stage::Confirming, "waiting for confirmation");
        self.record(session);

        let confirmation = adapter
            .confirm(chain_id, &tx_hash, self.confirm_timeout)
            .await?;
        if confirmation.reverted {
            return Err(EngineError::TransactionReverted);
        }

        session.advance(Stage::Completed, "transfer confirmed");
        self.record(session);
        Ok(())
    }

    /// Store the latest session state and push it to the status sink. The
    /// stored copy tracks every transition, so the host still sees the
    /// mid-flight stage if the future driving `submit` is dropped.
    fn record(&mut self, session: &ExecutionSession) {
        self.session = Some(session.clone());
        self.publish(session);
    }

    fn publish(&self, session: &ExecutionSession) {
        self.sink.publish(StatusUpdate {
            stage: session.stage,
            message: session.status_message.clone(),
            tx_hash: session.tx_hash.clone(),
            chain_id: Some(session.chain_id),
        });
    }
}
