//! The engine facade.
//!
//! [`SwapEngine`] ties the quote manager, the orchestrator and the
//! connected wallet identity together behind one API, the surface a host
//! application embeds. All state mutation flows through here so the
//! cross-cutting rules (recipient compatibility, auto-sync, post-success
//! reset) hold no matter which call triggered them.

use std::sync::Arc;
use std::time::Duration;

use chain_registry::is_address_chain_compatible;
use tracing::info;

use crate::adapter::AdapterRegistry;
use crate::error::EngineError;
use crate::orchestrator::{OrchestrationContext, Orchestrator};
use crate::quote::{QuoteError, QuoteManager, QuoteService, QuoteSide};
use crate::session::{ExecutionSession, Stage, StatusSink};
use crate::amount;
use crate::types::{BalanceSource, RecipientAddress, RecipientSource, Token};

pub struct SwapEngine {
    quotes: QuoteManager,
    orchestrator: Orchestrator,
    sender: Option<String>,
}

impl SwapEngine {
    pub fn new(registry: AdapterRegistry, sink: Arc<dyn StatusSink>) -> Self {
        SwapEngine {
            quotes: QuoteManager::new(),
            orchestrator: Orchestrator::new(registry, sink),
            sender: None,
        }
    }

    pub fn with_quote_debounce(mut self, debounce: Duration) -> Self {
        self.quotes = self.quotes.with_debounce(debounce);
        self
    }

    pub fn with_confirm_timeout(mut self, timeout: Duration) -> Self {
        self.orchestrator = self.orchestrator.with_confirm_timeout(timeout);
        self
    }

    // ---- wallet identity ----

    pub fn connect_wallet(&mut self, address: String) {
        info!(address = %address, "wallet connected");
        self.sender = Some(address);
        self.quotes
            .resync_auto_recipient(self.sender.as_deref());
    }

    pub fn disconnect_wallet(&mut self) {
        self.sender = None;
        self.quotes.resync_auto_recipient(None);
    }

    pub fn sender(&self) -> Option<&str> {
        self.sender.as_deref()
    }

    // ---- pair / amount / recipient ----

    pub fn quotes(&self) -> &QuoteManager {
        &self.quotes
    }

    pub fn select_from_token(&mut self, token: Token) {
        self.quotes.set_from_token(token);
    }

    /// Change the destination token. The quote manager clears a recipient
    /// that is invalid on the new chain; an auto-synced recipient is then
    /// re-derived from the connected wallet.
    pub fn select_to_token(&mut self, token: Token) {
        self.quotes.set_to_token(token);
        self.quotes
            .resync_auto_recipient(self.sender.as_deref());
    }

    pub fn set_amount(&mut self, side: QuoteSide, value: &str) {
        self.quotes.set_amount(side, value);
    }

    /// Set an explicit recipient, validated against the destination chain.
    /// An incompatible address is rejected and any held recipient cleared.
    pub fn set_recipient(&mut self, address: &str) -> Result<(), EngineError> {
        let to_token = self
            .quotes
            .to_token()
            .ok_or_else(|| EngineError::Validation("select a destination token first".into()))?;
        let chain_id = to_token.chain_id;

        if !is_address_chain_compatible(address, chain_id) {
            self.quotes.clear_recipient();
            self.quotes.resync_auto_recipient(self.sender.as_deref());
            return Err(EngineError::Validation(format!(
                "address is not valid on chain {chain_id}"
            )));
        }

        self.quotes.set_recipient(
            RecipientAddress {
                address: address.to_owned(),
                family: chain_registry::classify_chain(chain_id),
            },
            RecipientSource::UserOverridden,
        );
        Ok(())
    }

    /// Drop an explicit recipient and fall back to mirroring the sender.
    pub fn clear_recipient(&mut self) {
        self.quotes.clear_recipient();
        self.quotes.resync_auto_recipient(self.sender.as_deref());
    }

    /// Fill the source amount from the sender's full balance. Returns
    /// `Ok(false)` if the balance is still loading and nothing changed.
    pub async fn use_max_balance(
        &mut self,
        source: &dyn BalanceSource,
    ) -> Result<bool, EngineError> {
        let sender = self
            .sender
            .clone()
            .ok_or_else(|| EngineError::Validation("wallet not connected".into()))?;
        let from_token = self
            .quotes
            .from_token()
            .cloned()
            .ok_or_else(|| EngineError::Validation("select a source token first".into()))?;

        let balance = source.balance_of(&sender, &from_token).await;
        if balance.is_loading {
            return Ok(false);
        }

        let normalized = amount::normalize(&balance.formatted, from_token.decimals)
            .map_err(|e| EngineError::Validation(e.to_string()))?;
        self.quotes.set_amount(QuoteSide::From, &normalized);
        Ok(true)
    }

    // ---- quoting ----

    /// Debounced fetch-and-apply for the current inputs.
    pub async fn refresh_quote(
        &mut self,
        service: &dyn QuoteService,
    ) -> Result<bool, QuoteError> {
        self.quotes.refresh(service).await
    }

    // ---- execution ----

    pub fn session(&self) -> Option<&ExecutionSession> {
        self.orchestrator.session()
    }

    pub fn acknowledge_session(&mut self) {
        self.orchestrator.acknowledge();
    }

    /// Snapshot the current state and run it to a terminal stage.
    pub async fn submit(&mut self) -> Result<ExecutionSession, EngineError> {
        let sender = self
            .sender
            .clone()
            .ok_or_else(|| EngineError::Validation("wallet not connected".into()))?;
        let from_token = self
            .quotes
            .from_token()
            .cloned()
            .ok_or_else(|| EngineError::Validation("select both tokens".into()))?;
        let to_token = self
            .quotes
            .to_token()
            .cloned()
            .ok_or_else(|| EngineError::Validation("select both tokens".into()))?;

        let ctx = OrchestrationContext {
            from_token,
            to_token,
            amount: self.quotes.from_amount().to_owned(),
            sender,
            recipient: self.quotes.recipient().cloned(),
            route: self.quotes.route().cloned(),
        };

        let session = self.orchestrator.submit(ctx).await?;
        if session.stage == Stage::Completed {
            self.quotes.on_session_completed();
        }
        Ok(session)
    }
}
