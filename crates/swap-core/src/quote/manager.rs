//! Debounced, last-write-wins quote state.
//!
//! The manager owns the pair selection, the two amount fields, the
//! recipient, and the current [`Route`]. Every input change bumps a
//! generation counter; a quote response is applied only if its generation
//! still matches, so a slow response for superseded inputs can never
//! overwrite the state of newer ones, regardless of arrival order.

use std::time::{Duration, Instant};

use tracing::debug;

use chain_registry::is_address_chain_compatible;

use crate::amount;
use crate::quote::{QuoteError, QuoteRequest, QuoteResponse, QuoteService, QuoteSide};
use crate::route::Route;
use crate::types::{RecipientAddress, RecipientSource, Token};

/// Default gate between an input change and the quote request it triggers.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// A frozen quote request tagged with the input generation it was built
/// from.
#[derive(Debug, Clone)]
pub struct QuoteSnapshot {
    pub generation: u64,
    pub request: QuoteRequest,
}

pub struct QuoteManager {
    from_token: Option<Token>,
    to_token: Option<Token>,
    from_amount: String,
    to_amount: String,
    active_side: QuoteSide,
    recipient: Option<RecipientAddress>,
    recipient_source: RecipientSource,
    route: Option<Route>,
    generation: u64,
    last_input_change: Option<Instant>,
    debounce: Duration,
}

impl Default for QuoteManager {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteManager {
    pub fn new() -> Self {
        QuoteManager {
            from_token: None,
            to_token: None,
            from_amount: String::new(),
            to_amount: String::new(),
            active_side: QuoteSide::From,
            recipient: None,
            recipient_source: RecipientSource::AutoSynced,
            route: None,
            generation: 0,
            last_input_change: None,
            debounce: DEFAULT_DEBOUNCE,
        }
    }

    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    // ---- accessors ----

    pub fn from_token(&self) -> Option<&Token> {
        self.from_token.as_ref()
    }

    pub fn to_token(&self) -> Option<&Token> {
        self.to_token.as_ref()
    }

    pub fn from_amount(&self) -> &str {
        &self.from_amount
    }

    pub fn to_amount(&self) -> &str {
        &self.to_amount
    }

    pub fn active_side(&self) -> QuoteSide {
        self.active_side
    }

    pub fn recipient(&self) -> Option<&RecipientAddress> {
        self.recipient.as_ref()
    }

    pub fn recipient_source(&self) -> RecipientSource {
        self.recipient_source
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    /// The current route, if it exists and has not expired at `now`.
    pub fn usable_route(&self, now: u64) -> Option<&Route> {
        self.route.as_ref().filter(|r| !r.is_expired(now))
    }

    // ---- input mutation ----

    /// Replace the source token. Invalidates any held route.
    pub fn set_from_token(&mut self, token: Token) {
        self.from_token = Some(token);
        self.invalidate();
    }

    /// Replace the destination token. Invalidates any held route and
    /// clears the recipient if it is not valid on the new destination
    /// chain.
    pub fn set_to_token(&mut self, token: Token) {
        if let Some(recipient) = &self.recipient {
            if !is_address_chain_compatible(&recipient.address, token.chain_id) {
                debug!(address = %recipient.address, chain_id = token.chain_id,
                    "clearing recipient incompatible with new destination chain");
                self.recipient = None;
                self.recipient_source = RecipientSource::AutoSynced;
            }
        }
        self.to_token = Some(token);
        self.invalidate();
    }

    /// Edit one amount field. An empty value clears both sides, so a stale
    /// opposite amount never lingers next to a blank input.
    pub fn set_amount(&mut self, side: QuoteSide, value: &str) {
        if value.trim().is_empty() {
            self.from_amount.clear();
            self.to_amount.clear();
        } else {
            match side {
                QuoteSide::From => self.from_amount = value.trim().to_owned(),
                QuoteSide::To => self.to_amount = value.trim().to_owned(),
            }
            self.active_side = side;
        }
        self.invalidate();
    }

    /// Store an already-validated recipient.
    pub fn set_recipient(&mut self, recipient: RecipientAddress, source: RecipientSource) {
        self.recipient = Some(recipient);
        self.recipient_source = source;
        self.invalidate();
    }

    pub fn clear_recipient(&mut self) {
        self.recipient = None;
        self.recipient_source = RecipientSource::AutoSynced;
        self.invalidate();
    }

    /// Keep an auto-synced recipient mirroring the connected sender. A
    /// user-overridden recipient is left alone. The sender is only
    /// mirrored if it is valid on the destination chain.
    pub fn resync_auto_recipient(&mut self, sender: Option<&str>) {
        if self.recipient_source != RecipientSource::AutoSynced {
            return;
        }

        self.recipient = match (sender, &self.to_token) {
            (Some(address), Some(to_token))
                if is_address_chain_compatible(address, to_token.chain_id) =>
            {
                Some(RecipientAddress {
                    address: address.to_owned(),
                    family: chain_registry::classify_chain(to_token.chain_id),
                })
            }
            _ => None,
        };
    }

    fn invalidate(&mut self) {
        self.route = None;
        self.generation += 1;
        self.last_input_change = Some(Instant::now());
    }

    // ---- quoting ----

    /// Time still to wait before the debounce gate opens, if any.
    fn debounce_remaining(&self) -> Option<Duration> {
        let last = self.last_input_change?;
        self.debounce.checked_sub(last.elapsed()).filter(|d| !d.is_zero())
    }

    /// Freeze the current inputs into a request, or `None` if the inputs
    /// are not quotable yet (missing token, empty or zero amount).
    pub fn snapshot(&self) -> Option<QuoteSnapshot> {
        let from_token = self.from_token.as_ref()?;
        let to_token = self.to_token.as_ref()?;

        let (raw, decimals) = match self.active_side {
            QuoteSide::From => (&self.from_amount, from_token.decimals),
            QuoteSide::To => (&self.to_amount, to_token.decimals),
        };
        let base_units = amount::to_base_units(raw, decimals).ok()?;
        if base_units == 0 {
            return None;
        }

        Some(QuoteSnapshot {
            generation: self.generation,
            request: QuoteRequest {
                from_token_address: from_token.address.clone(),
                from_chain_id: from_token.chain_id,
                to_token_address: to_token.address.clone(),
                to_chain_id: to_token.chain_id,
                amount: base_units.to_string(),
                side: self.active_side,
                recipient: self.recipient.as_ref().map(|r| r.address.clone()),
            },
        })
    }

    /// Apply a quote outcome for the given input generation.
    ///
    /// Returns `Ok(true)` if the route was applied, `Ok(false)` if the
    /// result was stale and discarded. Backend errors for the current
    /// generation propagate; stale errors are swallowed.
    pub fn apply(
        &mut self,
        generation: u64,
        outcome: Result<QuoteResponse, QuoteError>,
    ) -> Result<bool, QuoteError> {
        if generation != self.generation {
            debug!(
                stale = generation,
                current = self.generation,
                "discarding superseded quote result"
            );
            return Ok(false);
        }

        let response = outcome?;

        let from_units: u128 = response
            .from_amount
            .parse()
            .map_err(|_| QuoteError::MalformedResponse("fromAmount not an integer".into()))?;
        let to_units: u128 = response
            .to_amount
            .parse()
            .map_err(|_| QuoteError::MalformedResponse("toAmount not an integer".into()))?;

        // Tokens must still be present; the generation check guarantees it,
        // since clearing a token bumps the generation.
        let (from_decimals, to_decimals) = match (&self.from_token, &self.to_token) {
            (Some(f), Some(t)) => (f.decimals, t.decimals),
            _ => return Ok(false),
        };

        self.from_amount = amount::from_base_units(from_units, from_decimals);
        self.to_amount = amount::from_base_units(to_units, to_decimals);
        self.route = Some(Route {
            from_amount: from_units,
            to_amount: to_units,
            from_amount_usd: response.from_amount_usd,
            to_amount_usd: response.to_amount_usd,
            expires_at: response.expires_at,
            payload: response.payload,
        });

        Ok(true)
    }

    /// Wait out the debounce gate, then fetch and apply a quote for the
    /// current inputs. Returns `Ok(false)` if the inputs were not
    /// quotable or the response arrived stale.
    pub async fn refresh(&mut self, service: &dyn QuoteService) -> Result<bool, QuoteError> {
        if self.snapshot().is_none() {
            return Ok(false);
        }

        if let Some(remaining) = self.debounce_remaining() {
            tokio::time::sleep(remaining).await;
        }

        // Inputs may have changed while the gate was closed.
        let Some(snapshot) = self.snapshot() else {
            return Ok(false);
        };

        let outcome = service.fetch_quote(&snapshot.request).await;
        self.apply(snapshot.generation, outcome)
    }

    // ---- session coordination ----

    /// Forward-looking reset after a completed transfer: both amounts and
    /// the consumed route are cleared, the pair selection stays.
    pub fn on_session_completed(&mut self) {
        self.from_amount.clear();
        self.to_amount.clear();
        self.invalidate();
    }
}
