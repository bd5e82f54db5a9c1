//! Quote service wire types and trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::quote::QuoteError;

/// Which side of the pair the user last edited. The backend quotes the
/// other side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteSide {
    #[serde(rename = "from")]
    From,
    #[serde(rename = "to")]
    To,
}

impl QuoteSide {
    pub fn opposite(self) -> QuoteSide {
        match self {
            QuoteSide::From => QuoteSide::To,
            QuoteSide::To => QuoteSide::From,
        }
    }
}

/// A quote request as the routing backend expects it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub from_token_address: String,
    pub from_chain_id: u64,
    pub to_token_address: String,
    pub to_chain_id: u64,
    /// Amount of the `side` token, in base units, as a decimal string.
    pub amount: String,
    pub side: QuoteSide,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
}

/// A quote response from the routing backend.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    /// Source amount in base units, as a decimal string.
    pub from_amount: String,
    /// Destination amount in base units, as a decimal string.
    pub to_amount: String,
    #[serde(rename = "fromAmountUSD", default)]
    pub from_amount_usd: f64,
    #[serde(rename = "toAmountUSD", default)]
    pub to_amount_usd: f64,
    /// Unix timestamp (seconds) after which this route is unusable.
    pub expires_at: u64,
    /// Opaque execution material for the chain adapter.
    pub payload: serde_json::Value,
}

/// An external routing backend able to price a swap.
#[async_trait]
pub trait QuoteService: Send + Sync {
    async fn fetch_quote(&self, request: &QuoteRequest) -> Result<QuoteResponse, QuoteError>;
}
