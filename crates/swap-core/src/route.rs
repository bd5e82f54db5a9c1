//! Route quotes returned by the routing backend.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// A priced route for a swap, valid until `expires_at`.
///
/// `payload` is the backend's opaque execution material: calldata for EVM
/// chains, a pre-built base64 transaction for Solana. The engine never
/// interprets it beyond handing it to the matching chain adapter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Input amount in base units of the source token.
    pub from_amount: u128,
    /// Quoted output amount in base units of the destination token.
    pub to_amount: u128,
    pub from_amount_usd: f64,
    pub to_amount_usd: f64,
    /// Unix timestamp (seconds) after which the route must not be executed.
    pub expires_at: u64,
    pub payload: serde_json::Value,
}

impl Route {
    /// A route is unusable from the expiry instant onward.
    pub fn is_expired(&self, now: u64) -> bool {
        now >= self.expires_at
    }
}

/// Current unix time in seconds.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
