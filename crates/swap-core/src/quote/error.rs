//! Quote failure classification.
//!
//! Backend and transport failures are folded into a displayable
//! `{title, message, remediation}` triple so the caller never has to
//! parse raw backend strings. Slippage failures carry concrete suggested
//! tolerance overrides the UI can offer as one-tap actions.

use thiserror::Error;

/// Suggested slippage overrides offered when the backend rejects a quote
/// for slippage reasons, in basis points.
pub const SUGGESTED_SLIPPAGE_BPS: [u16; 3] = [50, 100, 300];

/// An actionable recovery step. Never free text: each variant maps to a
/// concrete UI affordance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Remediation {
    CheckNetworkConnection,
    RetryLater,
    ReduceAmount,
    /// Retry the quote with this slippage tolerance, in basis points.
    IncreaseSlippageBps(u16),
}

/// A caller-displayable quote failure.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteFailure {
    pub title: String,
    pub message: String,
    pub remediation: Vec<Remediation>,
}

impl QuoteFailure {
    pub fn network(detail: impl Into<String>) -> Self {
        QuoteFailure {
            title: "Quote unavailable".into(),
            message: detail.into(),
            remediation: vec![Remediation::CheckNetworkConnection, Remediation::RetryLater],
        }
    }

    pub fn backend(detail: impl Into<String>) -> Self {
        QuoteFailure {
            title: "No route found".into(),
            message: detail.into(),
            remediation: vec![Remediation::ReduceAmount, Remediation::RetryLater],
        }
    }

    pub fn slippage(detail: impl Into<String>) -> Self {
        QuoteFailure {
            title: "Price moved too much".into(),
            message: detail.into(),
            remediation: SUGGESTED_SLIPPAGE_BPS
                .iter()
                .map(|bps| Remediation::IncreaseSlippageBps(*bps))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum QuoteError {
    #[error("{}", .0.message)]
    Backend(QuoteFailure),

    /// The amount field could not be parsed at the token's precision.
    #[error("invalid quote amount: {0}")]
    InvalidAmount(String),

    /// The response body did not match the expected shape.
    #[error("malformed quote response: {0}")]
    MalformedResponse(String),
}

impl QuoteError {
    /// The displayable failure, if this error carries one.
    pub fn failure(&self) -> Option<&QuoteFailure> {
        match self {
            QuoteError::Backend(f) => Some(f),
            _ => None,
        }
    }
}
