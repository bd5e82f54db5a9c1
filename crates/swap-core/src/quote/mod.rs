//! Route quoting: request/response wire types, backend client, and the
//! debounced quote manager.

mod error;
mod http;
mod manager;
mod service;

pub use error::{QuoteError, QuoteFailure, Remediation};
pub use http::HttpQuoteService;
pub use manager::{QuoteManager, QuoteSnapshot};
pub use service::{QuoteRequest, QuoteResponse, QuoteService, QuoteSide};
