//! HTTP client for the routing backend.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::quote::{QuoteError, QuoteFailure, QuoteRequest, QuoteResponse, QuoteService};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Quote backend client speaking the JSON contract over HTTPS.
pub struct HttpQuoteService {
    client: reqwest::Client,
    quote_url: String,
}

impl HttpQuoteService {
    /// `quote_url` is the full endpoint URL, e.g.
    /// `https://router.example.com/v1/quote`.
    pub fn new(quote_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        HttpQuoteService {
            client,
            quote_url: quote_url.into(),
        }
    }
}

/// Classify a non-success backend response body into a displayable failure.
fn classify_backend_error(status: u16, body: &str) -> QuoteFailure {
    let lowered = body.to_ascii_lowercase();
    if lowered.contains("slippage") {
        QuoteFailure::slippage(body.to_owned())
    } else if status >= 500 {
        QuoteFailure::network(format!("quote backend error {status}"))
    } else {
        QuoteFailure::backend(body.to_owned())
    }
}

#[async_trait]
impl QuoteService for HttpQuoteService {
    async fn fetch_quote(&self, request: &QuoteRequest) -> Result<QuoteResponse, QuoteError> {
        debug!(
            from = %request.from_token_address,
            to = %request.to_token_address,
            amount = %request.amount,
            "requesting quote"
        );

        let response = self
            .client
            .post(&self.quote_url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "quote request failed");
                QuoteError::Backend(QuoteFailure::network(e.to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %body, "quote backend rejected request");
            return Err(QuoteError::Backend(classify_backend_error(
                status.as_u16(),
                &body,
            )));
        }

        response
            .json::<QuoteResponse>()
            .await
            .map_err(|e| QuoteError::MalformedResponse(e.to_string()))
    }
}
