//! End-to-end pipeline tests with mock wallets and a mock quote backend.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use chain_evm::transfer::EvmTransactionRequest;
use chain_sol::instruction::SolInstruction;
use swap_core::quote::{QuoteError, QuoteRequest, QuoteResponse, QuoteService};
use swap_core::wallet::{EvmWallet, SignatureStatus, SolWallet, TxReceipt, WalletError};
use swap_core::{
    AdapterRegistry, EngineError, EvmAdapter, QuoteSide, SolAdapter, Stage, StatusSink,
    StatusUpdate, SwapEngine, Token, TransferMode,
};

// ---------------------------------------------------------------------------
// Mocks
// ---------------------------------------------------------------------------

#[derive(Default)]
struct RecordingSink(Mutex<Vec<StatusUpdate>>);

impl StatusSink for RecordingSink {
    fn publish(&self, update: StatusUpdate) {
        self.0.lock().unwrap().push(update);
    }
}

impl RecordingSink {
    fn stages(&self) -> Vec<Stage> {
        self.0.lock().unwrap().iter().map(|u| u.stage).collect()
    }
}

struct MockEvmWallet {
    requests: Mutex<Vec<EvmTransactionRequest>>,
    broadcasts: AtomicUsize,
    reject: bool,
    /// `None` keeps the transaction pending forever.
    receipt: Option<TxReceipt>,
}

impl MockEvmWallet {
    fn confirming() -> Self {
        MockEvmWallet {
            requests: Mutex::new(Vec::new()),
            broadcasts: AtomicUsize::new(0),
            reject: false,
            receipt: Some(TxReceipt { reverted: false }),
        }
    }

    fn rejecting() -> Self {
        MockEvmWallet {
            reject: true,
            ..Self::confirming()
        }
    }

    fn reverting() -> Self {
        MockEvmWallet {
            receipt: Some(TxReceipt { reverted: true }),
            ..Self::confirming()
        }
    }

    fn never_confirming() -> Self {
        MockEvmWallet {
            receipt: None,
            ..Self::confirming()
        }
    }
}

#[async_trait]
impl EvmWallet for MockEvmWallet {
    async fn sign_and_broadcast(
        &self,
        request: &EvmTransactionRequest,
    ) -> Result<String, WalletError> {
        if self.reject {
            return Err(WalletError::UserRejected);
        }
        self.broadcasts.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request.clone());
        Ok("0xabc123".into())
    }

    async fn transaction_receipt(
        &self,
        _chain_id: u64,
        _tx_hash: &str,
    ) -> Result<Option<TxReceipt>, WalletError> {
        Ok(self.receipt)
    }
}

struct MockSolWallet {
    instructions: Mutex<Vec<SolInstruction>>,
    broadcasts: AtomicUsize,
}

impl MockSolWallet {
    fn new() -> Self {
        MockSolWallet {
            instructions: Mutex::new(Vec::new()),
            broadcasts: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SolWallet for MockSolWallet {
    async fn sign_and_broadcast(
        &self,
        _payer: &str,
        instructions: &[SolInstruction],
    ) -> Result<String, WalletError> {
        self.broadcasts.fetch_add(1, Ordering::SeqCst);
        self.instructions
            .lock()
            .unwrap()
            .extend_from_slice(instructions);
        Ok("5sig".into())
    }

    async fn sign_and_broadcast_encoded(
        &self,
        _transaction_base64: &str,
    ) -> Result<String, WalletError> {
        self.broadcasts.fetch_add(1, Ordering::SeqCst);
        Ok("5sig".into())
    }

    async fn signature_status(
        &self,
        _signature: &str,
    ) -> Result<Option<SignatureStatus>, WalletError> {
        Ok(Some(SignatureStatus {
            finalized: true,
            err: None,
        }))
    }
}

struct MockQuoteService {
    expires_at: u64,
    calls: AtomicUsize,
}

impl MockQuoteService {
    fn fresh() -> Self {
        MockQuoteService {
            expires_at: u64::MAX,
            calls: AtomicUsize::new(0),
        }
    }

    fn expired() -> Self {
        MockQuoteService {
            expires_at: 1,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl QuoteService for MockQuoteService {
    async fn fetch_quote(&self, request: &QuoteRequest) -> Result<QuoteResponse, QuoteError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(QuoteResponse {
            from_amount: request.amount.clone(),
            to_amount: "2500000000000000000".into(),
            from_amount_usd: 10.0,
            to_amount_usd: 9.97,
            expires_at: self.expires_at,
            payload: serde_json::json!({
                "to": "0x1111111111111111111111111111111111111111",
                "data": "0xdeadbeef",
            }),
        })
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

const SENDER: &str = "0x00000000000000000000000000000000000000ee";
const OTHER: &str = "0x00000000000000000000000000000000000000cc";
const TWC: &str = "0x000000000000000000000000000000000000aaaa";
const USDT: &str = "0x000000000000000000000000000000000000bbbb";

const SOL_SENDER: &str = "TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA";
const SOL_OTHER: &str = "ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL";
const SOL_MINT: &str = "So11111111111111111111111111111111111111112";

fn bsc_token(symbol: &str, address: &str) -> Token {
    Token {
        symbol: symbol.into(),
        address: address.into(),
        chain_id: 56,
        decimals: 18,
        price_usd: None,
    }
}

fn sol_token() -> Token {
    Token {
        symbol: "SOL".into(),
        address: SOL_MINT.into(),
        chain_id: chain_registry::SOLANA_CHAIN_ID,
        decimals: 9,
        price_usd: None,
    }
}

fn engine_with(
    evm_wallet: Arc<MockEvmWallet>,
    sol_wallet: Arc<MockSolWallet>,
    sink: Arc<RecordingSink>,
) -> SwapEngine {
    let registry = AdapterRegistry::new(
        Arc::new(EvmAdapter::new(evm_wallet).with_poll_interval(Duration::from_millis(5))),
        Arc::new(SolAdapter::new(sol_wallet).with_poll_interval(Duration::from_millis(5))),
    );
    SwapEngine::new(registry, sink)
        .with_quote_debounce(Duration::ZERO)
        .with_confirm_timeout(Duration::from_millis(100))
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[tokio::test]
async fn evm_swap_pipeline_completes() {
    let wallet = Arc::new(MockEvmWallet::confirming());
    let sink = Arc::new(RecordingSink::default());
    let mut engine = engine_with(wallet.clone(), Arc::new(MockSolWallet::new()), sink.clone());

    engine.connect_wallet(SENDER.into());
    engine.select_from_token(bsc_token("TWC", TWC));
    engine.select_to_token(bsc_token("USDT", USDT));
    engine.set_amount(QuoteSide::From, "10");

    let service = MockQuoteService::fresh();
    assert!(engine.refresh_quote(&service).await.unwrap());
    assert_eq!(engine.quotes().to_amount(), "2.5");

    let session = engine.submit().await.unwrap();
    assert_eq!(session.mode, TransferMode::Swap);
    assert_eq!(session.stage, Stage::Completed);
    assert_eq!(session.tx_hash.as_deref(), Some("0xabc123"));

    // The swap went through the route payload, not a plain transfer.
    let requests = wallet.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].to, "0x1111111111111111111111111111111111111111");
    assert_eq!(requests[0].data, vec![0xde, 0xad, 0xbe, 0xef]);
    drop(requests);

    // Forward-looking reset after success.
    assert_eq!(engine.quotes().from_amount(), "");
    assert_eq!(engine.quotes().to_amount(), "");
    assert!(engine.quotes().route().is_none());

    assert_eq!(
        sink.stages(),
        vec![Stage::Preparing, Stage::Signing, Stage::Confirming, Stage::Completed]
    );
}

#[tokio::test]
async fn same_token_other_recipient_runs_direct_transfer() {
    let wallet = Arc::new(MockEvmWallet::confirming());
    let sink = Arc::new(RecordingSink::default());
    let mut engine = engine_with(wallet.clone(), Arc::new(MockSolWallet::new()), sink);

    engine.connect_wallet(SENDER.into());
    engine.select_from_token(bsc_token("TWC", TWC));
    engine.select_to_token(bsc_token("TWC", TWC));
    engine.set_recipient(OTHER).unwrap();
    engine.set_amount(QuoteSide::From, "10");

    // No quote needed for a direct transfer.
    let session = engine.submit().await.unwrap();
    assert_eq!(session.mode, TransferMode::DirectTransfer);
    assert_eq!(session.stage, Stage::Completed);

    // An ERC-20 transfer addressed to the token contract.
    let requests = wallet.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].to, TWC);
    assert_eq!(requests[0].value, 0);
    assert_eq!(&requests[0].data[..4], &[0xa9, 0x05, 0x9c, 0xbb]);
}

#[tokio::test]
async fn expired_route_never_reaches_the_wallet() {
    let wallet = Arc::new(MockEvmWallet::confirming());
    let sink = Arc::new(RecordingSink::default());
    let mut engine = engine_with(wallet.clone(), Arc::new(MockSolWallet::new()), sink.clone());

    engine.connect_wallet(SENDER.into());
    engine.select_from_token(bsc_token("TWC", TWC));
    engine.select_to_token(bsc_token("USDT", USDT));
    engine.set_amount(QuoteSide::From, "10");

    let service = MockQuoteService::expired();
    assert!(engine.refresh_quote(&service).await.unwrap());

    let result = engine.submit().await;
    assert!(matches!(result, Err(EngineError::RouteExpired)));
    assert_eq!(wallet.broadcasts.load(Ordering::SeqCst), 0);
    assert!(sink.stages().is_empty());
}

#[tokio::test]
async fn user_rejection_is_distinguishable() {
    let wallet = Arc::new(MockEvmWallet::rejecting());
    let sink = Arc::new(RecordingSink::default());
    let mut engine = engine_with(wallet, Arc::new(MockSolWallet::new()), sink);

    engine.connect_wallet(SENDER.into());
    engine.select_from_token(bsc_token("TWC", TWC));
    engine.select_to_token(bsc_token("USDT", USDT));
    engine.set_amount(QuoteSide::From, "10");
    engine.refresh_quote(&MockQuoteService::fresh()).await.unwrap();

    let result = engine.submit().await;
    assert!(matches!(result, Err(EngineError::UserRejected)));

    let session = engine.session().unwrap();
    assert_eq!(session.stage, Stage::Failed);
    assert_eq!(session.error.as_deref(), Some("wallet rejected the request"));
}

#[tokio::test]
async fn reverted_transaction_fails_as_reverted() {
    let wallet = Arc::new(MockEvmWallet::reverting());
    let sink = Arc::new(RecordingSink::default());
    let mut engine = engine_with(wallet, Arc::new(MockSolWallet::new()), sink);

    engine.connect_wallet(SENDER.into());
    engine.select_from_token(bsc_token("TWC", TWC));
    engine.select_to_token(bsc_token("USDT", USDT));
    engine.set_amount(QuoteSide::From, "10");
    engine.refresh_quote(&MockQuoteService::fresh()).await.unwrap();

    let result = engine.submit().await;
    assert!(matches!(result, Err(EngineError::TransactionReverted)));

    let session = engine.session().unwrap();
    assert_eq!(session.error.as_deref(), Some("transaction reverted on chain"));
    // Amounts are NOT cleared on failure.
    assert_eq!(engine.quotes().from_amount(), "10");
}

#[tokio::test]
async fn confirmation_timeout_fails_terminally() {
    let wallet = Arc::new(MockEvmWallet::never_confirming());
    let sink = Arc::new(RecordingSink::default());
    let mut engine = engine_with(wallet, Arc::new(MockSolWallet::new()), sink);

    engine.connect_wallet(SENDER.into());
    engine.select_from_token(bsc_token("TWC", TWC));
    engine.select_to_token(bsc_token("USDT", USDT));
    engine.set_amount(QuoteSide::From, "10");
    engine.refresh_quote(&MockQuoteService::fresh()).await.unwrap();

    let result = engine.submit().await;
    assert!(matches!(result, Err(EngineError::ConfirmationTimeout)));

    let session = engine.session().unwrap();
    assert_eq!(session.stage, Stage::Failed);
    assert_eq!(
        session.error.as_deref(),
        Some("transaction not found or confirmation timed out")
    );
}

#[tokio::test]
async fn solana_native_transfer_moves_exact_lamports() {
    let sol_wallet = Arc::new(MockSolWallet::new());
    let sink = Arc::new(RecordingSink::default());
    let mut engine = engine_with(
        Arc::new(MockEvmWallet::confirming()),
        sol_wallet.clone(),
        sink,
    );

    engine.connect_wallet(SOL_SENDER.into());
    engine.select_from_token(sol_token());
    engine.select_to_token(sol_token());
    engine.set_recipient(SOL_OTHER).unwrap();
    engine.set_amount(QuoteSide::From, "1.5");

    let session = engine.submit().await.unwrap();
    assert_eq!(session.mode, TransferMode::DirectTransfer);
    assert_eq!(session.stage, Stage::Completed);

    let instructions = sol_wallet.instructions.lock().unwrap();
    assert_eq!(instructions.len(), 1);
    // System transfer: u32 LE index 2, then u64 LE lamports.
    assert_eq!(&instructions[0].data[..4], &[2, 0, 0, 0]);
    assert_eq!(&instructions[0].data[4..], &1_500_000_000u64.to_le_bytes());
}

#[tokio::test]
async fn interrupted_submit_can_be_dismissed_and_retried() {
    let wallet = Arc::new(MockEvmWallet::never_confirming());
    let sink = Arc::new(RecordingSink::default());
    let mut engine = engine_with(wallet, Arc::new(MockSolWallet::new()), sink);

    engine.connect_wallet(SENDER.into());
    engine.select_from_token(bsc_token("TWC", TWC));
    engine.select_to_token(bsc_token("USDT", USDT));
    engine.set_amount(QuoteSide::From, "10");
    engine.refresh_quote(&MockQuoteService::fresh()).await.unwrap();

    // A host-side timeout drops the submit future mid-confirmation.
    let interrupted = tokio::time::timeout(Duration::from_millis(30), engine.submit()).await;
    assert!(interrupted.is_err());

    // The stored session still shows the mid-flight stage and hash.
    let session = engine.session().unwrap();
    assert_eq!(session.stage, Stage::Confirming);
    assert!(session.tx_hash.is_some());

    // The orphaned session blocks a new submit until dismissed.
    let blocked = engine.submit().await;
    assert!(matches!(blocked, Err(EngineError::SessionActive)));

    engine.acknowledge_session();
    assert!(engine.session().is_none());

    // The retry runs to a terminal stage again (here the confirmation
    // bound, since this wallet never confirms) instead of being locked out.
    let retry = engine.submit().await;
    assert!(matches!(retry, Err(EngineError::ConfirmationTimeout)));
    assert_eq!(engine.session().unwrap().stage, Stage::Failed);
}

#[tokio::test]
async fn completed_session_does_not_block_resubmission() {
    let wallet = Arc::new(MockEvmWallet::confirming());
    let sink = Arc::new(RecordingSink::default());
    let mut engine = engine_with(wallet.clone(), Arc::new(MockSolWallet::new()), sink);

    engine.connect_wallet(SENDER.into());
    engine.select_from_token(bsc_token("TWC", TWC));
    engine.select_to_token(bsc_token("USDT", USDT));
    engine.set_amount(QuoteSide::From, "10");
    engine.refresh_quote(&MockQuoteService::fresh()).await.unwrap();
    engine.submit().await.unwrap();

    // A second transfer after completion starts cleanly.
    engine.set_amount(QuoteSide::From, "5");
    engine.refresh_quote(&MockQuoteService::fresh()).await.unwrap();
    let session = engine.submit().await.unwrap();
    assert_eq!(session.stage, Stage::Completed);
    assert_eq!(wallet.broadcasts.load(Ordering::SeqCst), 2);
}
