//! Execution sessions and status reporting.

use serde::Serialize;
use tracing::info;

/// Lifecycle stage of an execution session. Ordered: progress is forward
/// only, and `Completed`/`Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Stage {
    Idle,
    Preparing,
    Signing,
    Confirming,
    Completed,
    Failed,
}

impl Stage {
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Completed | Stage::Failed)
    }

    /// Whether a session in this stage blocks a new submit.
    pub fn is_active(self) -> bool {
        matches!(self, Stage::Preparing | Stage::Signing | Stage::Confirming)
    }
}

/// What kind of operation a session executes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TransferMode {
    /// Routed exchange through the quote backend's execution payload.
    Swap,
    /// Same token, same chain, to another wallet; no route involved.
    DirectTransfer,
}

/// One user-initiated execution, from submit to a terminal stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionSession {
    pub mode: TransferMode,
    pub stage: Stage,
    pub status_message: String,
    pub tx_hash: Option<String>,
    pub chain_id: u64,
    pub error: Option<String>,
}

impl ExecutionSession {
    pub fn new(mode: TransferMode, chain_id: u64) -> Self {
        ExecutionSession {
            mode,
            stage: Stage::Idle,
            status_message: String::new(),
            tx_hash: None,
            chain_id,
            error: None,
        }
    }

    /// Move to a later stage. Backward transitions are a programming
    /// error; the stage ordering makes the check a plain comparison.
    pub(crate) fn advance(&mut self, stage: Stage, message: impl Into<String>) {
        debug_assert!(stage > self.stage, "stage must move forward");
        self.stage = stage;
        self.status_message = message.into();
    }

    pub(crate) fn fail(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.error = Some(message.clone());
        self.advance(Stage::Failed, message);
    }
}

/// One status tuple pushed to the host UI. Fire-and-forget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusUpdate {
    pub stage: Stage,
    pub message: String,
    pub tx_hash: Option<String>,
    pub chain_id: Option<u64>,
}

/// One-way status push consumed by a toast/status UI component.
pub trait StatusSink: Send + Sync {
    fn publish(&self, update: StatusUpdate);
}

/// Default sink: emits each update as a structured log event.
pub struct TracingSink;

impl StatusSink for TracingSink {
    fn publish(&self, update: StatusUpdate) {
        info!(
            stage = ?update.stage,
            message = %update.message,
            tx_hash = update.tx_hash.as_deref().unwrap_or(""),
            "status"
        );
    }
}
