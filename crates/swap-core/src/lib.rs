//! Swap/transfer orchestration engine.
//!
//! This crate is the core of the wallet front end: it decides whether a
//! user action is a routed token swap or a direct wallet-to-wallet
//! transfer, tracks the execution lifecycle across EVM chains and Solana,
//! validates recipient/chain compatibility, and manages route quote
//! staleness.
//!
//! The engine owns no keys and renders no UI. Chain interaction happens
//! through wallet capability traits ("sign and broadcast"), quotes come
//! from an external routing service behind the [`quote::QuoteService`]
//! trait, and progress is pushed one-way through a [`session::StatusSink`].

pub mod adapter;
pub mod amount;
pub mod engine;
pub mod error;
pub mod orchestrator;
pub mod quote;
pub mod route;
pub mod session;
pub mod types;
pub mod wallet;

// Re-export key public types for ergonomic imports.
pub use adapter::{AdapterRegistry, ChainAdapter, EvmAdapter, SolAdapter};
pub use engine::SwapEngine;
pub use error::EngineError;
pub use orchestrator::{classify_mode, OrchestrationContext, Orchestrator};
pub use quote::{QuoteManager, QuoteService, QuoteSide};
pub use route::Route;
pub use session::{ExecutionSession, Stage, StatusSink, StatusUpdate, TransferMode};
pub use types::{RecipientAddress, RecipientSource, Token};
