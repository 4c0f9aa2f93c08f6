//! decksh-kernel: the core of the decksh scripting engine.
//!
//! This crate provides:
//!
//! - **Statement**: one-pass classification of script lines into a sum type
//! - **Scope**: the per-run variable environment, including the reserved
//!   `RC`/`RESULT` pair written after every ADDRESS directive
//! - **Evaluator**: the five-step expression evaluator
//! - **Interpreter**: the line-by-line execution loop with cooperative
//!   timeout, block skipping, and counted loops
//! - **Dispatcher**: decoding of `command key=value ...` lines, the fixed
//!   command table, and the undo/redo history
//! - **Store**: the deck-store trait the dispatcher mutates through, plus
//!   an in-memory implementation

pub mod commands;
pub mod dispatch;
pub mod eval;
pub mod history;
pub mod interp;
pub mod params;
pub mod scope;
pub mod statement;
pub mod store;

pub use commands::{CommandContext, CommandSchema, ParamSchema, SlideCommand};
pub use dispatch::SlidesDispatcher;
pub use eval::{evaluate, value_to_bool, value_to_string};
pub use history::{History, HistoryEntry};
pub use interp::{CommandHandler, Interpreter, InterpreterConfig, RunOutcome};
pub use params::Params;
pub use scope::Scope;
pub use store::{DeckAction, DeckStore, MemoryDeck, SlideField, StoreError};
