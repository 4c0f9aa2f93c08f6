//! Command dispatch — the single execution path for ADDRESS SLIDES
//! commands.
//!
//! `SlidesDispatcher` owns the fixed command table and the undo/redo
//! history, and holds the deck store handle every handler mutates
//! through. Its `run` method is the callback handed to the interpreter.
//!
//! ```text
//! ADDRESS SLIDES "cmd k=v"
//!        │
//!   Interpreter ──▶ SlidesDispatcher::run(line)
//!                        │ split name + decode params
//!                        │ table lookup ── unknown ──▶ fail(2)
//!                        ▼
//!                   SlideCommand::execute(params, ctx)
//!                        │
//!                 success + mutating? ──▶ history.record(snapshot)
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use decksh_types::CommandResult;

use crate::commands::{register_commands, CommandContext, CommandSchema, SlideCommand};
use crate::history::{History, HistoryEntry};
use crate::interp::CommandHandler;
use crate::params::{split_command_line, Params};
use crate::store::DeckStore;

/// Commands whose successful execution is recorded in history.
const MUTATING_COMMANDS: &[&str] = &[
    "new-slide",
    "set-slide-title",
    "add-text",
    "delete-slide",
    "duplicate-slide",
];

/// Decodes command lines and routes them to the command table.
pub struct SlidesDispatcher {
    commands: HashMap<String, Box<dyn SlideCommand>>,
    ctx: CommandContext,
}

impl SlidesDispatcher {
    /// Create a dispatcher over the given deck store with an empty
    /// history.
    pub fn new(store: Arc<dyn DeckStore>) -> Self {
        let mut commands = HashMap::new();
        register_commands(&mut commands);
        Self {
            commands,
            ctx: CommandContext {
                store,
                history: Arc::new(Mutex::new(History::new())),
            },
        }
    }

    /// Decode and execute one command line.
    #[tracing::instrument(level = "debug", skip(self, command_line), fields(line = %command_line))]
    pub async fn run(&self, command_line: &str) -> CommandResult {
        let (name, params) = split_command_line(command_line);

        let Some(command) = self.commands.get(name) else {
            tracing::debug!(command = %name, "unknown command");
            return CommandResult::fail(2, format!("Unknown command: {name}"));
        };

        // The first recorded mutation also seeds the baseline entry, so
        // undo can reach the pre-mutation deck. Capture it before the
        // handler runs.
        let mutating = Self::is_mutating(name);
        let baseline = if mutating && self.ctx.history.lock().await.is_empty() {
            Some(self.ctx.store.state().await.slides)
        } else {
            None
        };

        let result = command.execute(&params, &self.ctx).await;

        if result.success && mutating {
            self.record(name, params, baseline).await;
        }

        result
    }

    /// True for the commands whose success is recorded in history.
    pub fn is_mutating(name: &str) -> bool {
        MUTATING_COMMANDS.contains(&name)
    }

    /// Declared schemas of every registered command, sorted by name.
    pub fn schemas(&self) -> Vec<CommandSchema> {
        let mut schemas: Vec<_> = self.commands.values().map(|c| c.schema()).collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    /// Number of history entries (including the baseline).
    pub async fn history_len(&self) -> usize {
        self.ctx.history.lock().await.len()
    }

    /// Current history cursor.
    pub async fn history_cursor(&self) -> isize {
        self.ctx.history.lock().await.cursor()
    }

    async fn record(&self, name: &str, params: Params, baseline: Option<Vec<decksh_types::Slide>>) {
        let snapshot = self.ctx.store.state().await.slides;
        let mut history = self.ctx.history.lock().await;
        if let Some(pre) = baseline {
            if history.is_empty() {
                history.record(HistoryEntry {
                    command: "baseline".to_string(),
                    params: Params::new(),
                    snapshot: pre,
                });
            }
        }
        history.record(HistoryEntry {
            command: name.to_string(),
            params,
            snapshot,
        });
        tracing::trace!(command = %name, len = history.len(), cursor = history.cursor(), "recorded mutation");
    }
}

#[async_trait]
impl CommandHandler for SlidesDispatcher {
    async fn run(&self, command: &str) -> CommandResult {
        SlidesDispatcher::run(self, command).await
    }
}
