//! undo / redo — Walk the mutation history.
//!
//! Both commands move the history cursor and bulk-replace the store's
//! slide list with the snapshot at the new position. They are the only
//! non-mutating commands that touch history at all.

use async_trait::async_trait;

use decksh_types::{CommandResult, Value};

use crate::params::Params;
use crate::store::DeckAction;

use super::{CommandContext, CommandSchema, SlideCommand};

/// Step the history cursor back and restore that snapshot.
pub struct Undo;

#[async_trait]
impl SlideCommand for Undo {
    fn name(&self) -> &str {
        "undo"
    }

    fn schema(&self) -> CommandSchema {
        CommandSchema::new("undo", "Revert the most recent mutating command")
    }

    async fn execute(&self, _params: &Params, ctx: &CommandContext) -> CommandResult {
        let mut history = ctx.history.lock().await;
        let Some(snapshot) = history.back() else {
            return CommandResult::fail(71, "Nothing to undo");
        };

        match ctx.store.dispatch(DeckAction::ReplaceAll(snapshot)).await {
            Ok(()) => CommandResult::ok_with(
                "Undo executed",
                Value::Json(serde_json::json!({ "history_index": history.cursor() })),
            ),
            Err(e) => CommandResult::fail(72, format!("Failed to undo: {e}")),
        }
    }
}

/// Step the history cursor forward and restore that snapshot.
pub struct Redo;

#[async_trait]
impl SlideCommand for Redo {
    fn name(&self) -> &str {
        "redo"
    }

    fn schema(&self) -> CommandSchema {
        CommandSchema::new("redo", "Re-apply the most recently undone command")
    }

    async fn execute(&self, _params: &Params, ctx: &CommandContext) -> CommandResult {
        let mut history = ctx.history.lock().await;
        let Some(snapshot) = history.forward() else {
            return CommandResult::fail(81, "Nothing to redo");
        };

        match ctx.store.dispatch(DeckAction::ReplaceAll(snapshot)).await {
            Ok(()) => CommandResult::ok_with(
                "Redo executed",
                Value::Json(serde_json::json!({ "history_index": history.cursor() })),
            ),
            Err(e) => CommandResult::fail(82, format!("Failed to redo: {e}")),
        }
    }
}
