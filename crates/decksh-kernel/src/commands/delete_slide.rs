//! delete-slide — Remove a slide from the deck.

use async_trait::async_trait;

use decksh_types::{CommandResult, Value};

use crate::params::Params;
use crate::store::DeckAction;

use super::{CommandContext, CommandSchema, ParamSchema, SlideCommand};

/// Delete the slide at an index. Slide 0 is the protected overview entry
/// and is always rejected.
pub struct DeleteSlide;

#[async_trait]
impl SlideCommand for DeleteSlide {
    fn name(&self) -> &str {
        "delete-slide"
    }

    fn schema(&self) -> CommandSchema {
        CommandSchema::new("delete-slide", "Delete the slide at an index (never slide 0)")
            .param(ParamSchema::optional("number", "number", "Slide index (default 0)"))
    }

    async fn execute(&self, params: &Params, ctx: &CommandContext) -> CommandResult {
        let index = if params.contains("number") {
            params.get_i64("number").unwrap_or(-1)
        } else {
            0
        };

        // The protected-index check comes before bounds: deleting slide 0
        // is refused even on an empty deck.
        if index == 0 {
            return CommandResult::fail(51, "Cannot delete the overview slide (#0)");
        }

        let state = ctx.store.state().await;
        if index < 0 || index >= state.slides.len() as i64 {
            return CommandResult::fail(52, format!("Invalid slide number: {index}"));
        }

        // The store only deletes the active slide, so activate the target
        // first.
        let target_id = state.slides[index as usize].id.clone();
        let activated = ctx
            .store
            .dispatch(DeckAction::SetActive { id: target_id })
            .await;
        let deleted = match activated {
            Ok(()) => ctx.store.dispatch(DeckAction::DeleteActive).await,
            Err(e) => Err(e),
        };

        match deleted {
            Ok(()) => CommandResult::ok_with(
                format!("Deleted slide {index}"),
                Value::Json(serde_json::json!({ "deleted_index": index })),
            ),
            Err(e) => CommandResult::fail(53, format!("Failed to delete slide: {e}")),
        }
    }
}
