//! goto-slide — Change the active slide.

use async_trait::async_trait;

use decksh_types::{CommandResult, Value};

use crate::params::Params;
use crate::store::DeckAction;

use super::{CommandContext, CommandSchema, ParamSchema, SlideCommand};

/// Mark the slide at an index as active.
pub struct GotoSlide;

#[async_trait]
impl SlideCommand for GotoSlide {
    fn name(&self) -> &str {
        "goto-slide"
    }

    fn schema(&self) -> CommandSchema {
        CommandSchema::new("goto-slide", "Navigate to the slide at an index")
            .param(ParamSchema::required("number", "number", "Slide index"))
    }

    async fn execute(&self, params: &Params, ctx: &CommandContext) -> CommandResult {
        if !params.contains("number") {
            return CommandResult::fail(41, "number parameter required");
        }

        let state = ctx.store.state().await;
        let index = params.get_i64("number").unwrap_or(-1);
        if index < 0 || index >= state.slides.len() as i64 {
            return CommandResult::fail(42, format!("Invalid slide number: {index}"));
        }

        let target = &state.slides[index as usize];
        match ctx
            .store
            .dispatch(DeckAction::SetActive {
                id: target.id.clone(),
            })
            .await
        {
            Ok(()) => CommandResult::ok_with(
                format!("Went to slide {index}: {}", target.title),
                Value::Json(serde_json::json!({ "index": index, "title": target.title })),
            ),
            Err(e) => CommandResult::fail(43, format!("Failed to goto slide: {e}")),
        }
    }
}
