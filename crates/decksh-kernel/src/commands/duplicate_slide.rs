//! duplicate-slide — Clone a slide.

use async_trait::async_trait;

use decksh_types::{CommandResult, Slide, Value};

use crate::params::Params;
use crate::store::DeckAction;

use super::{fresh_slide_id, CommandContext, CommandSchema, ParamSchema, SlideCommand};

/// Clone the slide at an index and append the copy to the deck.
pub struct DuplicateSlide;

#[async_trait]
impl SlideCommand for DuplicateSlide {
    fn name(&self) -> &str {
        "duplicate-slide"
    }

    fn schema(&self) -> CommandSchema {
        CommandSchema::new("duplicate-slide", "Clone the slide at an index")
            .param(ParamSchema::required("number", "number", "Slide index to clone"))
    }

    async fn execute(&self, params: &Params, ctx: &CommandContext) -> CommandResult {
        if !params.contains("number") {
            return CommandResult::fail(61, "number parameter required");
        }

        let state = ctx.store.state().await;
        let index = params.get_i64("number").unwrap_or(-1);
        if index < 0 || index >= state.slides.len() as i64 {
            return CommandResult::fail(62, format!("Invalid slide number: {index}"));
        }

        let source = &state.slides[index as usize];
        let copy = Slide {
            id: fresh_slide_id(),
            title: format!("{} (copy)", source.title),
            content: source.content.clone(),
            transform: source.transform,
            active: false,
        };
        let new_id = copy.id.clone();

        match ctx.store.dispatch(DeckAction::AddSlide(copy)).await {
            Ok(()) => CommandResult::ok_with(
                format!("Duplicated slide {index}"),
                Value::Json(serde_json::json!({ "source_index": index, "new_id": new_id })),
            ),
            Err(e) => CommandResult::fail(63, format!("Failed to duplicate slide: {e}")),
        }
    }
}
