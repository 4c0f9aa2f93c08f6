//! list-slides — Summarize the deck.

use async_trait::async_trait;

use decksh_types::{CommandResult, Value};

use crate::params::Params;

use super::{CommandContext, CommandSchema, SlideCommand};

/// Return a summary record for every slide.
pub struct ListSlides;

#[async_trait]
impl SlideCommand for ListSlides {
    fn name(&self) -> &str {
        "list-slides"
    }

    fn schema(&self) -> CommandSchema {
        CommandSchema::new("list-slides", "List index, id, title, and position of every slide")
    }

    async fn execute(&self, _params: &Params, ctx: &CommandContext) -> CommandResult {
        let state = ctx.store.state().await;
        let summaries: Vec<serde_json::Value> = state
            .slides
            .iter()
            .enumerate()
            .map(|(index, slide)| {
                serde_json::json!({
                    "index": index,
                    "id": slide.id,
                    "title": slide.title,
                    "content_length": slide.content.len(),
                    "position": { "x": slide.transform.x, "y": slide.transform.y },
                })
            })
            .collect();

        CommandResult::ok_with(
            format!("Found {} slides", state.slides.len()),
            Value::Json(serde_json::Value::Array(summaries)),
        )
    }
}
