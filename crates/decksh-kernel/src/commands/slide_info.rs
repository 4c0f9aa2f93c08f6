//! get-slides / get-slide-info — Raw deck read-back.

use async_trait::async_trait;

use decksh_types::{CommandResult, Value};

use crate::params::Params;

use super::{CommandContext, CommandSchema, ParamSchema, SlideCommand};

/// Return the raw slide list.
pub struct GetSlides;

#[async_trait]
impl SlideCommand for GetSlides {
    fn name(&self) -> &str {
        "get-slides"
    }

    fn schema(&self) -> CommandSchema {
        CommandSchema::new("get-slides", "Return the raw slide list")
    }

    async fn execute(&self, _params: &Params, ctx: &CommandContext) -> CommandResult {
        let state = ctx.store.state().await;
        match serde_json::to_value(&state.slides) {
            Ok(json) => CommandResult::ok_with(
                format!("Retrieved {} slides", state.slides.len()),
                Value::Json(json),
            ),
            Err(e) => CommandResult::fail(91, format!("Failed to get slides: {e}")),
        }
    }
}

/// Return the full detail record for one slide.
pub struct GetSlideInfo;

#[async_trait]
impl SlideCommand for GetSlideInfo {
    fn name(&self) -> &str {
        "get-slide-info"
    }

    fn schema(&self) -> CommandSchema {
        CommandSchema::new("get-slide-info", "Return full details for one slide")
            .param(ParamSchema::optional("number", "number", "Slide index (default 0)"))
    }

    async fn execute(&self, params: &Params, ctx: &CommandContext) -> CommandResult {
        let state = ctx.store.state().await;
        let index = if params.contains("number") {
            params.get_i64("number").unwrap_or(-1)
        } else {
            0
        };
        if index < 0 || index >= state.slides.len() as i64 {
            return CommandResult::fail(92, format!("Invalid slide number: {index}"));
        }

        let slide = &state.slides[index as usize];
        match serde_json::to_value(&slide.transform) {
            Ok(transform) => CommandResult::ok_with(
                format!("Slide {index} info"),
                Value::Json(serde_json::json!({
                    "index": index,
                    "id": slide.id,
                    "title": slide.title,
                    "content": slide.content,
                    "transform": transform,
                    "active": slide.active,
                })),
            ),
            Err(e) => CommandResult::fail(93, format!("Failed to get slide info: {e}")),
        }
    }
}
