//! set-slide-title — Rename a slide.

use async_trait::async_trait;

use decksh_types::{CommandResult, Value};

use crate::eval::value_to_bool;
use crate::params::Params;
use crate::store::{DeckAction, SlideField};

use super::{index_param, CommandContext, CommandSchema, ParamSchema, SlideCommand};

/// Set the title of the slide at an index (default 0).
pub struct SetSlideTitle;

#[async_trait]
impl SlideCommand for SetSlideTitle {
    fn name(&self) -> &str {
        "set-slide-title"
    }

    fn schema(&self) -> CommandSchema {
        CommandSchema::new("set-slide-title", "Rename the slide at an index")
            .param(ParamSchema::required("text", "string", "New title"))
            .param(ParamSchema::optional("slideIndex", "number", "Target slide (default 0)"))
    }

    async fn execute(&self, params: &Params, ctx: &CommandContext) -> CommandResult {
        let text = match params.get("text") {
            Some(v) if value_to_bool(v) => params.get_str("text").unwrap_or_default(),
            _ => return CommandResult::fail(12, "text parameter required"),
        };

        let state = ctx.store.state().await;
        let index = index_param(params, "slideIndex", 0);
        if index < 0 || index >= state.slides.len() as i64 {
            return CommandResult::fail(13, format!("Invalid slide index: {index}"));
        }

        let target = &state.slides[index as usize];
        match ctx
            .store
            .dispatch(DeckAction::EditSlide {
                id: target.id.clone(),
                field: SlideField::Title(text.clone()),
            })
            .await
        {
            Ok(()) => CommandResult::ok_with(
                format!("Set slide title to: {text}"),
                Value::Json(serde_json::json!({ "index": index, "title": text })),
            ),
            Err(e) => CommandResult::fail(14, format!("Failed to set slide title: {e}")),
        }
    }
}
