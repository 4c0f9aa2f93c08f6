//! add-text — Append body text to a slide.

use async_trait::async_trait;

use decksh_types::{CommandResult, Value};

use crate::eval::value_to_bool;
use crate::params::Params;
use crate::store::{DeckAction, SlideField};

use super::{index_param, CommandContext, CommandSchema, ParamSchema, SlideCommand};

/// Append a line of text to a slide's content (default: the last slide).
pub struct AddText;

#[async_trait]
impl SlideCommand for AddText {
    fn name(&self) -> &str {
        "add-text"
    }

    fn schema(&self) -> CommandSchema {
        CommandSchema::new("add-text", "Append text to a slide's content")
            .param(ParamSchema::required("text", "string", "Text to append"))
            .param(ParamSchema::optional(
                "slideIndex",
                "number",
                "Target slide (default: the last slide)",
            ))
    }

    async fn execute(&self, params: &Params, ctx: &CommandContext) -> CommandResult {
        let text = match params.get("text") {
            Some(v) if value_to_bool(v) => params.get_str("text").unwrap_or_default(),
            _ => return CommandResult::fail(21, "text parameter required"),
        };

        let state = ctx.store.state().await;
        // An explicit slideIndex=0 is falsy to the decoder and lands on
        // the default (last) slide.
        let index = index_param(params, "slideIndex", state.slides.len() as i64 - 1);
        if index < 0 || index >= state.slides.len() as i64 {
            return CommandResult::fail(22, format!("Invalid slide index: {index}"));
        }

        let target = &state.slides[index as usize];
        let content = if target.content.is_empty() {
            text.clone()
        } else {
            format!("{}\n{}", target.content, text)
        };

        match ctx
            .store
            .dispatch(DeckAction::EditSlide {
                id: target.id.clone(),
                field: SlideField::Content(content),
            })
            .await
        {
            Ok(()) => CommandResult::ok_with(
                format!("Added text to slide {index}"),
                Value::Json(serde_json::json!({ "slide_index": index, "text": text })),
            ),
            Err(e) => CommandResult::fail(23, format!("Failed to add text: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testutil::{ctx_with, params, slide};
    use super::*;

    #[tokio::test]
    async fn appends_to_last_slide_by_default() {
        let ctx = ctx_with(vec![slide("a", "A"), slide("b", "B")]);
        let result = AddText.execute(&params(&["text=hello"]), &ctx).await;
        assert!(result.success);
        assert_eq!(result.output, "Added text to slide 1");
        assert_eq!(ctx.store.state().await.slides[1].content, "hello");
    }

    #[tokio::test]
    async fn joins_existing_content_with_newline() {
        let mut first = slide("a", "A");
        first.content = "line one".into();
        let ctx = ctx_with(vec![first]);
        AddText
            .execute(&params(&["text=line-two", "slideIndex=0"]), &ctx)
            .await;
        // slideIndex=0 is falsy, so the default (last) slide is used —
        // which here is also slide 0.
        assert_eq!(ctx.store.state().await.slides[0].content, "line one\nline-two");
    }

    #[tokio::test]
    async fn explicit_zero_index_falls_back_to_last() {
        let ctx = ctx_with(vec![slide("a", "A"), slide("b", "B")]);
        AddText
            .execute(&params(&["text=tail", "slideIndex=0"]), &ctx)
            .await;
        let state = ctx.store.state().await;
        assert_eq!(state.slides[0].content, "");
        assert_eq!(state.slides[1].content, "tail");
    }

    #[tokio::test]
    async fn missing_text_fails() {
        let ctx = ctx_with(vec![slide("a", "A")]);
        let result = AddText.execute(&Params::new(), &ctx).await;
        assert_eq!(result.error_code, 21);
    }

    #[tokio::test]
    async fn empty_deck_fails_bounds() {
        let ctx = ctx_with(vec![]);
        let result = AddText.execute(&params(&["text=x"]), &ctx).await;
        assert!(!result.success);
        assert_eq!(result.error_code, 22);
        assert_eq!(result.output, "Invalid slide index: -1");
    }

    #[tokio::test]
    async fn out_of_bounds_index_fails() {
        let ctx = ctx_with(vec![slide("a", "A")]);
        let result = AddText
            .execute(&params(&["text=x", "slideIndex=3"]), &ctx)
            .await;
        assert_eq!(result.error_code, 22);
    }
}
