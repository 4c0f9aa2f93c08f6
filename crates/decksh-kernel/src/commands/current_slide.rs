//! get-current-slide — Read the slide the deck is showing.

use async_trait::async_trait;

use decksh_types::{CommandResult, Value};

use crate::params::Params;

use super::{CommandContext, CommandSchema, SlideCommand};

/// Return the slide flagged active, falling back to the first slide.
pub struct GetCurrentSlide;

#[async_trait]
impl SlideCommand for GetCurrentSlide {
    fn name(&self) -> &str {
        "get-current-slide"
    }

    fn schema(&self) -> CommandSchema {
        CommandSchema::new("get-current-slide", "Return the active slide (or the first)")
    }

    async fn execute(&self, _params: &Params, ctx: &CommandContext) -> CommandResult {
        let state = ctx.store.state().await;
        let position = state
            .slides
            .iter()
            .position(|s| s.active)
            .or(if state.slides.is_empty() { None } else { Some(0) });

        let Some(index) = position else {
            return CommandResult::fail(32, "Failed to get current slide: deck is empty");
        };

        let current = &state.slides[index];
        CommandResult::ok_with(
            format!("Current slide: {}", current.title),
            Value::Json(serde_json::json!({
                "index": index,
                "id": current.id,
                "title": current.title,
                "content": current.content,
            })),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::testutil::{ctx_with, slide};
    use super::*;

    #[tokio::test]
    async fn returns_the_active_slide() {
        let mut second = slide("b", "Active One");
        second.active = true;
        let ctx = ctx_with(vec![slide("a", "A"), second]);

        let result = GetCurrentSlide.execute(&Params::new(), &ctx).await;
        assert!(result.success);
        assert_eq!(result.output, "Current slide: Active One");

        let Some(Value::Json(json)) = result.result else {
            panic!("expected payload");
        };
        assert_eq!(json["index"], 1);
        assert_eq!(json["id"], "b");
    }

    #[tokio::test]
    async fn falls_back_to_the_first_slide() {
        let ctx = ctx_with(vec![slide("a", "First"), slide("b", "B")]);
        let result = GetCurrentSlide.execute(&Params::new(), &ctx).await;
        assert!(result.success);
        assert_eq!(result.output, "Current slide: First");
    }

    #[tokio::test]
    async fn empty_deck_fails() {
        let ctx = ctx_with(vec![]);
        let result = GetCurrentSlide.execute(&Params::new(), &ctx).await;
        assert!(!result.success);
        assert_eq!(result.error_code, 32);
    }
}
