//! new-slide — Append a slide to the deck.

use async_trait::async_trait;

use decksh_types::{CommandResult, Slide, Transform};

use crate::params::Params;
use crate::store::DeckAction;

use super::{fresh_slide_id, CommandContext, CommandSchema, ParamSchema, SlideCommand};

/// Create a new slide with a generated id, appended after the last slide.
pub struct NewSlide;

#[async_trait]
impl SlideCommand for NewSlide {
    fn name(&self) -> &str {
        "new-slide"
    }

    fn schema(&self) -> CommandSchema {
        CommandSchema::new("new-slide", "Create a new slide at the end of the deck")
            .param(ParamSchema::optional("slide", "string", "Title (default \"Slide <n>\")"))
            .param(ParamSchema::optional("content", "string", "Initial body text"))
            .param(ParamSchema::optional("x", "number", "X position (default <n> * 900)"))
            .param(ParamSchema::optional("y", "number", "Y position"))
            .param(ParamSchema::optional("z", "number", "Z position"))
            .param(ParamSchema::optional("scale", "number", "Scale factor (default 1)"))
            .param(ParamSchema::optional("rotate", "number", "Rotation in degrees"))
            .param(ParamSchema::optional("rotate_x", "number", "Rotation around X"))
            .param(ParamSchema::optional("rotate_y", "number", "Rotation around Y"))
            .param(ParamSchema::optional("rotate_z", "number", "Rotation around Z"))
    }

    async fn execute(&self, params: &Params, ctx: &CommandContext) -> CommandResult {
        let state = ctx.store.state().await;
        let n = state.slides.len() as i64;

        let id = fresh_slide_id();
        let title = params
            .get_str("slide")
            .unwrap_or_else(|| format!("Slide {n}"));
        let content = params.get_str("content").unwrap_or_default();

        // 0 means unset for x and scale; the decoder cannot tell an
        // explicit zero apart from an absent parameter.
        let transform = Transform {
            x: params.get_i64("x").filter(|v| *v != 0).unwrap_or(n * 900),
            y: params.get_i64("y").unwrap_or(0),
            z: params.get_i64("z").unwrap_or(0),
            scale: params.get_i64("scale").filter(|v| *v != 0).unwrap_or(1),
            rotate: params.get_i64("rotate").unwrap_or(0),
            rotate_x: params.get_i64("rotate_x").unwrap_or(0),
            rotate_y: params.get_i64("rotate_y").unwrap_or(0),
            rotate_z: params.get_i64("rotate_z").unwrap_or(0),
        };

        let slide = Slide {
            id: id.clone(),
            title: title.clone(),
            content,
            transform,
            active: false,
        };

        match ctx.store.dispatch(DeckAction::AddSlide(slide)).await {
            Ok(()) => CommandResult::ok_with(
                format!("Created new slide: {id}"),
                decksh_types::Value::Json(serde_json::json!({ "id": id, "title": title })),
            ),
            Err(e) => CommandResult::fail(11, format!("Failed to create slide: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testutil::{ctx_with, params, slide};
    use super::*;

    #[tokio::test]
    async fn appends_with_generated_id_and_defaults() {
        let ctx = ctx_with(vec![slide("overview", "Overview")]);
        let result = NewSlide.execute(&Params::new(), &ctx).await;
        assert!(result.success);
        assert!(result.output.starts_with("Created new slide: slide-"));

        let state = ctx.store.state().await;
        assert_eq!(state.slides.len(), 2);
        let added = &state.slides[1];
        assert_eq!(added.title, "Slide 1");
        assert_eq!(added.transform.x, 900);
        assert_eq!(added.transform.scale, 1);
        assert!(!added.active);
    }

    #[tokio::test]
    async fn honors_explicit_parameters() {
        let ctx = ctx_with(vec![]);
        let result = NewSlide
            .execute(
                &params(&["slide=Intro", "content=hello", "x=100", "y=-50", "rotate=45"]),
                &ctx,
            )
            .await;
        assert!(result.success);

        let state = ctx.store.state().await;
        let added = &state.slides[0];
        assert_eq!(added.title, "Intro");
        assert_eq!(added.content, "hello");
        assert_eq!(added.transform.x, 100);
        assert_eq!(added.transform.y, -50);
        assert_eq!(added.transform.rotate, 45);
    }

    #[tokio::test]
    async fn zero_x_falls_back_to_computed_position() {
        let ctx = ctx_with(vec![slide("a", "A"), slide("b", "B")]);
        NewSlide.execute(&params(&["x=0"]), &ctx).await;

        let state = ctx.store.state().await;
        assert_eq!(state.slides[2].transform.x, 1800);
    }

    #[tokio::test]
    async fn payload_carries_id_and_title() {
        let ctx = ctx_with(vec![]);
        let result = NewSlide.execute(&params(&["slide=First"]), &ctx).await;
        let payload = result.result.expect("payload");
        let json = decksh_types::value_to_json(&payload);
        assert_eq!(json["title"], "First");
        assert!(json["id"].as_str().unwrap_or("").starts_with("slide-"));
    }
}
