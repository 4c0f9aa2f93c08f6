//! The deck command set.
//!
//! Every ADDRESS SLIDES command is an object implementing `SlideCommand` —
//! a declared schema plus an execute method. Handlers never propagate
//! errors: every failure becomes a `CommandResult` with that command's
//! stable error code, so scripts can branch on `RC`.

mod add_text;
mod current_slide;
mod delete_slide;
mod duplicate_slide;
mod goto_slide;
mod list_slides;
mod new_slide;
mod set_slide_title;
mod slide_info;
mod undo_redo;

use std::collections::HashMap;
use std::hash::{BuildHasher, Hasher};
use std::sync::Arc;
use std::time::SystemTime;

use async_trait::async_trait;
use tokio::sync::Mutex;

use decksh_types::CommandResult;

use crate::eval::value_to_bool;
use crate::history::History;
use crate::params::Params;
use crate::store::DeckStore;

pub use add_text::AddText;
pub use current_slide::GetCurrentSlide;
pub use delete_slide::DeleteSlide;
pub use duplicate_slide::DuplicateSlide;
pub use goto_slide::GotoSlide;
pub use list_slides::ListSlides;
pub use new_slide::NewSlide;
pub use set_slide_title::SetSlideTitle;
pub use slide_info::{GetSlideInfo, GetSlides};
pub use undo_redo::{Redo, Undo};

/// Schema for one command parameter.
#[derive(Debug, Clone)]
pub struct ParamSchema {
    /// Parameter name as it appears in `key=value`.
    pub name: String,
    /// Type hint (string, number, bool).
    pub param_type: String,
    /// Whether the command fails without it.
    pub required: bool,
    /// Description for the command listing.
    pub description: String,
}

impl ParamSchema {
    /// Create a required parameter.
    pub fn required(
        name: impl Into<String>,
        param_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
            required: true,
            description: description.into(),
        }
    }

    /// Create an optional parameter.
    pub fn optional(
        name: impl Into<String>,
        param_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            param_type: param_type.into(),
            required: false,
            description: description.into(),
        }
    }
}

/// Schema describing a command's interface.
#[derive(Debug, Clone)]
pub struct CommandSchema {
    pub name: String,
    pub description: String,
    pub params: Vec<ParamSchema>,
}

impl CommandSchema {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params: Vec::new(),
        }
    }

    /// Add a parameter to the schema.
    pub fn param(mut self, param: ParamSchema) -> Self {
        self.params.push(param);
        self
    }
}

/// Shared state passed to command handlers.
pub struct CommandContext {
    /// The deck store every mutation goes through.
    pub store: Arc<dyn DeckStore>,
    /// The dispatcher's undo/redo history.
    pub history: Arc<Mutex<History>>,
}

/// A deck command.
#[async_trait]
pub trait SlideCommand: Send + Sync {
    /// The command's name (used for lookup).
    fn name(&self) -> &str;

    /// The command's declared parameter shape.
    fn schema(&self) -> CommandSchema;

    /// Execute with decoded parameters against the deck.
    async fn execute(&self, params: &Params, ctx: &CommandContext) -> CommandResult;
}

/// Install the fixed command table.
pub fn register_commands(table: &mut HashMap<String, Box<dyn SlideCommand>>) {
    fn add(table: &mut HashMap<String, Box<dyn SlideCommand>>, cmd: impl SlideCommand + 'static) {
        table.insert(cmd.name().to_string(), Box::new(cmd));
    }

    add(table, NewSlide);
    add(table, SetSlideTitle);
    add(table, AddText);
    add(table, ListSlides);
    add(table, GetCurrentSlide);
    add(table, GotoSlide);
    add(table, DeleteSlide);
    add(table, DuplicateSlide);
    add(table, Undo);
    add(table, Redo);
    add(table, GetSlides);
    add(table, GetSlideInfo);
}

/// Generate a fresh opaque slide id (`slide-` + 8 hex chars).
pub(crate) fn fresh_slide_id() -> String {
    let hasher_state = std::collections::hash_map::RandomState::new();
    let mut hasher = hasher_state.build_hasher();
    let now = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default();
    hasher.write_u128(now.as_nanos());
    format!("slide-{:08x}", hasher.finish() as u32)
}

/// Read a slide-index parameter that treats an absent or falsy value as
/// "use the default". A present value that does not read as a number is
/// out of bounds by construction.
pub(crate) fn index_param(params: &Params, key: &str, default: i64) -> i64 {
    match params.get(key) {
        Some(v) if value_to_bool(v) => params.get_i64(key).unwrap_or(-1),
        _ => default,
    }
}
