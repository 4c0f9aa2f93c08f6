//! decksh-types: shared types for the decksh scripting engine.
//!
//! This crate provides:
//!
//! - **Value**: the tagged union flowing through script variables, decoded
//!   command parameters, and structured command payloads
//! - **CommandResult**: the structured result every deck command returns
//! - **Slide**: the slide record and its transform attributes

mod result;
mod slide;
mod value;

pub use result::CommandResult;
pub use slide::{DeckState, Slide, Transform};
pub use value::{json_to_value, value_to_json, Value};
