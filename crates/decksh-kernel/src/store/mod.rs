//! The deck store seam.
//!
//! The dispatcher never touches a slide collection directly: it reads the
//! full state and issues actions through `DeckStore`. The production store
//! lives in the host application; `MemoryDeck` backs the CLI and tests.

mod memory;

use async_trait::async_trait;
use thiserror::Error;

use decksh_types::{DeckState, Slide};

pub use memory::MemoryDeck;

/// Errors a store can report for a mutation.
#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("no slide with id {id}")]
    SlideNotFound { id: String },
    #[error("no active slide to delete")]
    NoActiveSlide,
}

/// A field edit applied to one slide.
#[derive(Debug, Clone, PartialEq)]
pub enum SlideField {
    Title(String),
    Content(String),
}

/// Mutations the dispatcher can issue.
#[derive(Debug, Clone, PartialEq)]
pub enum DeckAction {
    /// Append a slide to the deck.
    AddSlide(Slide),
    /// Overwrite one field of the slide with the given id.
    EditSlide { id: String, field: SlideField },
    /// Mark the slide with the given id active, clearing the flag on
    /// every other slide.
    SetActive { id: String },
    /// Remove the slide currently flagged active.
    DeleteActive,
    /// Replace the entire slide list (undo/redo restore).
    ReplaceAll(Vec<Slide>),
}

/// Read and mutate access to the slide deck.
#[async_trait]
pub trait DeckStore: Send + Sync {
    /// Current full deck state.
    async fn state(&self) -> DeckState;

    /// Apply one mutation.
    async fn dispatch(&self, action: DeckAction) -> Result<(), StoreError>;
}
