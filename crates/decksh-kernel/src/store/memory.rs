//! In-memory deck store for the CLI and tests.

use async_trait::async_trait;
use tokio::sync::RwLock;

use decksh_types::{DeckState, Slide};

use super::{DeckAction, DeckStore, SlideField, StoreError};

/// A deck held in process memory behind an async lock.
#[derive(Debug, Default)]
pub struct MemoryDeck {
    slides: RwLock<Vec<Slide>>,
}

impl MemoryDeck {
    /// Create an empty deck.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a deck pre-populated with slides.
    pub fn with_slides(slides: Vec<Slide>) -> Self {
        Self {
            slides: RwLock::new(slides),
        }
    }
}

#[async_trait]
impl DeckStore for MemoryDeck {
    async fn state(&self) -> DeckState {
        DeckState {
            slides: self.slides.read().await.clone(),
        }
    }

    async fn dispatch(&self, action: DeckAction) -> Result<(), StoreError> {
        let mut slides = self.slides.write().await;
        match action {
            DeckAction::AddSlide(slide) => {
                slides.push(slide);
                Ok(())
            }
            DeckAction::EditSlide { id, field } => {
                let slide = slides
                    .iter_mut()
                    .find(|s| s.id == id)
                    .ok_or(StoreError::SlideNotFound { id: id.clone() })?;
                match field {
                    SlideField::Title(title) => slide.title = title,
                    SlideField::Content(content) => slide.content = content,
                }
                Ok(())
            }
            DeckAction::SetActive { id } => {
                if !slides.iter().any(|s| s.id == id) {
                    return Err(StoreError::SlideNotFound { id });
                }
                for slide in slides.iter_mut() {
                    slide.active = slide.id == id;
                }
                Ok(())
            }
            DeckAction::DeleteActive => {
                let index = slides
                    .iter()
                    .position(|s| s.active)
                    .ok_or(StoreError::NoActiveSlide)?;
                slides.remove(index);
                Ok(())
            }
            DeckAction::ReplaceAll(new_slides) => {
                *slides = new_slides;
                Ok(())
            }
        }
    }
}
