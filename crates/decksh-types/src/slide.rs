//! Slide records — the deck data model the dispatcher operates on.

use serde::{Deserialize, Serialize};

/// One slide in the deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slide {
    /// Opaque unique identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Body text, newline-joined.
    pub content: String,
    /// Placement in presentation space.
    pub transform: Transform,
    /// True for the slide the presentation is currently showing.
    #[serde(default)]
    pub active: bool,
}

impl Slide {
    /// Create a slide with the given id and title, default transform,
    /// empty content, not active.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: String::new(),
            transform: Transform::default(),
            active: false,
        }
    }
}

/// Position and rotation attributes for a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transform {
    pub x: i64,
    pub y: i64,
    pub z: i64,
    pub scale: i64,
    pub rotate: i64,
    pub rotate_x: i64,
    pub rotate_y: i64,
    pub rotate_z: i64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            z: 0,
            scale: 1,
            rotate: 0,
            rotate_x: 0,
            rotate_y: 0,
            rotate_z: 0,
        }
    }
}

/// A full snapshot of deck state as read from the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeckState {
    pub slides: Vec<Slide>,
}
