//! Navigation state for on-screen viewing.
//!
//! The current slide index is the only mutable state in the system. Every
//! transition goes through [`Navigator::go_to`], which clamps, so the index
//! can never leave `[0, len - 1]`.

use crate::Deck;
use serde::{Deserialize, Serialize};

/// Tracks which slide a viewer is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    current: usize,
    len: usize,
}

impl Navigator {
    /// Start at the first slide of a deck.
    pub fn new(deck: &Deck) -> Self {
        Self::with_len(deck.len())
    }

    /// Start at the first of `len` slides. A zero length is treated as one.
    pub fn with_len(len: usize) -> Self {
        Self {
            current: 0,
            len: len.max(1),
        }
    }

    /// 0-based index of the current slide.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Number of slides being navigated.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    fn last_index(&self) -> usize {
        self.len - 1
    }

    /// Jump to `index`, clamped into range. Returns the new index.
    pub fn go_to(&mut self, index: i64) -> usize {
        let last = self.last_index() as i64;
        self.current = index.clamp(0, last) as usize;
        self.current
    }

    /// Advance one slide; a no-op on the last slide.
    pub fn next(&mut self) -> usize {
        self.go_to(self.current as i64 + 1)
    }

    /// Go back one slide; a no-op on the first slide.
    pub fn previous(&mut self) -> usize {
        self.go_to(self.current as i64 - 1)
    }

    pub fn first(&mut self) -> usize {
        self.go_to(0)
    }

    pub fn last(&mut self) -> usize {
        self.go_to(self.last_index() as i64)
    }

    /// Whether the "previous" control is enabled.
    pub fn can_previous(&self) -> bool {
        self.current > 0
    }

    /// Whether the "next" control is enabled.
    pub fn can_next(&self) -> bool {
        self.current < self.last_index()
    }

    /// The "N / TOTAL" indicator, 1-based.
    pub fn position_label(&self) -> String {
        format!("{} / {}", self.current + 1, self.len)
    }

    /// One jump target per slide, with the current one marked active.
    pub fn timeline(&self, deck: &Deck) -> Vec<TimelineEntry> {
        deck.slides()
            .iter()
            .enumerate()
            .map(|(index, slide)| TimelineEntry {
                index,
                label: format!("{}. {}", index + 1, slide.title),
                active: index == self.current,
            })
            .collect()
    }
}

/// A clickable jump target in the viewer's slide list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// 0-based slide index to jump to.
    pub index: usize,
    /// "N. Title" label.
    pub label: String,
    /// Whether this is the slide currently shown.
    pub active: bool,
}
