//! Core domain types, the compiled-in slide catalog, navigation state and
//! export naming for the department overview deck.

pub mod catalog;
pub mod error;
pub mod naming;
pub mod navigation;
pub mod types;

pub use error::{Error, Result};
pub use navigation::{Navigator, TimelineEntry};
pub use types::{Deck, DeckInfo, Quote, Slide, SpotlightItem, Stat};
