//! PPTX (Office Open XML) backend for the slide deck.
//!
//! Lays slides out as positioned shapes, writes them into a `.pptx`
//! package, and reads packages back for inspection.

pub mod export;
pub mod layout;
mod parts;
pub mod reader;
pub mod writer;

pub use export::{DeckExporter, DocumentSink, FileSink, MemorySink, SavedDocument};
pub use layout::{layout_deck, layout_slide, Element, Frame, Page, Role};
pub use reader::{PptxReader, ReadDeck, ReadSlide};
pub use writer::PptxWriter;
