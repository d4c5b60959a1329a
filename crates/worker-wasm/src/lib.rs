//! WASM-compatible viewer handle for the department overview deck.
//!
//! A browser page drives navigation through [`DeckViewer`] and renders the
//! slide objects it returns. Exports are handed to a JavaScript callback,
//! which is the page's save mechanism (usually a download link).

use deck_core::{catalog, Deck, Error, Navigator, TimelineEntry};
use deck_pptx::{DeckExporter, DocumentSink};
use serde::Serialize;
use std::io;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Navigation state plus export for one deck.
#[wasm_bindgen]
pub struct DeckViewer {
    deck: Deck,
    nav: Navigator,
    exporter: DeckExporter,
}

#[wasm_bindgen]
impl DeckViewer {
    /// Load the department overview deck, starting at the first slide.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<DeckViewer, JsValue> {
        Self::load().map_err(|e| JsValue::from_str(&e))
    }

    /// Deck title, as written into the exported document.
    #[wasm_bindgen(getter)]
    pub fn title(&self) -> String {
        self.deck.info().title.clone()
    }

    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.nav.len()
    }

    #[wasm_bindgen(js_name = currentIndex)]
    pub fn current_index(&self) -> usize {
        self.nav.current()
    }

    /// Jump to `index`, clamped into range. Returns the new index.
    #[wasm_bindgen(js_name = goTo)]
    pub fn go_to(&mut self, index: i32) -> usize {
        self.nav.go_to(i64::from(index))
    }

    pub fn next(&mut self) -> usize {
        self.nav.next()
    }

    pub fn previous(&mut self) -> usize {
        self.nav.previous()
    }

    #[wasm_bindgen(js_name = canNext)]
    pub fn can_next(&self) -> bool {
        self.nav.can_next()
    }

    #[wasm_bindgen(js_name = canPrevious)]
    pub fn can_previous(&self) -> bool {
        self.nav.can_previous()
    }

    /// The "N / TOTAL" indicator.
    #[wasm_bindgen(js_name = positionLabel)]
    pub fn position_label(&self) -> String {
        self.nav.position_label()
    }

    /// The current slide as a plain object (camelCase fields, absent
    /// sections omitted).
    #[wasm_bindgen(js_name = currentSlide)]
    pub fn current_slide(&self) -> Result<JsValue, JsValue> {
        to_js(&self.current_view())
    }

    /// Jump targets as `{ index, label, active }` objects.
    pub fn timeline(&self) -> Result<JsValue, JsValue> {
        to_js(&self.timeline_entries())
    }

    /// Render the whole deck to `.pptx` bytes.
    #[wasm_bindgen(js_name = exportPptx)]
    pub fn export_pptx(&self) -> Result<Vec<u8>, JsValue> {
        self.export_pptx_impl().map_err(|e| JsValue::from_str(&e))
    }

    /// File name the export should be saved under.
    #[wasm_bindgen(js_name = exportFileName)]
    pub fn export_file_name(&self) -> String {
        self.deck.info().export_file_name()
    }

    /// Render the deck and pass it to `save(bytes, fileName)`.
    ///
    /// Navigation state is untouched. An exception thrown by `save` is
    /// rethrown as an error string.
    #[wasm_bindgen(js_name = exportWith)]
    pub fn export_with(&self, save: &js_sys::Function) -> Result<(), JsValue> {
        let mut sink = CallbackSink { save };
        self.exporter
            .export(&self.deck, &mut sink)
            .map_err(|e| JsValue::from_str(&format!("Export failed: {}", e)))
    }
}

impl DeckViewer {
    fn load() -> Result<Self, String> {
        let deck = catalog::department_overview().map_err(|e| format!("Invalid deck: {}", e))?;
        Ok(Self {
            nav: Navigator::new(&deck),
            deck,
            exporter: DeckExporter::new(),
        })
    }

    fn current_view(&self) -> SlideView<'_> {
        let slide = &self.deck.slides()[self.nav.current()];
        SlideView {
            index: self.nav.current(),
            kicker: slide.kicker(),
            position: self.nav.position_label(),
            slide,
        }
    }

    fn timeline_entries(&self) -> Vec<TimelineEntry> {
        self.nav.timeline(&self.deck)
    }

    fn export_pptx_impl(&self) -> Result<Vec<u8>, String> {
        self.exporter
            .render(&self.deck)
            .map_err(|e| format!("Export failed: {}", e))
    }
}

/// The current slide plus the labels a page shows around it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SlideView<'a> {
    index: usize,
    kicker: String,
    position: String,
    #[serde(flatten)]
    slide: &'a deck_core::Slide,
}

/// Forwards a finished document to a JavaScript save callback.
struct CallbackSink<'a> {
    save: &'a js_sys::Function,
}

impl DocumentSink for CallbackSink<'_> {
    fn save_document(&mut self, bytes: &[u8], file_name: &str) -> deck_core::Result<()> {
        let data = js_sys::Uint8Array::from(bytes);
        self.save
            .call2(&JsValue::NULL, &data, &JsValue::from_str(file_name))
            .map(|_| ())
            .map_err(|e| {
                Error::IoError(io::Error::new(
                    io::ErrorKind::Other,
                    format!("save callback threw: {:?}", e),
                ))
            })
    }
}

/// Serialize to plain JS objects; flattened structs would otherwise come
/// out as `Map`s.
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    value
        .serialize(&serializer)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_pptx::PptxReader;
    use std::io::Cursor;

    #[test]
    fn test_viewer_navigation_clamps() {
        let mut viewer = DeckViewer::load().unwrap();
        assert_eq!(viewer.length(), 10);
        assert!(!viewer.can_previous());

        assert_eq!(viewer.previous(), 0);
        assert_eq!(viewer.go_to(42), 9);
        assert!(!viewer.can_next());
        assert_eq!(viewer.next(), 9);
        assert_eq!(viewer.go_to(-3), 0);
        assert_eq!(viewer.go_to(2), 2);
        assert_eq!(viewer.position_label(), "3 / 10");
    }

    #[test]
    fn test_current_view() {
        let mut viewer = DeckViewer::load().unwrap();
        viewer.go_to(9);
        let view = viewer.current_view();

        assert_eq!(view.index, 9);
        assert_eq!(view.kicker, "CTA");
        assert_eq!(view.position, "10 / 10");
        assert_eq!(view.slide.title, "Call to Collaborate");
    }

    #[test]
    fn test_timeline_marks_current() {
        let mut viewer = DeckViewer::load().unwrap();
        viewer.next();
        let entries = viewer.timeline_entries();

        assert_eq!(entries.len(), 10);
        assert!(entries[1].active);
        assert_eq!(entries.iter().filter(|e| e.active).count(), 1);
        assert_eq!(entries[1].label, "2. Mission & Vision");
    }

    #[test]
    fn test_export_does_not_move_viewer() {
        let mut viewer = DeckViewer::load().unwrap();
        viewer.go_to(5);

        let bytes = viewer.export_pptx_impl().unwrap();
        assert_eq!(viewer.current_index(), 5);
        assert_eq!(viewer.export_file_name(), "F-STSC-Department-Overview.pptx");

        let read = PptxReader::new().read(Cursor::new(bytes)).unwrap();
        assert_eq!(read.slides.len(), 10);
    }
}
