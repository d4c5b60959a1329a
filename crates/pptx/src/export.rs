//! Deck export: layout, write, then hand the bytes to the host's save
//! mechanism.

use crate::layout::layout_deck;
use crate::writer::PptxWriter;
use deck_core::{Deck, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Where an exported document ends up.
///
/// This is the only side effect of exporting. Implementations decide what
/// "saving" means for their host: a file on disk, a browser download, or a
/// buffer in a test.
pub trait DocumentSink {
    fn save_document(&mut self, bytes: &[u8], file_name: &str) -> Result<()>;
}

/// Saves documents into a directory.
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
    last_saved: Option<PathBuf>,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            last_saved: None,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the most recent successful save.
    pub fn last_saved(&self) -> Option<&Path> {
        self.last_saved.as_deref()
    }
}

impl DocumentSink for FileSink {
    fn save_document(&mut self, bytes: &[u8], file_name: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);

        let mut file = File::create(&path)?;
        file.write_all(bytes)?;

        log::info!("Saved {} ({} bytes)", path.display(), bytes.len());
        self.last_saved = Some(path);
        Ok(())
    }
}

/// A document handed to a [`MemorySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Keeps saved documents in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub saved: Vec<SavedDocument>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentSink for MemorySink {
    fn save_document(&mut self, bytes: &[u8], file_name: &str) -> Result<()> {
        self.saved.push(SavedDocument {
            file_name: file_name.to_string(),
            bytes: bytes.to_vec(),
        });
        Ok(())
    }
}

/// Turns a deck into a `.pptx` and saves it.
#[derive(Default)]
pub struct DeckExporter {
    writer: PptxWriter,
}

impl DeckExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_writer(writer: PptxWriter) -> Self {
        Self { writer }
    }

    /// Lay out and serialize the deck without saving it.
    pub fn render(&self, deck: &Deck) -> Result<Vec<u8>> {
        let pages = layout_deck(deck);
        log::debug!("Laid out {} pages for '{}'", pages.len(), deck.info().title);
        self.writer.write(deck.info(), &pages)
    }

    /// Render the deck and hand it to `sink` under the deck's export name.
    ///
    /// Sink failures are returned as-is; nothing is retried.
    pub fn export(&self, deck: &Deck, sink: &mut dyn DocumentSink) -> Result<()> {
        let bytes = self.render(deck)?;
        let file_name = deck.info().export_file_name();
        sink.save_document(&bytes, &file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::PptxReader;
    use deck_core::{catalog, DeckInfo, Error, Slide, SpotlightItem, Stat};
    use std::io::Cursor;

    struct FailingSink;

    impl DocumentSink for FailingSink {
        fn save_document(&mut self, _bytes: &[u8], _file_name: &str) -> Result<()> {
            Err(Error::IoError(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "download blocked",
            )))
        }
    }

    #[test]
    fn test_export_uses_subject_file_name() {
        let deck = catalog::department_overview().unwrap();
        let mut sink = MemorySink::new();
        DeckExporter::new().export(&deck, &mut sink).unwrap();

        assert_eq!(sink.saved.len(), 1);
        assert_eq!(sink.saved[0].file_name, "F-STSC-Department-Overview.pptx");
        assert!(sink.saved[0].bytes.starts_with(b"PK\x03\x04"));
    }

    #[test]
    fn test_export_round_trips_one_page_per_slide_in_order() {
        let deck = catalog::department_overview().unwrap();
        let bytes = DeckExporter::new().render(&deck).unwrap();

        let read = PptxReader::new().read(Cursor::new(bytes)).unwrap();
        assert_eq!(read.title.as_deref(), Some("F STSC Department Overview"));
        assert_eq!(read.slides.len(), deck.len());

        for (read_slide, slide) in read.slides.iter().zip(deck.slides()) {
            assert_eq!(read_slide.lines()[0], slide.title);
        }
    }

    #[test]
    fn test_exported_footers() {
        let deck = catalog::department_overview().unwrap();
        let bytes = DeckExporter::new().render(&deck).unwrap();
        let read = PptxReader::new().read(Cursor::new(bytes)).unwrap();

        for (idx, (read_slide, slide)) in read.slides.iter().zip(deck.slides()).enumerate() {
            let default_footer = format!("Slide {} of {}", idx + 1, deck.len());
            let last = *read_slide.lines().last().unwrap();
            match &slide.footer {
                Some(footer) => {
                    assert_eq!(last, footer);
                    assert!(!read_slide.contains(&default_footer));
                }
                None => assert_eq!(last, default_footer),
            }
        }
    }

    #[test]
    fn test_exported_bullets_and_side_by_side_stats() {
        let slide = Slide::new("research", "Research")
            .with_bullets(["First", "Second", "Third"])
            .with_stats([Stat::new("Projects", "94")])
            .with_spotlight([SpotlightItem::new("Labs", "42")]);
        let deck = Deck::new(DeckInfo::new("Mini", "Me", "Co"), vec![slide]).unwrap();

        let bytes = DeckExporter::new().render(&deck).unwrap();
        let read = PptxReader::new().read(Cursor::new(bytes)).unwrap();
        let lines = read.slides[0].lines();

        // Reading order: title, bullets beside the stat value, stat label,
        // spotlight row, footer.
        assert_eq!(lines[0], "Research");
        assert_eq!(lines[1], "\u{2022} First\n\u{2022} Second\n\u{2022} Third");
        assert_eq!(lines[2], "94");
        assert!(lines.contains(&"LABS"));
        assert_eq!(*lines.last().unwrap(), "Slide 1 of 1");
    }

    #[test]
    fn test_file_sink_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let deck = catalog::department_overview().unwrap();
        let mut sink = FileSink::new(dir.path().join("out"));

        DeckExporter::new().export(&deck, &mut sink).unwrap();

        let saved = sink.last_saved().unwrap().to_path_buf();
        assert_eq!(saved, dir.path().join("out").join("F-STSC-Department-Overview.pptx"));
        let read = PptxReader::new().read(File::open(saved).unwrap()).unwrap();
        assert_eq!(read.slides.len(), 10);
    }

    #[test]
    fn test_sink_failure_is_returned() {
        let deck = catalog::department_overview().unwrap();
        let err = DeckExporter::new().export(&deck, &mut FailingSink).unwrap_err();
        assert!(err.to_string().contains("download blocked"));
    }
}
