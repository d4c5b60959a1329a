//! PPTX reader used to inspect exported decks.
//!
//! Reads the slide order from the presentation relationships and pulls the
//! text of every shape, sorted into reading order by position.

use deck_core::{Error, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::cmp::Ordering;
use std::io::{Read, Seek};
use zip::ZipArchive;

/// Text content from one shape, with its offset in EMU.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// A slide read back from a package.
#[derive(Debug, Clone)]
pub struct ReadSlide {
    /// 1-based slide number.
    pub number: usize,

    /// Text shapes, top-to-bottom then left-to-right.
    pub texts: Vec<PlacedText>,
}

impl ReadSlide {
    fn new(number: usize) -> Self {
        Self {
            number,
            texts: Vec::new(),
        }
    }

    /// Sort texts by position (top-to-bottom, then left-to-right).
    fn sort_by_position(&mut self) {
        self.texts.sort_by(|a, b| {
            let y_cmp = a.y.partial_cmp(&b.y).unwrap_or(Ordering::Equal);
            if y_cmp == Ordering::Equal {
                a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal)
            } else {
                y_cmp
            }
        });
    }

    /// Shape texts in reading order.
    pub fn lines(&self) -> Vec<&str> {
        self.texts.iter().map(|t| t.text.as_str()).collect()
    }

    /// Whether any shape on the slide contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.texts.iter().any(|t| t.text.contains(needle))
    }
}

/// A package read back from disk or memory.
#[derive(Debug, Clone)]
pub struct ReadDeck {
    /// `dc:title` from the core properties, if present.
    pub title: Option<String>,

    /// Slides in presentation order.
    pub slides: Vec<ReadSlide>,
}

/// Reader for PPTX (Office Open XML) files.
pub struct PptxReader;

impl PptxReader {
    /// Create a new PPTX reader.
    pub fn new() -> Self {
        Self
    }

    /// Read a PPTX package.
    pub fn read<R: Read + Seek>(&self, reader: R) -> Result<ReadDeck> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::ZipError(format!("Failed to open ZIP: {}", e)))?;

        let title = match self.read_file_from_archive(&mut archive, "docProps/core.xml") {
            Ok(core) => core_title(&core)?,
            Err(e) => {
                log::warn!("No core properties ({}), continuing without a title", e);
                None
            }
        };

        let slide_order = self.get_slide_order(&mut archive)?;
        let mut slides = Vec::with_capacity(slide_order.len());
        for (idx, slide_path) in slide_order.iter().enumerate() {
            slides.push(self.read_slide(&mut archive, slide_path, idx + 1)?);
        }

        Ok(ReadDeck { title, slides })
    }

    /// Get the ordered list of slide paths from the presentation relationships.
    fn get_slide_order<R: Read + Seek>(&self, archive: &mut ZipArchive<R>) -> Result<Vec<String>> {
        let rels_content = self.read_file_from_archive(archive, "ppt/_rels/presentation.xml.rels")?;
        let mut slides: Vec<(String, Option<usize>)> = Vec::new();

        let mut reader = Reader::from_str(&rels_content);
        reader.trim_text(true);

        loop {
            match reader.read_event() {
                Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) if e.name().as_ref() == b"Relationship" => {
                    let mut rel_type = String::new();
                    let mut target = String::new();
                    let mut id = String::new();

                    for attr in e.attributes().flatten() {
                        let value = String::from_utf8_lossy(&attr.value).to_string();
                        match attr.key.as_ref() {
                            b"Type" => rel_type = value,
                            b"Target" => target = value,
                            b"Id" => id = value,
                            _ => {}
                        }
                    }

                    if rel_type.ends_with("/slide") {
                        let order = extract_slide_number(&target).or_else(|| extract_slide_number(&id));
                        let full_path = match target.strip_prefix('/') {
                            Some(absolute) => absolute.to_string(),
                            None => format!("ppt/{}", target),
                        };
                        slides.push((full_path, order));
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::XmlError(format!(
                        "Error parsing relationships: {}",
                        e
                    )));
                }
                _ => {}
            }
        }

        slides.sort_by(|a, b| match (a.1, b.1) {
            (Some(na), Some(nb)) => na.cmp(&nb),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => a.0.cmp(&b.0),
        });

        Ok(slides.into_iter().map(|(path, _)| path).collect())
    }

    fn read_slide<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        slide_path: &str,
        slide_number: usize,
    ) -> Result<ReadSlide> {
        let content = self.read_file_from_archive(archive, slide_path)?;
        let mut slide = ReadSlide::new(slide_number);
        slide.texts = extract_texts(&content).map_err(|e| {
            Error::CorruptedFile(format!("Malformed slide XML in '{}': {}", slide_path, e))
        })?;
        slide.sort_by_position();
        Ok(slide)
    }

    fn read_file_from_archive<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<String> {
        let mut file = archive
            .by_name(path)
            .map_err(|e| Error::ZipError(format!("File not found in archive '{}': {}", path, e)))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::ZipError(format!("Failed to read '{}': {}", path, e)))?;

        Ok(content)
    }
}

impl Default for PptxReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull every non-empty text shape and its offset out of a slide.
///
/// The reader cannot resume after a syntax error, so the first one fails
/// the whole slide.
fn extract_texts(xml_content: &str) -> std::result::Result<Vec<PlacedText>, quick_xml::Error> {
    let mut texts = Vec::new();
    let mut reader = Reader::from_str(xml_content);
    reader.trim_text(true);

    let mut current: Option<PlacedText> = None;
    let mut in_text_body = false;
    let mut in_paragraph = false;
    let mut buffer = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"sp" => {
                    current = Some(PlacedText {
                        text: String::new(),
                        x: 0.0,
                        y: 0.0,
                    });
                }
                b"txBody" => in_text_body = true,
                b"p" if in_text_body => {
                    in_paragraph = true;
                    if !buffer.is_empty() {
                        buffer.push('\n');
                    }
                }
                _ => {}
            },
            Ok(Event::Empty(ref e)) if local_name(e.name().as_ref()) == b"off" => {
                // Only the shape's own offset; the group transform has no open shape.
                if let Some(ref mut shape) = current {
                    for attr in e.attributes().flatten() {
                        let value = String::from_utf8_lossy(&attr.value).parse::<f64>();
                        match (attr.key.as_ref(), value) {
                            (b"x", Ok(x)) => shape.x = x,
                            (b"y", Ok(y)) => shape.y = y,
                            _ => {}
                        }
                    }
                }
            }
            Ok(Event::Text(ref e)) if in_paragraph => {
                buffer.push_str(&e.unescape().unwrap_or_default());
            }
            Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                b"sp" => {
                    if let Some(mut shape) = current.take() {
                        shape.text = buffer.trim().to_string();
                        if !shape.text.is_empty() {
                            texts.push(shape);
                        }
                    }
                    buffer.clear();
                    in_text_body = false;
                    in_paragraph = false;
                }
                b"txBody" => in_text_body = false,
                b"p" => in_paragraph = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => return Err(e),
            _ => {}
        }
    }

    Ok(texts)
}

/// Read `dc:title` from the core properties part.
fn core_title(xml_content: &str) -> Result<Option<String>> {
    let mut reader = Reader::from_str(xml_content);
    reader.trim_text(true);
    let mut in_title = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => in_title = local_name(e.name().as_ref()) == b"title",
            Ok(Event::Text(ref e)) if in_title => {
                let title = e
                    .unescape()
                    .map_err(|e| Error::CorruptedFile(format!("Bad title text: {}", e)))?;
                return Ok(Some(title.into_owned()));
            }
            Ok(Event::End(_)) => in_title = false,
            Ok(Event::Eof) => return Ok(None),
            Err(e) => {
                return Err(Error::XmlError(format!(
                    "Error parsing core properties: {}",
                    e
                )));
            }
            _ => {}
        }
    }
}

/// Extract the local name from a potentially namespaced XML element name.
fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Extract a slide number from a string like "rId2" or "slides/slide3.xml".
fn extract_slide_number(s: &str) -> Option<usize> {
    let s = s.trim_end_matches(".xml").trim_end_matches(".rels");

    let digits: String = s.chars().rev().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let digits: String = digits.chars().rev().collect();
    digits.parse().ok()
}
