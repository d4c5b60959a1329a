//! PPTX package writer.
//!
//! Serializes laid-out pages into an Office Open XML presentation: one
//! `ppt/slides/slideN.xml` per page plus the fixed parts every package needs.

use crate::layout::{CardShape, Element, Frame, Page, TextBox, PAGE_HEIGHT, PAGE_WIDTH};
use crate::parts::{self, emu, NS_A, NS_P, NS_R};
use deck_core::{DeckInfo, Error, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::{Cursor, Seek, Write};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Outline width of card shapes (1pt).
const CARD_OUTLINE_EMU: &str = "12700";

/// Writer for PPTX (Office Open XML) files.
pub struct PptxWriter {
    compression: CompressionMethod,
}

impl PptxWriter {
    /// Create a writer that deflates every part.
    pub fn new() -> Self {
        Self {
            compression: CompressionMethod::Deflated,
        }
    }

    /// Store parts without compression.
    pub fn stored(mut self) -> Self {
        self.compression = CompressionMethod::Stored;
        self
    }

    /// Write a complete package into memory.
    pub fn write(&self, info: &DeckInfo, pages: &[Page]) -> Result<Vec<u8>> {
        let cursor = self.write_to(info, pages, Cursor::new(Vec::new()))?;
        Ok(cursor.into_inner())
    }

    /// Write a complete package into any seekable sink, returning it.
    pub fn write_to<W: Write + Seek>(&self, info: &DeckInfo, pages: &[Page], sink: W) -> Result<W> {
        let mut zip = ZipWriter::new(sink);
        let count = pages.len();

        // [Content_Types].xml goes first so readers can sniff the package.
        self.add_part(&mut zip, "[Content_Types].xml", &parts::content_types(count))?;
        self.add_part(&mut zip, "_rels/.rels", &parts::root_rels())?;
        self.add_part(&mut zip, "docProps/core.xml", &core_properties(info)?)?;
        self.add_part(&mut zip, "docProps/app.xml", &app_properties(info, count)?)?;
        self.add_part(
            &mut zip,
            "ppt/presentation.xml",
            &parts::presentation(count, PAGE_WIDTH, PAGE_HEIGHT),
        )?;
        self.add_part(
            &mut zip,
            "ppt/_rels/presentation.xml.rels",
            &parts::presentation_rels(count),
        )?;
        self.add_part(&mut zip, "ppt/slideMasters/slideMaster1.xml", &parts::slide_master())?;
        self.add_part(
            &mut zip,
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            &parts::slide_master_rels(),
        )?;
        self.add_part(&mut zip, "ppt/slideLayouts/slideLayout1.xml", &parts::slide_layout())?;
        self.add_part(
            &mut zip,
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            &parts::slide_layout_rels(),
        )?;
        self.add_part(&mut zip, "ppt/theme/theme1.xml", &parts::theme())?;

        for (idx, page) in pages.iter().enumerate() {
            let n = idx + 1;
            log::debug!("Writing slide {} with {} elements", n, page.elements.len());
            self.add_part(&mut zip, &format!("ppt/slides/slide{}.xml", n), &slide_xml(page)?)?;
            self.add_part(
                &mut zip,
                &format!("ppt/slides/_rels/slide{}.xml.rels", n),
                &parts::slide_rels(),
            )?;
        }

        zip.finish()
            .map_err(|e| Error::ZipError(format!("Failed to finish archive: {}", e)))
    }

    fn add_part<W: Write + Seek>(&self, zip: &mut ZipWriter<W>, path: &str, content: &str) -> Result<()> {
        let options = FileOptions::default().compression_method(self.compression);
        zip.start_file(path, options)
            .map_err(|e| Error::ZipError(format!("Failed to start '{}': {}", path, e)))?;
        zip.write_all(content.as_bytes())?;
        Ok(())
    }
}

impl Default for PptxWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Thin wrapper over the quick-xml writer that maps errors into ours.
struct XmlOut {
    writer: Writer<Vec<u8>>,
}

impl XmlOut {
    fn new() -> Result<Self> {
        let mut out = Self {
            writer: Writer::new(Vec::new()),
        };
        out.event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(out)
    }

    fn event(&mut self, event: Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|e| Error::XmlError(format!("Failed to write XML: {}", e)))
    }

    fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let tag = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.event(Event::Start(tag))
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let tag = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.event(Event::Empty(tag))
    }

    fn end(&mut self, name: &str) -> Result<()> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn text(&mut self, text: &str) -> Result<()> {
        self.event(Event::Text(BytesText::new(text)))
    }

    /// `<name>text</name>`
    fn element(&mut self, name: &str, text: &str) -> Result<()> {
        self.start(name, &[])?;
        self.text(text)?;
        self.end(name)
    }

    fn solid_fill(&mut self, rgb: &str) -> Result<()> {
        self.start("a:solidFill", &[])?;
        self.empty("a:srgbClr", &[("val", rgb)])?;
        self.end("a:solidFill")
    }

    fn xfrm(&mut self, frame: &Frame) -> Result<()> {
        let (x, y) = (emu(frame.x).to_string(), emu(frame.y).to_string());
        let (cx, cy) = (emu(frame.w).to_string(), emu(frame.h).to_string());
        self.start("a:xfrm", &[])?;
        self.empty("a:off", &[("x", x.as_str()), ("y", y.as_str())])?;
        self.empty("a:ext", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
        self.end("a:xfrm")
    }

    fn finish(self) -> Result<String> {
        String::from_utf8(self.writer.into_inner())
            .map_err(|e| Error::XmlError(format!("Generated XML is not UTF-8: {}", e)))
    }
}

/// Generate the XML for one slide.
pub(crate) fn slide_xml(page: &Page) -> Result<String> {
    let mut out = XmlOut::new()?;

    out.start("p:sld", &[("xmlns:a", NS_A), ("xmlns:r", NS_R), ("xmlns:p", NS_P)])?;
    out.start("p:cSld", &[])?;

    out.start("p:bg", &[])?;
    out.start("p:bgPr", &[])?;
    out.solid_fill(page.background)?;
    out.empty("a:effectLst", &[])?;
    out.end("p:bgPr")?;
    out.end("p:bg")?;

    out.start("p:spTree", &[])?;
    out.start("p:nvGrpSpPr", &[])?;
    out.empty("p:cNvPr", &[("id", "1"), ("name", "")])?;
    out.empty("p:cNvGrpSpPr", &[])?;
    out.empty("p:nvPr", &[])?;
    out.end("p:nvGrpSpPr")?;
    out.start("p:grpSpPr", &[])?;
    out.start("a:xfrm", &[])?;
    out.empty("a:off", &[("x", "0"), ("y", "0")])?;
    out.empty("a:ext", &[("cx", "0"), ("cy", "0")])?;
    out.empty("a:chOff", &[("x", "0"), ("y", "0")])?;
    out.empty("a:chExt", &[("cx", "0"), ("cy", "0")])?;
    out.end("a:xfrm")?;
    out.end("p:grpSpPr")?;

    // Shape id 1 is the group; shapes start at 2.
    for (idx, element) in page.elements.iter().enumerate() {
        let shape_id = idx + 2;
        match element {
            Element::Text(text) => write_text_box(&mut out, shape_id, text)?,
            Element::Card(card) => write_card(&mut out, shape_id, card)?,
        }
    }

    out.end("p:spTree")?;
    out.end("p:cSld")?;
    out.start("p:clrMapOvr", &[])?;
    out.empty("a:masterClrMapping", &[])?;
    out.end("p:clrMapOvr")?;
    out.end("p:sld")?;

    out.finish()
}

fn write_text_box(out: &mut XmlOut, shape_id: usize, text: &TextBox) -> Result<()> {
    let id = shape_id.to_string();
    let name = format!("{:?} {}", text.role, shape_id);

    out.start("p:sp", &[])?;
    out.start("p:nvSpPr", &[])?;
    match &text.description {
        Some(descr) => out.empty(
            "p:cNvPr",
            &[("id", id.as_str()), ("name", name.as_str()), ("descr", descr.as_str())],
        )?,
        None => out.empty("p:cNvPr", &[("id", id.as_str()), ("name", name.as_str())])?,
    }
    out.empty("p:cNvSpPr", &[("txBox", "1")])?;
    out.empty("p:nvPr", &[])?;
    out.end("p:nvSpPr")?;

    out.start("p:spPr", &[])?;
    out.xfrm(&text.frame)?;
    out.start("a:prstGeom", &[("prst", "rect")])?;
    out.empty("a:avLst", &[])?;
    out.end("a:prstGeom")?;
    out.empty("a:noFill", &[])?;
    out.end("p:spPr")?;

    out.start("p:txBody", &[])?;
    out.empty("a:bodyPr", &[("wrap", "square"), ("rtlCol", "0")])?;
    out.empty("a:lstStyle", &[])?;

    let size = ((text.style.size * 100.0).round() as u32).to_string();
    let mut run_attrs = vec![("lang", "en-US"), ("sz", size.as_str())];
    if text.style.bold {
        run_attrs.push(("b", "1"));
    }
    if text.style.italic {
        run_attrs.push(("i", "1"));
    }
    run_attrs.push(("dirty", "0"));

    let spacing = text
        .style
        .line_spacing
        .map(|pts| ((pts * 100.0).round() as u32).to_string());

    for paragraph in &text.paragraphs {
        out.start("a:p", &[])?;
        if let Some(spacing) = &spacing {
            out.start("a:pPr", &[])?;
            out.start("a:lnSpc", &[])?;
            out.empty("a:spcPts", &[("val", spacing.as_str())])?;
            out.end("a:lnSpc")?;
            out.end("a:pPr")?;
        }
        out.start("a:r", &[])?;
        out.start("a:rPr", &run_attrs)?;
        out.solid_fill(text.style.color)?;
        out.end("a:rPr")?;
        out.element("a:t", paragraph)?;
        out.end("a:r")?;
        out.end("a:p")?;
    }

    out.end("p:txBody")?;
    out.end("p:sp")
}

fn write_card(out: &mut XmlOut, shape_id: usize, card: &CardShape) -> Result<()> {
    let id = shape_id.to_string();
    let name = format!("{:?} {}", card.role, shape_id);

    out.start("p:sp", &[])?;
    out.start("p:nvSpPr", &[])?;
    out.empty("p:cNvPr", &[("id", id.as_str()), ("name", name.as_str())])?;
    out.empty("p:cNvSpPr", &[])?;
    out.empty("p:nvPr", &[])?;
    out.end("p:nvSpPr")?;

    out.start("p:spPr", &[])?;
    out.xfrm(&card.frame)?;
    out.start("a:prstGeom", &[("prst", "roundRect")])?;
    out.empty("a:avLst", &[])?;
    out.end("a:prstGeom")?;
    out.solid_fill(card.fill)?;
    out.start("a:ln", &[("w", CARD_OUTLINE_EMU)])?;
    out.solid_fill(card.outline)?;
    out.end("a:ln")?;
    out.end("p:spPr")?;

    out.end("p:sp")
}

fn core_properties(info: &DeckInfo) -> Result<String> {
    let mut out = XmlOut::new()?;
    out.start(
        "cp:coreProperties",
        &[
            ("xmlns:cp", "http://schemas.openxmlformats.org/package/2006/metadata/core-properties"),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:dcmitype", "http://purl.org/dc/dcmitype/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    out.element("dc:title", &info.title)?;
    out.element("dc:creator", &info.author)?;
    out.element("cp:lastModifiedBy", &info.author)?;
    out.element("cp:revision", "1")?;
    out.end("cp:coreProperties")?;
    out.finish()
}

fn app_properties(info: &DeckInfo, slide_count: usize) -> Result<String> {
    let mut out = XmlOut::new()?;
    out.start(
        "Properties",
        &[
            ("xmlns", "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties"),
            ("xmlns:vt", "http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes"),
        ],
    )?;
    out.element("Application", env!("CARGO_PKG_NAME"))?;
    out.element("Slides", &slide_count.to_string())?;
    out.element("Company", &info.company)?;
    out.end("Properties")?;
    out.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::layout_slide;
    use deck_core::{Slide, Stat};
    use std::io::Read;
    use zip::ZipArchive;

    fn info() -> DeckInfo {
        DeckInfo::new("Deck & Friends", "Author <a@b>", "Company")
    }

    fn read_part(bytes: &[u8], path: &str) -> String {
        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(path).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    #[test]
    fn test_slide_xml_escapes_text() {
        let page = layout_slide(&Slide::new("x", "R&D <2025>"), 1, 1);
        let xml = slide_xml(&page).unwrap();

        assert!(xml.contains("<a:t>R&amp;D &lt;2025&gt;</a:t>"));
        assert!(xml.contains(r#"<a:srgbClr val="0F172A"/>"#));
    }

    #[test]
    fn test_slide_xml_one_paragraph_per_bullet() {
        let page = layout_slide(&Slide::new("b", "B").with_bullets(["a", "b", "c"]), 1, 1);
        let xml = slide_xml(&page).unwrap();

        // Title, three bullets, footer.
        assert_eq!(xml.matches("<a:p>").count(), 5);
        assert_eq!(xml.matches(r#"<a:spcPts val="2000"/>"#).count(), 3);
    }

    #[test]
    fn test_cards_are_round_rects() {
        let page = layout_slide(&Slide::new("s", "S").with_stats([Stat::new("L", "V")]), 1, 1);
        let xml = slide_xml(&page).unwrap();

        assert_eq!(xml.matches(r#"prst="roundRect""#).count(), 1);
        assert!(xml.contains(r#"<a:ln w="12700">"#));
    }

    #[test]
    fn test_run_properties() {
        let page = layout_slide(&Slide::new("t", "Title"), 1, 1);
        let xml = slide_xml(&page).unwrap();
        assert!(xml.contains(r#"<a:rPr lang="en-US" sz="3400" b="1" dirty="0">"#));
    }

    #[test]
    fn test_write_package_parts() {
        let pages: Vec<Page> = (1..=3)
            .map(|n| layout_slide(&Slide::new(format!("s{}", n), format!("Slide {}", n)), n, 3))
            .collect();
        let bytes = PptxWriter::new().write(&info(), &pages).unwrap();

        let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        for required in [
            "[Content_Types].xml",
            "_rels/.rels",
            "ppt/presentation.xml",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout1.xml",
            "ppt/theme/theme1.xml",
            "ppt/slides/slide3.xml",
            "ppt/slides/_rels/slide3.xml.rels",
        ] {
            assert!(names.contains(&required), "missing {}", required);
        }
        assert!(!names.contains(&"ppt/slides/slide4.xml"));

        let core = read_part(&bytes, "docProps/core.xml");
        assert!(core.contains("<dc:title>Deck &amp; Friends</dc:title>"));
        assert!(core.contains("<dc:creator>Author &lt;a@b&gt;</dc:creator>"));

        let app = read_part(&bytes, "docProps/app.xml");
        assert!(app.contains("<Slides>3</Slides>"));
    }

    #[test]
    fn test_stored_and_deflated_hold_same_parts() {
        let pages = vec![layout_slide(&Slide::new("a", "A"), 1, 1)];
        let deflated = PptxWriter::new().write(&info(), &pages).unwrap();
        let stored = PptxWriter::new().stored().write(&info(), &pages).unwrap();

        assert_eq!(
            read_part(&deflated, "ppt/slides/slide1.xml"),
            read_part(&stored, "ppt/slides/slide1.xml")
        );
    }
}
