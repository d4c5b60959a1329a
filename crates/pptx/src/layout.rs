//! Page layout: maps each slide onto positioned text boxes and card shapes.
//!
//! All geometry is in inches on a 10 x 7.5 in page. Layout is pure; the
//! writer turns the resulting [`Page`]s into slide XML.
//!
//! A vertical cursor starts below the title and only moves down. Each
//! optional field that is present is placed at the cursor and pushes it
//! down by its own height; absent fields reserve nothing. Bullets (left)
//! and stats (right) share one band, so that band is as tall as the taller
//! column. The spotlight row sits below the band and the quote below that,
//! kept inside the bottom zone so it always ends above the footer. The
//! footer is always at the bottom.

use deck_core::{Deck, Quote, Slide, SpotlightItem, Stat};

pub const PAGE_WIDTH: f64 = 10.0;
pub const PAGE_HEIGHT: f64 = 7.5;

/// Page background.
pub const BACKGROUND: &str = "0F172A";

const TITLE_Y: f64 = 0.4;
const TITLE_HEIGHT: f64 = 0.85;
const CONTENT_X: f64 = 0.5;
const CONTENT_WIDTH: f64 = 9.0;

const SUBTITLE_HEIGHT: f64 = 0.6;

const BODY_GAP: f64 = 0.1;
const SECTION_GAP: f64 = 0.2;

const BULLETS_X: f64 = 0.6;
const BULLETS_WIDTH: f64 = 5.5;
const BULLET_LINE_HEIGHT: f64 = 0.55;

const STATS_X: f64 = 6.4;
const STATS_WIDTH: f64 = 3.1;
const STAT_CARD_HEIGHT: f64 = 1.0;
const STAT_PITCH: f64 = 1.15;

const SPOTLIGHT_X: f64 = 0.6;
const SPOTLIGHT_PITCH: f64 = 3.0;
const SPOTLIGHT_CARD_WIDTH: f64 = 2.7;
const SPOTLIGHT_CARD_HEIGHT: f64 = 1.6;

const QUOTE_MIN_Y: f64 = 5.2;
const QUOTE_X: f64 = 0.7;
const QUOTE_WIDTH: f64 = 8.6;
const QUOTE_HEIGHT: f64 = 1.3;
/// Lowest the quote may start; it always ends above the footer.
const QUOTE_MAX_Y: f64 = FOOTER_Y - QUOTE_HEIGHT - FOOTER_GAP;

const FOOTER_Y: f64 = 6.95;
const FOOTER_HEIGHT: f64 = 0.35;
const FOOTER_GAP: f64 = 0.15;

const CARD_PADDING: f64 = 0.2;

/// Card fill shared by stat, spotlight and quote cards.
const CARD_FILL: &str = "0B1120";

/// Bullet glyph prefixed to every bullet line.
pub const BULLET_GLYPH: &str = "\u{2022}";

/// Position and size in inches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Frame {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }
}

/// What an element represents, so callers can find it without relying on
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Title,
    Subtitle,
    Bullets,
    StatCard,
    StatValue,
    StatLabel,
    SpotlightCard,
    SpotlightLabel,
    SpotlightValue,
    SpotlightDescription,
    QuoteCard,
    QuoteText,
    QuoteAttribution,
    Footer,
}

/// Run formatting for a text box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in points.
    pub size: f64,
    pub bold: bool,
    pub italic: bool,
    /// RGB hex colour, without `#`.
    pub color: &'static str,
    /// Fixed line spacing in points.
    pub line_spacing: Option<f64>,
}

impl TextStyle {
    const fn plain(size: f64, color: &'static str) -> Self {
        Self {
            size,
            bold: false,
            italic: false,
            color,
            line_spacing: None,
        }
    }

    const fn bold(size: f64, color: &'static str) -> Self {
        Self {
            bold: true,
            ..Self::plain(size, color)
        }
    }
}

const TITLE_STYLE: TextStyle = TextStyle::bold(34.0, "F8FAFC");
const SUBTITLE_STYLE: TextStyle = TextStyle::plain(20.0, "BAE6FD");
const BULLETS_STYLE: TextStyle = TextStyle {
    line_spacing: Some(20.0),
    ..TextStyle::plain(18.0, "E2E8F0")
};
const STAT_VALUE_STYLE: TextStyle = TextStyle::bold(24.0, "22D3EE");
const STAT_LABEL_STYLE: TextStyle = TextStyle::plain(16.0, "E2E8F0");
const SPOTLIGHT_LABEL_STYLE: TextStyle = TextStyle::bold(12.0, "94A3B8");
const SPOTLIGHT_VALUE_STYLE: TextStyle = TextStyle::bold(22.0, "22D3EE");
const SPOTLIGHT_DESCRIPTION_STYLE: TextStyle = TextStyle::plain(12.0, "E2E8F0");
const QUOTE_TEXT_STYLE: TextStyle = TextStyle {
    italic: true,
    ..TextStyle::plain(18.0, "E2E8F0")
};
const QUOTE_ATTRIBUTION_STYLE: TextStyle = TextStyle::plain(14.0, "BAE6FD");
const CUSTOM_FOOTER_STYLE: TextStyle = TextStyle::plain(12.0, "94A3B8");
const DEFAULT_FOOTER_STYLE: TextStyle = TextStyle::plain(12.0, "1D4ED8");

/// A positioned text box. Each paragraph becomes one line of the box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub role: Role,
    pub frame: Frame,
    pub paragraphs: Vec<String>,
    pub style: TextStyle,
    /// Alternative text attached to the shape.
    pub description: Option<String>,
}

/// A rounded rectangle drawn behind card content.
#[derive(Debug, Clone, PartialEq)]
pub struct CardShape {
    pub role: Role,
    pub frame: Frame,
    pub fill: &'static str,
    pub outline: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text(TextBox),
    Card(CardShape),
}

impl Element {
    pub fn role(&self) -> Role {
        match self {
            Element::Text(text) => text.role,
            Element::Card(card) => card.role,
        }
    }

    pub fn frame(&self) -> Frame {
        match self {
            Element::Text(text) => text.frame,
            Element::Card(card) => card.frame,
        }
    }

    pub fn as_text(&self) -> Option<&TextBox> {
        match self {
            Element::Text(text) => Some(text),
            Element::Card(_) => None,
        }
    }
}

/// One output page, elements in drawing order.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based page number.
    pub number: usize,
    pub background: &'static str,
    pub elements: Vec<Element>,
}

impl Page {
    fn new(number: usize) -> Self {
        Self {
            number,
            background: BACKGROUND,
            elements: Vec::new(),
        }
    }

    fn push_text(&mut self, role: Role, frame: Frame, paragraphs: Vec<String>, style: TextStyle) {
        self.elements.push(Element::Text(TextBox {
            role,
            frame,
            paragraphs,
            style,
            description: None,
        }));
    }

    fn push_card(&mut self, role: Role, frame: Frame, outline: &'static str) {
        self.elements.push(Element::Card(CardShape {
            role,
            frame,
            fill: CARD_FILL,
            outline,
        }));
    }

    /// All elements with a given role, in drawing order.
    pub fn elements_with(&self, role: Role) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(move |e| e.role() == role)
    }

    /// The first text box with a given role.
    pub fn text(&self, role: Role) -> Option<&TextBox> {
        self.elements_with(role).find_map(Element::as_text)
    }

    /// Every line of text on the page, in drawing order.
    pub fn all_text(&self) -> Vec<&str> {
        self.elements
            .iter()
            .filter_map(Element::as_text)
            .flat_map(|t| t.paragraphs.iter().map(String::as_str))
            .collect()
    }

    /// Lowest edge of everything above the footer.
    fn content_bottom(&self) -> f64 {
        self.elements
            .iter()
            .filter(|e| e.role() != Role::Footer)
            .map(|e| e.frame().bottom())
            .fold(0.0, f64::max)
    }

    /// Rightmost edge of any element.
    fn content_right(&self) -> f64 {
        self.elements
            .iter()
            .map(|e| e.frame().right())
            .fold(0.0, f64::max)
    }
}

/// Lay out every slide of a deck, one page per slide in deck order.
pub fn layout_deck(deck: &Deck) -> Vec<Page> {
    let total = deck.len();
    deck.slides()
        .iter()
        .enumerate()
        .map(|(idx, slide)| layout_slide(slide, idx + 1, total))
        .collect()
}

/// Lay out one slide as page `number` of `total`.
pub fn layout_slide(slide: &Slide, number: usize, total: usize) -> Page {
    let mut page = Page::new(number);

    page.elements.push(Element::Text(TextBox {
        role: Role::Title,
        frame: Frame::new(CONTENT_X, TITLE_Y, CONTENT_WIDTH, TITLE_HEIGHT),
        paragraphs: vec![slide.title.clone()],
        style: TITLE_STYLE,
        description: slide.image_alt.clone(),
    }));

    let mut cursor = TITLE_Y + TITLE_HEIGHT + BODY_GAP;

    if let Some(subtitle) = &slide.subtitle {
        page.push_text(
            Role::Subtitle,
            Frame::new(CONTENT_X, cursor, CONTENT_WIDTH, SUBTITLE_HEIGHT),
            vec![subtitle.clone()],
            SUBTITLE_STYLE,
        );
        cursor += SUBTITLE_HEIGHT;
    }

    if !slide.bullets.is_empty() || !slide.stats.is_empty() {
        let top = cursor + BODY_GAP;
        let left = place_bullets(&mut page, &slide.bullets, top);
        let right = place_stats(&mut page, &slide.stats, top);
        cursor = top + left.max(right) + SECTION_GAP;
    }

    if !slide.spotlight.is_empty() {
        cursor += place_spotlight(&mut page, &slide.spotlight, cursor) + SECTION_GAP;
    }

    if let Some(quote) = &slide.quote {
        let top = cursor.max(QUOTE_MIN_Y).min(QUOTE_MAX_Y);
        if cursor > top {
            log::warn!(
                "Slide {} ('{}') body reaches {:.2}in and runs under the quote",
                number,
                slide.id,
                cursor
            );
        }
        place_quote(&mut page, quote, top);
    }

    let (footer, style) = match &slide.footer {
        Some(footer) => (footer.clone(), CUSTOM_FOOTER_STYLE),
        None => (format!("Slide {} of {}", number, total), DEFAULT_FOOTER_STYLE),
    };
    page.push_text(
        Role::Footer,
        Frame::new(CONTENT_X, FOOTER_Y, CONTENT_WIDTH, FOOTER_HEIGHT),
        vec![footer],
        style,
    );

    if page.content_bottom() > FOOTER_Y {
        log::warn!(
            "Slide {} ('{}') content reaches {:.2}in and overlaps the footer",
            number,
            slide.id,
            page.content_bottom()
        );
    }
    if page.content_right() > PAGE_WIDTH {
        log::warn!(
            "Slide {} ('{}') content reaches {:.2}in and runs off the right edge",
            number,
            slide.id,
            page.content_right()
        );
    }

    page
}

/// Returns the height used, zero when there are no bullets.
fn place_bullets(page: &mut Page, bullets: &[String], top: f64) -> f64 {
    if bullets.is_empty() {
        return 0.0;
    }

    let height = bullets.len() as f64 * BULLET_LINE_HEIGHT;
    let lines = bullets
        .iter()
        .map(|b| format!("{} {}", BULLET_GLYPH, b))
        .collect();

    page.push_text(
        Role::Bullets,
        Frame::new(BULLETS_X, top, BULLETS_WIDTH, height),
        lines,
        BULLETS_STYLE,
    );

    height
}

/// Returns the height of the stat column, zero when there are no stats.
fn place_stats(page: &mut Page, stats: &[Stat], top: f64) -> f64 {
    if stats.is_empty() {
        return 0.0;
    }

    let inner_x = STATS_X + CARD_PADDING;
    let inner_w = STATS_WIDTH - 2.0 * CARD_PADDING;

    for (idx, stat) in stats.iter().enumerate() {
        let y = top + idx as f64 * STAT_PITCH;
        page.push_card(
            Role::StatCard,
            Frame::new(STATS_X, y, STATS_WIDTH, STAT_CARD_HEIGHT),
            "22D3EE",
        );
        page.push_text(
            Role::StatValue,
            Frame::new(inner_x, y + 0.08, inner_w, 0.5),
            vec![stat.value.clone()],
            STAT_VALUE_STYLE,
        );
        page.push_text(
            Role::StatLabel,
            Frame::new(inner_x, y + 0.58, inner_w, 0.35),
            vec![stat.label.clone()],
            STAT_LABEL_STYLE,
        );
    }

    (stats.len() - 1) as f64 * STAT_PITCH + STAT_CARD_HEIGHT
}

/// Returns the row height.
fn place_spotlight(page: &mut Page, items: &[SpotlightItem], top: f64) -> f64 {
    let inner_w = SPOTLIGHT_CARD_WIDTH - 2.0 * CARD_PADDING;

    for (idx, item) in items.iter().enumerate() {
        let x = SPOTLIGHT_X + idx as f64 * SPOTLIGHT_PITCH;
        let inner_x = x + CARD_PADDING;

        page.push_card(
            Role::SpotlightCard,
            Frame::new(x, top, SPOTLIGHT_CARD_WIDTH, SPOTLIGHT_CARD_HEIGHT),
            "0EA5E9",
        );
        page.push_text(
            Role::SpotlightLabel,
            Frame::new(inner_x, top + 0.15, inner_w, 0.3),
            vec![item.label.to_uppercase()],
            SPOTLIGHT_LABEL_STYLE,
        );
        page.push_text(
            Role::SpotlightValue,
            Frame::new(inner_x, top + 0.45, inner_w, 0.6),
            vec![item.value.clone()],
            SPOTLIGHT_VALUE_STYLE,
        );
        if let Some(description) = &item.description {
            page.push_text(
                Role::SpotlightDescription,
                Frame::new(inner_x, top + 1.1, inner_w, 0.35),
                vec![description.clone()],
                SPOTLIGHT_DESCRIPTION_STYLE,
            );
        }
    }

    SPOTLIGHT_CARD_HEIGHT
}

fn place_quote(page: &mut Page, quote: &Quote, top: f64) {
    let inner_x = QUOTE_X + 0.25;
    let inner_w = QUOTE_WIDTH - 0.5;

    page.push_card(
        Role::QuoteCard,
        Frame::new(QUOTE_X, top, QUOTE_WIDTH, QUOTE_HEIGHT),
        "0EA5E9",
    );
    page.push_text(
        Role::QuoteText,
        Frame::new(inner_x, top + 0.12, inner_w, 0.7),
        vec![quote.quoted_text()],
        QUOTE_TEXT_STYLE,
    );
    page.push_text(
        Role::QuoteAttribution,
        Frame::new(inner_x, top + 0.82, inner_w, 0.35),
        vec![quote.attribution()],
        QUOTE_ATTRIBUTION_STYLE,
    );
}
