//! Domain types for representing the slide deck.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Document-level metadata for a deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckInfo {
    /// Deck title, also the subject the export filename is derived from.
    pub title: String,

    /// Author written into the document properties.
    pub author: String,

    /// Company written into the document properties.
    pub company: String,
}

impl DeckInfo {
    /// Create deck metadata.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        company: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            company: company.into(),
        }
    }

    /// Filename the exported document is saved under.
    pub fn export_file_name(&self) -> String {
        crate::naming::file_name_for(&self.title, "pptx")
    }
}

/// An ordered, immutable sequence of slides.
///
/// Validated once at construction; there is no way to mutate a deck after
/// that, so viewers and the exporter can share it freely.
#[derive(Debug, Clone, Serialize)]
pub struct Deck {
    info: DeckInfo,
    slides: Vec<Slide>,
}

impl Deck {
    /// Build a deck, checking that it is non-empty, every slide has a
    /// title and every id is unique.
    pub fn new(info: DeckInfo, slides: Vec<Slide>) -> Result<Self> {
        if slides.is_empty() {
            return Err(Error::InvalidDeck("a deck needs at least one slide".into()));
        }

        let mut seen = HashSet::new();
        for (idx, slide) in slides.iter().enumerate() {
            if slide.title.trim().is_empty() {
                return Err(Error::InvalidDeck(format!(
                    "slide {} ('{}') has no title",
                    idx + 1,
                    slide.id
                )));
            }
            if !seen.insert(slide.id.as_str()) {
                return Err(Error::InvalidDeck(format!(
                    "duplicate slide id '{}'",
                    slide.id
                )));
            }
        }

        log::debug!("Built deck '{}' with {} slides", info.title, slides.len());

        Ok(Self { info, slides })
    }

    /// Deck metadata.
    pub fn info(&self) -> &DeckInfo {
        &self.info
    }

    /// Slides in presentation order.
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Number of slides. Always at least one.
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Always false for a constructed deck.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Slide at a 0-based index.
    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }
}

/// A single slide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    /// Unique, stable identifier.
    pub id: String,

    /// Heading text.
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    /// Bullet lines in reading order. Empty means "no bullets".
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bullets: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stats: Vec<Stat>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spotlight: Vec<SpotlightItem>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<Quote>,

    /// Alternative text for artwork associated with the slide.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_alt: Option<String>,

    /// Replaces the default "Slide N of TOTAL" indicator when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
}

impl Slide {
    /// Create a slide with only an id and a title.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: None,
            bullets: Vec::new(),
            stats: Vec::new(),
            spotlight: Vec::new(),
            quote: None,
            image_alt: None,
            footer: None,
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_bullets<I, S>(mut self, bullets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bullets = bullets.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_stats<I>(mut self, stats: I) -> Self
    where
        I: IntoIterator<Item = Stat>,
    {
        self.stats = stats.into_iter().collect();
        self
    }

    pub fn with_spotlight<I>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = SpotlightItem>,
    {
        self.spotlight = items.into_iter().collect();
        self
    }

    pub fn with_quote(mut self, quote: Quote) -> Self {
        self.quote = Some(quote);
        self
    }

    pub fn with_image_alt(mut self, alt: impl Into<String>) -> Self {
        self.image_alt = Some(alt.into());
        self
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Small uppercase label shown above the title in the viewers.
    pub fn kicker(&self) -> String {
        self.id.replace('-', " ").to_uppercase()
    }
}

/// A label/value metric card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub label: String,
    pub value: String,
}

impl Stat {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A highlighted call-out card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotlightItem {
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SpotlightItem {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// An attributed quotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Quote {
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
            role: None,
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// The quoted text wrapped in typographic quotation marks.
    pub fn quoted_text(&self) -> String {
        format!("\u{201C}{}\u{201D}", self.text)
    }

    /// Author, followed by the role when one is given.
    pub fn attribution(&self) -> String {
        match &self.role {
            Some(role) => format!("{} \u{2014} {}", self.author, role),
            None => self.author.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> DeckInfo {
        DeckInfo::new("Test Deck", "Author", "Company")
    }

    #[test]
    fn test_deck_rejects_empty() {
        let err = Deck::new(info(), Vec::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidDeck(_)));
    }

    #[test]
    fn test_deck_rejects_blank_title() {
        let slides = vec![Slide::new("a", "Title"), Slide::new("b", "   ")];
        let err = Deck::new(info(), slides).unwrap_err();
        assert!(err.to_string().contains("slide 2"));
    }

    #[test]
    fn test_deck_rejects_duplicate_ids() {
        let slides = vec![Slide::new("a", "One"), Slide::new("a", "Two")];
        let err = Deck::new(info(), slides).unwrap_err();
        assert!(err.to_string().contains("duplicate slide id 'a'"));
    }

    #[test]
    fn test_deck_preserves_order() {
        let slides = vec![
            Slide::new("first", "First"),
            Slide::new("second", "Second"),
            Slide::new("third", "Third"),
        ];
        let deck = Deck::new(info(), slides).unwrap();

        let ids: Vec<&str> = deck.slides().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
        assert_eq!(deck.len(), 3);
        assert!(!deck.is_empty());
    }

    #[test]
    fn test_kicker() {
        assert_eq!(Slide::new("call-to-action", "CTA").kicker(), "CALL TO ACTION");
        assert_eq!(Slide::new("cover", "Cover").kicker(), "COVER");
    }

    #[test]
    fn test_quote_attribution() {
        let quote = Quote::new("Onward", "Dr. Amina Rios");
        assert_eq!(quote.attribution(), "Dr. Amina Rios");
        assert_eq!(quote.quoted_text(), "\u{201C}Onward\u{201D}");

        let quote = quote.with_role("Dean");
        assert_eq!(quote.attribution(), "Dr. Amina Rios \u{2014} Dean");
    }

    #[test]
    fn test_slide_serializes_camel_case_and_skips_absent_fields() {
        let slide = Slide::new("cover", "Cover").with_image_alt("Campus at dawn");
        let json = serde_json::to_string(&slide).unwrap();
        assert!(json.contains("\"imageAlt\":\"Campus at dawn\""));
        assert!(!json.contains("bullets"));
        assert!(!json.contains("footer"));
    }
}
