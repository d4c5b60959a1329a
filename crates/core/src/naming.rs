//! Deterministic file naming for exported documents.
//!
//! The export filename is derived from the deck's subject, never from slide
//! content, so repeated exports of the same deck always land on the same name.

use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Runs of anything that is not an ASCII letter or digit.
static SEPARATOR_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]+").unwrap());

/// Fallback stem when the subject has no usable characters.
const DEFAULT_STEM: &str = "deck";

/// Turn a subject line into a filename-safe stem.
///
/// Accents are stripped via NFKD decomposition, every run of other
/// characters becomes a single `-`, and case is preserved.
pub fn slugify(subject: &str) -> String {
    let ascii: String = subject.nfkd().filter(|c| !is_combining_mark(*c)).collect();

    SEPARATOR_RUN_REGEX
        .replace_all(&ascii, "-")
        .trim_matches('-')
        .to_string()
}

/// Build `<slug>.<extension>` for a subject.
pub fn file_name_for(subject: &str, extension: &str) -> String {
    let stem = slugify(subject);
    let stem = if stem.is_empty() { DEFAULT_STEM } else { &stem };
    format!("{}.{}", stem, extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_for_subject() {
        assert_eq!(
            file_name_for("F STSC Department Overview", "pptx"),
            "F-STSC-Department-Overview.pptx"
        );
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("  Mission & Vision  "), "Mission-Vision");
        assert_eq!(slugify("2025 -- Roadmap!"), "2025-Roadmap");
    }

    #[test]
    fn test_slugify_strips_diacritics() {
        assert_eq!(slugify("São Paulo Résumé"), "Sao-Paulo-Resume");
    }

    #[test]
    fn test_empty_subject_falls_back() {
        assert_eq!(file_name_for("!!!", "pptx"), "deck.pptx");
        assert_eq!(file_name_for("", "pptx"), "deck.pptx");
    }
}
