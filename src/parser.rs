//! Extraction of hourly temperature readings from history page markup.

use scraper::{Html, Selector};

use crate::config::DEFAULT_SELECTOR;
use crate::error::{Result, ScrapeError};

/// Turns one page of markup into the hourly readings it contains, in page order.
///
/// Pages change shape over time, so the pipeline only depends on this trait
/// and the concrete strategy is picked at startup.
pub trait ReadingExtractor {
    /// Returns an empty vector when the page holds no readings at all.
    fn extract(&self, markup: &str) -> Result<Vec<i32>>;
}

/// Reads every element matching a CSS selector, `span.temp` by default, and
/// parses its text as `NN°`.
#[derive(Debug, Clone)]
pub struct SpanClassExtractor {
    selector: Selector,
}

impl SpanClassExtractor {
    /// # Errors
    ///
    /// Returns [`ScrapeError::InvalidSelector`] if `selector` is not valid CSS.
    pub fn new(selector: &str) -> Result<Self> {
        let parsed = Selector::parse(selector).map_err(|e| ScrapeError::InvalidSelector {
            selector: selector.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { selector: parsed })
    }
}

impl Default for SpanClassExtractor {
    fn default() -> Self {
        Self {
            selector: Selector::parse(DEFAULT_SELECTOR).expect("default selector is valid CSS"),
        }
    }
}

impl ReadingExtractor for SpanClassExtractor {
    fn extract(&self, markup: &str) -> Result<Vec<i32>> {
        let document = Html::parse_document(markup);
        document
            .select(&self.selector)
            .map(|element| parse_reading(&element.text().collect::<String>()))
            .collect()
    }
}

/// Parses `72°`, `-3°` or a bare `72` into whole degrees.
pub fn parse_reading(text: &str) -> Result<i32> {
    let trimmed = text.trim();
    let digits = trimmed.strip_suffix('°').unwrap_or(trimmed).trim_end();

    digits.parse::<i32>().map_err(|_| {
        ScrapeError::parse(
            "temperature reading",
            format!("`{trimmed}` is not a whole number of degrees"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(spans: &[&str]) -> String {
        let body: String = spans
            .iter()
            .map(|s| format!(r#"<tr><td><span class="temp">{s}</span></td></tr>"#))
            .collect();
        format!("<html><body><table>{body}</table></body></html>")
    }

    #[test]
    fn test_extracts_readings_in_page_order() {
        let markup = page(&["68°", "70°", "72°", "74°"]);
        let readings = SpanClassExtractor::default().extract(&markup).unwrap();
        assert_eq!(readings, vec![68, 70, 72, 74]);
    }

    #[test]
    fn test_page_without_matches_is_empty_not_error() {
        let markup = r#"<html><body><span class="humidity">40%</span></body></html>"#;
        let readings = SpanClassExtractor::default().extract(markup).unwrap();
        assert!(readings.is_empty());
    }

    #[test]
    fn test_malformed_reading_is_parse_error() {
        let markup = page(&["68°", "N/A"]);
        let result = SpanClassExtractor::default().extract(&markup);
        assert!(matches!(result, Err(ScrapeError::Parse { .. })));
    }

    #[test]
    fn test_only_tagged_spans_are_read() {
        let markup = r#"<span class="temp">50°</span><span class="feels">99°</span><div class="temp">51°</div>"#;
        let readings = SpanClassExtractor::default().extract(markup).unwrap();
        assert_eq!(readings, vec![50]);
    }

    #[test]
    fn test_custom_selector() {
        let markup =
            r#"<table><tr><td data-kind="t"> 12° </td><td data-kind="t">-4°</td></tr></table>"#;
        let extractor = SpanClassExtractor::new(r#"td[data-kind="t"]"#).unwrap();
        assert_eq!(extractor.extract(markup).unwrap(), vec![12, -4]);
    }

    #[test]
    fn test_invalid_selector_is_rejected() {
        assert!(matches!(
            SpanClassExtractor::new("span..temp"),
            Err(ScrapeError::InvalidSelector { .. })
        ));
    }

    #[test]
    fn test_parse_reading_forms() {
        assert_eq!(parse_reading("72°").unwrap(), 72);
        assert_eq!(parse_reading(" -3° ").unwrap(), -3);
        assert_eq!(parse_reading("65").unwrap(), 65);
        assert!(parse_reading("72.5°").is_err());
        assert!(parse_reading("°").is_err());
        assert!(parse_reading("").is_err());
    }
}
