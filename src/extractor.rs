use log::debug;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::config::ExtractorConfig;
use crate::error::{Result, ScrapeError};

/// Footnote markers and editorial notes: `[1]`, `[a]`, `[citation needed]`.
const CITATION_PATTERN: &str = r"\[.*?\]";

/// Picks the first `<p>` with a `<b>` and more than `min_paragraph_chars` chars.
/// Best effort: intros bold the subject's name, captions and hatnotes are short.
pub struct Extractor {
    paragraph_selector: Selector,
    emphasis_selector: Selector,
    emphasis_source: String,
    citation_regex: Regex,
    min_chars: usize,
}

impl Extractor {
    pub fn new(config: &ExtractorConfig) -> Result<Self> {
        Ok(Extractor {
            paragraph_selector: parse_selector(&config.paragraph_selector)?,
            emphasis_selector: parse_selector(&config.emphasis_selector)?,
            emphasis_source: config.emphasis_selector.clone(),
            citation_regex: Regex::new(CITATION_PATTERN)
                .map_err(|e| ScrapeError::Config(format!("citation pattern: {}", e)))?,
            min_chars: config.min_paragraph_chars,
        })
    }

    /// Cleaned text of the first qualifying paragraph in `html`.
    pub fn extract_first_paragraph(&self, html: &str) -> Result<String> {
        let document = Html::parse_document(html);

        let found = document
            .select(&self.paragraph_selector)
            .map(|p| (p, p.text().collect::<String>()))
            .find(|(p, text)| self.qualifies(p, text));

        match found {
            Some((_, text)) => {
                debug!("Qualifying paragraph found ({} chars).", text.chars().count());
                Ok(self.strip_citations(&text))
            }
            None => Err(ScrapeError::NoQualifyingParagraph {
                selector: self.emphasis_source.clone(),
                min_chars: self.min_chars,
            }),
        }
    }

    fn qualifies(&self, paragraph: &ElementRef, text: &str) -> bool {
        paragraph.select(&self.emphasis_selector).next().is_some()
            && text.chars().count() > self.min_chars
    }

    /// Drops every `[...]` span, then trims. Applying it twice changes nothing.
    pub fn strip_citations(&self, text: &str) -> String {
        self.citation_regex.replace_all(text, "").trim().to_string()
    }
}

fn parse_selector(source: &str) -> Result<Selector> {
    Selector::parse(source)
        .map_err(|e| ScrapeError::Config(format!("selector {:?}: {}", source, e)))
}
