mod fields;
mod reply;

pub use fields::{Field, FieldExtractor, FieldSet, Images};
pub use reply::{ReplyDetails, ReplyState};

pub use crate::log_debug;
use crate::error::{Result, ScraperError};
use scraper::{ElementRef, Html, Selector};

/// Reply tables carry this exact class signature, trailing spaces included.
const REPLY_SELECTOR: &str = r#"table[class="tweet  "]"#;

pub struct Scraper {
    document: Html,
}

impl Scraper {
    /// Parses a thread page. html5ever recovers from malformed markup and
    /// builds a tree even from whitespace, so the only failure is an empty body.
    pub fn parse(html: &str) -> Result<Self> {
        if html.is_empty() {
            return Err(ScraperError::ParseError("document is empty".to_string()).into());
        }

        let document = Html::parse_document(html);
        if !document.errors.is_empty() {
            log_debug!(
                "[scraper] Recovered from {} markup errors",
                document.errors.len()
            );
        }

        Ok(Self { document })
    }

    /// Reply nodes in document order.
    pub fn replies(&self) -> Result<Vec<ElementRef<'_>>> {
        let selector = Selector::parse(REPLY_SELECTOR)
            .map_err(|e| ScraperError::SelectorError(e.to_string()))?;
        Ok(self.document.select(&selector).collect())
    }
}
