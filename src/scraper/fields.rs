use crate::error::{Result, ScraperError};
use regex::Regex;
use scraper::ElementRef;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Username,
    Content,
    Date,
    Image,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Username,
        Field::Content,
        Field::Date,
        Field::Image,
    ];

    /// Pattern matched against the flattened reply markup. Group 1 holds the
    /// value.
    fn pattern(self) -> &'static str {
        match self {
            Field::Name => r#"(?i)<strong class="fullname">(.*?)</strong>"#,
            Field::Username => r#"(?i)<span class="username">\s?<span>@</span>(.*?)</span>"#,
            Field::Content => r#"(?i)<div class="dir-ltr" dir="ltr">(.*?)</div>"#,
            Field::Date => r#"(?i)<td class="timestamp">(.*?)</td>"#,
            Field::Image => r#"(?i)<img\b[^>]*?\ssrc="([^"]*)""#,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Images {
    pub thumbnail: Option<String>,
    pub large: Option<String>,
}

impl Images {
    pub fn from_thumbnail(thumbnail: Option<String>) -> Self {
        let large = thumbnail.as_deref().map(large_variant);
        Self { thumbnail, large }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FieldSet {
    pub username: Option<String>,
    pub name: Option<String>,
    pub content: Option<String>,
    pub date: Option<String>,
    pub images: Images,
}

/// Pulls author, text, timestamp and avatar out of a reply's markup.
pub struct FieldExtractor {
    patterns: Vec<(Field, Regex)>,
    line_breaks: Regex,
    blanks: Regex,
    tags: Regex,
}

impl FieldExtractor {
    pub fn new() -> Result<Self> {
        let patterns = Field::ALL
            .iter()
            .map(|field| Ok((*field, compile(field.pattern())?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            patterns,
            line_breaks: compile(r"[\r\n]+")?,
            blanks: compile(r"[ \t]+")?,
            tags: compile(r"<[^>]*>")?,
        })
    }

    pub fn extract(&self, node: &ElementRef) -> FieldSet {
        self.extract_from_markup(&node.inner_html())
    }

    pub fn extract_from_markup(&self, markup: &str) -> FieldSet {
        let flat = self.flatten(markup);

        FieldSet {
            username: self.retrieve(Field::Username, &flat),
            name: self.retrieve(Field::Name, &flat),
            content: self.retrieve(Field::Content, &flat),
            date: self.retrieve(Field::Date, &flat),
            images: Images::from_thumbnail(self.retrieve(Field::Image, &flat)),
        }
    }

    /// Collapses whitespace runs and drops line breaks so every pattern can
    /// match on a single line.
    fn flatten(&self, markup: &str) -> String {
        let single_breaks = self.line_breaks.replace_all(markup, "\n");
        let single_blanks = self.blanks.replace_all(&single_breaks, " ");
        single_blanks.replace('\n', "")
    }

    fn retrieve(&self, field: Field, flat: &str) -> Option<String> {
        let regex = self
            .patterns
            .iter()
            .find_map(|(f, regex)| (*f == field).then_some(regex))?;

        let captured = regex.captures(flat)?.get(1)?.as_str();
        let text = unescape(&self.tags.replace_all(captured, ""));
        let text = text.trim();

        (!text.is_empty()).then(|| text.to_string())
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| ScraperError::PatternError(e.to_string()).into())
}

/// Avatar URLs come in size variants; dropping `_normal` yields the full size.
pub fn large_variant(thumbnail: &str) -> String {
    thumbnail.replacen("_normal.", ".", 1)
}

fn unescape(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
