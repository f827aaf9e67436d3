mod fetcher;
mod lookup;
mod types;

pub use fetcher::DocumentFetcher;
pub use lookup::PostLookup;
pub use types::{Conversation, ConversationResponse, Direction, ReplyRecord, ThreadId};

use crate::config::Config;
use crate::error::{AppError, ConversationError, Result, ScraperError};
use crate::scraper::{FieldExtractor, ReplyDetails, Scraper};
pub use crate::{log_debug, log_info, log_warn};
use std::fmt;

/// How much to build for each qualifying reply.
#[derive(Clone, Copy)]
pub enum Mode<'a> {
    /// Id and state only.
    Ids,
    /// Id, state and the fields read from the reply markup.
    Data,
    /// Id, state and the full post from `lookup`, attached as `tweet`.
    Enrich(&'a dyn PostLookup),
}

impl fmt::Debug for Mode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Ids => f.write_str("Ids"),
            Mode::Data => f.write_str("Data"),
            Mode::Enrich(_) => f.write_str("Enrich(..)"),
        }
    }
}

impl Mode<'_> {
    fn extracts_fields(&self) -> bool {
        matches!(self, Mode::Data)
    }
}

/// Fetches thread pages and turns them into reply lists.
pub struct ConversationScraper {
    fetcher: DocumentFetcher,
    raw_html: Option<String>,
}

impl ConversationScraper {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            fetcher: DocumentFetcher::from_config(config)?,
            raw_html: None,
        })
    }

    /// Markup of the most recent fetch, exactly as received.
    pub fn raw_html(&self) -> Option<&str> {
        self.raw_html.as_deref()
    }

    pub async fn fetch_conversation(
        &mut self,
        thread_id: &str,
        mode: Mode<'_>,
        direction: Direction,
    ) -> Result<Conversation> {
        self.raw_html = None;

        let thread_id: ThreadId = thread_id.parse()?;
        let html = self.fetcher.fetch(thread_id).await?;
        let html = self.raw_html.insert(html);

        build_conversation(html, thread_id, mode, direction).await
    }
}

/// Runs the parse, classify and extract steps over already fetched markup.
pub async fn build_conversation(
    html: &str,
    thread_id: ThreadId,
    mode: Mode<'_>,
    direction: Direction,
) -> Result<Conversation> {
    let mut tweets = collect_replies(html, thread_id, mode.extracts_fields(), direction)?;

    if let Mode::Enrich(lookup) = mode {
        enrich(&mut tweets, lookup).await;
    }

    log_info!(
        "[conversation] Thread {}: {} replies ({:?})",
        thread_id,
        tweets.len(),
        direction
    );
    Ok(Conversation { thread_id, tweets })
}

// The parsed tree is not Send, so it is confined to this synchronous step.
fn collect_replies(
    html: &str,
    thread_id: ThreadId,
    with_fields: bool,
    direction: Direction,
) -> Result<Vec<ReplyRecord>> {
    let scraper = Scraper::parse(html).map_err(|e| match e {
        AppError::Scraper(ScraperError::ParseError(reason)) => {
            ConversationError::Parse(reason).into()
        }
        other => other,
    })?;
    let nodes = scraper.replies()?;
    log_debug!("[conversation] Found {} reply nodes", nodes.len());

    let extractor = if with_fields {
        Some(FieldExtractor::new()?)
    } else {
        None
    };

    let mut records = Vec::new();
    for node in &nodes {
        let Some(details) = ReplyDetails::classify(node, thread_id) else {
            log_debug!("[conversation] Skipping reply node without a usable id");
            continue;
        };

        if direction.stops_at(details.state) {
            break;
        }
        if !direction.admits(details.state) {
            continue;
        }

        records.push(ReplyRecord {
            id: details.id,
            state: details.state,
            fields: extractor.as_ref().map(|extractor| extractor.extract(node)),
            tweet: None,
        });
    }

    Ok(records)
}

async fn enrich(records: &mut [ReplyRecord], lookup: &dyn PostLookup) {
    for record in records.iter_mut() {
        match lookup.post_by_id(record.id).await {
            Ok(post) => record.tweet = Some(post),
            Err(e) => {
                log_warn!("[conversation] Lookup of reply {} failed: {}", record.id, e);
            }
        }
    }
}
