use crate::conversation::ThreadId;
use scraper::ElementRef;
use serde::Serialize;

/// Position of a reply relative to the root post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplyState {
    Before,
    After,
}

impl ReplyState {
    /// Ids grow with time, so a smaller id is an earlier post. Equal ids
    /// count as `After`.
    pub fn relative_to(reply_id: u64, thread_id: ThreadId) -> Self {
        if reply_id < thread_id.get() {
            ReplyState::Before
        } else {
            ReplyState::After
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyDetails {
    pub id: u64,
    pub state: ReplyState,
}

impl ReplyDetails {
    /// Reads the reply id from the node's permalink. Nodes without a usable
    /// id are not replies and yield `None`.
    pub fn classify(node: &ElementRef, thread_id: ThreadId) -> Option<Self> {
        let id = reply_id_from_permalink(node.value().attr("href")?)?;
        Some(Self {
            id,
            state: ReplyState::relative_to(id, thread_id),
        })
    }
}

/// `/{user}/status/{id}?query` -> `{id}`
fn reply_id_from_permalink(href: &str) -> Option<u64> {
    let segment = href.trim_matches('/').split('/').nth(2)?;
    let id = segment.split('?').next()?;
    if id.is_empty() || !id.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    id.parse::<u64>().ok().filter(|id| *id > 0)
}
